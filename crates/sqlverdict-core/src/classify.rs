//! Mapping of free-text mismatch reasons and execution errors onto [`ErrorCategory`].
//!
//! Rule order is fixed. Moving a rule changes which bucket an ambiguous message lands in,
//! and with it every reported statistic.

use crate::model::ErrorCategory;

const REFERENCE_FAILURE: &[&str] = &[
    "reference sql execution failed",
    "reference sql failed",
    "reference query failed",
    "gold sql execution failed",
    "gold sql failed",
    "gold query failed",
    "reference execution error",
    "gold execution error",
];

const CANDIDATE_FAILURE: &[&str] = &[
    "candidate sql execution failed",
    "candidate sql failed",
    "candidate query failed",
    "predicted sql execution failed",
    "predicted sql failed",
    "predicted query failed",
    "candidate execution error",
    "predicted execution error",
    "syntax error",
];

const ROW_COUNT: &[&str] = &["row count mismatch", "row count differs", "number of rows"];

const COLUMN_NAME: &[&str] = &["column name mismatch", "column names differ"];

const COLUMN_COUNT: &[&str] = &[
    "column count mismatch",
    "column count differs",
    "number of columns",
];

const DATA: &[&str] = &[
    "data mismatch",
    "data mapping failed",
    "value mismatch",
    "values differ",
];

const ORDER: &[&str] = &["order by", "ordering", "order mismatch", "sort order"];

const JOIN: &[&str] = &["join"];

const CONDITION: &[&str] = &["where clause", "condition", "filter", "having"];

/// Markers of an unreachable or unusable database rather than a bad query.
pub const CONNECTION_MARKERS: &[&str] = &[
    "connection refused",
    "could not connect",
    "connection reset",
    "unable to open database",
    "database is locked",
    "timed out",
    "timeout",
    "too many connections",
    "server has gone away",
    "lost connection",
];

fn mentions(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// Which side of the comparison produced an execution error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedSide {
    Reference,
    Candidate,
}

/// Classifies a comparator reason for an inequivalent result. First matching rule wins.
pub fn classify_reason(reason: &str) -> ErrorCategory {
    let text = reason.trim().to_lowercase();
    if text.is_empty() {
        return ErrorCategory::UnknownError;
    }
    if mentions(&text, REFERENCE_FAILURE) {
        return ErrorCategory::ReferenceAnswerError;
    }
    if mentions(&text, CANDIDATE_FAILURE) {
        return ErrorCategory::ExecutionError;
    }
    if mentions(&text, ROW_COUNT) {
        return ErrorCategory::RowCountError;
    }

    let column_name = mentions(&text, COLUMN_NAME);
    let data = mentions(&text, DATA);
    if column_name && data {
        return ErrorCategory::DataMismatch;
    }
    if column_name || mentions(&text, COLUMN_COUNT) {
        return ErrorCategory::ProjectionError;
    }
    if data {
        return ErrorCategory::DataMismatch;
    }

    if mentions(&text, ORDER) {
        return ErrorCategory::OrderError;
    }
    if mentions(&text, JOIN) {
        return ErrorCategory::JoinError;
    }
    if mentions(&text, CONDITION) {
        return ErrorCategory::ConditionError;
    }
    ErrorCategory::OtherError
}

pub fn is_connection_error(error_text: &str) -> bool {
    mentions(&error_text.to_lowercase(), CONNECTION_MARKERS)
}

/// Classifies a raw execution error without running the comparator.
///
/// Connection-class errors are never blamed on either query.
pub fn classify_execution_failure(side: FailedSide, error_text: &str) -> ErrorCategory {
    if is_connection_error(error_text) {
        return ErrorCategory::DBConnectionError;
    }
    match side {
        FailedSide::Reference => ErrorCategory::ReferenceAnswerError,
        FailedSide::Candidate => ErrorCategory::ExecutionError,
    }
}
