use serde::{Deserialize, Serialize};
use std::fmt;

/// Materialized output of one SQL execution.
///
/// `rows[0]` is the header (column names) when present; every following row is data.
/// All cells arrive pre-stringified from the execution layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularResult {
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_text: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TabularResult {
    pub fn success(rows: Vec<Vec<String>>) -> Self {
        Self {
            succeeded: true,
            error_text: String::new(),
            rows,
        }
    }

    pub fn failure(error_text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error_text: error_text.into(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkItem {
    pub id: String,
    #[serde(default)]
    pub database_name: String,
    #[serde(default)]
    pub question: String,
    #[serde(alias = "gold_sql")]
    pub reference_sql: String,
    #[serde(alias = "predicted_sql")]
    pub candidate_sql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_tag: Option<String>,
}

/// One benchmark item together with both materialized results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationCase {
    #[serde(flatten)]
    pub item: BenchmarkItem,
    pub gold: TabularResult,
    pub pred: TabularResult,
}

/// Closed error taxonomy. Declaration order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    ExactMatch,
    SemanticMatch,
    #[serde(rename = "spj_correct")]
    SPJCorrect,
    AmbiguousQuery,
    #[serde(rename = "db_connection_error")]
    DBConnectionError,
    ReferenceAnswerError,
    ExecutionError,
    RowCountError,
    ProjectionError,
    DataMismatch,
    OrderError,
    JoinError,
    ConditionError,
    UnknownError,
    OtherError,
}

impl ErrorCategory {
    pub const ALL: [Self; 15] = [
        Self::ExactMatch,
        Self::SemanticMatch,
        Self::SPJCorrect,
        Self::AmbiguousQuery,
        Self::DBConnectionError,
        Self::ReferenceAnswerError,
        Self::ExecutionError,
        Self::RowCountError,
        Self::ProjectionError,
        Self::DataMismatch,
        Self::OrderError,
        Self::JoinError,
        Self::ConditionError,
        Self::UnknownError,
        Self::OtherError,
    ];

    /// Canonical snake_case name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact_match",
            Self::SemanticMatch => "semantic_match",
            Self::SPJCorrect => "spj_correct",
            Self::AmbiguousQuery => "ambiguous_query",
            Self::DBConnectionError => "db_connection_error",
            Self::ReferenceAnswerError => "reference_answer_error",
            Self::ExecutionError => "execution_error",
            Self::RowCountError => "row_count_error",
            Self::ProjectionError => "projection_error",
            Self::DataMismatch => "data_mismatch",
            Self::OrderError => "order_error",
            Self::JoinError => "join_error",
            Self::ConditionError => "condition_error",
            Self::UnknownError => "unknown_error",
            Self::OtherError => "other_error",
        }
    }

    /// Human-readable bucket name used by reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact match",
            Self::SemanticMatch => "semantic match",
            Self::SPJCorrect => "special judge correct",
            Self::AmbiguousQuery => "ambiguous query",
            Self::DBConnectionError => "database connection error",
            Self::ReferenceAnswerError => "reference answer error",
            Self::ExecutionError => "execution error",
            Self::RowCountError => "row count error",
            Self::ProjectionError => "projection error",
            Self::DataMismatch => "data mismatch",
            Self::OrderError => "order error",
            Self::JoinError => "join error",
            Self::ConditionError => "condition error",
            Self::UnknownError => "unknown error",
            Self::OtherError => "other error",
        }
    }

    /// Categories that count an item as answered correctly.
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(
            self,
            Self::ExactMatch | Self::SemanticMatch | Self::SPJCorrect
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub item_id: String,
    pub is_correct: bool,
    pub is_equivalent: bool,
    pub reason: String,
    pub category: ErrorCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_note: Option<String>,
}

impl Judgement {
    pub fn correct(item_id: &str, category: ErrorCategory) -> Self {
        Self {
            item_id: item_id.to_string(),
            is_correct: true,
            is_equivalent: true,
            reason: String::new(),
            category,
            judge_note: None,
        }
    }

    pub fn incorrect(item_id: &str, category: ErrorCategory, reason: impl Into<String>) -> Self {
        Self {
            item_id: item_id.to_string(),
            is_correct: false,
            is_equivalent: false,
            reason: reason.into(),
            category,
            judge_note: None,
        }
    }

    /// Upgrade a negative judgement after a special judge accepted it.
    ///
    /// The base comparison stays recorded as non-equivalent; only correctness flips.
    pub fn accept_by_judge(&mut self, note: String) {
        if self.is_correct {
            return;
        }
        self.is_correct = true;
        self.category = ErrorCategory::SPJCorrect;
        self.judge_note = Some(note);
    }
}
