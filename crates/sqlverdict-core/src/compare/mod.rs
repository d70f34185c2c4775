//! Row-set comparison of a reference (gold) result against a candidate (predicted) result.
//!
//! Columns are aligned by one of three strategies, then rows are compared as a multiset:
//! order is irrelevant, duplicate counts are significant.

use crate::model::TabularResult;
use crate::values::rows_equal;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub mod mapper;

pub use mapper::map_columns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentStrategy {
    ExactColumnNames,
    ContentBasedMapping,
    PositionalComparison,
}

impl AlignmentStrategy {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ExactColumnNames => "exact_column_names",
            Self::ContentBasedMapping => "content_based_mapping",
            Self::PositionalComparison => "positional_comparison",
        }
    }

    /// Reason reported when rows still differ after alignment with this strategy.
    pub const fn mismatch_reason(self) -> &'static str {
        match self {
            Self::ExactColumnNames => "data mismatch",
            Self::ContentBasedMapping => "column name mismatch and data mapping failed",
            Self::PositionalComparison => "column name mismatch and positional data mismatch",
        }
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub equivalent: bool,
    pub reason: String,
    /// Alignment used for the row comparison, if the comparison got that far.
    pub strategy: Option<AlignmentStrategy>,
}

impl Comparison {
    fn equivalent(strategy: Option<AlignmentStrategy>) -> Self {
        Self {
            equivalent: true,
            reason: String::new(),
            strategy,
        }
    }

    fn mismatch(reason: String, strategy: Option<AlignmentStrategy>) -> Self {
        Self {
            equivalent: false,
            reason,
            strategy,
        }
    }
}

pub fn reference_failure_reason(error_text: &str) -> String {
    format!("reference SQL execution failed: {}", error_text)
}

pub fn candidate_failure_reason(error_text: &str) -> String {
    format!("candidate SQL execution failed: {}", error_text)
}

fn row_count_reason(gold: usize, pred: usize) -> String {
    format!(
        "row count mismatch: gold has {} rows, predicted has {} rows",
        gold, pred
    )
}

/// Lower-cased header names mapped to their column index; later duplicates win.
fn header_index(result: &TabularResult) -> HashMap<String, usize> {
    result
        .header()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_lowercase(), i))
        .collect()
}

fn cell(row: &[String], col: usize) -> String {
    row.get(col).cloned().unwrap_or_default()
}

struct Aligned {
    strategy: AlignmentStrategy,
    gold: Vec<Vec<String>>,
    pred: Vec<Vec<String>>,
}

fn align(
    gold: &TabularResult,
    pred: &TabularResult,
    gold_cols: &HashMap<String, usize>,
    pred_cols: &HashMap<String, usize>,
) -> Aligned {
    if gold_cols.keys().all(|name| pred_cols.contains_key(name)) {
        let mut names: Vec<&String> = gold_cols.keys().collect();
        names.sort();
        let project = |rows: &[Vec<String>], cols: &HashMap<String, usize>| -> Vec<Vec<String>> {
            rows.iter()
                .map(|row| names.iter().map(|n| cell(row, cols[n.as_str()])).collect())
                .collect()
        };
        return Aligned {
            strategy: AlignmentStrategy::ExactColumnNames,
            gold: project(gold.data_rows(), gold_cols),
            pred: project(pred.data_rows(), pred_cols),
        };
    }

    if let Some(mapping) = map_columns(gold, pred) {
        return Aligned {
            strategy: AlignmentStrategy::ContentBasedMapping,
            gold: gold.data_rows().to_vec(),
            pred: pred
                .data_rows()
                .iter()
                .map(|row| mapping.iter().map(|&j| cell(row, j)).collect())
                .collect(),
        };
    }

    Aligned {
        strategy: AlignmentStrategy::PositionalComparison,
        gold: gold.data_rows().to_vec(),
        pred: pred.data_rows().to_vec(),
    }
}

/// Occurrence count per distinct row. Duplicates are preserved as counts.
fn row_counts(rows: Vec<Vec<String>>) -> BTreeMap<Vec<String>, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row).or_insert(0) += 1;
    }
    counts
}

/// Decides whether two materialized results carry the same answer.
pub fn compare_results(gold: &TabularResult, pred: &TabularResult) -> Comparison {
    if !gold.succeeded {
        return Comparison::mismatch(reference_failure_reason(&gold.error_text), None);
    }
    if !pred.succeeded {
        return Comparison::mismatch(candidate_failure_reason(&pred.error_text), None);
    }

    let gold_n = gold.data_row_count();
    let pred_n = pred.data_row_count();

    if gold_n == 0 && pred_n == 0 {
        return Comparison::equivalent(None);
    }
    if gold_n != pred_n {
        return Comparison::mismatch(row_count_reason(gold_n, pred_n), None);
    }

    let gold_cols = header_index(gold);
    let pred_cols = header_index(pred);
    if gold_cols.len() != pred_cols.len() {
        return Comparison::mismatch(
            format!(
                "column count mismatch: gold has {} columns, predicted has {} columns",
                gold_cols.len(),
                pred_cols.len()
            ),
            None,
        );
    }

    let aligned = align(gold, pred, &gold_cols, &pred_cols);
    let strategy = aligned.strategy;
    let gold_counts = row_counts(aligned.gold);
    let pred_counts = row_counts(aligned.pred);

    if gold_counts.len() != pred_counts.len() {
        return Comparison::mismatch(
            format!(
                "data mismatch: {} distinct gold rows vs {} distinct predicted rows ({})",
                gold_counts.len(),
                pred_counts.len(),
                strategy
            ),
            Some(strategy),
        );
    }

    for (row, count) in &gold_counts {
        if pred_counts.get(row) == Some(count) {
            continue;
        }
        let loose = pred_counts
            .iter()
            .any(|(candidate, c)| c == count && rows_equal(row, candidate));
        if !loose {
            tracing::debug!(strategy = %strategy, row = ?row, "no matching candidate row");
            return Comparison::mismatch(
                format!("{} ({})", strategy.mismatch_reason(), strategy),
                Some(strategy),
            );
        }
    }

    Comparison::equivalent(Some(strategy))
}
