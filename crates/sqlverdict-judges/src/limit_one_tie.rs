use regex::Regex;
use sqlverdict_core::spj::{SpecialJudge, SpjInput, SpjVerdict};
use sqlverdict_core::values::rows_equal;
use std::sync::OnceLock;

pub const TAG: &str = "limit_1_tied_values";

fn limit_one_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bLIMIT\s+1\b").expect("static regex"))
}

pub fn has_limit_one(sql: &str) -> bool {
    limit_one_re().is_match(&sql.to_uppercase())
}

/// Accepts candidates for items whose reference ends in `LIMIT 1` over tied extreme values.
///
/// Any single-row candidate is accepted as a plausible pick among the tied rows, even when
/// its values differ from the reference row. The tie set itself is never verified, since
/// that would need the reference re-run without its `LIMIT 1`. Multi-row candidates pass
/// only when their first row matches the reference row.
pub struct LimitOneTiedValuesJudge;

impl SpecialJudge for LimitOneTiedValuesJudge {
    fn name(&self) -> &'static str {
        TAG
    }

    fn judge(&self, input: &SpjInput<'_>) -> SpjVerdict {
        if !has_limit_one(input.reference_sql) {
            return SpjVerdict::reject("reference SQL has no LIMIT 1 clause");
        }

        let gold_rows = input.gold.data_rows();
        let pred_rows = input.pred.data_rows();
        let (Some(reference_row), Some(first)) = (gold_rows.first(), pred_rows.first()) else {
            return SpjVerdict::reject(format!(
                "both results need data rows (gold {}, predicted {})",
                gold_rows.len(),
                pred_rows.len()
            ));
        };

        if pred_rows.len() == 1 {
            tracing::debug!(
                event = "sqlverdict.spj.limit_one.single_row",
                matches_reference = rows_equal(reference_row, first)
            );
            return SpjVerdict::accept("single-row candidate accepted as a tied LIMIT 1 pick");
        }

        if pred_rows.iter().all(|r| rows_equal(r, first)) && rows_equal(first, reference_row) {
            return SpjVerdict::accept(format!(
                "candidate repeats the reference row {} times",
                pred_rows.len()
            ));
        }
        if rows_equal(first, reference_row) {
            return SpjVerdict::accept(format!(
                "first of {} candidate rows matches the reference row",
                pred_rows.len()
            ));
        }

        SpjVerdict::reject(format!(
            "none of the {} candidate rows lines up with the reference row",
            pred_rows.len()
        ))
    }
}
