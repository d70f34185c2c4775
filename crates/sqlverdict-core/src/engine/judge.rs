use crate::classify::{classify_execution_failure, classify_reason, FailedSide};
use crate::compare::{candidate_failure_reason, compare_results, reference_failure_reason};
use crate::model::{ErrorCategory, EvaluationCase, Judgement};
use crate::normalize::is_exact_match;
use crate::spj::{SpjInput, SpjRegistry};
use crate::stats::RunStatistics;

/// Leading keywords of statements the execution layer can run.
const STATEMENT_KEYWORDS: &[&str] = &[
    "select", "with", "values", "table", "show", "describe", "desc", "explain", "pragma",
];

/// Special judge attempt made while judging one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpjAttempt {
    pub tag: String,
    pub accepted: bool,
}

/// Judgement for one item plus the side information the statistics need.
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub judgement: Judgement,
    pub spj: Option<SpjAttempt>,
}

impl ItemOutcome {
    fn plain(judgement: Judgement) -> Self {
        Self {
            judgement,
            spj: None,
        }
    }

    pub fn record_into(&self, stats: &mut RunStatistics) {
        stats.record_judgement(&self.judgement);
        if let Some(attempt) = &self.spj {
            stats.record_spj(attempt.accepted);
        }
    }
}

fn strip_leading_comments(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail).trim_start();
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail).trim_start();
        } else {
            return rest;
        }
    }
}

/// Structural check of the candidate text before any result is looked at.
fn structural_problem(candidate_sql: &str) -> Option<(ErrorCategory, &'static str)> {
    let body = strip_leading_comments(candidate_sql);
    if body.is_empty() {
        return Some((ErrorCategory::ExecutionError, "candidate SQL is empty"));
    }
    if body.starts_with('(') {
        return None;
    }
    let first = body
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("")
        .to_lowercase();
    if STATEMENT_KEYWORDS.contains(&first.as_str()) {
        None
    } else {
        Some((
            ErrorCategory::AmbiguousQuery,
            "candidate is not a SQL statement (clarification or refusal)",
        ))
    }
}

/// Produces exactly one judgement for one benchmark item. Never fails.
pub fn judge_item(case: &EvaluationCase, registry: &SpjRegistry) -> ItemOutcome {
    let item = &case.item;
    let id = item.id.as_str();

    if is_exact_match(&item.reference_sql, &item.candidate_sql) {
        return ItemOutcome::plain(Judgement::correct(id, ErrorCategory::ExactMatch));
    }

    if let Some((category, reason)) = structural_problem(&item.candidate_sql) {
        return ItemOutcome::plain(Judgement::incorrect(id, category, reason));
    }

    if !case.gold.succeeded {
        let category = classify_execution_failure(FailedSide::Reference, &case.gold.error_text);
        return ItemOutcome::plain(Judgement::incorrect(
            id,
            category,
            reference_failure_reason(&case.gold.error_text),
        ));
    }
    if !case.pred.succeeded {
        let category = classify_execution_failure(FailedSide::Candidate, &case.pred.error_text);
        return ItemOutcome::plain(Judgement::incorrect(
            id,
            category,
            candidate_failure_reason(&case.pred.error_text),
        ));
    }

    let comparison = compare_results(&case.gold, &case.pred);
    if comparison.equivalent {
        return ItemOutcome::plain(Judgement::correct(id, ErrorCategory::SemanticMatch));
    }

    let mut judgement = Judgement::incorrect(
        id,
        classify_reason(&comparison.reason),
        comparison.reason.clone(),
    );

    let Some(tag) = item.judge_tag.as_deref().filter(|t| !t.trim().is_empty()) else {
        return ItemOutcome::plain(judgement);
    };

    let outcome = registry.apply(
        tag,
        &SpjInput {
            reference_sql: &item.reference_sql,
            candidate_sql: &item.candidate_sql,
            gold: &case.gold,
            pred: &case.pred,
        },
    );
    let accepted = outcome.accepted();
    if accepted {
        judgement.accept_by_judge(outcome.note());
    } else {
        judgement.judge_note = Some(outcome.note());
    }
    tracing::debug!(
        event = "sqlverdict.spj.applied",
        item_id = %id,
        tag = %tag,
        accepted,
        "special judge consulted"
    );

    ItemOutcome {
        judgement,
        spj: Some(SpjAttempt {
            tag: tag.to_string(),
            accepted,
        }),
    }
}
