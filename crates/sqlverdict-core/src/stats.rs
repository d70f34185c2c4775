use crate::model::{ErrorCategory, Judgement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-run aggregate of judgement outcomes.
///
/// One instance per run, owned by the run driver. Parallel shards each keep a private
/// instance and fold it in with [`RunStatistics::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total: u64,
    pub correct: u64,
    pub counts: BTreeMap<ErrorCategory, u64>,
    /// `(category, count)` sorted by count descending, ties in category order.
    pub ranked: Vec<(ErrorCategory, u64)>,
    #[serde(rename = "spj_case_count")]
    pub spj_cases: u64,
    #[serde(rename = "spj_correct_count")]
    pub spj_correct: u64,
    #[serde(rename = "spj_incorrect_count")]
    pub spj_incorrect: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one item in exactly one primary bucket.
    pub fn record(&mut self, category: ErrorCategory) {
        self.add(category, 1);
        self.rerank();
    }

    /// Counts a special judge attempt. Independent of the primary buckets.
    pub fn record_spj(&mut self, accepted: bool) {
        self.spj_cases += 1;
        if accepted {
            self.spj_correct += 1;
        } else {
            self.spj_incorrect += 1;
        }
    }

    pub fn record_judgement(&mut self, judgement: &Judgement) {
        self.record(judgement.category);
    }

    /// Adds every counter of `other` into `self`. Associative and commutative.
    pub fn merge(&mut self, other: &RunStatistics) {
        for (&category, &n) in &other.counts {
            self.add(category, n);
        }
        self.spj_cases += other.spj_cases;
        self.spj_correct += other.spj_correct;
        self.spj_incorrect += other.spj_incorrect;
        self.rerank();
    }

    pub fn count(&self, category: ErrorCategory) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn incorrect(&self) -> u64 {
        self.total - self.correct
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    fn add(&mut self, category: ErrorCategory, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(category).or_insert(0) += n;
        self.total += n;
        if category.is_correct() {
            self.correct += n;
        }
        match self.ranked.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += n,
            None => self.ranked.push((category, n)),
        }
    }

    fn rerank(&mut self) {
        self.ranked
            .sort_by(|(ca, na), (cb, nb)| nb.cmp(na).then_with(|| ca.cmp(cb)));
    }
}
