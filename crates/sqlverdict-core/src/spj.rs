//! Special judges: named overrides for benchmark items with more than one acceptable answer.

use crate::model::TabularResult;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a judge may look at for one item.
#[derive(Debug, Clone, Copy)]
pub struct SpjInput<'a> {
    pub reference_sql: &'a str,
    pub candidate_sql: &'a str,
    pub gold: &'a TabularResult,
    pub pred: &'a TabularResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpjVerdict {
    pub accepted: bool,
    pub note: String,
}

impl SpjVerdict {
    pub fn accept(note: impl Into<String>) -> Self {
        Self {
            accepted: true,
            note: note.into(),
        }
    }

    pub fn reject(note: impl Into<String>) -> Self {
        Self {
            accepted: false,
            note: note.into(),
        }
    }
}

pub trait SpecialJudge: Send + Sync {
    fn name(&self) -> &'static str;

    fn judge(&self, input: &SpjInput<'_>) -> SpjVerdict;
}

/// Result of dispatching a tag through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpjOutcome {
    Judged(SpjVerdict),
    NoSuchJudge { tag: String },
}

impl SpjOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, SpjOutcome::Judged(v) if v.accepted)
    }

    pub fn note(&self) -> String {
        match self {
            SpjOutcome::Judged(v) => v.note.clone(),
            SpjOutcome::NoSuchJudge { tag } => {
                format!("no special judge registered for tag '{}'", tag)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct SpjRegistry {
    judges: BTreeMap<&'static str, Arc<dyn SpecialJudge>>,
}

impl SpjRegistry {
    pub fn new(judges: Vec<Arc<dyn SpecialJudge>>) -> Self {
        let mut registry = Self::default();
        for j in judges {
            registry.register(j);
        }
        registry
    }

    /// Registers a judge; a judge with the same name is replaced.
    pub fn register(&mut self, judge: Arc<dyn SpecialJudge>) {
        self.judges.insert(judge.name(), judge);
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<dyn SpecialJudge>> {
        self.judges.get(tag)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.judges.keys().copied().collect()
    }

    pub fn apply(&self, tag: &str, input: &SpjInput<'_>) -> SpjOutcome {
        match self.get(tag.trim()) {
            Some(judge) => SpjOutcome::Judged(judge.judge(input)),
            None => {
                tracing::warn!(
                    event = "sqlverdict.spj.unknown_tag",
                    tag = %tag,
                    "unknown special judge tag"
                );
                SpjOutcome::NoSuchJudge {
                    tag: tag.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for SpjRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpjRegistry")
            .field("judges", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysAccept;

    impl SpecialJudge for AlwaysAccept {
        fn name(&self) -> &'static str {
            "always"
        }

        fn judge(&self, _input: &SpjInput<'_>) -> SpjVerdict {
            SpjVerdict::accept("ok")
        }
    }

    fn input<'a>(gold: &'a TabularResult, pred: &'a TabularResult) -> SpjInput<'a> {
        SpjInput {
            reference_sql: "select 1",
            candidate_sql: "select 2",
            gold,
            pred,
        }
    }

    #[test]
    fn test_dispatch_by_name() {
        let reg = SpjRegistry::new(vec![Arc::new(AlwaysAccept)]);
        let r = TabularResult::default();
        let out = reg.apply("always", &input(&r, &r));
        assert!(out.accepted());
        assert_eq!(out.note(), "ok");
    }

    #[test]
    fn test_unknown_tag_is_rejected_with_note() {
        let reg = SpjRegistry::new(vec![Arc::new(AlwaysAccept)]);
        let r = TabularResult::default();
        let out = reg.apply("nope", &input(&r, &r));
        assert!(!out.accepted());
        assert_eq!(
            out,
            SpjOutcome::NoSuchJudge {
                tag: "nope".into()
            }
        );
        assert!(out.note().contains("'nope'"));
    }
}
