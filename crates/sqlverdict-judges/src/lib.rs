use std::sync::Arc;

use sqlverdict_core::spj::{SpecialJudge, SpjRegistry};

pub mod limit_one_tie;

pub fn default_judges() -> Vec<Arc<dyn SpecialJudge>> {
    vec![Arc::new(limit_one_tie::LimitOneTiedValuesJudge)]
}

pub fn default_registry() -> SpjRegistry {
    SpjRegistry::new(default_judges())
}
