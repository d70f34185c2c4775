use crate::model::Judgement;
use crate::stats::RunStatistics;
use serde::Serialize;

pub mod console;
pub mod json;

#[derive(Debug, Clone, Serialize)]
pub struct RunArtifacts {
    pub generated_at: String,
    pub judgements: Vec<Judgement>,
    pub statistics: RunStatistics,
}

impl RunArtifacts {
    pub fn new(judgements: Vec<Judgement>, statistics: RunStatistics) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            judgements,
            statistics,
        }
    }
}
