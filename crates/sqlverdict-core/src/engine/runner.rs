use super::judge::judge_item;
use crate::model::{EvaluationCase, Judgement};
use crate::report::RunArtifacts;
use crate::spj::SpjRegistry;
use crate::stats::RunStatistics;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RunPolicy {
    /// Number of shards judged concurrently.
    pub parallel: usize,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self { parallel: 4 }
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    pub registry: SpjRegistry,
    pub policy: RunPolicy,
}

impl Runner {
    pub fn new(registry: SpjRegistry, policy: RunPolicy) -> Self {
        Self { registry, policy }
    }

    /// Judges every case sequentially on the current thread.
    pub fn run_sequential(&self, cases: &[EvaluationCase]) -> RunArtifacts {
        let mut stats = RunStatistics::new();
        let judgements = judge_shard(&self.registry, cases, &mut stats);
        RunArtifacts::new(judgements, stats)
    }

    /// Judges cases on the blocking pool, one shard per task.
    ///
    /// Each shard aggregates privately and merges into the run total once, under the
    /// run's single lock. Judgements come back in input order.
    pub async fn run(&self, cases: Vec<EvaluationCase>) -> anyhow::Result<RunArtifacts> {
        let total = cases.len();
        let parallel = self.policy.parallel.max(1);
        let shard_size = total.div_ceil(parallel).max(1);

        tracing::info!(
            event = "sqlverdict.run.start",
            items = total,
            shards = total.div_ceil(shard_size),
            judges = ?self.registry.names()
        );

        let shared = Arc::new(Mutex::new(RunStatistics::new()));
        let cases = Arc::new(cases);
        let mut handles = Vec::new();

        for start in (0..total).step_by(shard_size) {
            let end = (start + shard_size).min(total);
            let cases = cases.clone();
            let registry = self.registry.clone();
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                let (judgements, local) = tokio::task::spawn_blocking(move || {
                    let mut local = RunStatistics::new();
                    let judgements = judge_shard(&registry, &cases[start..end], &mut local);
                    (judgements, local)
                })
                .await?;
                shared.lock().await.merge(&local);
                anyhow::Ok(judgements)
            }));
        }

        let mut judgements = Vec::with_capacity(total);
        for h in handles {
            let shard = h
                .await
                .map_err(|e| anyhow::anyhow!("shard task failed: {}", e))??;
            judgements.extend(shard);
        }

        let stats = shared.lock().await.clone();
        tracing::info!(
            event = "sqlverdict.run.finish",
            items = stats.total,
            correct = stats.correct,
            accuracy = stats.accuracy()
        );
        Ok(RunArtifacts::new(judgements, stats))
    }
}

fn judge_shard(
    registry: &SpjRegistry,
    cases: &[EvaluationCase],
    stats: &mut RunStatistics,
) -> Vec<Judgement> {
    cases
        .iter()
        .map(|case| {
            let outcome = judge_item(case, registry);
            outcome.record_into(stats);
            tracing::debug!(
                event = "sqlverdict.item.judged",
                item_id = %outcome.judgement.item_id,
                category = %outcome.judgement.category,
                correct = outcome.judgement.is_correct
            );
            outcome.judgement
        })
        .collect()
}
