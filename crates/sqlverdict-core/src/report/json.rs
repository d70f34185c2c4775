use super::RunArtifacts;
use crate::model::Judgement;
use std::io::Write;
use std::path::Path;

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// One judgement per line, in input order.
pub fn write_judgements(judgements: &[Judgement], out: &Path) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let mut f = std::io::BufWriter::new(std::fs::File::create(out)?);
    for j in judgements {
        serde_json::to_writer(&mut f, j)?;
        f.write_all(b"\n")?;
    }
    f.flush()?;
    Ok(())
}

pub fn write_summary(artifacts: &RunArtifacts, out: &Path) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let summary = serde_json::json!({
        "generated_at": artifacts.generated_at,
        "statistics": artifacts.statistics,
        "accuracy": artifacts.statistics.accuracy(),
    });
    std::fs::write(out, serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}
