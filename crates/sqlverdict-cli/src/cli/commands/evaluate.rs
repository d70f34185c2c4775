use super::exit_codes;
use crate::cli::args::EvaluateArgs;
use sqlverdict_core::config::load_config;
use sqlverdict_core::dataset::{apply_annotations, load_annotations, load_cases};
use sqlverdict_core::engine::{RunPolicy, Runner};
use sqlverdict_core::report::{console, json};
use std::path::Path;

pub async fn run(args: EvaluateArgs) -> anyhow::Result<i32> {
    let mut cfg = match load_config(&args.config, args.strict) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    if let Some(p) = &args.dataset {
        cfg.dataset = p.to_string_lossy().to_string();
    }
    if let Some(p) = &args.annotations {
        cfg.annotations = Some(p.to_string_lossy().to_string());
    }
    let parallel = args.parallel.unwrap_or_else(|| cfg.parallel()).max(1);

    let mut cases = load_cases(Path::new(&cfg.dataset))?;
    if let Some(path) = &cfg.annotations {
        let annotations = load_annotations(Path::new(path))?;
        let applied = apply_annotations(&mut cases, &annotations);
        tracing::info!(
            event = "sqlverdict.annotations.applied",
            file = %path,
            applied
        );
    }

    let runner = Runner::new(
        sqlverdict_judges::default_registry(),
        RunPolicy { parallel },
    );
    let artifacts = runner.run(cases).await?;

    if let Some(out) = &cfg.output.judgements {
        json::write_judgements(&artifacts.judgements, Path::new(out))?;
    }
    if let Some(out) = &cfg.output.summary {
        json::write_summary(&artifacts, Path::new(out))?;
    }
    console::print_summary(&artifacts.statistics);

    if let Some(min) = args.fail_under {
        let accuracy = artifacts.statistics.accuracy();
        if accuracy < min {
            eprintln!(
                "accuracy {:.4} is below --fail-under {:.4}",
                accuracy, min
            );
            return Ok(exit_codes::THRESHOLD_FAILED);
        }
    }
    Ok(exit_codes::OK)
}
