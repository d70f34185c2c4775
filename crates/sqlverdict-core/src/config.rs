use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default = "default_version", alias = "configVersion")]
    pub version: u32,
    /// JSONL file of evaluation cases.
    pub dataset: String,
    /// Optional JSON object mapping item index to special judge tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<String>,
    #[serde(default, skip_serializing_if = "is_default_settings")]
    pub settings: Settings,
    #[serde(default, skip_serializing_if = "is_default_output")]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn is_default_settings(s: &Settings) -> bool {
    s == &Settings::default()
}

fn is_default_output(o: &OutputConfig) -> bool {
    o == &OutputConfig::default()
}

impl EvalConfig {
    pub fn parallel(&self) -> usize {
        self.settings.parallel.unwrap_or(4)
    }

    /// Rebases the dataset, annotations and output paths onto `base_dir`.
    /// Absolute paths are left alone.
    pub fn rebase_paths(&mut self, base_dir: &Path) {
        rebase(base_dir, &mut self.dataset);
        for p in [
            &mut self.annotations,
            &mut self.output.judgements,
            &mut self.output.summary,
        ] {
            if let Some(p) = p.as_mut() {
                rebase(base_dir, p);
            }
        }
    }
}

fn rebase(base_dir: &Path, path: &mut String) {
    if path.trim().is_empty() || Path::new(path.as_str()).is_absolute() {
        return;
    }
    let mut out = PathBuf::new();
    for c in base_dir.join(path.as_str()).components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            _ => out.push(c.as_os_str()),
        }
    }
    *path = out.to_string_lossy().into_owned();
}

/// Loads and validates a YAML config; relative paths are resolved against its directory.
///
/// Unknown keys are reported, and rejected when `strict` is set.
pub fn load_config(path: &Path, strict: bool) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let mut ignored_keys = BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);
    let mut cfg: EvalConfig = serde_ignored::deserialize(deserializer, |p| {
        ignored_keys.insert(p.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    let meaningful: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !k.starts_with('_') && !k.starts_with("x-"))
        .collect();
    if !meaningful.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "unknown fields detected in strict mode: {:?} (file: {})",
                meaningful,
                path.display()
            )));
        }
        tracing::warn!(
            event = "sqlverdict.config.unknown_fields",
            fields = ?meaningful,
            file = %path.display(),
            "ignoring unknown config fields"
        );
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.dataset.trim().is_empty() {
        return Err(ConfigError("config has no dataset".into()));
    }
    if cfg.settings.parallel == Some(0) {
        return Err(ConfigError("settings.parallel must be at least 1".into()));
    }

    cfg.rebase_paths(path.parent().unwrap_or(Path::new(".")));

    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"version: 1
dataset: cases.jsonl
# annotations: spj.json
settings:
  parallel: 4
output:
  judgements: out/judgements.jsonl
  summary: out/summary.json
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
