use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: invalid record: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: invalid annotation file: {source}")]
    Annotations {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: annotation key '{key}' is not an item index")]
    AnnotationKey { path: PathBuf, key: String },
}
