use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or enriching the conference list.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config path {path} resolves outside {base}")]
    PathOutsideBase { path: PathBuf, base: PathBuf },

    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
