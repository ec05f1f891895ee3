use std::path::PathBuf;

use thiserror::Error;

/// Failure while deriving or projecting features from a survey record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read model config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid model config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown model '{0}' (expected heart, sleep or metabolism)")]
pub struct ParseModelError(pub String);
