use std::path::PathBuf;

use thiserror::Error;
use vitalrisk_core::{FeatureError, Model};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(
        "{model} classifier inputs do not match its projector (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    SchemaMismatch {
        model: Model,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("{model} classifier failed: {source}")]
    Inference { model: Model, source: BoxError },

    #[error("failed to load {model} classifier from {path}: {source}")]
    Load {
        model: Model,
        path: PathBuf,
        source: BoxError,
    },
}
