//! Locations of the three classifier artifacts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Model;

/// Default artifact file names inside a model directory.
pub const HEART_ARTIFACT: &str = "heart_disease_predictor.onnx";
pub const SLEEP_ARTIFACT: &str = "sleep_disorder_predictor.onnx";
pub const METABOLISM_ARTIFACT: &str = "metabolic_syndrome_predictor.onnx";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub heart: PathBuf,
    pub sleep: PathBuf,
    pub metabolism: PathBuf,
}

impl ModelConfig {
    /// Default artifact names under `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            heart: dir.join(HEART_ARTIFACT),
            sleep: dir.join(SLEEP_ARTIFACT),
            metabolism: dir.join(METABOLISM_ARTIFACT),
        }
    }

    /// Read a JSON config. Relative paths resolve against the file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolved_against(base))
    }

    pub fn path(&self, model: Model) -> &Path {
        match model {
            Model::Heart => &self.heart,
            Model::Sleep => &self.sleep,
            Model::Metabolism => &self.metabolism,
        }
    }

    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Self {
            heart: resolve(self.heart),
            sleep: resolve(self.sleep),
            metabolism: resolve(self.metabolism),
        }
    }
}
