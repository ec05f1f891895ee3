//! The three loaded classifiers, indexed by [`Model`].

use std::collections::BTreeSet;

use vitalrisk_core::{Model, Projector};

use crate::classifier::Classifier;
use crate::error::PredictError;

/// Immutable set of classifiers, built once at startup.
pub struct ModelRegistry {
    heart: Box<dyn Classifier>,
    sleep: Box<dyn Classifier>,
    metabolism: Box<dyn Classifier>,
}

impl ModelRegistry {
    /// Build a registry, checking each classifier's declared inputs against
    /// its projector's columns.
    pub fn new(
        heart: Box<dyn Classifier>,
        sleep: Box<dyn Classifier>,
        metabolism: Box<dyn Classifier>,
    ) -> Result<Self, PredictError> {
        let registry = Self {
            heart,
            sleep,
            metabolism,
        };
        for model in Model::ALL {
            registry.check_schema(model)?;
        }
        Ok(registry)
    }

    /// Load all three ONNX artifacts named by `config`.
    #[cfg(feature = "onnx")]
    pub fn load(config: &vitalrisk_core::ModelConfig) -> Result<Self, PredictError> {
        use crate::onnx::OnnxClassifier;

        let load = |model: Model| -> Result<Box<dyn Classifier>, PredictError> {
            let path = config.path(model);
            let classifier = OnnxClassifier::load(path).map_err(|source| PredictError::Load {
                model,
                path: path.to_path_buf(),
                source: source.into(),
            })?;
            Ok(Box::new(classifier))
        };

        Self::new(
            load(Model::Heart)?,
            load(Model::Sleep)?,
            load(Model::Metabolism)?,
        )
    }

    pub fn get(&self, model: Model) -> &dyn Classifier {
        match model {
            Model::Heart => self.heart.as_ref(),
            Model::Sleep => self.sleep.as_ref(),
            Model::Metabolism => self.metabolism.as_ref(),
        }
    }

    fn check_schema(&self, model: Model) -> Result<(), PredictError> {
        let Some(declared) = self.get(model).input_columns() else {
            return Ok(());
        };

        let expected: BTreeSet<&str> = Projector::for_model(model).column_names().collect();
        let declared: BTreeSet<&str> = declared.iter().map(String::as_str).collect();

        let missing: Vec<String> = expected
            .difference(&declared)
            .map(|s| s.to_string())
            .collect();
        let unexpected: Vec<String> = declared
            .difference(&expected)
            .map(|s| s.to_string())
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(PredictError::SchemaMismatch {
                model,
                missing,
                unexpected,
            })
        }
    }
}
