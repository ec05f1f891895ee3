//! Runs one survey record through all three classifiers.
//!
//! Features are derived once and shared. Each model is then projected and
//! predicted in [`Model::ALL`] order; the first failure aborts the request.

use tracing::info;
use vitalrisk_core::{EnrichedRecord, Model, PredictionResult, Projector, RawRecord, derive};

use crate::error::PredictError;
use crate::registry::ModelRegistry;

pub struct Orchestrator<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> Orchestrator<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Predict all three risks for one survey record.
    pub fn run(&self, raw: &RawRecord) -> Result<PredictionResult, PredictError> {
        let enriched = derive(raw)?;
        PredictionResult::try_from_fn(|model| self.predict_one(model, &enriched))
    }

    fn predict_one(&self, model: Model, enriched: &EnrichedRecord) -> Result<i64, PredictError> {
        let features = Projector::for_model(model).project(enriched)?;
        let label = self
            .registry
            .get(model)
            .predict(&features)
            .map_err(|source| PredictError::Inference {
                model,
                source: source.into(),
            })?;

        info!(model = %model, label, "prediction");
        Ok(label)
    }
}
