//! Survey records, feature derivation, and per-model projections.

pub mod config;
pub mod derive;
mod error;
pub mod feature;
mod model;
mod prediction;
pub mod projection;
pub mod record;
mod value;

pub use config::ModelConfig;
pub use derive::{AgeCategory, BloodSugarCategory, BmiCategory, derive};
pub use error::{ConfigError, FeatureError, ParseModelError};
pub use feature::{EnrichedRecord, Feature};
pub use model::Model;
pub use prediction::PredictionResult;
pub use projection::{FeatureVector, Projector};
pub use record::{RawField, RawRecord};
pub use value::Value;
