//! Risk classification: classifier capability, ONNX Runtime backend, model
//! registry, and the orchestrator that fans one record out to all three models.

mod classifier;
mod error;
pub mod orchestrator;
pub mod registry;

pub use classifier::Classifier;
pub use error::PredictError;
pub use orchestrator::Orchestrator;
pub use registry::ModelRegistry;

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
