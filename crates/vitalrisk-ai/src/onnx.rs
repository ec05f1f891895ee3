//! ONNX Runtime backend for the risk classifiers.
//!
//! Expects scikit-learn pipelines exported with one named `[N, 1]` input per
//! training column (string, float, double or int64) and the predicted label
//! as the first output.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor, ValueType};
use tracing::{debug, info};
use vitalrisk_core::{FeatureVector, Value};

use crate::classifier::Classifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Text,
    Float,
    Double,
    Int,
}

/// A classifier backed by an ONNX Runtime session.
pub struct OnnxClassifier {
    // `Session::run` takes `&mut self`.
    session: Mutex<Session>,
    inputs: Vec<(String, InputKind)>,
    path: PathBuf,
}

impl OnnxClassifier {
    /// Load a classifier artifact and record its input schema.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(path.exists(), "classifier artifact not found: {path:?}");

        let session = Session::builder()?.commit_from_file(path)?;

        let inputs = session
            .inputs()
            .iter()
            .map(|input| {
                let kind = input_kind(input.dtype()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "unsupported type for input '{}': {:?}",
                        input.name(),
                        input.dtype()
                    )
                })?;
                Ok((input.name().to_string(), kind))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        info!(inputs = inputs.len(), model = %path.display(), "loaded classifier");
        Ok(Self {
            session: Mutex::new(session),
            inputs,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<i64> {
        let mut tensors: Vec<(String, DynValue)> = Vec::with_capacity(self.inputs.len());
        for (name, kind) in &self.inputs {
            let value = features
                .iter()
                .find(|(feature, _)| feature.name() == name)
                .map(|(_, value)| value)
                .ok_or_else(|| anyhow::anyhow!("feature vector has no column '{name}'"))?;
            let tensor = to_tensor(value, *kind).with_context(|| format!("input '{name}'"))?;
            tensors.push((name.clone(), tensor));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("classifier session lock poisoned"))?;
        let outputs = session.run(tensors)?;
        let label = first_label(&outputs[0])?;

        debug!(model = %features.model(), label, "onnx inference");
        Ok(label)
    }

    fn input_columns(&self) -> Option<Vec<String>> {
        Some(self.inputs.iter().map(|(name, _)| name.clone()).collect())
    }
}

fn input_kind(value_type: &ValueType) -> Option<InputKind> {
    match value_type {
        ValueType::Tensor { ty, .. } => match ty {
            TensorElementType::String => Some(InputKind::Text),
            TensorElementType::Float32 => Some(InputKind::Float),
            TensorElementType::Float64 => Some(InputKind::Double),
            TensorElementType::Int64 => Some(InputKind::Int),
            _ => None,
        },
        _ => None,
    }
}

fn to_tensor(value: &Value, kind: InputKind) -> anyhow::Result<DynValue> {
    let shape = [1i64, 1];
    let tensor = match kind {
        InputKind::Text => {
            Tensor::from_string_array((shape, &[value.to_string()][..]))?
                .into_dyn()
        }
        InputKind::Float => {
            Tensor::from_array((shape, vec![as_number(value)? as f32].into_boxed_slice()))?
                .into_dyn()
        }
        InputKind::Double => {
            Tensor::from_array((shape, vec![as_number(value)?].into_boxed_slice()))?.into_dyn()
        }
        InputKind::Int => {
            Tensor::from_array((shape, vec![as_integer(value)?].into_boxed_slice()))?.into_dyn()
        }
    };
    Ok(tensor)
}

/// Numeric value for a float input. Text is parsed.
fn as_number(value: &Value) -> anyhow::Result<f64> {
    match value {
        Value::Text(s) => s
            .trim()
            .parse()
            .with_context(|| format!("expected a number, got {s:?}")),
        other => Ok(other.as_f64().unwrap_or_default()),
    }
}

/// Integer value for an int64 input. Floats must be integral.
// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
const I64_LOW: f64 = i64::MIN as f64;
const I64_HIGH: f64 = i64::MAX as f64;

fn as_integer(value: &Value) -> anyhow::Result<i64> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::Float(v) if v.fract() == 0.0 && (I64_LOW..I64_HIGH).contains(v) => Ok(*v as i64),
        Value::Float(v) => anyhow::bail!("expected an integer, got {v}"),
        Value::Text(s) => s
            .trim()
            .parse()
            .with_context(|| format!("expected an integer, got {s:?}")),
    }
}

/// First element of the label output, int64 or string-encoded.
fn first_label(output: &DynValue) -> anyhow::Result<i64> {
    if let ValueType::Tensor {
        ty: TensorElementType::String,
        ..
    } = output.dtype()
    {
        let (_, labels) = output.try_extract_strings()?;
        let first = labels
            .first()
            .ok_or_else(|| anyhow::anyhow!("classifier returned no label"))?;
        return first
            .trim()
            .parse()
            .with_context(|| format!("non-integer label {first:?}"));
    }

    let (_, labels) = output.try_extract_tensor::<i64>()?;
    labels
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("classifier returned no label"))
}
