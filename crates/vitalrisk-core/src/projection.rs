//! Per-model projection of an enriched record into a feature vector.
//!
//! Each classifier was trained on a fixed, ordered column list. The lists
//! below are that contract: reordering a list without retraining the model
//! silently breaks its predictions.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::FeatureError;
use crate::feature::{EnrichedRecord, Feature};
use crate::model::Model;
use crate::value::Value;

pub const HEART_COLUMNS: &[Feature] = &[
    Feature::Bmi,
    Feature::Smoking,
    Feature::AlcoholDrinking,
    Feature::Stroke,
    Feature::PhysicalHealth,
    Feature::MentalHealth,
    Feature::DiffWalking,
    Feature::Sex,
    Feature::AgeCategory,
    Feature::Race,
    Feature::Diabetic,
    Feature::PhysicalActivity,
    Feature::GenHealth,
    Feature::SleepTime,
    Feature::Asthma,
    Feature::KidneyDisease,
    Feature::SkinCancer,
];

pub const SLEEP_COLUMNS: &[Feature] = &[
    Feature::Gender,
    Feature::Age,
    Feature::Occupation,
    Feature::SleepDuration,
    Feature::QualityOfSleep,
    Feature::PhysicalActivityLevel,
    Feature::StressLevel,
    Feature::BmiCategory,
    Feature::BloodPressure,
    Feature::HeartRate,
    Feature::DailySteps,
];

pub const METABOLISM_COLUMNS: &[Feature] = &[
    Feature::Age,
    Feature::Sex,
    Feature::Race,
    Feature::Bmi,
    Feature::Albuminuria,
    Feature::UrAlbCr,
    Feature::UricAcidCategory,
    Feature::HdlCategory,
    Feature::TrigCategory,
    Feature::BloodSugarCategory,
];

/// Selects one model's columns from an enriched record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    model: Model,
    columns: &'static [Feature],
}

impl Projector {
    pub fn for_model(model: Model) -> Self {
        let columns = match model {
            Model::Heart => HEART_COLUMNS,
            Model::Sleep => SLEEP_COLUMNS,
            Model::Metabolism => METABOLISM_COLUMNS,
        };
        Self { model, columns }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn columns(&self) -> &'static [Feature] {
        self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|f| f.name())
    }

    /// Build this model's feature vector.
    ///
    /// Fails on the first column the record does not carry.
    pub fn project(&self, record: &EnrichedRecord) -> Result<FeatureVector, FeatureError> {
        let values = self
            .columns
            .iter()
            .map(|&feature| {
                record
                    .get(feature)
                    .ok_or(FeatureError::MissingRequiredField {
                        field: feature.name(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureVector {
            model: self.model,
            columns: self.columns,
            values,
        })
    }
}

/// One row of classifier input: a value per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    model: Model,
    columns: &'static [Feature],
    values: Vec<Value>,
}

impl FeatureVector {
    pub fn model(&self) -> Model {
        self.model
    }

    pub fn columns(&self) -> &'static [Feature] {
        self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, feature: Feature) -> Option<&Value> {
        self.columns
            .iter()
            .position(|&f| f == feature)
            .map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &Value)> {
        self.columns.iter().copied().zip(&self.values)
    }

    /// Single-row Arrow batch with one column per feature.
    ///
    /// Column types follow the values: `Int64`, `Float64`, or `Utf8`.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let mut fields = Vec::with_capacity(self.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.len());

        for (feature, value) in self.iter() {
            let (data_type, array): (DataType, ArrayRef) = match value {
                Value::Int(v) => (DataType::Int64, Arc::new(Int64Array::from(vec![*v]))),
                Value::Float(v) => (DataType::Float64, Arc::new(Float64Array::from(vec![*v]))),
                Value::Text(s) => (DataType::Utf8, Arc::new(StringArray::from(vec![s.as_str()]))),
            };
            fields.push(Field::new(feature.name(), data_type, false));
            arrays.push(array);
        }

        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
    }
}
