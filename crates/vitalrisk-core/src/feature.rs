//! Canonical feature columns and the enriched record that holds them.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::derive::{AgeCategory, BloodSugarCategory, BmiCategory};
use crate::value::Value;

/// A feature column, as named in the classifiers' training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Bmi,
    BmiCategory,
    Age,
    AgeCategory,
    Sex,
    Gender,
    BloodPressure,
    Diabetic,
    BloodSugarCategory,
    UrAlbCr,
    Albuminuria,
    TrigCategory,
    Smoking,
    AlcoholDrinking,
    Stroke,
    PhysicalHealth,
    MentalHealth,
    DiffWalking,
    Race,
    PhysicalActivity,
    PhysicalActivityLevel,
    GenHealth,
    SleepTime,
    Asthma,
    KidneyDisease,
    SkinCancer,
    Occupation,
    SleepDuration,
    QualityOfSleep,
    StressLevel,
    HeartRate,
    DailySteps,
    HdlCategory,
    UricAcidCategory,
}

impl Feature {
    pub const ALL: [Feature; 34] = [
        Feature::Bmi,
        Feature::BmiCategory,
        Feature::Age,
        Feature::AgeCategory,
        Feature::Sex,
        Feature::Gender,
        Feature::BloodPressure,
        Feature::Diabetic,
        Feature::BloodSugarCategory,
        Feature::UrAlbCr,
        Feature::Albuminuria,
        Feature::TrigCategory,
        Feature::Smoking,
        Feature::AlcoholDrinking,
        Feature::Stroke,
        Feature::PhysicalHealth,
        Feature::MentalHealth,
        Feature::DiffWalking,
        Feature::Race,
        Feature::PhysicalActivity,
        Feature::PhysicalActivityLevel,
        Feature::GenHealth,
        Feature::SleepTime,
        Feature::Asthma,
        Feature::KidneyDisease,
        Feature::SkinCancer,
        Feature::Occupation,
        Feature::SleepDuration,
        Feature::QualityOfSleep,
        Feature::StressLevel,
        Feature::HeartRate,
        Feature::DailySteps,
        Feature::HdlCategory,
        Feature::UricAcidCategory,
    ];

    /// Training-time column name. Spaces and casing are part of the contract.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::BmiCategory => "BMI Category",
            Self::Age => "Age",
            Self::AgeCategory => "AgeCategory",
            Self::Sex => "Sex",
            Self::Gender => "Gender",
            Self::BloodPressure => "Blood Pressure",
            Self::Diabetic => "Diabetic",
            Self::BloodSugarCategory => "BloodSugarCategory",
            Self::UrAlbCr => "UrAlbCr",
            Self::Albuminuria => "Albuminuria",
            Self::TrigCategory => "TrigCategory",
            Self::Smoking => "Smoking",
            Self::AlcoholDrinking => "AlcoholDrinking",
            Self::Stroke => "Stroke",
            Self::PhysicalHealth => "PhysicalHealth",
            Self::MentalHealth => "MentalHealth",
            Self::DiffWalking => "DiffWalking",
            Self::Race => "Race",
            Self::PhysicalActivity => "PhysicalActivity",
            Self::PhysicalActivityLevel => "Physical Activity Level",
            Self::GenHealth => "GenHealth",
            Self::SleepTime => "SleepTime",
            Self::Asthma => "Asthma",
            Self::KidneyDisease => "KidneyDisease",
            Self::SkinCancer => "SkinCancer",
            Self::Occupation => "Occupation",
            Self::SleepDuration => "Sleep Duration",
            Self::QualityOfSleep => "Quality of Sleep",
            Self::StressLevel => "Stress Level",
            Self::HeartRate => "Heart Rate",
            Self::DailySteps => "Daily Steps",
            Self::HdlCategory => "HDLCategory",
            Self::UricAcidCategory => "UricAcidCategory",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A survey record after feature derivation.
///
/// Derived fields are always present. Pass-through fields are present only
/// when the survey answered them; see [`crate::derive::PASS_THROUGH`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub age: Value,
    pub age_category: AgeCategory,
    /// Exposed as both `Sex` and `Gender`.
    pub gender: Value,
    pub blood_pressure: String,
    pub diabetic: Value,
    pub blood_sugar_category: BloodSugarCategory,
    pub ur_alb_cr: Value,
    pub albuminuria: i64,
    pub trig_category: Value,
    pub(crate) pass_through: BTreeMap<Feature, Value>,
}

impl EnrichedRecord {
    /// Look up one feature column.
    pub fn get(&self, feature: Feature) -> Option<Value> {
        let value = match feature {
            Feature::Bmi => Value::Float(self.bmi),
            Feature::BmiCategory => Value::from(self.bmi_category.as_str()),
            Feature::Age => self.age.clone(),
            Feature::AgeCategory => Value::from(self.age_category.as_str()),
            Feature::Sex | Feature::Gender => self.gender.clone(),
            Feature::BloodPressure => Value::from(self.blood_pressure.as_str()),
            Feature::Diabetic => self.diabetic.clone(),
            Feature::BloodSugarCategory => Value::from(self.blood_sugar_category.as_str()),
            Feature::UrAlbCr => self.ur_alb_cr.clone(),
            Feature::Albuminuria => Value::Int(self.albuminuria),
            Feature::TrigCategory => self.trig_category.clone(),
            other => return self.pass_through.get(&other).cloned(),
        };
        Some(value)
    }

    /// All present columns in [`Feature::ALL`] order.
    pub fn fields(&self) -> impl Iterator<Item = (Feature, Value)> + '_ {
        Feature::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
    }

    /// Number of pass-through columns copied from the survey.
    pub fn pass_through_count(&self) -> usize {
        self.pass_through.len()
    }
}

impl Serialize for EnrichedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (feature, value) in self.fields() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn column_names_are_unique() {
        let names: HashSet<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), Feature::ALL.len());
    }

    #[test]
    fn all_lists_each_variant_once() {
        let distinct: HashSet<Feature> = Feature::ALL.iter().copied().collect();
        assert_eq!(distinct.len(), Feature::ALL.len());
    }
}
