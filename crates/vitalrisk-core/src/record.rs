//! Raw survey record as submitted by the assessment form.
//!
//! Every known key is a named optional field. The form sends unanswered
//! fields as `""`; absent keys and `null` are treated the same way.

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;
use crate::value::Value;

/// Keys of the raw survey record, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawField {
    Height,
    Weight,
    Age,
    Gender,
    SystolicBp,
    DiastolicBp,
    Diabetic,
    UrineAlbuminCreatinineRatio,
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
    PhysicalActivityDuration,
    GenHealth,
    SleepDuration,
    Asthma,
    KidneyDisease,
    SkinCancer,
    Occupation,
    SleepQuality,
    StressLevel,
    HeartRate,
    DailySteps,
    GoodCholesterol,
    UricAcidCategory,
}

impl RawField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::SystolicBp => "systolicBP",
            Self::DiastolicBp => "diastolicBP",
            Self::Diabetic => "diabetic",
            Self::UrineAlbuminCreatinineRatio => "urineAlbuminCreatinineRatio",
            Self::Albuminuria => "albuminuria",
            Self::TrigCategory => "trigCategory",
            Self::Smoking => "smoking",
            Self::AlcoholDrinking => "alcoholDrinking",
            Self::Stroke => "stroke",
            Self::PhysicalHealth => "physicalHealth",
            Self::MentalHealth => "mentalHealth",
            Self::DiffWalking => "diffWalking",
            Self::Race => "race",
            Self::PhysicalActivity => "physicalActivity",
            Self::PhysicalActivityDuration => "physicalActivityDuration",
            Self::GenHealth => "genHealth",
            Self::SleepDuration => "sleepDuration",
            Self::Asthma => "asthma",
            Self::KidneyDisease => "kidneyDisease",
            Self::SkinCancer => "skinCancer",
            Self::Occupation => "occupation",
            Self::SleepQuality => "sleepQuality",
            Self::StressLevel => "stressLevel",
            Self::HeartRate => "heartRate",
            Self::DailySteps => "dailySteps",
            Self::GoodCholesterol => "goodCholesterol",
            Self::UricAcidCategory => "uricAcidCategory",
        }
    }
}

/// One survey submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    // Body measurements
    pub height: Option<Value>,
    pub weight: Option<Value>,
    pub age: Option<Value>,
    pub gender: Option<Value>,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: Option<Value>,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: Option<Value>,
    pub heart_rate: Option<Value>,
    pub race: Option<Value>,
    pub occupation: Option<Value>,

    // Sleep and daily routine
    pub sleep_duration: Option<Value>,
    pub sleep_quality: Option<Value>,
    pub daily_steps: Option<Value>,
    pub physical_activity: Option<Value>,
    pub physical_activity_duration: Option<Value>,

    // Habits and well-being
    pub smoking: Option<Value>,
    pub alcohol_drinking: Option<Value>,
    pub physical_health: Option<Value>,
    pub mental_health: Option<Value>,
    pub stress_level: Option<Value>,
    pub gen_health: Option<Value>,
    pub diff_walking: Option<Value>,

    // Conditions
    pub stroke: Option<Value>,
    pub diabetic: Option<Value>,
    pub asthma: Option<Value>,
    pub kidney_disease: Option<Value>,
    pub skin_cancer: Option<Value>,

    // Lab indicators (the last three are optional on the form)
    pub good_cholesterol: Option<Value>,
    pub uric_acid_category: Option<Value>,
    pub albuminuria: Option<Value>,
    pub urine_albumin_creatinine_ratio: Option<Value>,
    pub trig_category: Option<Value>,
}

impl RawRecord {
    /// The value under `field` exactly as received (`""` included).
    pub fn get(&self, field: RawField) -> Option<&Value> {
        let slot = match field {
            RawField::Height => &self.height,
            RawField::Weight => &self.weight,
            RawField::Age => &self.age,
            RawField::Gender => &self.gender,
            RawField::SystolicBp => &self.systolic_bp,
            RawField::DiastolicBp => &self.diastolic_bp,
            RawField::Diabetic => &self.diabetic,
            RawField::UrineAlbuminCreatinineRatio => &self.urine_albumin_creatinine_ratio,
            RawField::Albuminuria => &self.albuminuria,
            RawField::TrigCategory => &self.trig_category,
            RawField::Smoking => &self.smoking,
            RawField::AlcoholDrinking => &self.alcohol_drinking,
            RawField::Stroke => &self.stroke,
            RawField::PhysicalHealth => &self.physical_health,
            RawField::MentalHealth => &self.mental_health,
            RawField::DiffWalking => &self.diff_walking,
            RawField::Race => &self.race,
            RawField::PhysicalActivity => &self.physical_activity,
            RawField::PhysicalActivityDuration => &self.physical_activity_duration,
            RawField::GenHealth => &self.gen_health,
            RawField::SleepDuration => &self.sleep_duration,
            RawField::Asthma => &self.asthma,
            RawField::KidneyDisease => &self.kidney_disease,
            RawField::SkinCancer => &self.skin_cancer,
            RawField::Occupation => &self.occupation,
            RawField::SleepQuality => &self.sleep_quality,
            RawField::StressLevel => &self.stress_level,
            RawField::HeartRate => &self.heart_rate,
            RawField::DailySteps => &self.daily_steps,
            RawField::GoodCholesterol => &self.good_cholesterol,
            RawField::UricAcidCategory => &self.uric_acid_category,
        };
        slot.as_ref()
    }

    /// The value under `field`, or `None` for the missing marker.
    pub fn answered(&self, field: RawField) -> Option<&Value> {
        self.get(field).filter(|v| !v.is_missing())
    }

    /// The answer as sent, or an error when the key is absent or null.
    /// Empty strings count as present.
    pub fn present(&self, field: RawField) -> Result<&Value, FeatureError> {
        self.get(field).ok_or(FeatureError::MissingRequiredField {
            field: field.name(),
        })
    }

    /// Like [`answered`](Self::answered), but a missing answer is an error.
    pub fn require(&self, field: RawField) -> Result<&Value, FeatureError> {
        self.answered(field)
            .ok_or(FeatureError::MissingRequiredField {
                field: field.name(),
            })
    }

    /// A required answer that must be numeric.
    pub fn require_number(&self, field: RawField) -> Result<f64, FeatureError> {
        let value = self.require(field)?;
        value.as_f64().ok_or_else(|| FeatureError::InvalidField {
            field: field.name(),
            reason: format!("expected a number, got {value:?}"),
        })
    }
}
