//! Feature derivation: raw survey record to enriched record.
//!
//! Computes the shared quantities every classifier draws from (BMI, age
//! bucket, blood pressure string, blood sugar category), fills defaults for
//! the optional lab values, and renames the remaining answers into their
//! training-time column names.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::FeatureError;
use crate::feature::{EnrichedRecord, Feature};
use crate::record::{RawField, RawRecord};
use crate::value::Value;

/// Median urine albumin/creatinine ratio, used when the lab value is absent.
pub const UR_ALB_CR_MEDIAN: f64 = 7.07;

pub const DEFAULT_TRIG_CATEGORY: &str = "Normal";

/// Survey answers copied verbatim under their canonical column names.
///
/// `sleepDuration` feeds two columns.
pub const PASS_THROUGH: &[(Feature, RawField)] = &[
    (Feature::Smoking, RawField::Smoking),
    (Feature::AlcoholDrinking, RawField::AlcoholDrinking),
    (Feature::Stroke, RawField::Stroke),
    (Feature::PhysicalHealth, RawField::PhysicalHealth),
    (Feature::MentalHealth, RawField::MentalHealth),
    (Feature::DiffWalking, RawField::DiffWalking),
    (Feature::Race, RawField::Race),
    (Feature::PhysicalActivity, RawField::PhysicalActivity),
    (Feature::PhysicalActivityLevel, RawField::PhysicalActivityDuration),
    (Feature::GenHealth, RawField::GenHealth),
    (Feature::SleepTime, RawField::SleepDuration),
    (Feature::Asthma, RawField::Asthma),
    (Feature::KidneyDisease, RawField::KidneyDisease),
    (Feature::SkinCancer, RawField::SkinCancer),
    (Feature::Occupation, RawField::Occupation),
    (Feature::SleepDuration, RawField::SleepDuration),
    (Feature::QualityOfSleep, RawField::SleepQuality),
    (Feature::StressLevel, RawField::StressLevel),
    (Feature::HeartRate, RawField::HeartRate),
    (Feature::DailySteps, RawField::DailySteps),
    (Feature::HdlCategory, RawField::GoodCholesterol),
    (Feature::UricAcidCategory, RawField::UricAcidCategory),
];

// ── Categories ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
}

impl BmiCategory {
    /// `< 18.5` underweight, `[18.5, 25)` normal, everything else overweight.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else {
            Self::Overweight
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
        }
    }
}

/// Five-year age bands used by the cardiac survey data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    Age18To24,
    Age25To29,
    Age30To34,
    Age35To39,
    Age40To44,
    Age45To49,
    Age50To54,
    Age55To59,
    Age60To64,
    Age65To69,
    Age70To74,
    Age75To79,
    Age80To84,
    Age85Plus,
}

/// Inclusive `(low, high)` bounds of every closed band.
const AGE_BANDS: [(f64, f64, AgeCategory); 13] = [
    (18.0, 24.0, AgeCategory::Age18To24),
    (25.0, 29.0, AgeCategory::Age25To29),
    (30.0, 34.0, AgeCategory::Age30To34),
    (35.0, 39.0, AgeCategory::Age35To39),
    (40.0, 44.0, AgeCategory::Age40To44),
    (45.0, 49.0, AgeCategory::Age45To49),
    (50.0, 54.0, AgeCategory::Age50To54),
    (55.0, 59.0, AgeCategory::Age55To59),
    (60.0, 64.0, AgeCategory::Age60To64),
    (65.0, 69.0, AgeCategory::Age65To69),
    (70.0, 74.0, AgeCategory::Age70To74),
    (75.0, 79.0, AgeCategory::Age75To79),
    (80.0, 84.0, AgeCategory::Age80To84),
];

impl AgeCategory {
    /// Band for `age`. Anything outside the closed bands is `85+`, which
    /// includes ages under 18 and fractional ages between bands.
    // TODO: ages under 18 should not land in "85+"; needs a product decision
    // on whether to reject them or add an explicit band.
    pub fn from_age(age: f64) -> Self {
        AGE_BANDS
            .iter()
            .find(|(low, high, _)| (*low..=*high).contains(&age))
            .map(|&(_, _, category)| category)
            .unwrap_or(Self::Age85Plus)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age18To24 => "18-24",
            Self::Age25To29 => "25-29",
            Self::Age30To34 => "30-34",
            Self::Age35To39 => "35-39",
            Self::Age40To44 => "40-44",
            Self::Age45To49 => "45-49",
            Self::Age50To54 => "50-54",
            Self::Age55To59 => "55-59",
            Self::Age60To64 => "60-64",
            Self::Age65To69 => "65-69",
            Self::Age70To74 => "70-74",
            Self::Age75To79 => "75-79",
            Self::Age80To84 => "80-84",
            Self::Age85Plus => "85+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloodSugarCategory {
    Diabetic,
    NonDiabetic,
    PreDiabetic,
}

impl BloodSugarCategory {
    /// Exact `"Yes"` / `"No"`; every other answer falls into `Pre-Diabetic`.
    pub fn from_diabetic(answer: &Value) -> Self {
        match answer.as_text() {
            Some("Yes") => Self::Diabetic,
            Some("No") => Self::NonDiabetic,
            _ => Self::PreDiabetic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetic => "Diabetic",
            Self::NonDiabetic => "Non-Diabetic",
            Self::PreDiabetic => "Pre-Diabetic",
        }
    }
}

// ── Derivation ──

/// Derive the enriched record shared by all three classifiers.
///
/// Fails when height, weight or age is missing or non-numeric, when height
/// is zero, or when gender, either blood pressure reading, or the diabetic
/// answer is absent. Those four are taken as sent, empty strings included.
/// Pass-through answers are not checked here; a missing one surfaces when a
/// projector needs it.
pub fn derive(raw: &RawRecord) -> Result<EnrichedRecord, FeatureError> {
    let height = raw.require_number(RawField::Height)?;
    let weight = raw.require_number(RawField::Weight)?;
    let bmi = weight / height.powi(2);
    if !bmi.is_finite() {
        return Err(FeatureError::InvalidField {
            field: RawField::Height.name(),
            reason: format!("BMI is undefined for height {height} and weight {weight}"),
        });
    }

    let age_years = raw.require_number(RawField::Age)?;
    let age = raw.require(RawField::Age)?.clone();
    let gender = raw.present(RawField::Gender)?.clone();

    let systolic = raw.present(RawField::SystolicBp)?;
    let diastolic = raw.present(RawField::DiastolicBp)?;
    let blood_pressure = format!("{systolic}/{diastolic}");

    let diabetic = raw.present(RawField::Diabetic)?.clone();
    let blood_sugar_category = BloodSugarCategory::from_diabetic(&diabetic);

    let ur_alb_cr = raw
        .answered(RawField::UrineAlbuminCreatinineRatio)
        .cloned()
        .unwrap_or(Value::Float(UR_ALB_CR_MEDIAN));

    let albuminuria = match raw.answered(RawField::Albuminuria) {
        None => 0,
        Some(v) if v.as_text() == Some("No") => 0,
        Some(_) => 1,
    };

    let trig_category = raw
        .answered(RawField::TrigCategory)
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_TRIG_CATEGORY));

    let mut pass_through = BTreeMap::new();
    for &(feature, field) in PASS_THROUGH {
        if let Some(value) = raw.get(field) {
            pass_through.insert(feature, value.clone());
        }
    }

    let record = EnrichedRecord {
        bmi,
        bmi_category: BmiCategory::from_bmi(bmi),
        age,
        age_category: AgeCategory::from_age(age_years),
        gender,
        blood_pressure,
        diabetic,
        blood_sugar_category,
        ur_alb_cr,
        albuminuria,
        trig_category,
        pass_through,
    };

    debug!(
        bmi = record.bmi,
        bmi_category = record.bmi_category.as_str(),
        age_category = record.age_category.as_str(),
        blood_sugar = record.blood_sugar_category.as_str(),
        pass_through = record.pass_through_count(),
        "derived features"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal record carrying only the fields derivation requires.
    fn required_only() -> RawRecord {
        RawRecord {
            height: Some(Value::Float(1.75)),
            weight: Some(Value::Int(70)),
            age: Some(Value::Int(40)),
            gender: Some(Value::from("Male")),
            systolic_bp: Some(Value::Int(120)),
            diastolic_bp: Some(Value::Int(80)),
            diabetic: Some(Value::from("No")),
            ..Default::default()
        }
    }

    #[test]
    fn bmi_from_height_and_weight() {
        let enriched = derive(&required_only()).unwrap();
        assert!((enriched.bmi - 70.0 / (1.75 * 1.75)).abs() < 1e-12);
        assert_eq!(enriched.bmi_category, BmiCategory::Normal);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.499), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.999), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
    }

    #[test]
    fn age_band_boundaries() {
        assert_eq!(AgeCategory::from_age(18.0).as_str(), "18-24");
        assert_eq!(AgeCategory::from_age(24.0).as_str(), "18-24");
        assert_eq!(AgeCategory::from_age(25.0).as_str(), "25-29");
        assert_eq!(AgeCategory::from_age(84.0).as_str(), "80-84");
        assert_eq!(AgeCategory::from_age(85.0).as_str(), "85+");
        assert_eq!(AgeCategory::from_age(103.0).as_str(), "85+");
    }

    #[test]
    fn under_18_falls_through_to_85_plus() {
        // Current behaviour, kept until the band is decided.
        assert_eq!(AgeCategory::from_age(17.0), AgeCategory::Age85Plus);
        assert_eq!(AgeCategory::from_age(0.0), AgeCategory::Age85Plus);
    }

    #[test]
    fn fractional_age_between_bands_falls_through() {
        assert_eq!(AgeCategory::from_age(24.5), AgeCategory::Age85Plus);
        assert_eq!(AgeCategory::from_age(24.0), AgeCategory::Age18To24);
    }

    #[test]
    fn diabetic_mapping() {
        let cat = |s: &str| BloodSugarCategory::from_diabetic(&Value::from(s)).as_str();
        assert_eq!(cat("Yes"), "Diabetic");
        assert_eq!(cat("No"), "Non-Diabetic");
        assert_eq!(cat("Borderline"), "Pre-Diabetic");
        assert_eq!(cat("Pre-Diabetic"), "Pre-Diabetic");
        assert_eq!(cat("yes"), "Pre-Diabetic");
        assert_eq!(
            BloodSugarCategory::from_diabetic(&Value::Int(1)),
            BloodSugarCategory::PreDiabetic
        );
    }

    #[test]
    fn blood_pressure_is_joined_verbatim() {
        let enriched = derive(&required_only()).unwrap();
        assert_eq!(enriched.blood_pressure, "120/80");

        let raw = RawRecord {
            systolic_bp: Some(Value::Float(120.5)),
            diastolic_bp: Some(Value::from("eighty")),
            ..required_only()
        };
        assert_eq!(derive(&raw).unwrap().blood_pressure, "120.5/eighty");
    }

    #[test]
    fn sex_and_gender_copy_raw_gender() {
        let enriched = derive(&required_only()).unwrap();
        assert_eq!(enriched.get(Feature::Sex), Some(Value::from("Male")));
        assert_eq!(enriched.get(Feature::Gender), Some(Value::from("Male")));
        assert_eq!(enriched.get(Feature::Age), Some(Value::Int(40)));
        assert_eq!(enriched.get(Feature::Diabetic), Some(Value::from("No")));
    }

    #[test]
    fn optional_labs_default_when_empty() {
        let raw = RawRecord {
            urine_albumin_creatinine_ratio: Some(Value::from("")),
            albuminuria: Some(Value::from("")),
            trig_category: Some(Value::from("")),
            ..required_only()
        };
        let enriched = derive(&raw).unwrap();
        assert_eq!(enriched.ur_alb_cr, Value::Float(7.07));
        assert_eq!(enriched.albuminuria, 0);
        assert_eq!(enriched.trig_category, Value::from("Normal"));
    }

    #[test]
    fn optional_labs_default_when_absent() {
        let enriched = derive(&required_only()).unwrap();
        assert_eq!(enriched.ur_alb_cr, Value::Float(UR_ALB_CR_MEDIAN));
        assert_eq!(enriched.albuminuria, 0);
        assert_eq!(enriched.trig_category, Value::from(DEFAULT_TRIG_CATEGORY));
    }

    #[test]
    fn optional_labs_use_answers() {
        let with = |albuminuria: &str| RawRecord {
            urine_albumin_creatinine_ratio: Some(Value::Int(30)),
            albuminuria: Some(Value::from(albuminuria)),
            trig_category: Some(Value::from("High")),
            ..required_only()
        };

        let yes = derive(&with("Yes")).unwrap();
        assert_eq!(yes.albuminuria, 1);
        assert_eq!(yes.ur_alb_cr, Value::Int(30));
        assert_eq!(yes.trig_category, Value::from("High"));

        assert_eq!(derive(&with("No")).unwrap().albuminuria, 0);
        // Anything but "No" counts as albuminuria.
        assert_eq!(derive(&with("Unsure")).unwrap().albuminuria, 1);
    }

    #[test]
    fn pass_through_renames_and_duplicates_sleep_duration() {
        let raw = RawRecord {
            sleep_duration: Some(Value::Float(7.5)),
            good_cholesterol: Some(Value::from("Low")),
            physical_activity_duration: Some(Value::Int(45)),
            ..required_only()
        };
        let enriched = derive(&raw).unwrap();
        assert_eq!(enriched.get(Feature::SleepTime), Some(Value::Float(7.5)));
        assert_eq!(enriched.get(Feature::SleepDuration), Some(Value::Float(7.5)));
        assert_eq!(enriched.get(Feature::HdlCategory), Some(Value::from("Low")));
        assert_eq!(
            enriched.get(Feature::PhysicalActivityLevel),
            Some(Value::Int(45))
        );
        assert_eq!(enriched.pass_through_count(), 4);
    }

    #[test]
    fn unanswered_pass_through_is_absent() {
        let enriched = derive(&required_only()).unwrap();
        assert_eq!(enriched.get(Feature::Smoking), None);
        assert_eq!(enriched.get(Feature::Occupation), None);
        assert_eq!(enriched.pass_through_count(), 0);
    }

    #[test]
    fn missing_required_fields_fail() {
        for field in [
            RawField::Height,
            RawField::Weight,
            RawField::Age,
            RawField::Gender,
            RawField::SystolicBp,
            RawField::DiastolicBp,
            RawField::Diabetic,
        ] {
            let mut raw = required_only();
            match field {
                RawField::Height => raw.height = None,
                RawField::Weight => raw.weight = None,
                RawField::Age => raw.age = None,
                RawField::Gender => raw.gender = None,
                RawField::SystolicBp => raw.systolic_bp = None,
                RawField::DiastolicBp => raw.diastolic_bp = None,
                RawField::Diabetic => raw.diabetic = None,
                _ => unreachable!(),
            }
            assert_eq!(
                derive(&raw),
                Err(FeatureError::MissingRequiredField {
                    field: field.name()
                }),
                "expected {} to be required",
                field.name()
            );
        }
    }

    #[test]
    fn empty_required_text_is_taken_as_sent() {
        let raw = RawRecord {
            gender: Some(Value::from("")),
            systolic_bp: Some(Value::from("")),
            diabetic: Some(Value::from("")),
            ..required_only()
        };
        let enriched = derive(&raw).unwrap();
        assert_eq!(enriched.blood_sugar_category, BloodSugarCategory::PreDiabetic);
        assert_eq!(enriched.blood_pressure, "/80");
        assert_eq!(enriched.get(Feature::Sex), Some(Value::from("")));
        assert_eq!(enriched.get(Feature::Gender), Some(Value::from("")));
    }

    #[test]
    fn zero_height_is_invalid() {
        for weight in [Value::Int(70), Value::Int(0)] {
            let raw = RawRecord {
                height: Some(Value::Int(0)),
                weight: Some(weight),
                ..required_only()
            };
            assert!(matches!(
                derive(&raw),
                Err(FeatureError::InvalidField { field: "height", .. })
            ));
        }
    }

    #[test]
    fn empty_height_is_missing() {
        let raw = RawRecord {
            height: Some(Value::from("")),
            ..required_only()
        };
        assert_eq!(
            derive(&raw),
            Err(FeatureError::MissingRequiredField { field: "height" })
        );
    }

    #[test]
    fn non_numeric_age_is_invalid() {
        let raw = RawRecord {
            age: Some(Value::from("forty")),
            ..required_only()
        };
        assert!(matches!(
            derive(&raw),
            Err(FeatureError::InvalidField { field: "age", .. })
        ));
    }

    #[test]
    fn derive_is_deterministic() {
        let raw = RawRecord {
            smoking: Some(Value::from("No")),
            race: Some(Value::from("White")),
            ..required_only()
        };
        let first = derive(&raw).unwrap();
        for _ in 0..10 {
            assert_eq!(derive(&raw).unwrap(), first);
        }
    }
}
