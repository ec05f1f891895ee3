use serde::{Deserialize, Serialize};

use crate::model::Model;

/// One label per classifier. Serializes as the response body
/// `{"heart": .., "sleep": .., "metabolism": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub heart: i64,
    pub sleep: i64,
    pub metabolism: i64,
}

impl PredictionResult {
    /// Build a result by calling `predict` for each model in [`Model::ALL`]
    /// order, stopping at the first error.
    pub fn try_from_fn<E>(mut predict: impl FnMut(Model) -> Result<i64, E>) -> Result<Self, E> {
        let heart = predict(Model::Heart)?;
        let sleep = predict(Model::Sleep)?;
        let metabolism = predict(Model::Metabolism)?;
        Ok(Self {
            heart,
            sleep,
            metabolism,
        })
    }

    pub fn get(&self, model: Model) -> i64 {
        match model {
            Model::Heart => self.heart,
            Model::Sleep => self.sleep,
            Model::Metabolism => self.metabolism,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Model, i64)> + '_ {
        Model::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_lowercase_keys() {
        let result = PredictionResult {
            heart: 0,
            sleep: 1,
            metabolism: 0,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"heart": 0, "sleep": 1, "metabolism": 0})
        );
    }

    #[test]
    fn try_from_fn_runs_in_model_order() {
        let mut seen = Vec::new();
        let result = PredictionResult::try_from_fn(|m| {
            seen.push(m);
            Ok::<_, ()>(seen.len() as i64)
        })
        .unwrap();

        assert_eq!(seen, Model::ALL);
        assert_eq!(result.get(Model::Heart), 1);
        assert_eq!(result.get(Model::Sleep), 2);
        assert_eq!(result.get(Model::Metabolism), 3);
    }

    #[test]
    fn try_from_fn_stops_at_first_error() {
        let mut calls = 0;
        let result = PredictionResult::try_from_fn(|m| {
            calls += 1;
            if m == Model::Sleep {
                Err("sleep failed")
            } else {
                Ok(0)
            }
        });

        assert_eq!(result, Err("sleep failed"));
        assert_eq!(calls, 2);
    }
}
