use vitalrisk_core::FeatureVector;

/// A pretrained classifier, loaded once and shared read-only.
pub trait Classifier: Send + Sync {
    /// Label for the single row in `features`.
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<i64>;

    /// Input column names the underlying artifact declares, if it declares any.
    fn input_columns(&self) -> Option<Vec<String>> {
        None
    }
}
