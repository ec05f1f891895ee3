//! Terminal rendering for derived features, feature vectors, and loaded classifiers.

use arrow::util::pretty::pretty_format_batches;
use vitalrisk_ai::ModelRegistry;
use vitalrisk_core::{EnrichedRecord, FeatureVector, Model, ModelConfig};

/// Print every present column of an enriched record, one per line.
pub fn print_enriched(record: &EnrichedRecord) {
    println!("=== Derived features ===");
    for (feature, value) in record.fields() {
        println!("  {:<26} {}", feature.name(), value);
    }
    println!();
}

/// Print one model's feature vector as a single-row table.
pub fn print_feature_vector(vector: &FeatureVector) -> anyhow::Result<()> {
    let batch = vector.to_record_batch()?;
    println!("{} ({} columns)", vector.model(), vector.len());
    println!("{}", pretty_format_batches(&[batch])?);
    println!();
    Ok(())
}

pub fn print_registry(config: &ModelConfig, registry: &ModelRegistry) {
    for model in Model::ALL {
        println!("{model}");
        println!("  {:<26} {}", "artifact", config.path(model).display());
        match registry.get(model).input_columns() {
            Some(columns) => {
                println!("  {:<26} {}", "inputs", columns.len());
                for column in columns {
                    println!("    {column}");
                }
            }
            None => println!("  {:<26} (not declared)", "inputs"),
        }
    }
}
