use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use vitalrisk_ai::{ModelRegistry, Orchestrator};
use vitalrisk_core::{Model, ModelConfig, Projector, RawRecord, derive};

mod display;

#[derive(Parser)]
#[command(
    name = "vitalrisk",
    version,
    about = "Cardiac, sleep-disorder and metabolic-syndrome risk from one health survey"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict all three risks for one survey record and print the JSON result.
    Predict {
        /// Survey record as JSON; `-` reads stdin.
        #[arg(long, short, default_value = "-")]
        input: PathBuf,
        #[command(flatten)]
        models: ModelArgs,
    },
    /// Show the derived features and the per-model feature vectors.
    Features {
        #[arg(long, short, default_value = "-")]
        input: PathBuf,
        /// Only show this model's vector (heart, sleep or metabolism).
        #[arg(long)]
        model: Option<Model>,
    },
    /// Load the classifiers and report their declared inputs.
    Check {
        #[command(flatten)]
        models: ModelArgs,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Directory holding the three exported classifiers under their default names.
    #[arg(long, env = "VITALRISK_MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,
    /// JSON file with `heart`, `sleep` and `metabolism` paths; overrides --model-dir.
    #[arg(long, env = "VITALRISK_MODELS")]
    models: Option<PathBuf>,
}

impl ModelArgs {
    fn config(&self) -> anyhow::Result<ModelConfig> {
        match &self.models {
            Some(path) => Ok(ModelConfig::from_json_file(path)?),
            None => Ok(ModelConfig::from_dir(&self.model_dir)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // stdout carries the JSON result.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("vitalrisk v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Predict { input, models } => {
            let registry =
                ModelRegistry::load(&models.config()?).context("loading classifiers")?;
            let raw = read_record(&input)?;
            let result = Orchestrator::new(&registry).run(&raw)?;
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Features { input, model } => {
            let raw = read_record(&input)?;
            let enriched = derive(&raw)?;
            display::print_enriched(&enriched);

            let models = model.map_or_else(|| Model::ALL.to_vec(), |m| vec![m]);
            for model in models {
                let vector = Projector::for_model(model).project(&enriched)?;
                display::print_feature_vector(&vector)?;
            }
        }
        Command::Check { models } => {
            let config = models.config()?;
            let registry = ModelRegistry::load(&config).context("loading classifiers")?;
            display::print_registry(&config, &registry);
        }
    }

    Ok(())
}

/// Parse one survey record from a file, or stdin for `-`.
fn read_record(input: &Path) -> anyhow::Result<RawRecord> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading survey record from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading survey record {}", input.display()))?
    };
    parse_record(&text)
}

fn parse_record(text: &str) -> anyhow::Result<RawRecord> {
    serde_json::from_str(text).context("survey record is not a valid JSON object")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_defaults_to_stdin_and_models_dir() {
        let cli = Cli::try_parse_from(["vitalrisk", "predict"]).unwrap();
        match cli.command {
            Command::Predict { input, models } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(models.models, None);
                assert_eq!(
                    models.config().unwrap(),
                    ModelConfig::from_dir(Path::new(&models.model_dir))
                );
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn features_accepts_model_filter() {
        let cli =
            Cli::try_parse_from(["vitalrisk", "features", "-i", "r.json", "--model", "sleep"])
                .unwrap();
        match cli.command {
            Command::Features { input, model } => {
                assert_eq!(input, PathBuf::from("r.json"));
                assert_eq!(model, Some(Model::Sleep));
            }
            _ => panic!("expected features"),
        }
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert!(Cli::try_parse_from(["vitalrisk", "features", "--model", "liver"]).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_record("height=1.75").is_err());
        assert!(parse_record(r#""just a string""#).is_err());
        assert!(parse_record(r#"{"height": true}"#).is_err());
    }

    #[test]
    fn fixture_record_parses() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../vitalrisk-core/tests/fixtures/survey_record.json");
        let raw = read_record(&path).unwrap();
        assert!(derive(&raw).is_ok());
    }
}
