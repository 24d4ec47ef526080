//! Brain-age baseline trainer CLI
//!
//! Trains a standardized linear regression on a CSV and saves the model
//! together with its scaler.

use anyhow::{Context, Result};
use brain_age_trainer::logging::init_logging;
use brain_age_trainer::{run_training, ConfigLayer, TrainConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "brain-age-train")]
#[command(author = "Brain Age Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train baseline brain-age model", long_about = None)]
struct Args {
    /// Path to CSV data file (must contain a brain_age column)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Fraction of data to use as test set [default: 0.2]
    #[arg(long = "test_size")]
    test_size: Option<f64>,

    /// Path to save the trained model [default: models/baseline_model.json]
    #[arg(long = "model_path")]
    model_path: Option<PathBuf>,

    /// Random seed for the train/test split [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with data, test_size, model_path and seed keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<TrainConfig> {
        let file_layer = match &self.config {
            Some(path) => ConfigLayer::from_toml_file(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?,
            None => ConfigLayer::default(),
        };

        let flag_layer = ConfigLayer {
            data: self.data,
            test_size: self.test_size,
            model_path: self.model_path,
            seed: self.seed,
        };

        TrainConfig::try_from(file_layer.overlay(flag_layer)).context("Invalid configuration")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose).context("Failed to set tracing subscriber")?;
    info!("Brain-age baseline trainer v{}", env!("CARGO_PKG_VERSION"));

    let config = args.into_config()?;
    let model_path = config.model_path.clone();

    let run = run_training(config).context("Training failed")?;
    println!("Mean Absolute Error: {:.2}", run.mean_absolute_error);

    run.persist()
        .with_context(|| format!("Failed to save model to {}", model_path.display()))?;
    println!("Model saved to {}", model_path.display());

    Ok(())
}
