//! Brain-age inference CLI
//!
//! Applies a saved artifact (scaler + model) to the rows of a CSV.

use anyhow::{Context, Result};
use brain_age_model::ModelArtifact;
use brain_age_trainer::logging::init_logging;
use brain_age_trainer::{predict_table, read_feature_table, write_predictions, DEFAULT_MODEL_PATH};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "brain-age-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict brain age with a trained baseline model", long_about = None)]
struct Args {
    /// CSV with the feature columns the model was trained on
    #[arg(long)]
    data: PathBuf,

    /// Trained artifact
    #[arg(long = "model_path", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Write predictions as CSV here instead of printing them
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose).context("Failed to set tracing subscriber")?;

    let artifact = ModelArtifact::load(&args.model_path)
        .with_context(|| format!("Failed to load model from {}", args.model_path.display()))?;
    info!(
        "Loaded model with {} features (trained on {} rows)",
        artifact.feature_count(),
        artifact.metadata.train_rows
    );

    let table = read_feature_table(
        &args.data,
        &artifact.metadata.feature_names,
        &artifact.metadata.target_column,
    )
    .with_context(|| format!("Failed to read {}", args.data.display()))?;

    let report = predict_table(&artifact, &table).context("Failed to compute predictions")?;

    match &args.output {
        Some(path) => {
            write_predictions(path, &report.predictions)
                .with_context(|| format!("Failed to write predictions to {}", path.display()))?;
            println!(
                "Wrote {} predictions to {}",
                report.predictions.len(),
                path.display()
            );
        }
        None => {
            for value in report.predictions.iter() {
                println!("{:.4}", value);
            }
        }
    }

    if let Some(mae) = report.mean_absolute_error {
        println!("Mean Absolute Error: {:.2}", mae);
    }

    Ok(())
}
