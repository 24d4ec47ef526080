//! End-to-end training workflow
//!
//! load → split → scale → train → evaluate, then persist on request.

use brain_age_model::{ArtifactMetadata, ModelArtifact};
use tracing::{debug, info};

use crate::baseline::{evaluate_model, train_baseline};
use crate::config::TrainConfig;
use crate::dataset::{Dataset, TARGET_COLUMN};
use crate::errors::Result;
use crate::preprocess::preprocess_data;
use crate::split::split_data;

/// Outcome of a completed (not yet persisted) training run
#[derive(Clone, Debug)]
pub struct TrainingRun {
    pub config: TrainConfig,
    pub artifact: ModelArtifact,
    pub mean_absolute_error: f64,
}

impl TrainingRun {
    /// Write the artifact to the configured model path.
    ///
    /// Returns the artifact's content hash.
    pub fn persist(&self) -> Result<String> {
        Ok(self.artifact.save(&self.config.model_path)?)
    }
}

/// Run every computational stage. Nothing is written to disk.
pub fn run_training(config: TrainConfig) -> Result<TrainingRun> {
    config.validate()?;

    info!("Loading dataset from: {}", config.data_path.display());
    let dataset = Dataset::from_csv(&config.data_path)?;
    info!(
        "Loaded {} samples with {} features",
        dataset.len(),
        dataset.feature_count()
    );
    for stat in dataset.feature_summary() {
        debug!(
            "  {}: min={}, max={}, mean={:.4}",
            stat.name, stat.min, stat.max, stat.mean
        );
    }

    let feature_names = dataset.feature_names.clone();
    let (x, y) = dataset.into_parts();

    info!(
        "Splitting with test_size={} seed={}",
        config.test_size, config.seed
    );
    let split = split_data(&x, &y, config.test_size, config.seed)?;
    info!(
        "  Train rows: {}, test rows: {}",
        split.y_train.len(),
        split.y_test.len()
    );

    let (x_train, x_test, scaler) = preprocess_data(&split.x_train, &split.x_test)?;

    info!("Fitting linear baseline...");
    let model = train_baseline(&x_train, &split.y_train)?;

    let mae = evaluate_model(&model, &x_test, &split.y_test)?;
    info!("Held-out mean absolute error: {:.4}", mae);

    let metadata = ArtifactMetadata {
        feature_names,
        target_column: TARGET_COLUMN.to_string(),
        train_rows: split.y_train.len(),
        test_rows: split.y_test.len(),
        test_size: config.test_size,
        seed: config.seed,
        mean_absolute_error: mae,
        created_at: chrono::Utc::now().timestamp().max(0) as u64,
    };
    let artifact = ModelArtifact::new(model, scaler, metadata)?;

    Ok(TrainingRun {
        config,
        artifact,
        mean_absolute_error: mae,
    })
}
