//! Brain-age baseline trainer
//!
//! Loads a CSV of numeric features with a `brain_age` target, holds out a
//! seeded test partition, standardizes features, fits an ordinary
//! least-squares model and persists model + scaler as one artifact.

pub mod baseline;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod inference;
pub mod logging;
pub mod preprocess;
pub mod split;
pub mod workflow;

pub use baseline::{evaluate_model, train_baseline};
pub use config::{ConfigLayer, TrainConfig, DEFAULT_MODEL_PATH};
pub use dataset::{
    load_data, read_feature_table, Dataset, FeatureSummary, FeatureTable, TARGET_COLUMN,
};
pub use errors::TrainerError;
pub use inference::{predict_table, write_predictions, PredictionReport};
pub use preprocess::preprocess_data;
pub use split::{partition_sizes, split_data, Split, DEFAULT_SEED, DEFAULT_TEST_SIZE};
pub use workflow::{run_training, TrainingRun};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
