//! Brain-age model core
//!
//! Numeric building blocks for the linear brain-age baseline:
//! - `StandardScaler`: per-feature standardization fit on training rows
//! - `LinearModel`: ordinary least-squares regression with intercept
//! - `mean_absolute_error`: held-out evaluation metric
//! - `ModelArtifact`: model + scaler bundle persisted as canonical JSON

pub mod artifact;
pub mod errors;
pub mod linear;
pub mod metrics;
pub mod scaler;
pub mod serialization;

pub use artifact::{hash_path, ArtifactMetadata, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use errors::{ModelError, Result};
pub use linear::{LinearModel, MIN_TRAINING_ROWS};
pub use metrics::mean_absolute_error;
pub use scaler::StandardScaler;
pub use serialization::{canonical_json_string, content_hash_hex};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
