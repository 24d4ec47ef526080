//! Persisted model + scaler bundle.
//!
//! An artifact is written as canonical JSON with a sibling `<path>.hash`
//! file carrying the BLAKE3 hash of the JSON bytes. Loading verifies the
//! hash whenever the sidecar exists.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{ModelError, Result};
use crate::linear::LinearModel;
use crate::scaler::StandardScaler;
use crate::serialization::{canonical_json_string, content_hash_hex};

/// Current on-disk layout version.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Description of the training run that produced an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Feature column names in model order
    pub feature_names: Vec<String>,
    pub target_column: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub test_size: f64,
    pub seed: u64,
    /// Held-out mean absolute error
    pub mean_absolute_error: f64,
    /// Unix timestamp (seconds)
    pub created_at: u64,
}

/// Fitted model bundled with the scaler it was trained behind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model: LinearModel,
    pub scaler: StandardScaler,
    pub metadata: ArtifactMetadata,
}

impl ModelArtifact {
    pub fn new(
        model: LinearModel,
        scaler: StandardScaler,
        metadata: ArtifactMetadata,
    ) -> Result<Self> {
        let artifact = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            model,
            scaler,
            metadata,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        let features = self.model.feature_count();
        if self.scaler.feature_count() != features || self.scaler.std.len() != features {
            return Err(ModelError::InvalidInput(format!(
                "scaler covers {} features but model has {}",
                self.scaler.feature_count(),
                features
            )));
        }
        if self.metadata.feature_names.len() != features {
            return Err(ModelError::InvalidInput(format!(
                "metadata names {} features but model has {}",
                self.metadata.feature_names.len(),
                features
            )));
        }
        Ok(())
    }

    /// Number of raw input features.
    pub fn feature_count(&self) -> usize {
        self.model.feature_count()
    }

    /// Scale raw features with the bundled scaler, then predict.
    pub fn predict(&self, raw: &DMatrix<f64>) -> Result<DVector<f64>> {
        let scaled = self.scaler.transform(raw)?;
        self.model.predict(&scaled)
    }

    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(canonical_json_string(self)?)
    }

    /// Write the artifact and its hash sidecar, creating parent directories.
    ///
    /// Returns the content hash.
    pub fn save(&self, path: &Path) -> Result<String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| ModelError::io(parent, err))?;
            }
        }

        let json = self.to_canonical_json()?;
        let hash = content_hash_hex(&json);

        fs::write(path, &json).map_err(|err| ModelError::io(path, err))?;
        let sidecar = hash_path(path);
        fs::write(&sidecar, &hash).map_err(|err| ModelError::io(&sidecar, err))?;

        info!("Saved artifact to {} (blake3 {})", path.display(), hash);
        Ok(hash)
    }

    /// Read an artifact, verifying the hash sidecar when present.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| ModelError::io(path, err))?;

        let sidecar = hash_path(path);
        if sidecar.exists() {
            let expected = fs::read_to_string(&sidecar)
                .map_err(|err| ModelError::io(&sidecar, err))?
                .trim()
                .to_owned();
            let actual = content_hash_hex(&contents);
            if !actual.eq_ignore_ascii_case(&expected) {
                return Err(ModelError::IntegrityMismatch {
                    path: path.to_path_buf(),
                    expected,
                    actual,
                });
            }
            debug!("Verified artifact hash {}", actual);
        } else {
            debug!("No hash sidecar at {}; skipping verification", sidecar.display());
        }

        let artifact: Self = serde_json::from_str(&contents)?;
        artifact.validate()?;
        Ok(artifact)
    }
}

/// Location of the hash sidecar for an artifact path.
pub fn hash_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".hash");
    PathBuf::from(name)
}
