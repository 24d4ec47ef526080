//! Training run configuration
//!
//! A `TrainConfig` is assembled once at startup from layered sources:
//! command-line flags override an optional TOML file, which overrides the
//! built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, TrainerError};
use crate::split::{validate_test_size, DEFAULT_SEED, DEFAULT_TEST_SIZE};

/// Default destination for the trained artifact
pub const DEFAULT_MODEL_PATH: &str = "models/baseline_model.json";

/// Validated settings for one training run
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub test_size: f64,
    pub model_path: PathBuf,
    pub seed: u64,
}

impl TrainConfig {
    /// Defaults for everything except the data path.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            test_size: DEFAULT_TEST_SIZE,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_test_size(self.test_size)?;
        if self.model_path.as_os_str().is_empty() {
            return Err(TrainerError::Config("model path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// One partially specified source of settings
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub data: Option<PathBuf>,
    pub test_size: Option<f64>,
    pub model_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl ConfigLayer {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| TrainerError::Config(err.to_string()))
    }

    /// Read a TOML file. Relative paths inside it resolve against the
    /// file's own directory.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| TrainerError::io(path, err))?;
        let mut layer = Self::from_toml_str(&contents)
            .map_err(|err| TrainerError::Config(format!("{}: {}", path.display(), err)))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        layer.data = layer.data.map(|p| resolve_relative(base, p));
        layer.model_path = layer.model_path.map(|p| resolve_relative(base, p));
        Ok(layer)
    }

    /// Settings in `higher` win over settings in `self`.
    pub fn overlay(self, higher: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            data: higher.data.or(self.data),
            test_size: higher.test_size.or(self.test_size),
            model_path: higher.model_path.or(self.model_path),
            seed: higher.seed.or(self.seed),
        }
    }
}

impl TryFrom<ConfigLayer> for TrainConfig {
    type Error = TrainerError;

    fn try_from(layer: ConfigLayer) -> Result<Self> {
        let data = layer.data.ok_or_else(|| {
            TrainerError::Config(
                "a data path is required (--data or `data` in the config file)".to_string(),
            )
        })?;

        let mut config = TrainConfig::new(data);
        if let Some(test_size) = layer.test_size {
            config.test_size = test_size;
        }
        if let Some(model_path) = layer.model_path {
            config.model_path = model_path;
        }
        if let Some(seed) = layer.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
