//! Applying a saved artifact to new rows.

use brain_age_model::{mean_absolute_error, ModelArtifact};
use nalgebra::DVector;
use std::fs;
use std::path::Path;

use crate::dataset::FeatureTable;
use crate::errors::{Result, TrainerError};

/// Predictions for a feature table, scored when it carried targets
#[derive(Clone, Debug)]
pub struct PredictionReport {
    pub predictions: DVector<f64>,
    pub mean_absolute_error: Option<f64>,
}

/// Predict every row of `table`; compute MAE when targets are present.
pub fn predict_table(artifact: &ModelArtifact, table: &FeatureTable) -> Result<PredictionReport> {
    let predictions = artifact.predict(&table.features)?;
    let mean_absolute_error = table
        .targets
        .as_ref()
        .map(|targets| mean_absolute_error(targets, &predictions))
        .transpose()?;

    Ok(PredictionReport {
        predictions,
        mean_absolute_error,
    })
}

/// Write `row,prediction` CSV, creating parent directories.
pub fn write_predictions(path: &Path, predictions: &DVector<f64>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| TrainerError::io(parent, err))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["row", "prediction"])?;
    for (row, value) in predictions.iter().enumerate() {
        writer.write_record([row.to_string(), value.to_string()])?;
    }
    writer.flush().map_err(|err| TrainerError::io(path, err))?;
    Ok(())
}
