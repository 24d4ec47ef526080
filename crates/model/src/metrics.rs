//! Regression error metrics.

use nalgebra::DVector;

use crate::errors::{ModelError, Result};

/// Mean of `|y_pred_i - y_true_i|` over all rows.
pub fn mean_absolute_error(y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(ModelError::InvalidInput(format!(
            "target vector has {} rows but predictions have {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(ModelError::InvalidInput(
            "cannot compute mean absolute error over zero rows".to_string(),
        ));
    }

    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (p - t).abs())
        .sum();
    Ok(total / y_true.len() as f64)
}
