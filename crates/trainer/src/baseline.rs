//! Baseline linear regression training and evaluation.

use brain_age_model::{mean_absolute_error, LinearModel};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::errors::{Result, TrainerError};

/// Fit an ordinary least-squares model on standardized training rows.
pub fn train_baseline(x_train: &DMatrix<f64>, y_train: &DVector<f64>) -> Result<LinearModel> {
    let model = LinearModel::fit(x_train, y_train)?;
    debug!(
        "Fitted {} coefficients, intercept {:.6}",
        model.coefficients.len(),
        model.intercept
    );
    Ok(model)
}

/// Mean absolute error of `model` on held-out rows.
pub fn evaluate_model(
    model: &LinearModel,
    x_test: &DMatrix<f64>,
    y_test: &DVector<f64>,
) -> Result<f64> {
    if x_test.nrows() != y_test.len() {
        return Err(TrainerError::Validation(format!(
            "test features have {} rows but targets have {}",
            x_test.nrows(),
            y_test.len()
        )));
    }

    let y_pred = model.predict(x_test)?;
    Ok(mean_absolute_error(y_test, &y_pred)?)
}
