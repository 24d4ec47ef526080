//! Ordinary least-squares linear regression.
//!
//! Fits `y ≈ X·w + b` by centering both sides and solving the centered system
//! with an SVD. Rank-deficient designs (collinear features, more features
//! than rows) resolve to the minimum-norm solution.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ModelError, Result};

/// Minimum number of training rows for a fit with intercept.
pub const MIN_TRAINING_ROWS: usize = 2;

/// Fitted linear mapping from a feature vector to a scalar prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Fit coefficients and intercept minimizing the sum of squared residuals.
    pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(ModelError::InvalidInput(format!(
                "feature matrix has {} rows but target vector has {}",
                n_samples,
                y.len()
            )));
        }
        if n_features == 0 {
            return Err(ModelError::Degenerate(
                "no feature columns to fit".to_string(),
            ));
        }
        if n_samples < MIN_TRAINING_ROWS {
            return Err(ModelError::Degenerate(format!(
                "need at least {} training rows, got {}",
                MIN_TRAINING_ROWS, n_samples
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(
                "training data contains non-finite values".to_string(),
            ));
        }

        let x_mean: DVector<f64> = x.row_mean().transpose();
        let y_mean = y.mean();

        let mut centered = x.clone();
        for (idx, mut column) in centered.column_iter_mut().enumerate() {
            column.add_scalar_mut(-x_mean[idx]);
        }
        let y_centered = y.add_scalar(-y_mean);

        let svd = centered.svd(true, true);
        let max_singular = svd.singular_values.max();
        let tolerance = max_singular * n_samples.max(n_features) as f64 * f64::EPSILON;
        let rank = svd.rank(tolerance);

        debug!(
            "least-squares solve: {} rows, {} features, numerical rank {}",
            n_samples, n_features, rank
        );
        if rank < n_features {
            warn!(
                "design matrix is rank deficient ({} of {}); using minimum-norm solution",
                rank, n_features
            );
        }

        let weights = svd
            .solve(&y_centered, tolerance)
            .map_err(|err| ModelError::Degenerate(err.to_string()))?;

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Degenerate(
                "least-squares solve produced non-finite coefficients".to_string(),
            ));
        }

        let intercept = y_mean - x_mean.dot(&weights);

        Ok(Self {
            coefficients: weights.iter().copied().collect(),
            intercept,
        })
    }

    /// Number of features the model expects.
    pub fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict one value per row of `x`.
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>> {
        if x.ncols() != self.feature_count() {
            return Err(ModelError::InvalidInput(format!(
                "model expects {} features, got {}",
                self.feature_count(),
                x.ncols()
            )));
        }

        let weights = DVector::from_column_slice(&self.coefficients);
        Ok((x * weights).add_scalar(self.intercept))
    }
}
