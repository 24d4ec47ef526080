//! Per-feature standardization fit on training rows only.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};

/// Zero mean, unit variance scaling.
///
/// `std` holds the population standard deviation observed on the training
/// rows. A feature whose variance is indistinguishable from rounding noise
/// is stored with `std = 0.0` and is centered but divided by 1.0, so a
/// constant column never produces NaN or infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Compute per-column mean and standard deviation from `x`.
    pub fn fit(x: &DMatrix<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(ModelError::InvalidInput(
                "cannot fit scaler on zero rows".to_string(),
            ));
        }
        if x.ncols() == 0 {
            return Err(ModelError::InvalidInput(
                "cannot fit scaler on zero feature columns".to_string(),
            ));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(
                "feature matrix contains non-finite values".to_string(),
            ));
        }

        let n = x.nrows() as f64;
        let mut mean = Vec::with_capacity(x.ncols());
        let mut std = Vec::with_capacity(x.ncols());

        for column in x.column_iter() {
            // Two-pass mean with a correction term for the first pass's rounding
            let rough = column.sum() / n;
            let mu = rough + column.iter().map(|v| v - rough).sum::<f64>() / n;
            let var = column.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / n;
            mean.push(mu);
            std.push(if is_rounding_noise(var, mu, n) { 0.0 } else { var.sqrt() });
        }

        let scaler = Self { mean, std };
        for idx in scaler.constant_features() {
            tracing::warn!(
                "feature {} has zero variance in the training rows; centering without scaling",
                idx
            );
        }
        Ok(scaler)
    }

    /// Number of features the scaler was fit on.
    pub fn feature_count(&self) -> usize {
        self.mean.len()
    }

    /// Indices of features treated as constant.
    pub fn constant_features(&self) -> Vec<usize> {
        (0..self.feature_count())
            .filter(|&idx| self.is_constant(idx))
            .collect()
    }

    fn is_constant(&self, idx: usize) -> bool {
        self.std[idx] == 0.0
    }

    fn divisor(&self, idx: usize) -> f64 {
        if self.is_constant(idx) {
            1.0
        } else {
            self.std[idx]
        }
    }

    /// Apply `(value - mean) / std` column-wise.
    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if x.ncols() != self.feature_count() {
            return Err(ModelError::InvalidInput(format!(
                "expected {} feature columns, got {}",
                self.feature_count(),
                x.ncols()
            )));
        }

        let mut scaled = x.clone();
        for (idx, mut column) in scaled.column_iter_mut().enumerate() {
            let mu = self.mean[idx];
            let divisor = self.divisor(idx);
            column.apply(|v| *v = (*v - mu) / divisor);
        }
        Ok(scaled)
    }

    /// Fit on `x` and return it transformed.
    pub fn fit_transform(x: &DMatrix<f64>) -> Result<(Self, DMatrix<f64>)> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }
}

/// Variance below the accumulated error of summing `n` values around `mean`.
fn is_rounding_noise(var: f64, mean: f64, n: f64) -> bool {
    let eps = f64::EPSILON;
    var <= n * eps * var + (n * mean * eps).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> DMatrix<f64> {
        DMatrix::from_row_slice(4, 2, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
    }

    #[test]
    fn test_fit_statistics() {
        let scaler = StandardScaler::fit(&sample()).unwrap();

        assert_abs_diff_eq!(scaler.mean[0], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(scaler.mean[1], 25.0, epsilon = 1e-12);
        // Population deviation of 1..=4
        assert_abs_diff_eq!(scaler.std[0], 1.25_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(scaler.std[1], 125.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_transformed_columns_are_standardized() {
        let (_, scaled) = StandardScaler::fit_transform(&sample()).unwrap();

        for column in scaled.column_iter() {
            let n = column.len() as f64;
            let mean = column.sum() / n;
            let var = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(var.sqrt(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_feature_is_centered_only() {
        let x = DMatrix::from_row_slice(3, 2, &[5.0, 1.0, 5.0, 2.0, 5.0, 3.0]);
        let (scaler, scaled) = StandardScaler::fit_transform(&x).unwrap();

        assert_eq!(scaler.constant_features(), vec![0]);
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert!(scaled.column(0).iter().all(|v| *v == 0.0));

        let unseen = DMatrix::from_row_slice(1, 2, &[7.0, 2.0]);
        let out = scaler.transform(&unseen).unwrap();
        assert_abs_diff_eq!(out[(0, 0)], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_long_constant_column_is_detected() {
        for (rows, value) in [(1_000, 0.7), (10_000, 3.3), (100_000, 123.456)] {
            let x = DMatrix::from_element(rows, 1, value);
            let scaler = StandardScaler::fit(&x).unwrap();

            assert_eq!(scaler.constant_features(), vec![0], "{} rows of {}", rows, value);
            assert_eq!(scaler.std[0], 0.0);

            let unseen = DMatrix::from_element(1, 1, value + 0.1);
            let out = scaler.transform(&unseen).unwrap();
            assert_abs_diff_eq!(out[(0, 0)], 0.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_small_but_real_variance_is_scaled() {
        let x = DMatrix::from_row_slice(4, 1, &[1.0, 1.0 + 1e-6, 1.0, 1.0 + 1e-6]);
        let scaler = StandardScaler::fit(&x).unwrap();

        assert!(scaler.constant_features().is_empty());
        assert_abs_diff_eq!(scaler.std[0], 5e-7, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let scaler = StandardScaler::fit(&sample()).unwrap();
        let narrow = DMatrix::from_row_slice(1, 1, &[1.0]);

        assert!(matches!(
            scaler.transform(&narrow),
            Err(ModelError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fit_rejects_empty_and_non_finite() {
        let empty = DMatrix::<f64>::zeros(0, 2);
        assert!(StandardScaler::fit(&empty).is_err());

        let nan = DMatrix::from_row_slice(2, 1, &[1.0, f64::NAN]);
        assert!(StandardScaler::fit(&nan).is_err());
    }
}
