//! Feature standardization fit on the training partition.

use brain_age_model::StandardScaler;
use nalgebra::DMatrix;

use crate::errors::{Result, TrainerError};

/// Scale both partitions with statistics computed from `x_train` only.
///
/// Returns `(scaled_train, scaled_test, scaler)`.
pub fn preprocess_data(
    x_train: &DMatrix<f64>,
    x_test: &DMatrix<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>, StandardScaler)> {
    if x_train.ncols() != x_test.ncols() {
        return Err(TrainerError::Validation(format!(
            "train has {} feature columns but test has {}",
            x_train.ncols(),
            x_test.ncols()
        )));
    }

    let (scaler, train_scaled) = StandardScaler::fit_transform(x_train)?;
    let test_scaled = scaler.transform(x_test)?;

    Ok((train_scaled, test_scaled, scaler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_statistics_come_from_training_rows() {
        let x_train = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let x_test = DMatrix::from_row_slice(2, 1, &[1000.0, -1000.0]);

        let (train, test, scaler) = preprocess_data(&x_train, &x_test).unwrap();

        assert_abs_diff_eq!(scaler.mean[0], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(train.sum(), 0.0, epsilon = 1e-12);

        let std = 1.25_f64.sqrt();
        assert_abs_diff_eq!(test[(0, 0)], (1000.0 - 2.5) / std, epsilon = 1e-9);
        assert_abs_diff_eq!(test[(1, 0)], (-1000.0 - 2.5) / std, epsilon = 1e-9);
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let x_train = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let x_test = DMatrix::from_row_slice(1, 1, &[1.0]);

        assert!(matches!(
            preprocess_data(&x_train, &x_test),
            Err(TrainerError::Validation(_))
        ));
    }
}
