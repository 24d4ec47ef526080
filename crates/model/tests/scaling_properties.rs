//! Property tests for standardization and least-squares fitting.

use brain_age_model::{LinearModel, StandardScaler};
use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;

fn arbitrary_matrix() -> impl Strategy<Value = DMatrix<f64>> {
    (2usize..30, 1usize..5).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-1_000.0f64..1_000.0, rows * cols)
            .prop_map(move |values| DMatrix::from_row_slice(rows, cols, &values))
    })
}

proptest! {
    #[test]
    fn scaled_training_columns_have_zero_mean_unit_std(x in arbitrary_matrix()) {
        let (scaler, scaled) = StandardScaler::fit_transform(&x).unwrap();
        let constant = scaler.constant_features();
        let n = scaled.nrows() as f64;

        for (idx, column) in scaled.column_iter().enumerate() {
            let mean = column.sum() / n;
            prop_assert!(mean.abs() < 1e-9, "column {} mean {}", idx, mean);

            if !constant.contains(&idx) {
                let var = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                prop_assert!((var.sqrt() - 1.0).abs() < 1e-9, "column {} std {}", idx, var.sqrt());
            }
        }
    }

    #[test]
    fn transform_is_finite_even_for_constant_columns(
        rows in 2usize..20,
        value in -100.0f64..100.0,
    ) {
        let x = DMatrix::from_element(rows, 2, value);
        let (_, scaled) = StandardScaler::fit_transform(&x).unwrap();
        prop_assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn least_squares_residuals_are_orthogonal_to_features(x in arbitrary_matrix()) {
        let y = DVector::from_iterator(
            x.nrows(),
            x.row_iter().enumerate().map(|(i, r)| r.sum() * 0.5 + (i % 3) as f64),
        );
        let model = LinearModel::fit(&x, &y).unwrap();
        let residuals = &y - model.predict(&x).unwrap();

        // Normal equations: residuals sum to zero and are orthogonal to each column
        let scale = y.amax().max(1.0) * x.amax().max(1.0) * x.nrows() as f64;
        prop_assert!(residuals.sum().abs() < 1e-6 * scale);
        for column in x.column_iter() {
            prop_assert!(column.dot(&residuals).abs() < 1e-6 * scale);
        }
    }
}
