//! Seeded train/test partitioning
//!
//! Rows are permuted with a ChaCha8 generator seeded from `seed`; the first
//! `ceil(test_size * n)` permuted rows form the test set and the next
//! `floor((1 - test_size) * n)` the training set.

use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::errors::{Result, TrainerError};

/// Default fraction of rows held out for testing
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Default seed for the row permutation
pub const DEFAULT_SEED: u64 = 42;

/// Disjoint training and test partitions, row-aligned
#[derive(Clone, Debug)]
pub struct Split {
    pub x_train: DMatrix<f64>,
    pub x_test: DMatrix<f64>,
    pub y_train: DVector<f64>,
    pub y_test: DVector<f64>,
}

/// Reject fractions outside the open interval (0, 1).
pub fn validate_test_size(test_size: f64) -> Result<()> {
    if !test_size.is_finite() || test_size <= 0.0 || test_size >= 1.0 {
        return Err(TrainerError::Validation(format!(
            "test_size must be strictly between 0 and 1, got {}",
            test_size
        )));
    }
    Ok(())
}

/// Number of (train, test) rows for `n_rows` samples.
pub fn partition_sizes(n_rows: usize, test_size: f64) -> Result<(usize, usize)> {
    validate_test_size(test_size)?;

    let n = n_rows as f64;
    let n_test = (test_size * n).ceil() as usize;
    let n_train = ((1.0 - test_size) * n).floor() as usize;

    if n_train == 0 || n_test == 0 {
        return Err(TrainerError::Validation(format!(
            "{} rows with test_size={} gives {} train and {} test rows; both must be non-empty",
            n_rows, test_size, n_train, n_test
        )));
    }
    if n_train + n_test > n_rows {
        return Err(TrainerError::Validation(format!(
            "train ({}) and test ({}) rows exceed the {} available",
            n_train, n_test, n_rows
        )));
    }

    Ok((n_train, n_test))
}

/// Partition rows of `x` and `y` into training and test subsets.
pub fn split_data(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    test_size: f64,
    seed: u64,
) -> Result<Split> {
    if x.nrows() != y.len() {
        return Err(TrainerError::Validation(format!(
            "feature matrix has {} rows but target vector has {}",
            x.nrows(),
            y.len()
        )));
    }

    let (n_train, n_test) = partition_sizes(x.nrows(), test_size)?;

    let mut indices: Vec<usize> = (0..x.nrows()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_idx = &indices[..n_test];
    let train_idx = &indices[n_test..n_test + n_train];

    Ok(Split {
        x_train: x.select_rows(train_idx),
        x_test: x.select_rows(test_idx),
        y_train: y.select_rows(train_idx),
        y_test: y.select_rows(test_idx),
    })
}
