//! CSV dataset loading
//!
//! Reads a header-prefixed CSV where one column is the regression target
//! (`brain_age`) and every other column is a numeric feature.

use csv::{ReaderBuilder, StringRecord, Trim};
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{Result, TrainerError};

/// Name of the regression target column
pub const TARGET_COLUMN: &str = "brain_age";

/// Feature matrix and row-aligned target vector with the feature names
#[derive(Clone, Debug)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub features: DMatrix<f64>,
    pub targets: DVector<f64>,
}

/// Min, max and mean of one feature column
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSummary {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Dataset {
    /// Load dataset from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| TrainerError::io(path, err))?;
        Self::from_reader(file)
    }

    /// Load dataset from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv_reader(reader);
        let headers = rdr.headers()?.clone();

        let target_idx = column_index(&headers, TARGET_COLUMN).ok_or_else(|| {
            TrainerError::MissingTargetColumn {
                column: TARGET_COLUMN.to_string(),
            }
        })?;

        let feature_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != target_idx).collect();
        if feature_idx.is_empty() {
            return Err(TrainerError::Validation(
                "CSV has no feature columns besides the target".to_string(),
            ));
        }

        let table = read_rows(&mut rdr, &headers, &feature_idx, Some(target_idx))?;
        let feature_names = feature_idx.iter().map(|&i| headers[i].to_string()).collect();

        Ok(Self {
            feature_names,
            features: table.features,
            targets: table
                .targets
                .ok_or_else(|| TrainerError::Validation("target column was not read".to_string()))?,
        })
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    pub fn feature_count(&self) -> usize {
        self.features.ncols()
    }

    /// Per-feature statistics for logging
    pub fn feature_summary(&self) -> Vec<FeatureSummary> {
        self.feature_names
            .iter()
            .zip(self.features.column_iter())
            .map(|(name, column)| FeatureSummary {
                name: name.clone(),
                min: column.min(),
                max: column.max(),
                mean: column.mean(),
            })
            .collect()
    }

    pub fn into_parts(self) -> (DMatrix<f64>, DVector<f64>) {
        (self.features, self.targets)
    }
}

/// Load a CSV into a feature matrix and target vector.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<(DMatrix<f64>, DVector<f64>)> {
    Ok(Dataset::from_csv(path)?.into_parts())
}

/// Features selected by name, with targets when the target column is present
#[derive(Clone, Debug)]
pub struct FeatureTable {
    pub features: DMatrix<f64>,
    pub targets: Option<DVector<f64>>,
}

/// Read the named feature columns (in the given order) from a CSV file.
///
/// Columns may appear in any order in the file and extra columns are
/// ignored. The target column is optional.
pub fn read_feature_table<P: AsRef<Path>>(
    path: P,
    feature_names: &[String],
    target_column: &str,
) -> Result<FeatureTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| TrainerError::io(path, err))?;
    let mut rdr = csv_reader(file);
    let headers = rdr.headers()?.clone();

    let feature_idx = feature_names
        .iter()
        .map(|name| {
            column_index(&headers, name).ok_or_else(|| {
                TrainerError::Validation(format!("CSV is missing feature column '{}'", name))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let target_idx = column_index(&headers, target_column);

    read_rows(&mut rdr, &headers, &feature_idx, target_idx)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn read_rows<R: Read>(
    rdr: &mut csv::Reader<R>,
    headers: &StringRecord,
    feature_idx: &[usize],
    target_idx: Option<usize>,
) -> Result<FeatureTable> {
    let mut values = Vec::new();
    let mut targets = Vec::new();
    let mut rows = 0usize;

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());

        for &idx in feature_idx {
            values.push(parse_cell(&record, headers, idx, line)?);
        }
        if let Some(idx) = target_idx {
            targets.push(parse_cell(&record, headers, idx, line)?);
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(TrainerError::Validation("dataset is empty".to_string()));
    }

    Ok(FeatureTable {
        features: DMatrix::from_row_slice(rows, feature_idx.len(), &values),
        targets: target_idx.map(|_| DVector::from_vec(targets)),
    })
}

fn parse_cell(record: &StringRecord, headers: &StringRecord, idx: usize, line: u64) -> Result<f64> {
    let raw = record.get(idx).unwrap_or_default();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrainerError::Parse {
            line,
            column: headers.get(idx).unwrap_or_default().to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_csv("f1,f2,f3,brain_age\n1,2,3,40\n4,5,6,50\n7,8,9,60\n");
        let dataset = Dataset::from_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.feature_count(), 3);
        assert_eq!(dataset.feature_names, vec!["f1", "f2", "f3"]);
        assert_eq!(dataset.features.row(1).iter().copied().collect::<Vec<_>>(), [4.0, 5.0, 6.0]);
        assert_eq!(dataset.targets[2], 60.0);
    }

    #[test]
    fn test_target_in_any_position() {
        let file = create_test_csv("brain_age, a , b\n33.5, 0.1, -2\n41, 0.2, 3e1\n");
        let (x, y) = load_data(file.path()).unwrap();

        assert_eq!(x.shape(), (2, 2));
        assert_eq!(y.as_slice(), &[33.5, 41.0]);
        assert_eq!(x[(1, 1)], 30.0);
    }

    #[test]
    fn test_missing_target_column() {
        let file = create_test_csv("f1,f2,age\n1,2,3\n");
        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, TrainerError::MissingTargetColumn { .. }));
    }

    #[test]
    fn test_only_target_column() {
        let file = create_test_csv("brain_age\n1\n2\n");
        assert!(matches!(
            Dataset::from_csv(file.path()),
            Err(TrainerError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_number_reports_location() {
        let file = create_test_csv("f1,brain_age\n1,2\nabc,3\n");
        match Dataset::from_csv(file.path()) {
            Err(TrainerError::Parse { line, column, value }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "f1");
                assert_eq!(value, "abc");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let file = create_test_csv("f1,f2,brain_age\n1,2,3\n4,5\n");
        assert!(matches!(
            Dataset::from_csv(file.path()),
            Err(TrainerError::Csv(_))
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let file = create_test_csv("f1,brain_age\n");
        assert!(matches!(
            Dataset::from_csv(file.path()),
            Err(TrainerError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, TrainerError::Io { .. }));
    }

    #[test]
    fn test_feature_summary() {
        let file = create_test_csv("f1,brain_age\n1,10\n3,20\n5,30\n");
        let summary = Dataset::from_csv(file.path()).unwrap().feature_summary();

        assert_eq!(
            summary,
            vec![FeatureSummary {
                name: "f1".to_string(),
                min: 1.0,
                max: 5.0,
                mean: 3.0,
            }]
        );
    }

    #[test]
    fn test_read_feature_table_by_name() {
        let file = create_test_csv("extra,f2,f1\n9,2,1\n9,4,3\n");
        let names = vec!["f1".to_string(), "f2".to_string()];
        let table = read_feature_table(file.path(), &names, TARGET_COLUMN).unwrap();

        assert!(table.targets.is_none());
        assert_eq!(table.features.row(0).iter().copied().collect::<Vec<_>>(), [1.0, 2.0]);
        assert_eq!(table.features.row(1).iter().copied().collect::<Vec<_>>(), [3.0, 4.0]);

        let missing = vec!["f3".to_string()];
        assert!(read_feature_table(file.path(), &missing, TARGET_COLUMN).is_err());
    }
}
