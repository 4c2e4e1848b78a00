//! CSV loading for [`Dataset`].

use crate::core::error::{CrossValError, Result};
use crate::core::types::*;
use crate::dataset::Dataset;
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use std::io::Read;
use std::path::Path;

impl Dataset {
    /// Load a dataset from a headered CSV file.
    ///
    /// `target_column` becomes the labels; every other column is a feature,
    /// in file order.
    pub fn from_csv<P: AsRef<Path>>(path: P, target_column: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CrossValError::data_loading(format!("Failed to open {}: {}", path.display(), e))
        })?;
        log::info!("Loading dataset from {}", path.display());
        Self::from_csv_reader(file, target_column)
    }

    /// Load a dataset from any reader producing headered CSV.
    pub fn from_csv_reader<R: Read>(reader: R, target_column: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let target_idx = headers
            .iter()
            .position(|h| h == target_column)
            .ok_or_else(|| {
                CrossValError::data_loading(format!(
                    "Target column '{}' not found in CSV header",
                    target_column
                ))
            })?;
        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != target_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut values: Vec<Feature> = Vec::new();
        let mut labels: Vec<Label> = Vec::new();

        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            for (col, field) in record.iter().enumerate() {
                let value: f32 = field.parse().map_err(|_| {
                    CrossValError::data_loading(format!(
                        "Non-numeric value '{}' in column '{}' at data row {}",
                        field,
                        headers.get(col).unwrap_or("?"),
                        line + 1
                    ))
                })?;
                if col == target_idx {
                    labels.push(value);
                } else {
                    values.push(value);
                }
            }
        }

        let num_rows = labels.len();
        let features = Array2::from_shape_vec((num_rows, feature_names.len()), values)
            .map_err(|e| CrossValError::data_loading(format!("Ragged CSV rows: {}", e)))?;

        log::debug!("Loaded {} rows with {} features", num_rows, feature_names.len());
        Dataset::new(features, Array1::from_vec(labels))?.with_feature_names(feature_names)
    }
}
