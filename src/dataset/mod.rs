//! Dataset management for crossval.
//!
//! A [`Dataset`] pairs a feature matrix with one label per row. Fold
//! splitting lives in [`split`], per-fold feature scaling in
//! [`preprocessing`].

use crate::core::error::{CrossValError, Result};
use crate::core::types::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[cfg(feature = "csv")]
pub mod loader;
pub mod preprocessing;
pub mod split;

pub use preprocessing::{MinMaxScaler, ScaleFit, StandardScaler};
pub use split::{Fold, FoldSplitter, SplitStrategy};

/// Row-aligned features and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetFields")]
pub struct Dataset {
    /// Feature matrix (num_samples × num_features)
    features: Array2<Feature>,
    /// Target labels (num_samples,)
    labels: Array1<Label>,
    /// Feature names for reporting
    feature_names: Option<Vec<String>>,
}

/// Unchecked serde form of [`Dataset`].
#[derive(Deserialize)]
struct DatasetFields {
    features: Array2<Feature>,
    labels: Array1<Label>,
    feature_names: Option<Vec<String>>,
}

impl TryFrom<DatasetFields> for Dataset {
    type Error = CrossValError;

    fn try_from(fields: DatasetFields) -> Result<Self> {
        let dataset = Dataset::new(fields.features, fields.labels)?;
        match fields.feature_names {
            Some(names) => dataset.with_feature_names(names),
            None => Ok(dataset),
        }
    }
}

impl Dataset {
    /// Create a dataset, checking that features and labels have the same row count.
    pub fn new(features: Array2<Feature>, labels: Array1<Label>) -> Result<Self> {
        if labels.len() != features.nrows() {
            return Err(CrossValError::dimension_mismatch(
                format!("features rows: {}", features.nrows()),
                format!("labels length: {}", labels.len()),
            ));
        }

        Ok(Dataset {
            features,
            labels,
            feature_names: None,
        })
    }

    /// Attach feature names, one per column.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.features.ncols() {
            return Err(CrossValError::dimension_mismatch(
                format!("feature names: {}", self.features.ncols()),
                format!("feature names: {}", names.len()),
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }

    /// Feature matrix view
    pub fn features(&self) -> ArrayView2<'_, Feature> {
        self.features.view()
    }

    /// Label view
    pub fn labels(&self) -> ArrayView1<'_, Label> {
        self.labels.view()
    }

    /// Feature names, if attached
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Copy the rows at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<(Array2<Feature>, Array1<Label>)> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.num_samples()) {
            return Err(CrossValError::invalid_parameter(
                "indices",
                bad.to_string(),
                format!("row index out of bounds for {} samples", self.num_samples()),
            ));
        }

        Ok((
            self.features.select(Axis(0), indices),
            self.labels.select(Axis(0), indices),
        ))
    }

    /// Distinct label values in ascending order.
    pub fn classes(&self) -> Vec<Label> {
        let mut classes: Vec<Label> = self.labels.to_vec();
        classes.sort_by(|a, b| a.total_cmp(b));
        classes.dedup();
        classes
    }
}
