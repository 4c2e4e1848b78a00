//! Score functions for cross-validation.
//!
//! Every metric takes `(y_true, y_pred)` and is usable as a
//! [`ScoreFunction`]. Built-in scalar metrics are selected through the
//! [`Metric`] enum; anything else can be wrapped in a [`CustomMetric`].
//!
//! # Examples
//!
//! ```rust
//! use crossval::metrics::Metric;
//! use crossval::ScoreFunction;
//! use ndarray::array;
//!
//! # fn example() -> crossval::Result<()> {
//! let y_true = array![0.0, 1.0, 1.0, 0.0];
//! let y_pred = array![0.0, 1.0, 0.0, 0.0];
//! let score = Metric::Accuracy.score(y_true.view(), y_pred.view())?;
//! assert_eq!(score, 0.75);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod classification;
pub mod custom;
pub mod regression;

pub use classification::{
    accuracy, confusion_matrix, confusion_matrix_with_labels, f1_score, precision, recall, ConfusionMatrix,
    ConfusionMatrixScorer,
};
pub use custom::{CustomMetric, CustomMetricFunction};
pub use regression::{mean_absolute_error, mean_squared_error, r2_score, root_mean_squared_error};

use crate::core::error::{CrossValError, Result};
use crate::core::traits::ScoreFunction;
use crate::core::types::*;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in scalar metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Fraction of exact matches
    Accuracy,
    /// Binary precision
    Precision,
    /// Binary recall
    Recall,
    /// Binary F1 score
    F1,
    /// Mean squared error
    MeanSquaredError,
    /// Root mean squared error
    RootMeanSquaredError,
    /// Mean absolute error
    MeanAbsoluteError,
    /// Coefficient of determination
    R2,
}

impl Metric {
    /// Identifier used as the column label in result tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
            Metric::MeanSquaredError => "mean_squared_error",
            Metric::RootMeanSquaredError => "root_mean_squared_error",
            Metric::MeanAbsoluteError => "mean_absolute_error",
            Metric::R2 => "r2",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = CrossValError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "accuracy" => Ok(Metric::Accuracy),
            "precision" => Ok(Metric::Precision),
            "recall" => Ok(Metric::Recall),
            "f1" => Ok(Metric::F1),
            "mean_squared_error" | "mse" => Ok(Metric::MeanSquaredError),
            "root_mean_squared_error" | "rmse" => Ok(Metric::RootMeanSquaredError),
            "mean_absolute_error" | "mae" => Ok(Metric::MeanAbsoluteError),
            "r2" => Ok(Metric::R2),
            _ => Err(CrossValError::invalid_parameter("metric", s, "unknown metric")),
        }
    }
}

impl ScoreFunction for Metric {
    type Output = ScoreValue;

    fn name(&self) -> &str {
        self.as_str()
    }

    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
        match self {
            Metric::Accuracy => accuracy(y_true, y_pred),
            Metric::Precision => precision(y_true, y_pred),
            Metric::Recall => recall(y_true, y_pred),
            Metric::F1 => f1_score(y_true, y_pred),
            Metric::MeanSquaredError => mean_squared_error(y_true, y_pred),
            Metric::RootMeanSquaredError => root_mean_squared_error(y_true, y_pred),
            Metric::MeanAbsoluteError => mean_absolute_error(y_true, y_pred),
            Metric::R2 => r2_score(y_true, y_pred),
        }
    }
}

/// Reject empty or differently sized label vectors.
pub(crate) fn check_lengths(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(CrossValError::dimension_mismatch(
            format!("{} predictions", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    if y_true.is_empty() {
        return Err(CrossValError::scoring("Cannot score an empty label vector"));
    }
    Ok(())
}
