//! Default configuration values used throughout the crate.

use crate::core::types::Label;

/// Default number of cross-validation folds.
pub const DEFAULT_SPLITS: usize = 5;

/// Minimum number of folds for a meaningful split.
pub const MIN_SPLITS: usize = 2;

/// Default seed for shuffled fold assignment.
pub const DEFAULT_RANDOM_STATE: u64 = 0;

/// Summary statistics computed when the caller does not ask for any.
pub const DEFAULT_STATS_TO_RUN: [&str; 2] = ["mean", "std"];

/// Default minimum number of samples required to split a tree node.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Class treated as positive by binary precision, recall and F1.
pub const POSITIVE_LABEL: Label = 1.0;

/// Default `[negative, positive]` class labels of a confusion matrix.
pub const CONFUSION_LABELS: [Label; 2] = [0.0, 1.0];

/// Row labels of a binary confusion matrix, in matrix order.
pub const CONFUSION_ROW_LABELS: [&str; 2] = ["neg_true", "pos_true"];

/// Column labels of a binary confusion matrix, in matrix order.
pub const CONFUSION_COLUMN_LABELS: [&str; 2] = ["neg_pred", "pos_pred"];

/// Library version string.
pub const CROSSVAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tolerance used when comparing impurity improvements.
pub const IMPURITY_EPSILON: f64 = 1e-12;
