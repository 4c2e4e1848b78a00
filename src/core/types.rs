//! Core data types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature value type.
pub type Feature = f32;

/// Target value type. Class labels are encoded as `0.0`, `1.0`, ...
pub type Label = f32;

/// Value produced by a scalar score function.
pub type ScoreValue = f64;

/// The kind of learning task an estimator solves.
///
/// Cross-validation uses this to pick a fold splitting strategy when none is
/// configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Predicts discrete class labels
    Classifier,
    /// Predicts continuous targets
    Regressor,
    /// Orders items within query groups
    Ranker,
    /// Unsupervised feature transform
    Transformer,
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorKind::Classifier => write!(f, "classifier"),
            EstimatorKind::Regressor => write!(f, "regressor"),
            EstimatorKind::Ranker => write!(f, "ranker"),
            EstimatorKind::Transformer => write!(f, "transformer"),
        }
    }
}

/// Which side of a fold a score was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    /// Training rows of the fold
    Train,
    /// Held-out rows of the fold
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Test => write!(f, "test"),
        }
    }
}
