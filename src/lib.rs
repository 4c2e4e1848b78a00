//! # crossval
//!
//! K-fold cross-validation orchestration for Rust estimators.
//!
//! The crate splits a labeled [`Dataset`] into folds, fits a fresh model on
//! each training fold, scores its predictions with any number of score
//! functions, and aggregates the per-fold scores into summary statistics.
//! Models, scalers and metrics are plugged in through the [`Estimator`],
//! [`Transformer`] and [`ScoreFunction`] traits.
//!
//! ## Features
//!
//! - **Fold splitting**: seeded, shuffled k-fold and stratified k-fold
//! - **Per-fold scaling**: scalers fitted on the training rows of each fold
//! - **Result tables**: per-fold score tables and summary statistics,
//!   exportable to CSV, JSON and (feature `polars`) polars `DataFrame`s
//! - **Confusion matrices**: per-fold binary confusion matrices
//! - **Parameter sweeps**: cross-validation over a range of one
//!   hyper-parameter
//!
//! ## Quick Start
//!
//! ```rust
//! use crossval::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> crossval::Result<()> {
//! let features = Array2::from_shape_fn((40, 1), |(i, _)| i as f32);
//! let labels = Array1::from_iter((0..40).map(|i| if i < 20 { 0.0 } else { 1.0 }));
//! let dataset = Dataset::new(features, labels)?;
//!
//! let config = CrossValidationConfigBuilder::new()
//!     .splits(4)
//!     .random_state(42)
//!     .build()?;
//!
//! let summary = cv_score(
//!     &dataset,
//!     &|| Ok(DecisionTreeClassifier::new().with_max_depth(2)),
//!     &[Metric::Accuracy, Metric::F1],
//!     Some(&StandardScaler::new()),
//!     &config,
//! )?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Parameter Sweeps
//!
//! ```rust
//! use crossval::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> crossval::Result<()> {
//! # let features = Array2::from_shape_fn((40, 1), |(i, _)| i as f32);
//! # let labels = Array1::from_iter((0..40).map(|i| if i < 20 { 0.0 } else { 1.0 }));
//! # let dataset = Dataset::new(features, labels)?;
//! let sweep = validate_param_range::<DecisionTreeClassifier, _>(
//!     &dataset,
//!     "max_depth",
//!     &[ParamValue::from(1i64), ParamValue::from(2i64)],
//!     &[Metric::Accuracy],
//!     &Params::new(),
//!     None,
//!     &CrossValidationConfig::default(),
//! )?;
//! assert_eq!(sweep.len(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset, fold splitting and scaling
pub mod dataset;

// Score functions
pub mod metrics;

// Reference estimators
pub mod estimators;

// Cross-validation drivers
pub mod validation;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{CrossValError, Result, SplitError},
    traits::*,
    types::*,
};

pub use crate::config::{CrossValidationConfig, CrossValidationConfigBuilder, ParamValue, Params};

pub use crate::dataset::{Dataset, Fold, FoldSplitter, MinMaxScaler, ScaleFit, SplitStrategy, StandardScaler};

pub use crate::metrics::{ConfusionMatrix, ConfusionMatrixScorer, CustomMetric, Metric};

pub use crate::estimators::{DecisionTreeClassifier, DecisionTreeRegressor, DummyClassifier, DummyRegressor};

pub use crate::validation::{
    cv_conf_mat, cv_engine, cv_score, describe_dataframe, format_cv_results, train_and_score,
    validate_param_range, ColumnKey, ConfusionTable, RawResults, ScoreResult, ScoreTable, Statistic,
    StatsToRun, SummaryTable, SweepKey, SweepTable,
};

// Version information
pub use crate::core::constants::CROSSVAL_VERSION as VERSION;

/// Everything needed to run a cross-validation in one import.
pub mod prelude {
    pub use crate::config::{CrossValidationConfig, CrossValidationConfigBuilder, ParamValue, Params};
    pub use crate::core::error::{CrossValError, Result};
    pub use crate::core::traits::{Estimator, FromParams, ModelFactory, ScoreFunction, Transformer};
    pub use crate::core::types::*;
    pub use crate::dataset::{Dataset, MinMaxScaler, ScaleFit, SplitStrategy, StandardScaler};
    pub use crate::estimators::{DecisionTreeClassifier, DecisionTreeRegressor, DummyClassifier, DummyRegressor};
    pub use crate::metrics::{ConfusionMatrixScorer, CustomMetric, Metric};
    pub use crate::validation::{
        cv_conf_mat, cv_engine, cv_score, describe_dataframe, format_cv_results, validate_param_range,
        Statistic, SummaryTable,
    };
}

/// Initialize the library.
///
/// Installs the `env_logger` backend for the `log` facade, defaulting to the
/// `info` level when `RUST_LOG` is unset. Calling it is optional and
/// repeated calls are harmless.
///
/// # Examples
///
/// ```rust
/// fn main() -> crossval::Result<()> {
///     crossval::init()?;
///     assert!(crossval::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_logging();
    log::debug!("crossval {} initialized", VERSION);
    Ok(())
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_logging_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_initialization() {
        assert!(init().is_ok());
        assert!(is_initialized());
    }

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_default_config() {
        let config = CrossValidationConfig::default();
        assert_eq!(config.splits, DEFAULT_SPLITS);
        assert!(config.validate().is_ok());
    }
}
