//! Error handling and error types for crossval.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures raised by
//! estimators, scalers or score functions are propagated to the caller
//! unchanged; nothing in the orchestration layer retries or recovers.

use std::io;
use thiserror::Error;

/// Main error type for the crossval library.
#[derive(Error, Debug)]
pub enum CrossValError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset-related errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading { message: String },

    /// Fold splitting errors
    #[error("Split error: {message}")]
    Split { message: String },

    /// Feature scaling errors
    #[error("Preprocessing error: {message}")]
    Preprocessing { message: String },

    /// Model fitting errors
    #[error("Training error: {message}")]
    Training { message: String },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// Score function errors
    #[error("Scoring error: {message}")]
    Scoring { message: String },

    /// Requested summary statistic does not exist
    #[error("Unknown statistic: '{name}'")]
    UnknownStatistic { name: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing and writing errors
    #[cfg(feature = "csv")]
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Polars DataFrame errors
    #[cfg(feature = "polars")]
    #[error("Polars error: {source}")]
    Polars {
        #[from]
        source: polars::prelude::PolarsError,
    },

    /// Errors raised by caller-supplied estimators, scalers or metrics
    #[error(transparent)]
    External {
        #[from]
        source: anyhow::Error,
    },

    /// Internal library errors (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Fold splitting errors
#[derive(Error, Debug)]
pub enum SplitError {
    /// No rows to split
    #[error("Cannot split an empty dataset")]
    Empty,

    /// Fewer than two folds requested
    #[error("Number of splits must be at least 2, got {splits}")]
    TooFewSplits { splits: usize },

    /// More folds than rows
    #[error("Cannot create {splits} folds from {samples} samples")]
    TooManySplits { splits: usize, samples: usize },
}

/// Type alias for Results using CrossValError
pub type Result<T> = std::result::Result<T, CrossValError>;

impl CrossValError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CrossValError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        CrossValError::Dataset {
            message: message.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        CrossValError::DataLoading {
            message: message.into(),
        }
    }

    /// Create a preprocessing error
    pub fn preprocessing<S: Into<String>>(message: S) -> Self {
        CrossValError::Preprocessing {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        CrossValError::Training {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        CrossValError::Prediction {
            message: message.into(),
        }
    }

    /// Create a scoring error
    pub fn scoring<S: Into<String>>(message: S) -> Self {
        CrossValError::Scoring {
            message: message.into(),
        }
    }

    /// Create an unknown statistic error
    pub fn unknown_statistic<S: Into<String>>(name: S) -> Self {
        CrossValError::UnknownStatistic { name: name.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        CrossValError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        CrossValError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        CrossValError::Internal {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            CrossValError::Config { .. } => "config",
            CrossValError::Dataset { .. } => "dataset",
            CrossValError::DataLoading { .. } => "data_loading",
            CrossValError::Split { .. } => "split",
            CrossValError::Preprocessing { .. } => "preprocessing",
            CrossValError::Training { .. } => "training",
            CrossValError::Prediction { .. } => "prediction",
            CrossValError::Scoring { .. } => "scoring",
            CrossValError::UnknownStatistic { .. } => "unknown_statistic",
            CrossValError::InvalidParameter { .. } => "invalid_parameter",
            CrossValError::DimensionMismatch { .. } => "dimension_mismatch",
            CrossValError::IO { .. } => "io",
            #[cfg(feature = "csv")]
            CrossValError::Csv { .. } => "csv",
            CrossValError::Json { .. } => "json",
            #[cfg(feature = "polars")]
            CrossValError::Polars { .. } => "polars",
            CrossValError::External { .. } => "external",
            CrossValError::Internal { .. } => "internal",
        }
    }
}

impl From<SplitError> for CrossValError {
    fn from(err: SplitError) -> Self {
        CrossValError::Split {
            message: err.to_string(),
        }
    }
}

/// Build a [`CrossValError::Config`] from a message or format string.
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::CrossValError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::CrossValError::config(format!($fmt, $($arg)*))
    };
}

/// Build a [`CrossValError::Dataset`] from a message or format string.
#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::CrossValError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::CrossValError::dataset(format!($fmt, $($arg)*))
    };
}
