//! Closure-backed score functions.

use crate::core::error::Result;
use crate::core::traits::ScoreFunction;
use crate::core::types::*;
use ndarray::ArrayView1;
use std::fmt;

/// Signature of a custom scalar metric.
pub type CustomMetricFunction =
    dyn Fn(ArrayView1<'_, Label>, ArrayView1<'_, Label>) -> Result<ScoreValue> + Send + Sync;

/// A named scalar metric defined by a closure.
///
/// ```rust
/// use crossval::metrics::CustomMetric;
///
/// let max_error = CustomMetric::new("max_error", |y_true, y_pred| {
///     Ok(y_true
///         .iter()
///         .zip(y_pred.iter())
///         .map(|(t, p)| (t - p).abs() as f64)
///         .fold(0.0, f64::max))
/// });
/// assert_eq!(crossval::ScoreFunction::name(&max_error), "max_error");
/// ```
pub struct CustomMetric {
    name: String,
    func: Box<CustomMetricFunction>,
}

impl CustomMetric {
    /// Create a custom metric
    pub fn new<S, F>(name: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(ArrayView1<'_, Label>, ArrayView1<'_, Label>) -> Result<ScoreValue> + Send + Sync + 'static,
    {
        CustomMetric {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for CustomMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomMetric").field("name", &self.name).finish()
    }
}

impl ScoreFunction for CustomMetric {
    type Output = ScoreValue;

    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
        (self.func)(y_true, y_pred)
    }
}
