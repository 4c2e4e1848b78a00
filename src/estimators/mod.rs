//! Reference estimators.
//!
//! Small, dependency-free models that make the cross-validation drivers
//! usable out of the box and give the test-suite deterministic behaviour:
//!
//! - [`DummyClassifier`] / [`DummyRegressor`]: constant predictors
//! - [`DecisionTreeClassifier`] / [`DecisionTreeRegressor`]: depth-limited CART

pub mod dummy;
pub mod tree;

pub use dummy::{DummyClassifier, DummyRegressor};
pub use tree::{DecisionTreeClassifier, DecisionTreeRegressor, TreeParams};

use crate::core::error::{CrossValError, Result};
use crate::core::types::*;
use ndarray::{ArrayView1, ArrayView2};

/// Most frequent label; ties go to the smallest label.
pub(crate) fn majority_label<'a, I>(labels: I) -> Option<Label>
where
    I: IntoIterator<Item = &'a Label>,
{
    let mut sorted: Vec<Label> = labels.into_iter().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(Label, usize)> = None;
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        if i == sorted.len() || sorted[i].total_cmp(&sorted[run_start]).is_ne() {
            let count = i - run_start;
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((sorted[run_start], count));
            }
            run_start = i;
        }
    }
    best.map(|(label, _)| label)
}

/// Common checks on a training pair.
pub(crate) fn check_training_data(
    features: ArrayView2<'_, Feature>,
    labels: ArrayView1<'_, Label>,
) -> Result<()> {
    if features.nrows() != labels.len() {
        return Err(CrossValError::dimension_mismatch(
            format!("features rows: {}", features.nrows()),
            format!("labels length: {}", labels.len()),
        ));
    }
    if labels.is_empty() {
        return Err(CrossValError::training("Cannot fit on an empty training set"));
    }
    Ok(())
}
