//! Core trait definitions for crossval.
//!
//! These traits are the seams between the orchestration layer and the
//! numerical collaborators it drives: estimators, the factories that build
//! them, feature scalers, and score functions.

use crate::config::params::Params;
use crate::core::error::Result;
use crate::core::types::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use std::fmt::Debug;

/// A supervised model that can be fitted and then used for prediction.
pub trait Estimator {
    /// The learning task this estimator solves.
    fn kind(&self) -> EstimatorKind;

    /// Fit the estimator to training data, replacing any previous fitted state.
    fn fit(&mut self, features: ArrayView2<'_, Feature>, labels: ArrayView1<'_, Label>) -> Result<()>;

    /// Predict one target per feature row.
    fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>>;
}

impl<E: Estimator + ?Sized> Estimator for Box<E> {
    fn kind(&self) -> EstimatorKind {
        (**self).kind()
    }

    fn fit(&mut self, features: ArrayView2<'_, Feature>, labels: ArrayView1<'_, Label>) -> Result<()> {
        (**self).fit(features, labels)
    }

    fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>> {
        (**self).predict(features)
    }
}

/// Builds fresh, unfitted estimator instances.
///
/// Cross-validation asks the factory for a new model on every fold so that
/// fitted state never carries over between folds.
pub trait ModelFactory {
    /// Estimator type produced by this factory.
    type Model: Estimator;

    /// Build a new unfitted estimator.
    fn build(&self) -> Result<Self::Model>;
}

impl<M, F> ModelFactory for F
where
    M: Estimator,
    F: Fn() -> Result<M>,
{
    type Model = M;

    fn build(&self) -> Result<M> {
        self()
    }
}

/// Estimators that can be instantiated from a named hyper-parameter map.
pub trait FromParams: Estimator + Sized {
    /// Instantiate the estimator. Unknown or ill-typed parameters are errors.
    fn from_params(params: &Params) -> Result<Self>;
}

/// A feature transform fitted on one matrix and applied to others.
pub trait Transformer: Debug {
    /// Learn the transform parameters from `features`.
    fn fit(&mut self, features: ArrayView2<'_, Feature>) -> Result<()>;

    /// Apply the fitted transform.
    fn transform(&self, features: ArrayView2<'_, Feature>) -> Result<Array2<Feature>>;

    /// Fit on `features` and return them transformed.
    fn fit_transform(&mut self, features: ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        self.fit(features)?;
        self.transform(features)
    }

    /// A new, unfitted transformer with the same settings.
    fn unfitted(&self) -> Box<dyn Transformer>;
}

/// Maps true and predicted targets to a score.
pub trait ScoreFunction {
    /// Score type, `ScoreValue` for scalar metrics.
    type Output;

    /// Identifier used as the column label in formatted results.
    fn name(&self) -> &str;

    /// Compute the score.
    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<Self::Output>;
}

impl<S: ScoreFunction + ?Sized> ScoreFunction for Box<S> {
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<Self::Output> {
        (**self).score(y_true, y_pred)
    }
}

impl<S: ScoreFunction + ?Sized> ScoreFunction for &S {
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<Self::Output> {
        (**self).score(y_true, y_pred)
    }
}
