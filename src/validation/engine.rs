//! Per-fold training and scoring.

use crate::config::CrossValidationConfig;
use crate::core::error::{CrossValError, Result};
use crate::core::traits::{Estimator, ModelFactory, ScoreFunction, Transformer};
use crate::core::types::*;
use crate::dataset::preprocessing::scale_fold;
use crate::dataset::split::{FoldSplitter, SplitStrategy};
use crate::dataset::Dataset;
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Score of one score function on one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreResult<T> {
    /// Test-set score only
    Test(T),
    /// Training-set and test-set scores
    TrainTest {
        /// Score on the fold's training rows
        train: T,
        /// Score on the fold's held-out rows
        test: T,
    },
}

impl<T> ScoreResult<T> {
    /// Test-set score
    pub fn test(&self) -> &T {
        match self {
            ScoreResult::Test(test) | ScoreResult::TrainTest { test, .. } => test,
        }
    }

    /// Training-set score, if it was computed
    pub fn train(&self) -> Option<&T> {
        match self {
            ScoreResult::Test(_) => None,
            ScoreResult::TrainTest { train, .. } => Some(train),
        }
    }

    /// Whether a training-set score is present
    pub fn has_train(&self) -> bool {
        matches!(self, ScoreResult::TrainTest { .. })
    }
}

/// Per-fold results, ordered by fold and then by score function.
pub type RawResults<T> = Vec<Vec<ScoreResult<T>>>;

/// Fit `model` on the training rows and score it with every score function.
///
/// Test predictions are always computed; training predictions only when
/// `train_scores` is set. Errors from the estimator or a score function are
/// returned unchanged.
pub fn train_and_score<M, S>(
    model: &mut M,
    score_funcs: &[S],
    x_train: ArrayView2<'_, Feature>,
    y_train: ArrayView1<'_, Label>,
    x_test: ArrayView2<'_, Feature>,
    y_test: ArrayView1<'_, Label>,
    train_scores: bool,
) -> Result<Vec<ScoreResult<S::Output>>>
where
    M: Estimator + ?Sized,
    S: ScoreFunction,
{
    model.fit(x_train, y_train)?;
    let test_pred = model.predict(x_test)?;

    if train_scores {
        let train_pred = model.predict(x_train)?;
        score_funcs
            .iter()
            .map(|func| {
                Ok(ScoreResult::TrainTest {
                    train: func.score(y_train, train_pred.view())?,
                    test: func.score(y_test, test_pred.view())?,
                })
            })
            .collect()
    } else {
        score_funcs
            .iter()
            .map(|func| Ok(ScoreResult::Test(func.score(y_test, test_pred.view())?)))
            .collect()
    }
}

/// Resolve the fold strategy: the configured one, else the estimator's default.
pub(crate) fn resolve_strategy<F: ModelFactory>(
    factory: &F,
    config: &CrossValidationConfig,
) -> Result<SplitStrategy> {
    match config.strategy {
        Some(strategy) => Ok(strategy),
        None => SplitStrategy::for_kind(factory.build()?.kind()),
    }
}

/// Run k-fold cross-validation and collect raw per-fold scores.
///
/// A fresh estimator is built from `factory` for every fold. When `scaler`
/// is given, an unfitted copy of it is fitted per fold according to
/// `config.scale_fit`.
pub fn cv_engine<F, S>(
    dataset: &Dataset,
    factory: &F,
    score_funcs: &[S],
    scaler: Option<&dyn Transformer>,
    config: &CrossValidationConfig,
) -> Result<RawResults<S::Output>>
where
    F: ModelFactory,
    S: ScoreFunction,
{
    config.validate_folds()?;
    if score_funcs.is_empty() {
        return Err(CrossValError::invalid_parameter(
            "score_funcs",
            "[]",
            "at least one score function is required",
        ));
    }
    if dataset.is_empty() {
        return Err(CrossValError::dataset("Cannot cross-validate an empty dataset"));
    }

    let strategy = resolve_strategy(factory, config)?;
    let folds = FoldSplitter::new(strategy, config.splits)
        .with_shuffle(config.shuffle)
        .with_random_state(config.random_state)
        .split(dataset.labels())?;

    log::info!(
        "Running {} cross-validation: {} folds over {} samples, {} score function(s)",
        strategy,
        folds.len(),
        dataset.num_samples(),
        score_funcs.len()
    );

    let mut results = Vec::with_capacity(folds.len());
    for (fold_idx, fold) in folds.iter().enumerate() {
        let (x_train, y_train) = dataset.select(&fold.train)?;
        let (x_test, y_test) = dataset.select(&fold.test)?;

        let (x_train, x_test) = match scaler {
            Some(prototype) => scale_fold(prototype, config.scale_fit, x_train.view(), x_test.view())?,
            None => (x_train, x_test),
        };

        let mut model = factory.build()?;
        let scores = train_and_score(
            &mut model,
            score_funcs,
            x_train.view(),
            y_train.view(),
            x_test.view(),
            y_test.view(),
            config.train_scores,
        )
        .map_err(|err| {
            log::warn!("Fold {} failed [{}]: {}", fold_idx + 1, err.category(), err);
            err
        })?;

        log::debug!(
            "Fold {}/{}: {} train rows, {} test rows",
            fold_idx + 1,
            folds.len(),
            fold.train.len(),
            fold.test.len()
        );
        results.push(scores);
    }

    log::info!("Cross-validation finished: {} folds scored", results.len());
    Ok(results)
}
