//! Cross-validation drivers.
//!
//! - [`engine`]: fold loop and per-fold training/scoring ([`cv_engine`],
//!   [`train_and_score`])
//! - [`table`]: per-fold score tables ([`format_cv_results`])
//! - [`stats`]: summary statistics ([`describe_dataframe`])
//! - [`confusion`]: per-fold confusion matrices ([`cv_conf_mat`])
//! - [`sweep`]: one-parameter sweeps ([`validate_param_range`])
//!
//! [`cv_score`] chains the engine, the formatter and the statistics.

pub mod confusion;
pub mod engine;
pub mod stats;
pub mod sweep;
pub mod table;

pub use confusion::{cv_conf_mat, ConfusionTable};
pub use engine::{cv_engine, train_and_score, RawResults, ScoreResult};
pub use stats::{describe_dataframe, Statistic, StatsToRun, SummaryTable};
pub use sweep::{validate_param_range, SweepKey, SweepTable};
pub use table::{format_cv_results, ColumnKey, ScoreTable};

use crate::config::CrossValidationConfig;
use crate::core::error::Result;
use crate::core::traits::{ModelFactory, ScoreFunction, Transformer};
use crate::core::types::*;
use crate::dataset::Dataset;

/// Cross-validate and summarize the per-fold scores.
///
/// Statistics come from `config.stats_to_run`; an unknown name fails
/// before any fold is trained.
///
/// # Examples
///
/// ```rust
/// use crossval::prelude::*;
/// use ndarray::{Array1, Array2};
///
/// # fn example() -> crossval::Result<()> {
/// let features = Array2::from_shape_fn((20, 1), |(i, _)| i as f32);
/// let labels = Array1::from_iter((0..20).map(|i| (i % 2) as f32));
/// let dataset = Dataset::new(features, labels)?;
///
/// let config = CrossValidationConfigBuilder::new().splits(4).build()?;
/// let summary = cv_score(
///     &dataset,
///     &|| Ok(DummyClassifier::new()),
///     &[Metric::Accuracy],
///     None,
///     &config,
/// )?;
/// let mean = summary.get("accuracy", Some(Split::Test), Statistic::Mean).unwrap();
/// assert!((mean - 0.4).abs() < 1e-12);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn cv_score<F, S>(
    dataset: &Dataset,
    factory: &F,
    score_funcs: &[S],
    scaler: Option<&dyn Transformer>,
    config: &CrossValidationConfig,
) -> Result<SummaryTable>
where
    F: ModelFactory,
    S: ScoreFunction<Output = ScoreValue>,
{
    config.validate_stats()?;
    let results = cv_engine(dataset, factory, score_funcs, scaler, config)?;
    let table = format_cv_results(&results, score_funcs, config.train_scores)?;
    describe_dataframe(&table, config.stats_to_run.clone())
}
