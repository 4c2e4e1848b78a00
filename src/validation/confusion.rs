//! Per-fold confusion matrices.

use crate::config::CrossValidationConfig;
use crate::core::constants::{CONFUSION_COLUMN_LABELS, CONFUSION_ROW_LABELS};
use crate::core::error::{CrossValError, Result};
use crate::core::traits::{ModelFactory, Transformer};
use crate::dataset::Dataset;
use crate::metrics::{ConfusionMatrix, ConfusionMatrixScorer};
use crate::validation::engine::{cv_engine, ScoreResult};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary confusion matrices of every fold, stacked.
///
/// Each fold contributes a `neg_true` and a `pos_true` row with `neg_pred`
/// and `pos_pred` columns. Rows are indexed by `(fold, row label)` with
/// folds numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionTable {
    folds: Vec<ConfusionMatrix>,
}

impl ConfusionTable {
    /// Stack per-fold matrices in fold order.
    pub fn new(folds: Vec<ConfusionMatrix>) -> Self {
        ConfusionTable { folds }
    }

    /// Number of folds
    pub fn num_folds(&self) -> usize {
        self.folds.len()
    }

    /// Matrix of a 1-based fold number
    pub fn fold(&self, fold: usize) -> Option<&ConfusionMatrix> {
        fold.checked_sub(1).and_then(|i| self.folds.get(i))
    }

    /// All per-fold matrices
    pub fn folds(&self) -> &[ConfusionMatrix] {
        &self.folds
    }

    /// Row labels `(fold, row label)` in table order.
    pub fn index(&self) -> Vec<(usize, &'static str)> {
        (1..=self.folds.len())
            .flat_map(|fold| CONFUSION_ROW_LABELS.iter().map(move |&label| (fold, label)))
            .collect()
    }

    /// Column labels
    pub fn columns(&self) -> [&'static str; 2] {
        CONFUSION_COLUMN_LABELS
    }

    /// Counts as a `(2 * folds) x 2` matrix.
    pub fn values(&self) -> Array2<usize> {
        let mut values = Array2::<usize>::zeros((2 * self.folds.len(), 2));
        for (k, cm) in self.folds.iter().enumerate() {
            values
                .slice_mut(ndarray::s![2 * k..2 * k + 2, ..])
                .assign(&cm.matrix);
        }
        values
    }

    /// Element-wise sum over all folds.
    pub fn total(&self) -> ConfusionMatrix {
        let mut matrix = Array2::<usize>::zeros((2, 2));
        for cm in &self.folds {
            matrix += &cm.matrix;
        }
        ConfusionMatrix { matrix }
    }

    /// Write the table as CSV with `fold` and `actual` index columns.
    #[cfg(feature = "csv")]
    pub fn to_csv_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let values = self.values();

        let mut header = vec!["fold", "actual"];
        header.extend(CONFUSION_COLUMN_LABELS);
        csv_writer.write_record(&header)?;

        for ((fold, label), row) in self.index().into_iter().zip(values.axis_iter(Axis(0))) {
            let mut record = vec![fold.to_string(), label.to_string()];
            record.extend(row.iter().map(ToString::to_string));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Convert to a polars `DataFrame` with `fold` and `actual` index columns.
    #[cfg(feature = "polars")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame> {
        use polars::prelude::*;

        let index = self.index();
        let values = self.values();
        let folds: Vec<u32> = index.iter().map(|&(fold, _)| fold as u32).collect();
        let labels: Vec<&str> = index.iter().map(|&(_, label)| label).collect();

        let mut columns: Vec<Column> = vec![
            Series::new("fold".into(), folds).into(),
            Series::new("actual".into(), labels).into(),
        ];
        for (name, counts) in CONFUSION_COLUMN_LABELS.iter().zip(values.axis_iter(Axis(1))) {
            let counts: Vec<u64> = counts.iter().map(|&c| c as u64).collect();
            columns.push(Series::new((*name).into(), counts).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for ConfusionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:>8} {:>8} {:>8}",
            "fold", "", CONFUSION_COLUMN_LABELS[0], CONFUSION_COLUMN_LABELS[1]
        )?;
        for (k, cm) in self.folds.iter().enumerate() {
            for (r, label) in CONFUSION_ROW_LABELS.iter().enumerate() {
                writeln!(
                    f,
                    "{:>4} {:>8} {:>8} {:>8}",
                    k + 1,
                    label,
                    cm.matrix[[r, 0]],
                    cm.matrix[[r, 1]]
                )?;
            }
        }
        Ok(())
    }
}

/// Cross-validate a binary classifier and report each fold's test-set
/// confusion matrix.
///
/// The dataset's two classes, in ascending order, are the negative and the
/// positive class. Training scores are never computed here, whatever
/// `config.train_scores` says. A dataset without exactly two classes fails
/// with [`CrossValError::InvalidParameter`].
pub fn cv_conf_mat<F: ModelFactory>(
    dataset: &Dataset,
    factory: &F,
    scaler: Option<&dyn Transformer>,
    config: &CrossValidationConfig,
) -> Result<ConfusionTable> {
    let classes = dataset.classes();
    let scorer = match classes[..] {
        [negative, positive] => ConfusionMatrixScorer::new(negative, positive),
        [_, _, extra, ..] => {
            return Err(CrossValError::invalid_parameter(
                "labels",
                extra.to_string(),
                "confusion matrices need exactly two classes",
            ))
        }
        [] => return Err(CrossValError::dataset("Cannot cross-validate an empty dataset")),
        [only] => {
            return Err(CrossValError::invalid_parameter(
                "labels",
                only.to_string(),
                "confusion matrices need exactly two classes, found one",
            ))
        }
    };

    let mut config = config.clone();
    config.train_scores = false;

    let results = cv_engine(dataset, factory, &[scorer], scaler, &config)?;

    let folds = results
        .into_iter()
        .enumerate()
        .map(|(k, mut fold)| match fold.pop() {
            Some(ScoreResult::Test(cm)) if fold.is_empty() => Ok(cm),
            _ => Err(CrossValError::internal(format!(
                "Fold {} did not produce exactly one confusion matrix",
                k + 1
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ConfusionTable::new(folds))
}
