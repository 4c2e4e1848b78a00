//! Tabular cross-validation results.
//!
//! [`ScoreTable`] holds one row per fold and one column per score (or per
//! score and split). Tables can be written as CSV, serialized with serde, or
//! converted to a polars `DataFrame` when the `polars` feature is enabled.

use crate::core::error::{CrossValError, Result};
use crate::core::traits::ScoreFunction;
use crate::core::types::*;
use crate::validation::engine::{RawResults, ScoreResult};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column label of a score table.
///
/// `split` is `None` in flat tables (test scores only) and names the
/// train/test side in two-level tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    /// Score function name
    pub score: String,
    /// Side of the fold the score was computed on
    pub split: Option<Split>,
}

impl ColumnKey {
    /// Flat column label
    pub fn flat<S: Into<String>>(score: S) -> Self {
        ColumnKey {
            score: score.into(),
            split: None,
        }
    }

    /// Two-level column label
    pub fn with_split<S: Into<String>>(score: S, split: Split) -> Self {
        ColumnKey {
            score: score.into(),
            split: Some(split),
        }
    }

    fn matches(&self, score: &str, split: Option<Split>) -> bool {
        self.score == score && self.split == split
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.split {
            None => write!(f, "{}", self.score),
            Some(split) => write!(f, "{}/{}", self.score, split),
        }
    }
}

/// Per-fold scores: rows are folds (1-based), columns are [`ColumnKey`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoreTableFields")]
pub struct ScoreTable {
    index: Vec<usize>,
    columns: Vec<ColumnKey>,
    values: Array2<ScoreValue>,
}

/// Unchecked serde form of [`ScoreTable`].
#[derive(Deserialize)]
struct ScoreTableFields {
    index: Vec<usize>,
    columns: Vec<ColumnKey>,
    values: Array2<ScoreValue>,
}

impl TryFrom<ScoreTableFields> for ScoreTable {
    type Error = CrossValError;

    fn try_from(fields: ScoreTableFields) -> Result<Self> {
        ScoreTable::new(fields.index, fields.columns, fields.values)
    }
}

impl ScoreTable {
    /// Assemble a table, checking that the labels match the value shape.
    pub fn new(index: Vec<usize>, columns: Vec<ColumnKey>, values: Array2<ScoreValue>) -> Result<Self> {
        if values.dim() != (index.len(), columns.len()) {
            return Err(CrossValError::dimension_mismatch(
                format!("{} x {} values", index.len(), columns.len()),
                format!("{} x {} values", values.nrows(), values.ncols()),
            ));
        }
        Ok(ScoreTable {
            index,
            columns,
            values,
        })
    }

    /// Fold numbers, starting at 1
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Column labels
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// All values, folds by columns
    pub fn values(&self) -> &Array2<ScoreValue> {
        &self.values
    }

    /// Number of folds
    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table is two-level (has train and test columns)
    pub fn has_splits(&self) -> bool {
        self.columns.iter().any(|c| c.split.is_some())
    }

    /// Values of one column across folds.
    ///
    /// Pass `split = None` for flat tables.
    pub fn column(&self, score: &str, split: Option<Split>) -> Option<ArrayView1<'_, ScoreValue>> {
        self.columns
            .iter()
            .position(|c| c.matches(score, split))
            .map(|j| self.values.column(j))
    }

    /// Single value for a 1-based fold number.
    pub fn get(&self, fold: usize, score: &str, split: Option<Split>) -> Option<ScoreValue> {
        let row = self.index.iter().position(|&f| f == fold)?;
        let col = self.columns.iter().position(|c| c.matches(score, split))?;
        Some(self.values[[row, col]])
    }

    /// Write the table as CSV with a leading `fold` column.
    #[cfg(feature = "csv")]
    pub fn to_csv_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["fold".to_string()];
        header.extend(self.columns.iter().map(ToString::to_string));
        csv_writer.write_record(&header)?;

        for (fold, row) in self.index.iter().zip(self.values.axis_iter(Axis(0))) {
            let mut record = vec![fold.to_string()];
            record.extend(row.iter().map(ToString::to_string));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Convert to a polars `DataFrame` with a leading `fold` column.
    #[cfg(feature = "polars")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame> {
        use polars::prelude::*;

        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len() + 1);
        let folds: Vec<u32> = self.index.iter().map(|&f| f as u32).collect();
        columns.push(Series::new("fold".into(), folds).into());
        for (key, values) in self.columns.iter().zip(self.values.axis_iter(Axis(1))) {
            columns.push(Series::new(key.to_string().into(), values.to_vec()).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}", "fold")?;
        for column in &self.columns {
            write!(f, " {:>14}", column.to_string())?;
        }
        writeln!(f)?;
        for (fold, row) in self.index.iter().zip(self.values.axis_iter(Axis(0))) {
            write!(f, "{:>6}", fold)?;
            for value in row {
                write!(f, " {:>14.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Lay out raw per-fold scores as a [`ScoreTable`].
///
/// Without train scores there is one column per score function. With train
/// scores every function gets a `train` then a `test` column. Column order
/// follows `score_funcs`.
pub fn format_cv_results<S: ScoreFunction>(
    results: &RawResults<ScoreValue>,
    score_funcs: &[S],
    train_scores: bool,
) -> Result<ScoreTable> {
    if results.is_empty() {
        return Err(CrossValError::dataset("Cannot format empty cross-validation results"));
    }
    if score_funcs.is_empty() {
        return Err(CrossValError::dataset(
            "Cannot format cross-validation results without score functions",
        ));
    }

    let columns: Vec<ColumnKey> = if train_scores {
        score_funcs
            .iter()
            .flat_map(|func| {
                [
                    ColumnKey::with_split(func.name(), Split::Train),
                    ColumnKey::with_split(func.name(), Split::Test),
                ]
            })
            .collect()
    } else {
        score_funcs.iter().map(|func| ColumnKey::flat(func.name())).collect()
    };

    let mut values = Array2::<ScoreValue>::zeros((results.len(), columns.len()));
    for (i, fold) in results.iter().enumerate() {
        if fold.len() != score_funcs.len() {
            return Err(CrossValError::dimension_mismatch(
                format!("{} scores in fold {}", score_funcs.len(), i + 1),
                format!("{} scores", fold.len()),
            ));
        }
        for (j, result) in fold.iter().enumerate() {
            match (result, train_scores) {
                (ScoreResult::TrainTest { train, test }, true) => {
                    values[[i, 2 * j]] = *train;
                    values[[i, 2 * j + 1]] = *test;
                }
                (ScoreResult::Test(test), false) => values[[i, j]] = *test,
                _ => {
                    return Err(CrossValError::dimension_mismatch(
                        if train_scores { "train and test scores" } else { "test scores only" },
                        format!("fold {} score {} shaped otherwise", i + 1, j + 1),
                    ))
                }
            }
        }
    }

    ScoreTable::new((1..=results.len()).collect(), columns, values)
}
