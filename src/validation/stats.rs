//! Summary statistics over score tables.

use crate::core::constants::DEFAULT_STATS_TO_RUN;
use crate::core::error::{CrossValError, Result};
use crate::core::types::*;
use crate::validation::table::{ColumnKey, ScoreTable};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column-wise summary statistic.
///
/// NaN values are ignored. Spread statistics use the sample estimator
/// (`ddof = 1`) and are NaN for fewer than two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Sample standard deviation
    Std,
    /// Sample variance
    Var,
    /// Middle value, mean of the two middle values for even counts
    Median,
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Total of all values, `0` for an empty column
    Sum,
    /// Number of non-NaN values
    Count,
    /// Standard error of the mean
    Sem,
}

impl Statistic {
    /// Every supported statistic
    pub const ALL: [Statistic; 9] = [
        Statistic::Mean,
        Statistic::Std,
        Statistic::Var,
        Statistic::Median,
        Statistic::Min,
        Statistic::Max,
        Statistic::Sum,
        Statistic::Count,
        Statistic::Sem,
    ];

    /// Name used in configuration and as the summary column label
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Std => "std",
            Statistic::Var => "var",
            Statistic::Median => "median",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Sum => "sum",
            Statistic::Count => "count",
            Statistic::Sem => "sem",
        }
    }

    /// Compute the statistic over one column.
    pub fn apply(&self, values: ArrayView1<'_, ScoreValue>) -> ScoreValue {
        let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = finite.len();
        if n == 0 {
            return match self {
                Statistic::Sum | Statistic::Count => 0.0,
                _ => f64::NAN,
            };
        }

        let sum: f64 = finite.iter().sum();
        let mean = sum / n as f64;
        let variance = || {
            if n < 2 {
                f64::NAN
            } else {
                finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
            }
        };

        match self {
            Statistic::Mean => mean,
            Statistic::Std => variance().sqrt(),
            Statistic::Var => variance(),
            Statistic::Sem => (variance() / n as f64).sqrt(),
            Statistic::Sum => sum,
            Statistic::Count => n as f64,
            Statistic::Min => finite.iter().copied().fold(f64::INFINITY, f64::min),
            Statistic::Max => finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::Median => {
                let mut sorted = finite.clone();
                sorted.sort_by(|a, b| a.total_cmp(b));
                if n % 2 == 1 {
                    sorted[n / 2]
                } else {
                    (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = CrossValError;

    fn from_str(s: &str) -> Result<Self> {
        Statistic::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| CrossValError::unknown_statistic(s))
    }
}

/// Names of the statistics to compute.
///
/// Accepts a single name or any list of names, so `"mean"` and
/// `["mean", "std"]` both work where `impl Into<StatsToRun>` is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsToRun(Vec<String>);

impl StatsToRun {
    /// Requested names, in order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Parse every name, failing on the first unknown one.
    pub fn resolve(&self) -> Result<Vec<Statistic>> {
        self.0.iter().map(|name| name.parse()).collect()
    }
}

impl Default for StatsToRun {
    fn default() -> Self {
        StatsToRun(DEFAULT_STATS_TO_RUN.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&str> for StatsToRun {
    fn from(name: &str) -> Self {
        StatsToRun(vec![name.to_string()])
    }
}

impl From<String> for StatsToRun {
    fn from(name: String) -> Self {
        StatsToRun(vec![name])
    }
}

impl From<Vec<String>> for StatsToRun {
    fn from(names: Vec<String>) -> Self {
        StatsToRun(names)
    }
}

impl From<&[String]> for StatsToRun {
    fn from(names: &[String]) -> Self {
        StatsToRun(names.to_vec())
    }
}

impl From<Vec<&str>> for StatsToRun {
    fn from(names: Vec<&str>) -> Self {
        StatsToRun(names.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for StatsToRun {
    fn from(names: &[&str]) -> Self {
        StatsToRun(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StatsToRun {
    fn from(names: [&str; N]) -> Self {
        StatsToRun(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Statistic> for StatsToRun {
    fn from(stat: Statistic) -> Self {
        StatsToRun(vec![stat.name().to_string()])
    }
}

/// Statistics per score column: one row per [`ScoreTable`] column, one
/// column per statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    rows: Vec<ColumnKey>,
    stats: Vec<Statistic>,
    values: Array2<ScoreValue>,
}

impl SummaryTable {
    /// Row labels, the summarized table's columns
    pub fn rows(&self) -> &[ColumnKey] {
        &self.rows
    }

    /// Computed statistics, in request order
    pub fn stats(&self) -> &[Statistic] {
        &self.stats
    }

    /// All values, score columns by statistics
    pub fn values(&self) -> &Array2<ScoreValue> {
        &self.values
    }

    /// One statistic of one score column.
    pub fn get(&self, score: &str, split: Option<Split>, stat: Statistic) -> Option<ScoreValue> {
        let row = self
            .rows
            .iter()
            .position(|r| r.score == score && r.split == split)?;
        let col = self.stats.iter().position(|&s| s == stat)?;
        Some(self.values[[row, col]])
    }

    /// Write the summary as CSV with a leading `score` column.
    #[cfg(feature = "csv")]
    pub fn to_csv_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["score".to_string()];
        header.extend(self.stats.iter().map(ToString::to_string));
        csv_writer.write_record(&header)?;

        for (key, row) in self.rows.iter().zip(self.values.axis_iter(Axis(0))) {
            let mut record = vec![key.to_string()];
            record.extend(row.iter().map(ToString::to_string));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Convert to a polars `DataFrame` with a leading `score` column.
    #[cfg(feature = "polars")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame> {
        use polars::prelude::*;

        let labels: Vec<String> = self.rows.iter().map(ToString::to_string).collect();
        let mut columns: Vec<Column> = vec![Series::new("score".into(), labels).into()];
        for (stat, values) in self.stats.iter().zip(self.values.axis_iter(Axis(1))) {
            columns.push(Series::new(stat.name().into(), values.to_vec()).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>20}", "")?;
        for stat in &self.stats {
            write!(f, " {:>12}", stat.name())?;
        }
        writeln!(f)?;
        for (key, row) in self.rows.iter().zip(self.values.axis_iter(Axis(0))) {
            write!(f, "{:>20}", key.to_string())?;
            for value in row {
                write!(f, " {:>12.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Summarize every column of `table` with the requested statistics.
///
/// Unknown statistic names fail with [`CrossValError::UnknownStatistic`]
/// before anything is computed.
pub fn describe_dataframe(table: &ScoreTable, stats_to_run: impl Into<StatsToRun>) -> Result<SummaryTable> {
    let stats = stats_to_run.into().resolve()?;
    if stats.is_empty() {
        return Err(CrossValError::invalid_parameter(
            "stats_to_run",
            "[]",
            "at least one statistic is required",
        ));
    }

    let columns = table.values();
    let mut values = Array2::<ScoreValue>::zeros((table.num_columns(), stats.len()));
    for (i, column) in columns.axis_iter(Axis(1)).enumerate() {
        for (j, stat) in stats.iter().enumerate() {
            values[[i, j]] = stat.apply(column);
        }
    }

    Ok(SummaryTable {
        rows: table.columns().to_vec(),
        stats,
        values,
    })
}
