//! Cross-validation over a range of one hyper-parameter.

use crate::config::params::{ParamValue, Params};
use crate::config::CrossValidationConfig;
use crate::core::error::Result;
use crate::core::traits::{FromParams, ScoreFunction, Transformer};
use crate::core::types::*;
use crate::dataset::Dataset;
use crate::validation::engine::cv_engine;
use crate::validation::table::{format_cv_results, ScoreTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of one sweep entry.
///
/// Scalar candidates are kept as-is; list candidates are keyed by their
/// string rendering, e.g. `"[10, 20]"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SweepKey {
    /// Scalar parameter value
    Scalar(ParamValue),
    /// Rendered composite value
    Text(String),
}

impl From<&ParamValue> for SweepKey {
    fn from(value: &ParamValue) -> Self {
        if value.is_composite() {
            SweepKey::Text(value.to_string())
        } else {
            SweepKey::Scalar(value.clone())
        }
    }
}

impl fmt::Display for SweepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepKey::Scalar(value) => write!(f, "{}", value),
            SweepKey::Text(text) => f.write_str(text),
        }
    }
}

/// Formatted cross-validation results per candidate value, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    param_name: String,
    entries: Vec<(SweepKey, ScoreTable)>,
}

impl SweepTable {
    /// Name of the swept parameter
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Candidate keys, in sweep order
    pub fn keys(&self) -> impl Iterator<Item = &SweepKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Results for the candidate `value`.
    pub fn get(&self, value: &ParamValue) -> Option<&ScoreTable> {
        let key = SweepKey::from(value);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, table)| table)
    }

    /// Iterate over `(key, table)` pairs in sweep order
    pub fn iter(&self) -> impl Iterator<Item = (&SweepKey, &ScoreTable)> {
        self.entries.iter().map(|(key, table)| (key, table))
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sweep had no candidates
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all tables as one CSV, with the parameter value as the first column.
    #[cfg(feature = "csv")]
    pub fn to_csv_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let columns = match self.entries.first() {
            Some((_, table)) => table.columns().to_vec(),
            None => return Ok(()),
        };
        let mut header = vec![self.param_name.clone(), "fold".to_string()];
        header.extend(columns.iter().map(ToString::to_string));
        csv_writer.write_record(&header)?;

        for (key, table) in &self.entries {
            for (fold, row) in table.index().iter().zip(table.values().rows()) {
                let mut record = vec![key.to_string(), fold.to_string()];
                record.extend(row.iter().map(ToString::to_string));
                csv_writer.write_record(&record)?;
            }
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Cross-validate estimator `M` once per value in `param_range`.
///
/// Each candidate is merged into `other_params` (the candidate wins on a
/// name clash) and a fresh `M` is instantiated from the result for every
/// fold. An instantiation error aborts the sweep; no partial table is
/// returned.
pub fn validate_param_range<M, S>(
    dataset: &Dataset,
    param_name: &str,
    param_range: &[ParamValue],
    score_funcs: &[S],
    other_params: &Params,
    scaler: Option<&dyn Transformer>,
    config: &CrossValidationConfig,
) -> Result<SweepTable>
where
    M: FromParams,
    S: ScoreFunction<Output = ScoreValue>,
{
    log::info!(
        "Sweeping '{}' over {} value(s)",
        param_name,
        param_range.len()
    );

    let mut entries = Vec::with_capacity(param_range.len());
    for value in param_range {
        let mut params = other_params.clone();
        params.insert(param_name.to_string(), value.clone());

        // fail before any fold runs if the candidate is invalid
        M::from_params(&params)?;
        let factory = || M::from_params(&params);

        log::debug!("Cross-validating {} = {}", param_name, value);
        let results = cv_engine(dataset, &factory, score_funcs, scaler, config)?;
        let table = format_cv_results(&results, score_funcs, config.train_scores)?;
        entries.push((SweepKey::from(value), table));
    }

    Ok(SweepTable {
        param_name: param_name.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrossValidationConfigBuilder;
    use crate::core::error::CrossValError;
    use crate::estimators::{DecisionTreeClassifier, DummyClassifier};
    use crate::metrics::Metric;
    use ndarray::{Array1, Array2};

    fn dataset() -> Dataset {
        let features = Array2::from_shape_fn((20, 2), |(i, j)| (i * (j + 1)) as Feature);
        let labels = Array1::from_iter((0..20).map(|i| if i < 10 { 0.0 } else { 1.0 }));
        Dataset::new(features, labels).unwrap()
    }

    #[test]
    fn test_sweep_keys_follow_range_order() {
        let config = CrossValidationConfigBuilder::new().splits(4).build().unwrap();
        let range: Vec<ParamValue> = vec![3i64.into(), 1i64.into(), 2i64.into()];
        let sweep = validate_param_range::<DecisionTreeClassifier, _>(
            &dataset(),
            "max_depth",
            &range,
            &[Metric::Accuracy],
            &Params::new(),
            None,
            &config,
        )
        .unwrap();

        assert_eq!(sweep.param_name(), "max_depth");
        let keys: Vec<String> = sweep.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["3", "1", "2"]);
        for (_, table) in sweep.iter() {
            assert_eq!(table.num_rows(), 4);
            assert_eq!(table.num_columns(), 2);
        }
        assert!(sweep.get(&ParamValue::from(1i64)).is_some());
        assert!(sweep.get(&ParamValue::from(4i64)).is_none());
    }

    #[test]
    fn test_candidate_overrides_other_params() {
        let mut other = Params::new();
        other.insert("max_depth".to_string(), ParamValue::from(0i64));
        let config = CrossValidationConfigBuilder::new().splits(2).build().unwrap();

        // max_depth = 0 alone would be rejected
        let sweep = validate_param_range::<DecisionTreeClassifier, _>(
            &dataset(),
            "max_depth",
            &[ParamValue::from(1i64)],
            &[Metric::Accuracy],
            &other,
            None,
            &config,
        )
        .unwrap();
        assert_eq!(sweep.len(), 1);
    }

    #[test]
    fn test_instantiation_failure_aborts() {
        let config = CrossValidationConfigBuilder::new().splits(2).build().unwrap();
        let err = validate_param_range::<DummyClassifier, _>(
            &dataset(),
            "strategy",
            &[ParamValue::from("prior")],
            &[Metric::Accuracy],
            &Params::new(),
            None,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, CrossValError::InvalidParameter { .. }));
    }

    #[test]
    fn test_list_values_keyed_by_text() {
        let value = ParamValue::from(vec![10i64, 20]);
        assert_eq!(SweepKey::from(&value), SweepKey::Text("[10, 20]".to_string()));
        assert_eq!(
            SweepKey::from(&ParamValue::from(2i64)),
            SweepKey::Scalar(ParamValue::Int(2))
        );
    }
}
