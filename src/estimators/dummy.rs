//! Constant predictors.

use crate::config::params::{Params, ParamsExt};
use crate::core::error::{CrossValError, Result};
use crate::core::traits::{Estimator, FromParams};
use crate::core::types::*;
use crate::estimators::{check_training_data, majority_label};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Always predicts the most frequent training label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DummyClassifier {
    prediction: Option<Label>,
}

impl DummyClassifier {
    /// Create an unfitted classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Label learned by `fit`
    pub fn prediction(&self) -> Option<Label> {
        self.prediction
    }
}

impl Estimator for DummyClassifier {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Classifier
    }

    fn fit(&mut self, features: ArrayView2<'_, Feature>, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_training_data(features, labels)?;
        self.prediction = majority_label(labels.iter());
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>> {
        let value = self
            .prediction
            .ok_or_else(|| CrossValError::prediction("DummyClassifier is not fitted"))?;
        Ok(Array1::from_elem(features.nrows(), value))
    }
}

impl FromParams for DummyClassifier {
    fn from_params(params: &Params) -> Result<Self> {
        params.reject_unknown(&[])?;
        Ok(Self::new())
    }
}

/// Always predicts the mean training target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DummyRegressor {
    prediction: Option<Label>,
}

impl DummyRegressor {
    /// Create an unfitted regressor
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean learned by `fit`
    pub fn prediction(&self) -> Option<Label> {
        self.prediction
    }
}

impl Estimator for DummyRegressor {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Regressor
    }

    fn fit(&mut self, features: ArrayView2<'_, Feature>, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_training_data(features, labels)?;
        let sum: f64 = labels.iter().map(|&v| v as f64).sum();
        self.prediction = Some((sum / labels.len() as f64) as Label);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>> {
        let value = self
            .prediction
            .ok_or_else(|| CrossValError::prediction("DummyRegressor is not fitted"))?;
        Ok(Array1::from_elem(features.nrows(), value))
    }
}

impl FromParams for DummyRegressor {
    fn from_params(params: &Params) -> Result<Self> {
        params.reject_unknown(&[])?;
        Ok(Self::new())
    }
}
