//! Feature scaling applied inside each cross-validation fold.

use crate::core::error::{CrossValError, Result};
use crate::core::traits::Transformer;
use crate::core::types::*;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// How a scaler is fitted within a fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFit {
    /// Fit on the training rows, apply that fit to train and test
    #[default]
    TrainOnly,
    /// Fit train and test rows separately, each on itself
    Independent,
}

/// Scale one fold's features with a fresh copy of `prototype`.
pub fn scale_fold(
    prototype: &dyn Transformer,
    mode: ScaleFit,
    x_train: ArrayView2<'_, Feature>,
    x_test: ArrayView2<'_, Feature>,
) -> Result<(Array2<Feature>, Array2<Feature>)> {
    match mode {
        ScaleFit::TrainOnly => {
            let mut scaler = prototype.unfitted();
            let train = scaler.fit_transform(x_train)?;
            let test = scaler.transform(x_test)?;
            Ok((train, test))
        }
        ScaleFit::Independent => {
            let train = prototype.unfitted().fit_transform(x_train)?;
            let test = prototype.unfitted().fit_transform(x_test)?;
            Ok((train, test))
        }
    }
}

fn check_fitted_width(fitted: usize, features: ArrayView2<'_, Feature>) -> Result<()> {
    if features.ncols() != fitted {
        return Err(CrossValError::dimension_mismatch(
            format!("{} features", fitted),
            format!("{} features", features.ncols()),
        ));
    }
    Ok(())
}

/// Standardizes features to zero mean and unit variance.
///
/// Uses the population standard deviation. Constant columns are centred but
/// left unscaled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardScaler {
    mean: Option<Array1<Feature>>,
    scale: Option<Array1<Feature>>,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-column means learned by `fit`
    pub fn mean(&self) -> Option<&Array1<Feature>> {
        self.mean.as_ref()
    }

    /// Per-column scale learned by `fit`
    pub fn scale(&self) -> Option<&Array1<Feature>> {
        self.scale.as_ref()
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, features: ArrayView2<'_, Feature>) -> Result<()> {
        let mean = features
            .mean_axis(Axis(0))
            .ok_or_else(|| CrossValError::preprocessing("Cannot fit StandardScaler on zero rows"))?;
        let scale = features
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    fn transform(&self, features: ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(CrossValError::preprocessing("StandardScaler is not fitted")),
        };
        check_fitted_width(mean.len(), features)?;

        Ok((&features - mean) / scale)
    }

    fn unfitted(&self) -> Box<dyn Transformer> {
        Box::new(StandardScaler::new())
    }
}

/// Rescales each feature to the `[0, 1]` range seen during `fit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinMaxScaler {
    min: Option<Array1<Feature>>,
    range: Option<Array1<Feature>>,
}

impl MinMaxScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transformer for MinMaxScaler {
    fn fit(&mut self, features: ArrayView2<'_, Feature>) -> Result<()> {
        if features.nrows() == 0 {
            return Err(CrossValError::preprocessing("Cannot fit MinMaxScaler on zero rows"));
        }

        let min = features.fold_axis(Axis(0), Feature::INFINITY, |&acc, &v| acc.min(v));
        let max = features.fold_axis(Axis(0), Feature::NEG_INFINITY, |&acc, &v| acc.max(v));
        let range = (&max - &min).mapv(|r| if r > 0.0 { r } else { 1.0 });

        self.min = Some(min);
        self.range = Some(range);
        Ok(())
    }

    fn transform(&self, features: ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        let (min, range) = match (&self.min, &self.range) {
            (Some(min), Some(range)) => (min, range),
            _ => return Err(CrossValError::preprocessing("MinMaxScaler is not fitted")),
        };
        check_fitted_width(min.len(), features)?;

        Ok((&features - min) / range)
    }

    fn unfitted(&self) -> Box<dyn Transformer> {
        Box::new(MinMaxScaler::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(x.view()).unwrap();

        assert_abs_diff_eq!(scaled[[0, 0]], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(scaled[[1, 0]], 1.0, epsilon = 1e-6);
        // constant column is centred, not divided by zero
        assert_abs_diff_eq!(scaled[[0, 1]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unfitted_transform_fails() {
        let x = array![[1.0]];
        assert!(StandardScaler::new().transform(x.view()).is_err());
        assert!(MinMaxScaler::new().transform(x.view()).is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(array![[0.0, 1.0], [1.0, 2.0]].view()).unwrap();
        let err = scaler.transform(array![[0.5]].view()).unwrap_err();
        assert!(matches!(err, CrossValError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_min_max_scaler() {
        let x = array![[0.0], [5.0], [10.0]];
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(x.view()).unwrap();
        assert_eq!(scaled, array![[0.0], [0.5], [1.0]]);
    }

    #[test]
    fn test_scale_fold_train_only_reuses_training_fit() {
        let train = array![[0.0], [10.0]];
        let test = array![[20.0]];
        let (scaled_train, scaled_test) =
            scale_fold(&MinMaxScaler::new(), ScaleFit::TrainOnly, train.view(), test.view()).unwrap();

        assert_eq!(scaled_train, array![[0.0], [1.0]]);
        assert_eq!(scaled_test, array![[2.0]]);
    }

    #[test]
    fn test_scale_fold_independent_refits_test() {
        let train = array![[0.0], [10.0]];
        let test = array![[20.0], [30.0]];
        let (_, scaled_test) =
            scale_fold(&MinMaxScaler::new(), ScaleFit::Independent, train.view(), test.view()).unwrap();

        assert_eq!(scaled_test, array![[0.0], [1.0]]);
    }
}
