//! Regression metrics.

use crate::core::error::Result;
use crate::core::types::*;
use crate::metrics::check_lengths;
use ndarray::{Array1, ArrayView1, Zip};

/// Prediction minus truth per row. Callers check lengths first.
fn residuals(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Array1<f64> {
    Zip::from(&y_true)
        .and(&y_pred)
        .map_collect(|&t, &p| p as f64 - t as f64)
}

/// Mean of squared residuals.
pub fn mean_squared_error(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let sum: f64 = residuals(y_true, y_pred).iter().map(|e| e * e).sum();
    Ok(sum / y_true.len() as f64)
}

/// Square root of [`mean_squared_error`].
pub fn root_mean_squared_error(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

/// Mean of absolute residuals.
pub fn mean_absolute_error(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let sum: f64 = residuals(y_true, y_pred).iter().map(|e| e.abs()).sum();
    Ok(sum / y_true.len() as f64)
}

/// Coefficient of determination.
///
/// A constant target scores `1.0` for a perfect fit and `0.0` otherwise.
pub fn r2_score(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let n = y_true.len() as f64;
    let mean = y_true.iter().map(|&v| v as f64).sum::<f64>() / n;

    let ss_res: f64 = residuals(y_true, y_pred).iter().map(|e| e * e).sum();
    let ss_tot: f64 = y_true.iter().map(|&v| (v as f64 - mean).powi(2)).sum();

    if ss_tot > 0.0 {
        Ok(1.0 - ss_res / ss_tot)
    } else if ss_res == 0.0 {
        Ok(1.0)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s};

    #[test]
    fn test_errors() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 1.0];

        assert_abs_diff_eq!(mean_squared_error(y_true.view(), y_pred.view()).unwrap(), 5.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            root_mean_squared_error(y_true.view(), y_pred.view()).unwrap(),
            (5.0f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(mean_absolute_error(y_true.view(), y_pred.view()).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_views_with_different_owners() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let head = y_true.slice(s![..2]);
        let mae = {
            let y_pred = array![2.0, 4.0];
            mean_absolute_error(head, y_pred.view()).unwrap()
        };
        assert_abs_diff_eq!(mae, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mean_squared_error(head, y_true.slice(s![2..])).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r2() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(r2_score(y_true.view(), y_true.view()).unwrap(), 1.0);

        let mean_pred = array![2.5, 2.5, 2.5, 2.5];
        assert_abs_diff_eq!(r2_score(y_true.view(), mean_pred.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_r2_constant_target() {
        let y_true = array![2.0, 2.0];
        assert_eq!(r2_score(y_true.view(), y_true.view()).unwrap(), 1.0);
        assert_eq!(r2_score(y_true.view(), array![1.0, 2.0].view()).unwrap(), 0.0);
    }
}
