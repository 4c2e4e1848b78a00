//! Classification metrics.
//!
//! Binary metrics count a label as positive when it equals
//! [`POSITIVE_LABEL`]. Any other label is negative.

use crate::core::constants::{CONFUSION_LABELS, POSITIVE_LABEL};
use crate::core::error::{CrossValError, Result};
use crate::core::traits::ScoreFunction;
use crate::core::types::*;
use crate::metrics::check_lengths;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Fraction of predictions equal to the true label.
pub fn accuracy(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as ScoreValue / y_true.len() as ScoreValue)
}

/// Sorted distinct labels seen in either vector.
fn observed_labels(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Vec<Label> {
    let mut labels: Vec<Label> = y_true.iter().chain(y_pred.iter()).copied().collect();
    labels.sort_by(|a, b| a.total_cmp(b));
    labels.dedup();
    labels
}

fn binary_counts(
    y_true: ArrayView1<'_, Label>,
    y_pred: ArrayView1<'_, Label>,
    positive: Label,
) -> Result<(usize, usize, usize, usize)> {
    let labels = observed_labels(y_true, y_pred);
    if let Some(extra) = labels.get(2) {
        return Err(CrossValError::invalid_parameter(
            "labels",
            extra.to_string(),
            "binary metrics accept at most two classes",
        ));
    }
    if labels.len() == 2 && !labels.contains(&positive) {
        return Err(CrossValError::invalid_parameter(
            "positive_label",
            positive.to_string(),
            format!("not one of the observed classes {} and {}", labels[0], labels[1]),
        ));
    }

    let mut tp = 0;
    let mut fp = 0;
    let mut tn = 0;
    let mut fn_ = 0;

    for (&truth, &pred) in y_true.iter().zip(y_pred.iter()) {
        match (pred == positive, truth == positive) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fn_ += 1,
        }
    }

    Ok((tp, fp, tn, fn_))
}

/// Positive predictive value; `0.0` when nothing is predicted positive.
pub fn precision(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let (tp, fp, _, _) = binary_counts(y_true, y_pred, POSITIVE_LABEL)?;
    Ok(if tp + fp > 0 {
        tp as ScoreValue / (tp + fp) as ScoreValue
    } else {
        0.0
    })
}

/// True positive rate; `0.0` when there are no positive labels.
pub fn recall(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    check_lengths(y_true, y_pred)?;
    let (tp, _, _, fn_) = binary_counts(y_true, y_pred, POSITIVE_LABEL)?;
    Ok(if tp + fn_ > 0 {
        tp as ScoreValue / (tp + fn_) as ScoreValue
    } else {
        0.0
    })
}

/// Harmonic mean of precision and recall.
pub fn f1_score(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ScoreValue> {
    let p = precision(y_true, y_pred)?;
    let r = recall(y_true, y_pred)?;
    Ok(if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 })
}

/// Binary confusion matrix.
///
/// Rows are the true class, columns the predicted class, both ordered
/// negative then positive: `[[tn, fp], [fn, tp]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Matrix values
    pub matrix: Array2<usize>,
}

impl ConfusionMatrix {
    /// Create a binary confusion matrix from its four cells.
    pub fn new_binary(tp: usize, fp: usize, tn: usize, fn_: usize) -> Self {
        let mut matrix = Array2::zeros((2, 2));
        matrix[[0, 0]] = tn;
        matrix[[0, 1]] = fp;
        matrix[[1, 0]] = fn_;
        matrix[[1, 1]] = tp;
        Self { matrix }
    }

    /// True negatives
    pub fn tn(&self) -> usize {
        self.matrix[[0, 0]]
    }

    /// False positives
    pub fn fp(&self) -> usize {
        self.matrix[[0, 1]]
    }

    /// False negatives
    pub fn fn_(&self) -> usize {
        self.matrix[[1, 0]]
    }

    /// True positives
    pub fn tp(&self) -> usize {
        self.matrix[[1, 1]]
    }

    /// Number of samples counted
    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    /// Number of misclassified samples
    pub fn off_diagonal(&self) -> usize {
        self.fp() + self.fn_()
    }
}

/// Binary confusion matrix of `y_pred` against `y_true` with labels `0`
/// (negative) and `1` (positive).
pub fn confusion_matrix(y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ConfusionMatrix> {
    confusion_matrix_with_labels(y_true, y_pred, CONFUSION_LABELS)
}

/// Binary confusion matrix for an explicit `[negative, positive]` label pair.
///
/// A label outside the pair fails with [`CrossValError::InvalidParameter`]
/// naming the offending vector and value.
pub fn confusion_matrix_with_labels(
    y_true: ArrayView1<'_, Label>,
    y_pred: ArrayView1<'_, Label>,
    labels: [Label; 2],
) -> Result<ConfusionMatrix> {
    check_lengths(y_true, y_pred)?;
    let class_index = |name: &str, value: Label| {
        labels.iter().position(|&l| l == value).ok_or_else(|| {
            CrossValError::invalid_parameter(
                name,
                value.to_string(),
                format!("binary confusion matrix requires labels {} and {}", labels[0], labels[1]),
            )
        })
    };

    let mut matrix = Array2::<usize>::zeros((2, 2));
    for (&truth, &pred) in y_true.iter().zip(y_pred.iter()) {
        let row = class_index("y_true", truth)?;
        let col = class_index("y_pred", pred)?;
        matrix[[row, col]] += 1;
    }
    Ok(ConfusionMatrix { matrix })
}

/// Score function producing a [`ConfusionMatrix`] per fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfusionMatrixScorer {
    labels: [Label; 2],
}

impl ConfusionMatrixScorer {
    /// Scorer for the given negative and positive class labels.
    pub fn new(negative: Label, positive: Label) -> Self {
        Self {
            labels: [negative, positive],
        }
    }

    /// `[negative, positive]`
    pub fn labels(&self) -> [Label; 2] {
        self.labels
    }
}

impl Default for ConfusionMatrixScorer {
    fn default() -> Self {
        Self { labels: CONFUSION_LABELS }
    }
}

impl ScoreFunction for ConfusionMatrixScorer {
    type Output = ConfusionMatrix;

    fn name(&self) -> &str {
        "confusion_matrix"
    }

    fn score(&self, y_true: ArrayView1<'_, Label>, y_pred: ArrayView1<'_, Label>) -> Result<ConfusionMatrix> {
        confusion_matrix_with_labels(y_true, y_pred, self.labels)
    }
}
