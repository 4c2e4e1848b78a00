//! Fold splitting for k-fold cross-validation.
//!
//! Both strategies assign every row to exactly one test fold, so the test
//! sets of one split round partition the dataset. Shuffling is seeded and
//! fully reproducible for a given `random_state`.

use crate::core::error::{Result, SplitError};
use crate::core::types::*;
use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How rows are assigned to folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Plain k-fold over (optionally shuffled) rows
    KFold,
    /// K-fold preserving the class proportions of the labels in every fold
    Stratified,
}

impl SplitStrategy {
    /// Strategy conventionally used for an estimator kind.
    ///
    /// Classifiers get stratified folds, regressors plain k-fold. Other kinds
    /// have no natural labelled split and are rejected.
    pub fn for_kind(kind: EstimatorKind) -> Result<Self> {
        match kind {
            EstimatorKind::Classifier => Ok(SplitStrategy::Stratified),
            EstimatorKind::Regressor => Ok(SplitStrategy::KFold),
            other => Err(crate::config_error!(
                "Improper model type: cannot cross-validate a {} without an explicit split strategy",
                other
            )),
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitStrategy::KFold => write!(f, "k_fold"),
            SplitStrategy::Stratified => write!(f, "stratified"),
        }
    }
}

/// One train/test partition of the dataset rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fold {
    /// Training row indices, ascending
    pub train: Vec<usize>,
    /// Test row indices, ascending
    pub test: Vec<usize>,
}

/// Produces the folds of one cross-validation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSplitter {
    strategy: SplitStrategy,
    n_splits: usize,
    shuffle: bool,
    random_state: u64,
}

impl FoldSplitter {
    /// Create a splitter. Rows are shuffled with seed 0 unless configured otherwise.
    pub fn new(strategy: SplitStrategy, n_splits: usize) -> Self {
        FoldSplitter {
            strategy,
            n_splits,
            shuffle: true,
            random_state: 0,
        }
    }

    /// Enable or disable shuffling
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the shuffle seed
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Configured strategy
    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Configured number of folds
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split rows into folds. `labels` drive stratification and fix the row count.
    pub fn split(&self, labels: ArrayView1<'_, Label>) -> Result<Vec<Fold>> {
        let num_samples = labels.len();
        if num_samples == 0 {
            return Err(SplitError::Empty.into());
        }
        if self.n_splits < 2 {
            return Err(SplitError::TooFewSplits {
                splits: self.n_splits,
            }
            .into());
        }
        if self.n_splits > num_samples {
            return Err(SplitError::TooManySplits {
                splits: self.n_splits,
                samples: num_samples,
            }
            .into());
        }

        let mut rng = StdRng::seed_from_u64(self.random_state);
        let assignment = match self.strategy {
            SplitStrategy::KFold => self.kfold_assignment(num_samples, &mut rng),
            SplitStrategy::Stratified => self.stratified_assignment(labels, &mut rng),
        };

        Ok(folds_from_assignment(&assignment, self.n_splits))
    }

    /// Contiguous blocks over the row order; the first `n % k` folds get one extra row.
    fn kfold_assignment(&self, num_samples: usize, rng: &mut StdRng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..num_samples).collect();
        if self.shuffle {
            order.shuffle(rng);
        }

        let base = num_samples / self.n_splits;
        let remainder = num_samples % self.n_splits;

        let mut assignment = vec![0; num_samples];
        let mut position = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < remainder);
            for &row in &order[position..position + size] {
                assignment[row] = fold;
            }
            position += size;
        }
        assignment
    }

    /// Rows grouped by class, then dealt round-robin so every fold receives
    /// `floor` or `ceil` of `class_count / k` rows of each class.
    fn stratified_assignment(&self, labels: ArrayView1<'_, Label>, rng: &mut StdRng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by(|&a, &b| labels[a].total_cmp(&labels[b]));

        let mut class_rows: Vec<Vec<usize>> = Vec::new();
        let mut current: Option<Label> = None;
        for row in order {
            if current.map_or(true, |c| c.total_cmp(&labels[row]).is_ne()) {
                class_rows.push(Vec::new());
                current = Some(labels[row]);
            }
            if let Some(rows) = class_rows.last_mut() {
                rows.push(row);
            }
        }

        if let Some(smallest) = class_rows.iter().map(Vec::len).min() {
            if smallest < self.n_splits {
                log::warn!(
                    "The least populated class has only {} members, which is less than n_splits={}",
                    smallest,
                    self.n_splits
                );
            }
        }

        let mut assignment = vec![0; labels.len()];
        let mut position = 0;
        for rows in class_rows.iter_mut() {
            if self.shuffle {
                rows.shuffle(rng);
            }
            for &row in rows.iter() {
                assignment[row] = position % self.n_splits;
                position += 1;
            }
        }
        assignment
    }
}

fn folds_from_assignment(assignment: &[usize], n_splits: usize) -> Vec<Fold> {
    (0..n_splits)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..assignment.len()).partition(|&row| assignment[row] == fold);
            Fold { train, test }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CrossValError;
    use ndarray::Array1;

    fn alternating_labels(n: usize) -> Array1<Label> {
        Array1::from_iter((0..n).map(|i| (i % 2) as Label))
    }

    fn assert_partition(folds: &[Fold], num_samples: usize) {
        let mut seen = vec![0usize; num_samples];
        for fold in folds {
            for &row in &fold.test {
                seen[row] += 1;
            }
            assert_eq!(fold.train.len() + fold.test.len(), num_samples);
            assert!(fold.train.iter().all(|row| !fold.test.contains(row)));
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_strategy_for_kind() {
        assert_eq!(
            SplitStrategy::for_kind(EstimatorKind::Classifier).unwrap(),
            SplitStrategy::Stratified
        );
        assert_eq!(
            SplitStrategy::for_kind(EstimatorKind::Regressor).unwrap(),
            SplitStrategy::KFold
        );
        let err = SplitStrategy::for_kind(EstimatorKind::Ranker).unwrap_err();
        assert!(matches!(err, CrossValError::Config { .. }));
    }

    #[test]
    fn test_kfold_partition_and_sizes() {
        let labels = Array1::<Label>::zeros(11);
        let folds = FoldSplitter::new(SplitStrategy::KFold, 3)
            .split(labels.view())
            .unwrap();

        assert_eq!(folds.len(), 3);
        let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
        assert_eq!(sizes, vec![4, 4, 3]);
        assert_partition(&folds, 11);
    }

    #[test]
    fn test_kfold_without_shuffle_is_contiguous() {
        let labels = Array1::<Label>::zeros(6);
        let folds = FoldSplitter::new(SplitStrategy::KFold, 3)
            .with_shuffle(false)
            .split(labels.view())
            .unwrap();

        assert_eq!(folds[0].test, vec![0, 1]);
        assert_eq!(folds[1].test, vec![2, 3]);
        assert_eq!(folds[2].test, vec![4, 5]);
        assert_eq!(folds[0].train, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let labels = Array1::<Label>::zeros(30);
        let splitter = FoldSplitter::new(SplitStrategy::KFold, 5).with_random_state(42);
        assert_eq!(
            splitter.split(labels.view()).unwrap(),
            splitter.split(labels.view()).unwrap()
        );
    }

    #[test]
    fn test_stratified_preserves_class_proportions() {
        // 12 of class 0, 6 of class 1, 3 of class 2
        let mut values = vec![0.0; 12];
        values.extend(vec![1.0; 6]);
        values.extend(vec![2.0; 3]);
        let labels = Array1::from_vec(values);

        let folds = FoldSplitter::new(SplitStrategy::Stratified, 3)
            .with_random_state(3)
            .split(labels.view())
            .unwrap();

        assert_partition(&folds, 21);
        for fold in &folds {
            let count = |class: Label| fold.test.iter().filter(|&&r| labels[r] == class).count();
            assert_eq!(count(0.0), 4);
            assert_eq!(count(1.0), 2);
            assert_eq!(count(2.0), 1);
        }
    }

    #[test]
    fn test_stratified_balances_fold_sizes() {
        let labels = alternating_labels(20);
        let folds = FoldSplitter::new(SplitStrategy::Stratified, 4)
            .split(labels.view())
            .unwrap();
        assert!(folds.iter().all(|f| f.test.len() == 5));
        assert_partition(&folds, 20);
    }

    #[test]
    fn test_split_errors() {
        let labels = alternating_labels(3);
        let splitter = FoldSplitter::new(SplitStrategy::KFold, 4);
        assert!(matches!(
            splitter.split(labels.view()),
            Err(CrossValError::Split { .. })
        ));

        let splitter = FoldSplitter::new(SplitStrategy::KFold, 1);
        assert!(splitter.split(labels.view()).is_err());

        let empty = Array1::<Label>::zeros(0);
        let splitter = FoldSplitter::new(SplitStrategy::Stratified, 2);
        assert!(splitter.split(empty.view()).is_err());
    }
}
