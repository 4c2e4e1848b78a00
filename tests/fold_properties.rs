//! Property tests for fold splitting.

use crossval::{Fold, FoldSplitter, SplitStrategy};
use ndarray::Array1;
use proptest::prelude::*;

fn assert_partition(folds: &[Fold], num_samples: usize) -> std::result::Result<(), TestCaseError> {
    let mut seen = vec![0usize; num_samples];
    for fold in folds {
        prop_assert_eq!(fold.train.len() + fold.test.len(), num_samples);
        prop_assert!(fold.test.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(fold.train.windows(2).all(|w| w[0] < w[1]));
        for &row in &fold.test {
            seen[row] += 1;
            prop_assert!(fold.train.binary_search(&row).is_err());
        }
    }
    prop_assert!(seen.iter().all(|&count| count == 1));
    Ok(())
}

proptest! {
    #[test]
    fn kfold_test_sets_partition_rows(
        num_samples in 2usize..200,
        splits in 2usize..10,
        seed in any::<u64>(),
        shuffle in any::<bool>(),
    ) {
        prop_assume!(splits <= num_samples);
        let labels = Array1::<f32>::zeros(num_samples);
        let folds = FoldSplitter::new(SplitStrategy::KFold, splits)
            .with_shuffle(shuffle)
            .with_random_state(seed)
            .split(labels.view())
            .unwrap();

        prop_assert_eq!(folds.len(), splits);
        assert_partition(&folds, num_samples)?;

        let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
        let min = *sizes.iter().min().unwrap();
        let max = *sizes.iter().max().unwrap();
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn stratified_test_sets_partition_rows(
        labels in proptest::collection::vec(0u8..4, 4..150),
        splits in 2usize..6,
        seed in any::<u64>(),
    ) {
        prop_assume!(splits <= labels.len());
        let labels = Array1::from_iter(labels.iter().map(|&l| l as f32));
        let folds = FoldSplitter::new(SplitStrategy::Stratified, splits)
            .with_random_state(seed)
            .split(labels.view())
            .unwrap();

        prop_assert_eq!(folds.len(), splits);
        assert_partition(&folds, labels.len())?;

        // every class is spread as evenly as possible
        for class in 0..4 {
            let class = class as f32;
            let total = labels.iter().filter(|&&l| l == class).count();
            for fold in &folds {
                let count = fold.test.iter().filter(|&&r| labels[r] == class).count();
                prop_assert!(count >= total / splits && count <= (total + splits - 1) / splits);
            }
        }
    }
}

#[test]
fn test_different_seeds_give_different_folds() {
    let labels = Array1::<f32>::zeros(100);
    let a = FoldSplitter::new(SplitStrategy::KFold, 5)
        .with_random_state(1)
        .split(labels.view())
        .unwrap();
    let b = FoldSplitter::new(SplitStrategy::KFold, 5)
        .with_random_state(2)
        .split(labels.view())
        .unwrap();
    assert_ne!(a, b);
}
