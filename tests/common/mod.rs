//! Common test utilities for crossval integration tests.

#![allow(dead_code)]

use crossval::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// One feature equal to the row index, labels alternating 0, 1, 0, ...
pub fn create_alternating_dataset(num_samples: usize) -> Dataset {
    let features = Array2::from_shape_fn((num_samples, 1), |(i, _)| i as f32);
    let labels = Array1::from_iter((0..num_samples).map(|i| (i % 2) as f32));
    Dataset::new(features, labels).unwrap()
}

/// Class 0 at x = 0..9, class 1 at x = 100..109
pub fn create_separable_dataset() -> Dataset {
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for i in 0..10 {
        values.push(i as f32);
        labels.push(0.0);
    }
    for i in 0..10 {
        values.push(100.0 + i as f32);
        labels.push(1.0);
    }
    let features = Array2::from_shape_vec((20, 1), values).unwrap();
    Dataset::new(features, Array1::from_vec(labels)).unwrap()
}

/// Create test features drawn uniformly from `[-5, 5)`
pub fn create_test_features(num_samples: usize, num_features: usize, seed: u64) -> Array2<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((num_samples, num_features), |_| rng.gen_range(-5.0..5.0))
}

/// Linear regression targets over the features
pub fn create_test_labels_regression(features: &Array2<f32>) -> Array1<f32> {
    Array1::from_iter(features.rows().into_iter().map(|row| {
        row.iter()
            .enumerate()
            .map(|(j, &x)| x * (j + 1) as f32 * 0.1)
            .sum::<f32>()
    }))
}

/// Binary labels from a simple decision boundary on the first feature
pub fn create_test_labels_binary(features: &Array2<f32>) -> Array1<f32> {
    features.column(0).mapv(|x| if x > 0.0 { 1.0 } else { 0.0 })
}

/// Regression dataset with `num_features` random features
pub fn create_regression_dataset(num_samples: usize, num_features: usize) -> Dataset {
    let features = create_test_features(num_samples, num_features, 42);
    let labels = create_test_labels_regression(&features);
    Dataset::new(features, labels).unwrap()
}

/// Binary classification dataset with `num_features` random features
pub fn create_binary_dataset(num_samples: usize, num_features: usize) -> Dataset {
    let features = create_test_features(num_samples, num_features, 123);
    let labels = create_test_labels_binary(&features);
    Dataset::new(features, labels).unwrap()
}

/// Write a dataset as headered CSV with a `target` column last
pub fn create_test_csv<P: AsRef<Path>>(path: P, dataset: &Dataset) -> std::io::Result<()> {
    let mut content = String::new();
    let names: Vec<String> = (0..dataset.num_features()).map(|j| format!("feature_{}", j)).collect();
    content.push_str(&names.join(","));
    content.push_str(",target\n");

    for (row, label) in dataset.features().rows().into_iter().zip(dataset.labels().iter()) {
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        content.push_str(&values.join(","));
        content.push_str(&format!(",{}\n", label));
    }

    fs::write(path, content)
}

/// Configuration used by most integration tests
pub fn create_test_config(splits: usize) -> CrossValidationConfig {
    CrossValidationConfigBuilder::new()
        .splits(splits)
        .random_state(7)
        .build()
        .unwrap()
}
