//! End-to-end cross-validation tests.

use approx::assert_abs_diff_eq;
use crossval::*;
use ndarray::{Array1, ArrayView1, ArrayView2};

mod common;
use common::*;

#[test]
fn test_majority_classifier_scenario() {
    let dataset = create_alternating_dataset(20);
    let config = CrossValidationConfigBuilder::new()
        .splits(4)
        .train_scores(true)
        .build()
        .unwrap();

    let results = cv_engine(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config).unwrap();
    let table = format_cv_results(&results, &[Metric::Accuracy], true).unwrap();

    assert_eq!(table.num_rows(), 4);
    for fold in 1..=4 {
        assert_abs_diff_eq!(table.get(fold, "accuracy", Some(Split::Test)).unwrap(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(
            table.get(fold, "accuracy", Some(Split::Train)).unwrap(),
            8.0 / 15.0,
            epsilon = 1e-12
        );
    }

    let summary = describe_dataframe(&table, ["mean", "std"]).unwrap();
    assert_abs_diff_eq!(
        summary.get("accuracy", Some(Split::Test), Statistic::Mean).unwrap(),
        0.4,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        summary.get("accuracy", Some(Split::Test), Statistic::Std).unwrap(),
        0.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_majority_classifier_test_only_summary() {
    let dataset = create_alternating_dataset(20);
    let config = CrossValidationConfigBuilder::new()
        .splits(4)
        .train_scores(false)
        .build()
        .unwrap();

    let summary = cv_score(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config).unwrap();

    assert_eq!(summary.rows(), &[ColumnKey::flat("accuracy")]);
    assert_eq!(summary.stats(), &[Statistic::Mean, Statistic::Std]);
    assert_eq!(summary.values().dim(), (1, 2));
    assert_abs_diff_eq!(summary.values()[[0, 0]], 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.values()[[0, 1]], 0.0, epsilon = 1e-12);
    assert_eq!(summary.get("accuracy", None, Statistic::Mean), Some(summary.values()[[0, 0]]));
}

#[test]
fn test_cv_score_matches_manual_pipeline() {
    let dataset = create_binary_dataset(60, 3);
    let config = create_test_config(5);
    let funcs = [Metric::Accuracy, Metric::Precision, Metric::Recall];
    let factory = || Ok(DecisionTreeClassifier::new().with_max_depth(3));

    let summary = cv_score(&dataset, &factory, &funcs, None, &config).unwrap();

    let results = cv_engine(&dataset, &factory, &funcs, None, &config).unwrap();
    let table = format_cv_results(&results, &funcs, true).unwrap();
    let manual = describe_dataframe(&table, config.stats_to_run.clone()).unwrap();

    assert_eq!(summary.rows().len(), 6);
    assert_eq!(summary.values(), manual.values());
}

#[test]
fn test_results_are_reproducible_for_a_seed() {
    let dataset = create_regression_dataset(50, 2);
    let config = create_test_config(5);
    let factory = || Ok(DecisionTreeRegressor::new().with_max_depth(3));

    let first = cv_engine(&dataset, &factory, &[Metric::MeanSquaredError], None, &config).unwrap();
    let second = cv_engine(&dataset, &factory, &[Metric::MeanSquaredError], None, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_regressor_uses_plain_kfold_and_flat_table() {
    let dataset = create_regression_dataset(30, 2);
    let config = CrossValidationConfigBuilder::new()
        .splits(3)
        .train_scores(false)
        .build()
        .unwrap();
    let funcs = [Metric::MeanAbsoluteError, Metric::R2];

    let results = cv_engine(&dataset, &|| Ok(DummyRegressor::new()), &funcs, None, &config).unwrap();
    assert!(results.iter().flatten().all(|r| !r.has_train()));

    let table = format_cv_results(&results, &funcs, false).unwrap();
    assert!(!table.has_splits());
    assert_eq!(
        table.columns(),
        &[ColumnKey::flat("mean_absolute_error"), ColumnKey::flat("r2")]
    );
    // a constant mean predictor never beats the mean of the test fold
    assert!(table.column("r2", None).unwrap().iter().all(|&r2| r2 <= 1e-9));
}

#[test]
fn test_scaler_with_tree_is_scale_invariant() {
    let dataset = create_binary_dataset(40, 2);
    let config = create_test_config(4);
    let factory = || Ok(DecisionTreeClassifier::new().with_max_depth(2));

    let plain = cv_engine(&dataset, &factory, &[Metric::Accuracy], None, &config).unwrap();
    let scaled = cv_engine(
        &dataset,
        &factory,
        &[Metric::Accuracy],
        Some(&StandardScaler::new()),
        &config,
    )
    .unwrap();

    let plain = format_cv_results(&plain, &[Metric::Accuracy], true).unwrap();
    let scaled = format_cv_results(&scaled, &[Metric::Accuracy], true).unwrap();
    for fold in 1..=4 {
        assert_abs_diff_eq!(
            plain.get(fold, "accuracy", Some(Split::Train)).unwrap(),
            scaled.get(fold, "accuracy", Some(Split::Train)).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_custom_metric_in_pipeline() {
    let dataset = create_regression_dataset(20, 1);
    let config = create_test_config(4);
    let max_error = CustomMetric::new("max_error", |y_true, y_pred| {
        Ok(y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).abs() as f64)
            .fold(0.0, f64::max))
    });

    let summary = cv_score(&dataset, &|| Ok(DummyRegressor::new()), &[max_error], None, &config).unwrap();
    assert!(summary.get("max_error", Some(Split::Test), Statistic::Mean).unwrap() > 0.0);
}

#[test]
fn test_boxed_score_functions() {
    let dataset = create_binary_dataset(30, 2);
    let config = create_test_config(3);
    let funcs: Vec<Box<dyn ScoreFunction<Output = ScoreValue>>> = vec![
        Box::new(Metric::Accuracy),
        Box::new(CustomMetric::new("constant", |_, _| Ok(1.0))),
    ];

    let summary = cv_score(&dataset, &|| Ok(DummyClassifier::new()), &funcs, None, &config).unwrap();
    assert_eq!(summary.get("constant", Some(Split::Train), Statistic::Mean), Some(1.0));
}

#[test]
fn test_boxed_estimator_factory() {
    let dataset = create_binary_dataset(30, 2);
    let config = create_test_config(3);
    let factory = || -> Result<Box<dyn Estimator>> { Ok(Box::new(DummyClassifier::new())) };

    let results = cv_engine(&dataset, &factory, &[Metric::Accuracy], None, &config).unwrap();
    assert_eq!(results.len(), 3);
}

#[derive(Debug)]
struct TransformerModel;

impl Estimator for TransformerModel {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Transformer
    }

    fn fit(&mut self, _: ArrayView2<'_, f32>, _: ArrayView1<'_, f32>) -> Result<()> {
        panic!("fit must not run for an unsupported estimator kind");
    }

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Array1<f32>> {
        Ok(Array1::zeros(features.nrows()))
    }
}

#[test]
fn test_unsupported_kind_fails_before_any_fold() {
    let dataset = create_alternating_dataset(10);
    let err = cv_score(
        &dataset,
        &|| Ok(TransformerModel),
        &[Metric::Accuracy],
        None,
        &CrossValidationConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CrossValError::Config { .. }));
}

#[test]
fn test_unknown_statistic_from_config() {
    let dataset = create_alternating_dataset(10);
    let mut config = CrossValidationConfig::default();
    config.stats_to_run = vec!["mean".to_string(), "mode".to_string()];

    let err = cv_score(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config).unwrap_err();
    assert!(matches!(err, CrossValError::UnknownStatistic { ref name } if name == "mode"));

    // statistics play no part in the fold loop or confusion matrices
    assert_eq!(
        cv_engine(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config)
            .unwrap()
            .len(),
        5
    );
    let table = cv_conf_mat(&dataset, &|| Ok(DummyClassifier::new()), None, &config).unwrap();
    assert_eq!(table.num_folds(), 5);
}
