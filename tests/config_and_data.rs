//! Configuration files, environment overrides and CSV input.

use crossval::*;
use tempfile::TempDir;

mod common;
use common::*;

#[test]
fn test_config_file_drives_cross_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crossval.toml");
    std::fs::write(
        &path,
        r#"
splits = 4
train_scores = false
random_state = 11
stats_to_run = ["mean", "median", "max"]
"#,
    )
    .unwrap();

    let config = CrossValidationConfig::load_from_file(&path).unwrap();
    assert_eq!(config.splits, 4);
    assert!(config.shuffle);

    let dataset = create_alternating_dataset(20);
    let summary = cv_score(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config).unwrap();

    assert_eq!(summary.rows(), &[ColumnKey::flat("accuracy")]);
    assert_eq!(summary.stats(), &[Statistic::Mean, Statistic::Median, Statistic::Max]);
}

#[test]
fn test_json_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crossval.json");

    let config = CrossValidationConfigBuilder::new()
        .splits(3)
        .shuffle(false)
        .strategy(SplitStrategy::KFold)
        .scale_fit(ScaleFit::Independent)
        .stats_to_run(vec!["sem"])
        .build()
        .unwrap();
    config.save_to_file(&path).unwrap();

    assert_eq!(CrossValidationConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "splits = 1\n").unwrap();

    let err = CrossValidationConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, CrossValError::InvalidParameter { .. }));
}

#[test]
fn test_environment_overrides() {
    std::env::set_var("CROSSVAL_SPLITS", "7");
    std::env::set_var("CROSSVAL_TRAIN_SCORES", "false");

    let mut config = CrossValidationConfig::default();
    let result = config.apply_environment_overrides();

    std::env::remove_var("CROSSVAL_SPLITS");
    std::env::remove_var("CROSSVAL_TRAIN_SCORES");

    result.unwrap();
    assert_eq!(config.splits, 7);
    assert!(!config.train_scores);
}

#[cfg(feature = "csv")]
#[test]
fn test_csv_dataset_cross_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    let original = create_binary_dataset(40, 3);
    create_test_csv(&path, &original).unwrap();

    let dataset = Dataset::from_csv(&path, "target").unwrap();
    assert_eq!(dataset.num_samples(), 40);
    assert_eq!(dataset.num_features(), 3);
    assert_eq!(dataset.labels(), original.labels());

    let summary = cv_score(
        &dataset,
        &|| Ok(DecisionTreeClassifier::new().with_max_depth(2)),
        &[Metric::Accuracy],
        Some(&MinMaxScaler::new()),
        &create_test_config(4),
    )
    .unwrap();
    let mean = summary.get("accuracy", Some(Split::Test), Statistic::Mean).unwrap();
    assert!((0.0..=1.0).contains(&mean));
}

#[cfg(feature = "csv")]
#[test]
fn test_score_table_csv_export() {
    let dataset = create_alternating_dataset(12);
    let config = create_test_config(3);
    let results = cv_engine(&dataset, &|| Ok(DummyClassifier::new()), &[Metric::Accuracy], None, &config).unwrap();
    let table = format_cv_results(&results, &[Metric::Accuracy], true).unwrap();

    let mut buffer = Vec::new();
    table.to_csv_writer(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("fold,accuracy/train,accuracy/test\n1,"));
    assert_eq!(text.lines().count(), 4);
}

#[cfg(feature = "polars")]
#[test]
fn test_summary_to_dataframe() {
    let dataset = create_alternating_dataset(12);
    let summary = cv_score(
        &dataset,
        &|| Ok(DummyClassifier::new()),
        &[Metric::Accuracy, Metric::F1],
        None,
        &create_test_config(3),
    )
    .unwrap();

    let df = summary.to_dataframe().unwrap();
    assert_eq!(df.shape(), (4, 3));
}
