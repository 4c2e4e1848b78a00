//! Cross-validation configuration and its builder.

use crate::core::constants::*;
use crate::core::error::{CrossValError, Result};
use crate::dataset::preprocessing::ScaleFit;
use crate::dataset::split::SplitStrategy;
use crate::validation::stats::Statistic;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every cross-validation entry point.
///
/// Missing keys in a configuration file fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    /// Number of folds
    pub splits: usize,
    /// Report training-set scores alongside test-set scores
    pub train_scores: bool,
    /// Seed for shuffled fold assignment
    pub random_state: u64,
    /// Shuffle rows before assigning folds
    pub shuffle: bool,
    /// Fold splitting strategy; derived from the estimator kind when unset
    pub strategy: Option<SplitStrategy>,
    /// How a per-fold scaler is fitted
    pub scale_fit: ScaleFit,
    /// Summary statistics computed by `cv_score`
    pub stats_to_run: Vec<String>,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        CrossValidationConfig {
            splits: DEFAULT_SPLITS,
            train_scores: true,
            random_state: DEFAULT_RANDOM_STATE,
            shuffle: true,
            strategy: None,
            scale_fit: ScaleFit::default(),
            stats_to_run: DEFAULT_STATS_TO_RUN.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CrossValidationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        self.validate_folds()?;
        self.validate_stats()
    }

    /// Validate the settings that drive fold splitting.
    pub fn validate_folds(&self) -> Result<()> {
        if self.splits < MIN_SPLITS {
            return Err(CrossValError::invalid_parameter(
                "splits",
                self.splits.to_string(),
                format!("must be at least {}", MIN_SPLITS),
            ));
        }
        Ok(())
    }

    /// Validate `stats_to_run`.
    pub fn validate_stats(&self) -> Result<()> {
        if self.stats_to_run.is_empty() {
            return Err(CrossValError::invalid_parameter(
                "stats_to_run",
                "[]",
                "at least one statistic is required",
            ));
        }

        for name in &self.stats_to_run {
            name.parse::<Statistic>()?;
        }

        Ok(())
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CrossValError::config(format!("Failed to read config file: {}", e)))?;

        let config: CrossValidationConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| CrossValError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| CrossValError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(CrossValError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| CrossValError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| CrossValError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(CrossValError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| CrossValError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Override fields from `CROSSVAL_*` environment variables.
    ///
    /// Recognized: `CROSSVAL_SPLITS`, `CROSSVAL_RANDOM_STATE`,
    /// `CROSSVAL_TRAIN_SCORES`, `CROSSVAL_SHUFFLE`.
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CROSSVAL_SPLITS") {
            self.splits = val
                .parse()
                .map_err(|_| CrossValError::config(format!("Invalid CROSSVAL_SPLITS: {}", val)))?;
        }

        if let Ok(val) = std::env::var("CROSSVAL_RANDOM_STATE") {
            self.random_state = val.parse().map_err(|_| {
                CrossValError::config(format!("Invalid CROSSVAL_RANDOM_STATE: {}", val))
            })?;
        }

        if let Ok(val) = std::env::var("CROSSVAL_TRAIN_SCORES") {
            self.train_scores = parse_env_bool(&val).ok_or_else(|| {
                CrossValError::config(format!("Invalid CROSSVAL_TRAIN_SCORES: {}", val))
            })?;
        }

        if let Ok(val) = std::env::var("CROSSVAL_SHUFFLE") {
            self.shuffle = parse_env_bool(&val)
                .ok_or_else(|| CrossValError::config(format!("Invalid CROSSVAL_SHUFFLE: {}", val)))?;
        }

        self.validate()
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for [`CrossValidationConfig`].
///
/// Setter errors are collected and reported together by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CrossValidationConfigBuilder {
    config: CrossValidationConfig,
    validation_errors: Vec<String>,
}

impl CrossValidationConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of folds
    pub fn splits(mut self, splits: usize) -> Self {
        if splits < MIN_SPLITS {
            self.validation_errors
                .push(format!("splits must be at least {}", MIN_SPLITS));
        }
        self.config.splits = splits;
        self
    }

    /// Include or exclude training-set scores
    pub fn train_scores(mut self, train_scores: bool) -> Self {
        self.config.train_scores = train_scores;
        self
    }

    /// Set the fold assignment seed
    pub fn random_state(mut self, seed: u64) -> Self {
        self.config.random_state = seed;
        self
    }

    /// Shuffle rows before assigning folds
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.config.shuffle = shuffle;
        self
    }

    /// Force a splitting strategy instead of deriving it from the estimator
    pub fn strategy(mut self, strategy: SplitStrategy) -> Self {
        self.config.strategy = Some(strategy);
        self
    }

    /// Set how per-fold scalers are fitted
    pub fn scale_fit(mut self, scale_fit: ScaleFit) -> Self {
        self.config.scale_fit = scale_fit;
        self
    }

    /// Set the summary statistics computed by `cv_score`
    pub fn stats_to_run<I, S>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.stats_to_run = stats.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CrossValidationConfig> {
        if !self.validation_errors.is_empty() {
            return Err(CrossValError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}
