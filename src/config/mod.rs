//! Configuration management for crossval.
//!
//! - [`core`]: [`CrossValidationConfig`] and its builder, file and
//!   environment loading
//! - [`params`]: hyper-parameter values used by the parameter sweep

pub mod core;
pub mod params;

pub use self::core::{CrossValidationConfig, CrossValidationConfigBuilder};
pub use self::params::{ParamValue, Params, ParamsExt};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "crossval.toml";
