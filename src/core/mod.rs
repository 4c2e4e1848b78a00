//! Core infrastructure module for crossval.
//!
//! - [`types`]: Fundamental data types and enumerations
//! - [`constants`]: Configuration defaults
//! - [`error`]: Error handling and error types
//! - [`traits`]: Estimator, factory, transformer and score function traits

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{CrossValError, Result, SplitError};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the `env_logger` backend for the `log` facade.
///
/// Defaults to the `info` level when `RUST_LOG` is unset. Safe to call more
/// than once; a logger installed by the host application is left alone.
pub fn initialize_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
    LOGGING_INITIALIZED.store(true, Ordering::SeqCst);
    log::debug!("crossval {} logging initialized", CORE_MODULE_VERSION);
}

/// Whether [`initialize_logging`] has run.
pub fn is_logging_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::SeqCst)
}

/// Version information for the core module
pub const CORE_MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");
