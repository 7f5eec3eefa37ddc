//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels (`--log-level`, `RUST_LOG`)
//! - JSON log files with rotation (`--log-dir`)
//!
//! # Example
//!
//! ```no_run
//! use attack_etl::logging::init_logging;
//! use attack_etl::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("ETL run started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a pipeline stage transition
///
/// # Example
///
/// ```no_run
/// use attack_etl::log_stage;
/// use attack_etl::core::etl::RunStage;
///
/// log_stage!(RunStage::FeedConnected);
/// ```
#[macro_export]
macro_rules! log_stage {
    ($stage:expr) => {
        tracing::debug!(stage = %$stage, "Pipeline stage reached");
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use attack_etl::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 5000u64, "Connection refused");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Attempt failed, retrying"
        );
    };
}
