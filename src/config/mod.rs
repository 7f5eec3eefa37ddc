//! Configuration management.
//!
//! # Overview
//!
//! Two settings are read from the environment (optionally populated from a
//! `.env` file):
//!
//! | Variable | Meaning |
//! |---|---|
//! | `MONGO_URI` | MongoDB connection string |
//! | `MONGO_DB` | Target database name |
//!
//! Everything else (feed URL, target collection, collection title match,
//! object type allowlist, retry policy, timeouts) is fixed and exposed as
//! constants in [`schema`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use attack_etl::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! println!("Target: {}", config.store.namespace());
//! println!("Feed: {}", config.feed.url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from};
pub use schema::{EtlConfig, FeedConfig, LoggingConfig, StoreConfig, TransformConfig};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
