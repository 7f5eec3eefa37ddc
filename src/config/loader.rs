//! Configuration loader reading the process environment
//!
//! The binary loads a `.env` file (via `dotenvy`) before calling
//! [`load_config`], so values may come from either source.

use super::schema::{EtlConfig, MONGO_DB_VAR, MONGO_URI_VAR};
use super::secret::secret_string;
use crate::domain::errors::EtlError;
use crate::domain::result::Result;

/// Loads configuration from the process environment
///
/// # Errors
///
/// Returns a configuration error naming every required variable that is
/// missing or empty, or if the resulting configuration fails validation.
///
/// # Examples
///
/// ```no_run
/// use attack_etl::config::load_config;
///
/// let config = load_config().expect("MONGO_URI and MONGO_DB must be set");
/// println!("{}", config.store.namespace());
/// ```
pub fn load_config() -> Result<EtlConfig> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Loads configuration through an arbitrary variable lookup
///
/// Used by [`load_config`] with the process environment; tests pass a map.
pub fn load_config_from<F>(lookup: F) -> Result<EtlConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let uri = read(MONGO_URI_VAR);
    let database = read(MONGO_DB_VAR);

    let (uri, database) = match (uri, database) {
        (Some(uri), Some(database)) => (uri, database),
        (uri, database) => {
            let missing: Vec<&str> = [
                (MONGO_URI_VAR, uri.is_none()),
                (MONGO_DB_VAR, database.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, is_missing)| is_missing.then_some(name))
            .collect();

            return Err(EtlError::Configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }
    };

    let config = EtlConfig::new(secret_string(uri), database.trim());

    config.validate().map_err(|e| {
        EtlError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}
