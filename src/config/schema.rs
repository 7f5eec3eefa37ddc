//! Configuration schema types
//!
//! Only the store connection settings come from the environment. Everything
//! else is fixed for the ATT&CK feed and lives in the constants below; the
//! structs exist so each stage receives its settings explicitly.

use crate::config::SecretString;
use crate::domain::{ObjectType, RECORD_SOURCE};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Environment variable holding the document store connection string
pub const MONGO_URI_VAR: &str = "MONGO_URI";

/// Environment variable holding the target database name
pub const MONGO_DB_VAR: &str = "MONGO_DB";

/// TAXII discovery endpoint of the MITRE ATT&CK feed
pub const FEED_URL: &str = "https://cti-taxii.mitre.org/taxii/";

/// Collection within the target database that receives the records
pub const TARGET_COLLECTION: &str = "mitre_attack_raw";

/// Substring identifying the feed collection to ingest
pub const COLLECTION_TITLE_MATCH: &str = "Enterprise ATT&CK";

/// Number of feed connection attempts before giving up
pub const FEED_MAX_ATTEMPTS: usize = 3;

/// Fixed delay between feed connection attempts
pub const FEED_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Timeout for individual feed HTTP requests
pub const FEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Server selection timeout for the store probe
pub const STORE_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Main ETL configuration
#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// Document store settings
    pub store: StoreConfig,

    /// Intelligence feed settings
    pub feed: FeedConfig,

    /// Transformation settings
    pub transform: TransformConfig,
}

impl EtlConfig {
    /// Build a configuration from the two required settings and fixed defaults
    pub fn new(uri: SecretString, database: impl Into<String>) -> Self {
        Self {
            store: StoreConfig::new(uri, database),
            feed: FeedConfig::default(),
            transform: TransformConfig::default(),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()?;
        self.feed.validate()?;
        self.transform.validate()?;
        Ok(())
    }
}

/// Document store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection string (may embed credentials)
    pub uri: SecretString,

    /// Database name
    pub database: String,

    /// Target collection name
    pub collection: String,

    /// How long the driver may wait to find a usable server
    pub server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Store settings for the fixed target collection
    pub fn new(uri: SecretString, database: impl Into<String>) -> Self {
        Self {
            uri,
            database: database.into(),
            collection: TARGET_COLLECTION.to_string(),
            server_selection_timeout: STORE_SERVER_SELECTION_TIMEOUT,
        }
    }

    /// `database.collection` for log output
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    fn validate(&self) -> Result<(), String> {
        if self.uri.expose_secret().is_empty() {
            return Err(format!("{MONGO_URI_VAR} cannot be empty"));
        }
        if self.database.trim().is_empty() {
            return Err(format!("{MONGO_DB_VAR} cannot be empty"));
        }
        if self.collection.trim().is_empty() {
            return Err("target collection name cannot be empty".to_string());
        }
        if self.server_selection_timeout.is_zero() {
            return Err("server selection timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// TAXII feed configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Discovery URL of the TAXII server
    pub url: String,

    /// Substring the target collection title must contain
    pub collection_title_match: String,

    /// Maximum number of connection attempts
    pub max_attempts: usize,

    /// Delay between connection attempts
    pub retry_delay: Duration,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: FEED_URL.to_string(),
            collection_title_match: COLLECTION_TITLE_MATCH.to_string(),
            max_attempts: FEED_MAX_ATTEMPTS,
            retry_delay: FEED_RETRY_DELAY,
            request_timeout: FEED_REQUEST_TIMEOUT,
        }
    }
}

impl FeedConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.url).map_err(|e| format!("Invalid feed URL '{}': {e}", self.url))?;
        if self.collection_title_match.is_empty() {
            return Err("collection title match cannot be empty".to_string());
        }
        if self.max_attempts == 0 {
            return Err("feed max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Transformation configuration
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// STIX types that are kept; everything else is dropped
    pub object_types: Vec<ObjectType>,

    /// Provenance tag written into every record
    pub source: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            object_types: ObjectType::ALL.to_vec(),
            source: RECORD_SOURCE.to_string(),
        }
    }
}

impl TransformConfig {
    fn validate(&self) -> Result<(), String> {
        if self.object_types.is_empty() {
            return Err("at least one object type must be retained".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Write JSON log files in addition to console output
    pub local_enabled: bool,

    /// Directory for log files
    pub local_path: String,

    /// File rotation (daily, hourly, never)
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}

impl LoggingConfig {
    /// File logging into `path` with daily rotation
    pub fn with_directory(path: impl Into<String>) -> Self {
        Self {
            local_enabled: true,
            local_path: path.into(),
            ..Default::default()
        }
    }

    /// Validates the logging configuration
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_defaults_use_fixed_constants() {
        let config = EtlConfig::new(secret_string("mongodb://localhost:27017"), "threat_intel");

        assert_eq!(config.store.collection, "mitre_attack_raw");
        assert_eq!(config.store.server_selection_timeout, Duration::from_secs(5));
        assert_eq!(config.feed.url, "https://cti-taxii.mitre.org/taxii/");
        assert_eq!(config.feed.collection_title_match, "Enterprise ATT&CK");
        assert_eq!(config.feed.max_attempts, 3);
        assert_eq!(config.feed.retry_delay, Duration::from_secs(5));
        assert_eq!(config.transform.object_types, ObjectType::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_namespace() {
        let config = StoreConfig::new(secret_string("mongodb://localhost"), "intel");
        assert_eq!(config.namespace(), "intel.mitre_attack_raw");
    }

    #[test]
    fn test_validate_rejects_empty_database() {
        let config = EtlConfig::new(secret_string("mongodb://localhost"), "  ");
        let err = config.validate().unwrap_err();
        assert!(err.contains("MONGO_DB"));
    }

    #[test]
    fn test_validate_rejects_bad_feed_url() {
        let mut config = EtlConfig::new(secret_string("mongodb://localhost"), "intel");
        config.feed.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = EtlConfig::new(secret_string("mongodb://localhost"), "intel");
        config.feed.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        assert!(LoggingConfig::default().validate().is_ok());
        assert!(LoggingConfig::with_directory("/tmp/attack-etl").validate().is_ok());

        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
