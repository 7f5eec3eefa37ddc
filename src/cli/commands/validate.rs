//! Validate config command implementation
//!
//! Loads the configuration from the environment and prints it with the
//! connection string credentials redacted. Nothing is contacted.

use super::report_failure;
use crate::config::{load_config, redact_connection_string, EtlConfig};
use crate::domain::errors::{EXIT_CONFIGURATION, EXIT_SUCCESS};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!("Validating configuration");

        println!("🔍 Validating configuration");
        println!();

        let config = match load_config() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration could not be loaded");
                println!("❌ Failed to load configuration");
                return Ok(report_failure(&e));
            }
        };

        match config.validate() {
            Ok(()) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", render_config(&config));
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration validation failed");
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                Ok(EXIT_CONFIGURATION)
            }
        }
    }
}

/// Human-readable configuration listing with credentials redacted
pub fn render_config(config: &EtlConfig) -> String {
    let types: Vec<&str> = config
        .transform
        .object_types
        .iter()
        .map(|t| t.as_str())
        .collect();

    let mut out = String::from("Configuration Summary:\n");
    out.push_str(&format!(
        "  MongoDB URI: {}\n",
        redact_connection_string(config.store.uri.expose_secret().as_str())
    ));
    out.push_str(&format!("  Database: {}\n", config.store.database));
    out.push_str(&format!("  Collection: {}\n", config.store.collection));
    out.push_str(&format!(
        "  Server Selection Timeout: {}s\n",
        config.store.server_selection_timeout.as_secs()
    ));
    out.push_str(&format!("  TAXII Server: {}\n", config.feed.url));
    out.push_str(&format!(
        "  Collection Match: {}\n",
        config.feed.collection_title_match
    ));
    out.push_str(&format!(
        "  Feed Retries: {} attempts, {}s apart\n",
        config.feed.max_attempts,
        config.feed.retry_delay.as_secs()
    ));
    out.push_str(&format!("  Object Types: {}\n", types.join(", ")));
    out
}
