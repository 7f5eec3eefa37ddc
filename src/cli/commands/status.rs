//! Status command implementation
//!
//! Connects to MongoDB and prints the summary block for whatever the target
//! collection currently holds.

use super::report_failure;
use crate::adapters::database::create_document_store;
use crate::config::load_config;
use crate::core::etl::StoreSummary;
use crate::domain::errors::EXIT_SUCCESS;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!("Checking collection status");

        let config = match load_config() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration could not be loaded");
                return Ok(report_failure(&e));
            }
        };

        let store = match create_document_store(&config.store, false).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    exit_code = e.exit_code(),
                    "Failed to connect to MongoDB"
                );
                return Ok(report_failure(&e));
            }
        };

        println!("📊 Status of {}", store.namespace());
        println!();

        let result = StoreSummary::collect(store.as_ref()).await;
        store.close().await;

        match result {
            Ok(summary) => {
                if summary.total_documents == 0 {
                    println!("No documents found.");
                    println!("Run 'attack-etl run' to load the ATT&CK feed.");
                } else {
                    println!("{summary}");
                }
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not summarize collection");
                Ok(report_failure(&e))
            }
        }
    }
}
