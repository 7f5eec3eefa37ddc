//! Run command implementation
//!
//! Executes the ETL pipeline once and maps the outcome to an exit code.

use super::report_failure;
use crate::config::load_config;
use crate::core::etl::run_etl;
use crate::domain::errors::EXIT_SUCCESS;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Load into an in-memory store instead of MongoDB
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
        println!("MITRE ATT&CK ETL Connector Started");
        println!("{}", "=".repeat(50));

        if self.dry_run {
            println!("🧪 Dry run: MongoDB will not be contacted");
        }

        let config = match load_config() {
            Ok(config) => {
                tracing::info!(
                    namespace = %config.store.namespace(),
                    "Environment variables loaded successfully"
                );
                config
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    exit_code = e.exit_code(),
                    "Configuration could not be loaded"
                );
                return Ok(report_failure(&e));
            }
        };

        match run_etl(config, self.dry_run, shutdown_signal).await {
            Ok(summary) => {
                println!();
                println!(
                    "✅ ETL pipeline completed in {:.2} seconds ({} records loaded)",
                    summary.duration.as_secs_f64(),
                    summary.load.inserted_documents
                );
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, exit_code = e.exit_code(), "ETL pipeline failed");
                Ok(report_failure(&e))
            }
        }
    }
}
