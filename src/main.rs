// attack-etl - MITRE ATT&CK TAXII to MongoDB ETL
// Copyright (c) 2025 attack-etl Contributors
// Licensed under the MIT License

use attack_etl::cli::{Cli, Commands};
use attack_etl::config::LoggingConfig;
use attack_etl::domain::errors::{EXIT_CONFIGURATION, EXIT_FATAL};
use attack_etl::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Optional; a missing .env file is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging_config = match &cli.log_dir {
        Some(dir) => LoggingConfig::with_directory(dir.to_string_lossy()),
        None => LoggingConfig::default(),
    };
    let log_guard = match init_logging(&cli.log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIGURATION);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "attack-etl - MITRE ATT&CK TAXII to MongoDB ETL"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::warn!("Received SIGINT (Ctrl+C), shutting down");
                        let _ = shutdown_tx.send(true);
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Received SIGINT (Ctrl+C), shutting down");
                    let _ = shutdown_tx.send(true);
                }
                _ = sigterm.recv() => {
                    tracing::warn!("Received SIGTERM, shutting down");
                    let _ = shutdown_tx.send(true);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::warn!("Received SIGINT (Ctrl+C), shutting down");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors
    drop(log_guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match cli.command_or_default() {
        Commands::Run(args) => args.execute(shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute().await,
        Commands::Status(args) => args.execute().await,
    }
}
