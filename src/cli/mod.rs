//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap. Running the
//! binary without a subcommand is the same as `attack-etl run`.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// attack-etl - MITRE ATT&CK TAXII to MongoDB ETL
#[derive(Parser, Debug)]
#[command(name = "attack-etl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "ATTACK_ETL_LOG_LEVEL", global = true)]
    pub log_level: String,

    /// Directory for JSON log files (file logging is off when unset)
    #[arg(long, env = "ATTACK_ETL_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The requested command, defaulting to a normal run
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Run(commands::run::RunArgs::default()))
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pull ATT&CK objects from the TAXII feed and replace the MongoDB collection
    Run(commands::run::RunArgs),

    /// Load and print the configuration without connecting anywhere
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show a summary of the documents currently stored
    Status(commands::status::StatusArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand_defaults_to_run() {
        let cli = Cli::parse_from(["attack-etl"]);
        assert!(cli.command.is_none());
        match cli.command_or_default() {
            Commands::Run(args) => assert!(!args.dry_run),
            other => panic!("Expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_run_dry_run() {
        let cli = Cli::parse_from(["attack-etl", "run", "--dry-run"]);
        assert!(matches!(cli.command_or_default(), Commands::Run(args) if args.dry_run));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["attack-etl", "--log-level", "debug", "run"]);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_cli_parse_log_dir_after_subcommand() {
        let cli = Cli::parse_from(["attack-etl", "status", "--log-dir", "/var/log/attack-etl"]);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/var/log/attack-etl")));
        assert!(matches!(cli.command_or_default(), Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["attack-etl", "validate-config"]);
        assert!(matches!(cli.command_or_default(), Commands::ValidateConfig(_)));
    }
}
