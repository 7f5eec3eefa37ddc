// attack-etl - MITRE ATT&CK TAXII to MongoDB ETL
// Copyright (c) 2025 attack-etl Contributors
// Licensed under the MIT License

//! # attack-etl - MITRE ATT&CK TAXII to MongoDB ETL
//!
//! attack-etl pulls STIX 2.x objects from the MITRE ATT&CK TAXII 2.1 server,
//! keeps attack patterns, intrusion sets and malware, and replaces the
//! contents of a MongoDB collection with normalized records.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (run orchestration, transformation)
//! - [`adapters`] - External integrations (TAXII, MongoDB, in-memory store)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration from the environment
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attack_etl::config::load_config;
//! use attack_etl::core::etl::run_etl;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads MONGO_URI and MONGO_DB
//!     let config = load_config()?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let summary = run_etl(config, false, shutdown_rx).await?;
//!
//!     println!("Loaded {} records", summary.load.inserted_documents);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Errors carry the
//! process exit code for their category:
//!
//! ```rust
//! use attack_etl::domain::EtlError;
//!
//! let err = EtlError::Load("no records to load".to_string());
//! assert_eq!(err.exit_code(), 1);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
