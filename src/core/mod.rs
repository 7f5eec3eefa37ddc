//! Core business logic.
//!
//! # Modules
//!
//! - [`etl`] - Run orchestration: feed connection with retry, collection lookup, load, summary
//! - [`transform`] - Projection of feed objects into normalized records
//!
//! # Workflow
//!
//! 1. **Connect store**: probe MongoDB (or create the in-memory store for a dry run)
//! 2. **Connect feed**: TAXII discovery, first API root, up to three attempts
//! 3. **Locate collection**: first collection whose title contains `Enterprise ATT&CK`
//! 4. **Fetch and transform**: one page of objects, allowlisted types only
//! 5. **Load**: delete existing documents, bulk insert
//! 6. **Report**: print the store summary
//!
//! # Example
//!
//! ```rust,no_run
//! use attack_etl::config::load_config;
//! use attack_etl::core::etl::run_etl;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let summary = run_etl(config, false, shutdown_rx).await?;
//! println!("Inserted: {}", summary.load.inserted_documents);
//! # Ok(())
//! # }
//! ```

pub mod etl;
pub mod transform;
