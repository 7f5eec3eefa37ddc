//! External system integrations.
//!
//! - [`taxii`] - TAXII 2.1 client for the ATT&CK feed
//! - [`database`] - Document store abstraction (trait-based) with an in-memory implementation
//! - [`mongo`] - MongoDB implementation of the document store
//!
//! # Design Pattern
//!
//! Adapters isolate third-party clients so the pipeline only sees domain types
//! and domain errors. The store layer is trait-based so runs and tests can use
//! the in-memory store in place of MongoDB.
//!
//! ```rust,no_run
//! use attack_etl::adapters::taxii::TaxiiClient;
//! use attack_etl::config::FeedConfig;
//!
//! # async fn example() -> attack_etl::domain::Result<()> {
//! let client = TaxiiClient::new(&FeedConfig::default())?;
//! let api_root = client.first_api_root().await?;
//! let collections = client.collections(&api_root).await?;
//! println!("{} collections on {}", collections.len(), api_root.title());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod mongo;
pub mod taxii;
