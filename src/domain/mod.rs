//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Feed object views** ([`StixObject`], [`ObjectType`])
//! - **Persisted records** ([`AttackRecord`])
//! - **Error types** ([`EtlError`], [`StoreError`], [`FeedError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EtlError>`]. Each error kind maps
//! to a process exit code via [`EtlError::exit_code`]:
//!
//! ```rust
//! use attack_etl::domain::{EtlError, StoreError};
//!
//! let err: EtlError = StoreError::ConnectionFailed("refused".to_string()).into();
//! assert_eq!(err.exit_code(), 4);
//! ```

pub mod errors;
pub mod record;
pub mod result;
pub mod stix;

pub use errors::{EtlError, FeedError, StoreError};
pub use record::{AttackRecord, RECORD_SOURCE};
pub use result::Result;
pub use stix::{ObjectType, StixObject};
