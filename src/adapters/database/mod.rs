//! Document store abstraction layer
//!
//! This module provides a trait-based abstraction for the target collection,
//! allowing the pipeline to run against MongoDB or an in-memory store.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_document_store;
pub use memory::InMemoryStore;
pub use traits::{DocumentStore, InsertResult, TypeCount};
