//! TAXII 2.1 feed adapter
//!
//! Read-only client for the ATT&CK TAXII server.

pub mod client;
pub mod models;

pub use client::{TaxiiClient, TAXII_MEDIA_TYPE};
pub use models::{ApiRoot, ApiRootInfo, CollectionInfo, Discovery, Envelope};
