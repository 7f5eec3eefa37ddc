//! MongoDB adapter
//!
//! Stores normalized records in the target collection using the async
//! `mongodb` driver.

pub mod client;

pub use client::MongoStore;
