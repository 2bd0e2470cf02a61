//! Core domain logic for the stockroom inventory backend.
//!
//! Holds the device ledger and derived totals models, the repository traits
//! the storage crates implement, and the services the application layers
//! call. This crate knows nothing about SQL or HTTP.

pub mod devices;
pub mod errors;
pub mod totals;

pub use errors::{Error, Result};
