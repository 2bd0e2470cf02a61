//! Device ledger domain models and services.

mod devices_model;
mod devices_service;
mod devices_traits;

pub use devices_model::*;
pub use devices_service::*;
pub use devices_traits::*;
