//! Derived totals domain models and services.

mod totals_model;
mod totals_service;
mod totals_traits;

pub use totals_model::*;
pub use totals_service::*;
pub use totals_traits::*;
