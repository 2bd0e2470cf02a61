//! SQLite storage for the derived totals table.

mod model;
mod repository;

pub use model::TotalDB;
pub use repository::TotalRepository;
