//! SQLite storage implementation for the stockroom backend: the device
//! ledger, its trash archive, and the derived totals table.

pub mod db;
pub mod devices;
pub mod errors;
pub mod schema;
pub mod totals;

// Re-export for convenience
pub use db::{create_pool, get_connection, run_migrations, DbPool, WriteHandle};
pub use devices::DeviceRepository;
pub use errors::StorageError;
pub use totals::TotalRepository;
