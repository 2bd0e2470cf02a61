//! SQLite storage for the device ledger and its trash archive.

mod model;
mod repository;

pub use model::{DeviceDB, NewDeviceDB, TrashEntryDB};
pub use repository::DeviceRepository;
