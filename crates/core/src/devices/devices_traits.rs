use async_trait::async_trait;

use crate::errors::Result;

use super::{Device, DeviceFilter, NewDevice};

/// Persistence operations for the device ledger.
#[async_trait]
pub trait DeviceRepositoryTrait: Send + Sync {
    fn load_devices(&self) -> Result<Vec<Device>>;

    fn search_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>>;

    fn find_device(&self, device_id: i32) -> Result<Option<Device>>;

    /// Inserts a new ledger row and returns it with the generated id.
    async fn insert_device(&self, new_device: NewDevice) -> Result<Device>;

    /// Copies the row into the trash archive, then removes it from the
    /// ledger. The two statements run sequentially without a transaction, so
    /// the archive row survives a failed delete.
    async fn archive_device(&self, device: &Device) -> Result<()>;
}
