use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result};
use crate::totals::TotalServiceTrait;

use super::{Device, DeviceFilter, DeviceRepositoryTrait, NewDevice};

/// Operations exposed over the device ledger. Mutations re-derive the totals
/// row for the affected (name, model) pair before reporting success.
#[async_trait]
pub trait DeviceServiceTrait: Send + Sync {
    fn list_devices(&self) -> Result<Vec<Device>>;

    fn search_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>>;

    async fn create_device(&self, new_device: NewDevice) -> Result<Device>;

    async fn delete_device(&self, device_id: i32) -> Result<()>;
}

pub struct DeviceService {
    device_repository: Arc<dyn DeviceRepositoryTrait>,
    total_service: Arc<dyn TotalServiceTrait>,
}

impl DeviceService {
    pub fn new(
        device_repository: Arc<dyn DeviceRepositoryTrait>,
        total_service: Arc<dyn TotalServiceTrait>,
    ) -> Self {
        Self {
            device_repository,
            total_service,
        }
    }
}

#[async_trait]
impl DeviceServiceTrait for DeviceService {
    fn list_devices(&self) -> Result<Vec<Device>> {
        self.device_repository.load_devices()
    }

    fn search_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>> {
        self.device_repository.search_devices(filter)
    }

    async fn create_device(&self, new_device: NewDevice) -> Result<Device> {
        let device = self.device_repository.insert_device(new_device).await?;
        debug!(
            "Inserted device {} ({} {})",
            device.id, device.name, device.model
        );
        // The insert is only confirmed to the caller once the totals row has
        // been re-derived; the ledger row may already be committed when the
        // recalculation fails.
        self.total_service
            .recalculate_for(&device.name, &device.model)
            .await?;
        Ok(device)
    }

    async fn delete_device(&self, device_id: i32) -> Result<()> {
        let device = self
            .device_repository
            .find_device(device_id)?
            .ok_or_else(|| Error::not_found(format!("Device {} not found", device_id)))?;
        self.device_repository.archive_device(&device).await?;
        debug!(
            "Archived device {} ({} {})",
            device.id, device.name, device.model
        );
        self.total_service
            .recalculate_for(&device.name, &device.model)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DatabaseError;
    use crate::totals::{Total, TotalServiceTrait};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeDeviceRepository {
        devices: Mutex<Vec<Device>>,
        archived: Mutex<Vec<Device>>,
    }

    impl FakeDeviceRepository {
        fn with_devices(devices: Vec<Device>) -> Self {
            Self {
                devices: Mutex::new(devices),
                archived: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DeviceRepositoryTrait for FakeDeviceRepository {
        fn load_devices(&self) -> Result<Vec<Device>> {
            Ok(self.devices.lock().unwrap().clone())
        }

        fn search_devices(&self, _filter: &DeviceFilter) -> Result<Vec<Device>> {
            self.load_devices()
        }

        fn find_device(&self, device_id: i32) -> Result<Option<Device>> {
            Ok(self
                .devices
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id == device_id)
                .cloned())
        }

        async fn insert_device(&self, new_device: NewDevice) -> Result<Device> {
            let mut devices = self.devices.lock().unwrap();
            let device = Device {
                id: devices.len() as i32 + 1,
                owner: new_device.owner,
                date: new_device.date,
                name: new_device.name,
                model: new_device.model,
                count: new_device.count,
                project: new_device.project,
                location: new_device.location,
            };
            devices.push(device.clone());
            Ok(device)
        }

        async fn archive_device(&self, device: &Device) -> Result<()> {
            let mut devices = self.devices.lock().unwrap();
            devices.retain(|d| d.id != device.id);
            self.archived.lock().unwrap().push(device.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeTotalService {
        recalculated: Mutex<Vec<(String, String)>>,
        fail_recalculation: bool,
    }

    #[async_trait]
    impl TotalServiceTrait for FakeTotalService {
        fn get_totals(&self) -> Result<Vec<Total>> {
            Ok(Vec::new())
        }

        async fn recalculate_for(&self, name: &str, model: &str) -> Result<()> {
            if self.fail_recalculation {
                return Err(DatabaseError::QueryFailed("totals unavailable".into()).into());
            }
            self.recalculated
                .lock()
                .unwrap()
                .push((name.to_string(), model.to_string()));
            Ok(())
        }

        async fn recalculate_all(&self) -> Result<()> {
            Ok(())
        }
    }

    fn new_router(count: i32, location: &str) -> NewDevice {
        NewDevice {
            owner: "alice".to_string(),
            date: "2024-05-01".to_string(),
            name: "Router".to_string(),
            model: "X1".to_string(),
            count,
            project: "rollout".to_string(),
            location: location.to_string(),
        }
    }

    fn existing_device(id: i32) -> Device {
        Device {
            id,
            owner: "bob".to_string(),
            date: "2024-05-02".to_string(),
            name: "Switch".to_string(),
            model: "S9".to_string(),
            count: 4,
            project: "lab".to_string(),
            location: "GDL".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_recalculates_pair() {
        let repository = Arc::new(FakeDeviceRepository::default());
        let totals = Arc::new(FakeTotalService::default());
        let service = DeviceService::new(repository.clone(), totals.clone());

        let device = service.create_device(new_router(5, "HuYao")).await.unwrap();

        assert_eq!(device.id, 1);
        assert_eq!(
            totals.recalculated.lock().unwrap().as_slice(),
            &[("Router".to_string(), "X1".to_string())]
        );
    }

    #[tokio::test]
    async fn create_reports_failure_when_recalculation_fails() {
        let repository = Arc::new(FakeDeviceRepository::default());
        let totals = Arc::new(FakeTotalService {
            fail_recalculation: true,
            ..Default::default()
        });
        let service = DeviceService::new(repository.clone(), totals);

        let result = service.create_device(new_router(5, "HuYao")).await;

        assert!(matches!(result, Err(Error::Database(_))));
        // The ledger row was already committed when the recalculation failed.
        assert_eq!(repository.devices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_archives_then_recalculates() {
        let repository = Arc::new(FakeDeviceRepository::with_devices(vec![existing_device(7)]));
        let totals = Arc::new(FakeTotalService::default());
        let service = DeviceService::new(repository.clone(), totals.clone());

        service.delete_device(7).await.unwrap();

        assert!(repository.devices.lock().unwrap().is_empty());
        assert_eq!(repository.archived.lock().unwrap().len(), 1);
        assert_eq!(
            totals.recalculated.lock().unwrap().as_slice(),
            &[("Switch".to_string(), "S9".to_string())]
        );
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let repository = Arc::new(FakeDeviceRepository::default());
        let totals = Arc::new(FakeTotalService::default());
        let service = DeviceService::new(repository, totals.clone());

        let result = service.delete_device(42).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(totals.recalculated.lock().unwrap().is_empty());
    }
}
