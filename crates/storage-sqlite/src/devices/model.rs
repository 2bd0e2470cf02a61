use diesel::prelude::*;

use stockroom_core::devices::{Device, NewDevice};

use crate::schema::{devices, trash};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeviceDB {
    pub id: i32,
    pub owner: String,
    pub date: String,
    pub name: String,
    pub model: String,
    pub count: i32,
    pub project: String,
    pub location: String,
}

impl From<DeviceDB> for Device {
    fn from(db: DeviceDB) -> Self {
        Device {
            id: db.id,
            owner: db.owner,
            date: db.date,
            name: db.name,
            model: db.model,
            count: db.count,
            project: db.project,
            location: db.location,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = devices)]
pub struct NewDeviceDB {
    pub owner: String,
    pub date: String,
    pub name: String,
    pub model: String,
    pub count: i32,
    pub project: String,
    pub location: String,
}

impl From<NewDevice> for NewDeviceDB {
    fn from(new_device: NewDevice) -> Self {
        NewDeviceDB {
            owner: new_device.owner,
            date: new_device.date,
            name: new_device.name,
            model: new_device.model,
            count: new_device.count,
            project: new_device.project,
            location: new_device.location,
        }
    }
}

/// Archive copy of a deleted ledger row. Written on every delete, never read
/// back.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trash)]
pub struct TrashEntryDB {
    pub owner: String,
    pub date: String,
    pub name: String,
    pub model: String,
    pub count: i32,
    pub project: String,
    pub location: String,
}

impl From<&Device> for TrashEntryDB {
    fn from(device: &Device) -> Self {
        TrashEntryDB {
            owner: device.owner.clone(),
            date: device.date.clone(),
            name: device.name.clone(),
            model: device.model.clone(),
            count: device.count,
            project: device.project.clone(),
            location: device.location.clone(),
        }
    }
}
