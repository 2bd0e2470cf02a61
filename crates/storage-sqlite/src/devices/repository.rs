use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use stockroom_core::devices::{Device, DeviceFilter, DeviceRepositoryTrait, NewDevice};
use stockroom_core::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{devices, trash};

use super::model::{DeviceDB, NewDeviceDB, TrashEntryDB};

pub struct DeviceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DeviceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DeviceRepository { pool, writer }
    }

    pub fn load_devices_impl(&self) -> Result<Vec<Device>> {
        let mut conn = get_connection(&self.pool)?;
        load_devices_stmt(&mut conn)
    }

    pub fn search_devices_impl(&self, filter: &DeviceFilter) -> Result<Vec<Device>> {
        let mut conn = get_connection(&self.pool)?;
        search_devices_stmt(&mut conn, filter)
    }

    pub fn find_device_impl(&self, device_id: i32) -> Result<Option<Device>> {
        let mut conn = get_connection(&self.pool)?;
        find_device_stmt(&mut conn, device_id)
    }
}

fn load_devices_stmt(conn: &mut SqliteConnection) -> Result<Vec<Device>> {
    let rows = devices::table
        .load::<DeviceDB>(conn)
        .map_err(StorageError::from)?;
    Ok(rows.into_iter().map(Device::from).collect())
}

fn find_device_stmt(conn: &mut SqliteConnection, device_id: i32) -> Result<Option<Device>> {
    let row = devices::table
        .find(device_id)
        .first::<DeviceDB>(conn)
        .optional()
        .map_err(StorageError::from)?;
    Ok(row.map(Device::from))
}

fn search_devices_stmt(conn: &mut SqliteConnection, filter: &DeviceFilter) -> Result<Vec<Device>> {
    let mut query = devices::table.into_boxed();
    if let Some(owner) = &filter.owner {
        query = query.filter(devices::owner.like(format!("%{}%", owner)));
    }
    // Dates match exactly; everything else is a substring match.
    if let Some(date) = &filter.date {
        query = query.filter(devices::date.eq(date.clone()));
    }
    if let Some(name) = &filter.name {
        query = query.filter(devices::name.like(format!("%{}%", name)));
    }
    if let Some(model) = &filter.model {
        query = query.filter(devices::model.like(format!("%{}%", model)));
    }
    if let Some(project) = &filter.project {
        query = query.filter(devices::project.like(format!("%{}%", project)));
    }
    if let Some(location) = &filter.location {
        query = query.filter(devices::location.like(format!("%{}%", location)));
    }
    let rows = query
        .load::<DeviceDB>(conn)
        .map_err(StorageError::from)?;
    Ok(rows.into_iter().map(Device::from).collect())
}

fn insert_device_stmt(conn: &mut SqliteConnection, new_device: NewDevice) -> Result<Device> {
    let row = diesel::insert_into(devices::table)
        .values(NewDeviceDB::from(new_device))
        .returning(DeviceDB::as_returning())
        .get_result::<DeviceDB>(conn)
        .map_err(StorageError::from)?;
    Ok(Device::from(row))
}

fn archive_device_stmt(conn: &mut SqliteConnection, device: &Device) -> Result<()> {
    // Two sequential statements, no transaction: the archive row stays in
    // place even if the delete fails.
    diesel::insert_into(trash::table)
        .values(TrashEntryDB::from(device))
        .execute(conn)
        .map_err(StorageError::from)?;
    diesel::delete(devices::table.find(device.id))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl DeviceRepositoryTrait for DeviceRepository {
    fn load_devices(&self) -> Result<Vec<Device>> {
        self.load_devices_impl()
    }

    fn search_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>> {
        self.search_devices_impl(filter)
    }

    fn find_device(&self, device_id: i32) -> Result<Option<Device>> {
        self.find_device_impl(device_id)
    }

    async fn insert_device(&self, new_device: NewDevice) -> Result<Device> {
        self.writer
            .exec(move |conn| insert_device_stmt(conn, new_device))
            .await
    }

    async fn archive_device(&self, device: &Device) -> Result<()> {
        let device = device.clone();
        self.writer
            .exec(move |conn| archive_device_stmt(conn, &device))
            .await
    }
}
