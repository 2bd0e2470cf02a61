//! Device ledger endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tracing::info;

use stockroom_core::devices::{Device, DeviceFilter, NewDevice};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn list_devices(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Device>>> {
    let devices = state
        .device_service
        .list_devices()
        .map_err(ApiError::from)?;
    Ok(Json(devices))
}

async fn create_device(
    State(state): State<Arc<AppState>>,
    Json(new_device): Json<NewDevice>,
) -> ApiResult<Json<Device>> {
    let device = state
        .device_service
        .create_device(new_device)
        .await
        .map_err(ApiError::from)?;
    info!(
        "Added device {} ({} {})",
        device.id, device.name, device.model
    );
    Ok(Json(device))
}

async fn delete_device(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .device_service
        .delete_device(device_id)
        .await
        .map_err(ApiError::from)?;
    info!("Deleted device {}", device_id);
    Ok(StatusCode::OK)
}

async fn search_devices(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DeviceFilter>,
) -> ApiResult<Json<Vec<Device>>> {
    let devices = state
        .device_service
        .search_devices(&filter)
        .map_err(ApiError::from)?;
    Ok(Json(devices))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/devices", get(list_devices))
        .route("/devices", post(create_device))
        .route("/devices/{id}", delete(delete_device))
        .route("/search", get(search_devices))
}
