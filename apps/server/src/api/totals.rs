//! Derived totals endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use stockroom_core::totals::Total;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn get_totals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Total>>> {
    let totals = state.total_service.get_totals().map_err(ApiError::from)?;
    Ok(Json(totals))
}

async fn update_totals(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state
        .total_service
        .recalculate_all()
        .await
        .map_err(ApiError::from)?;
    info!("Recalculated all totals");
    Ok("Total updated successfully")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/updateTotal", post(update_totals))
        .route("/totals", get(get_totals))
}
