//! REST API routes.

mod devices;
mod totals;

use std::sync::Arc;

use axum::Router;

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(devices::router())
        .merge(totals::router())
}
