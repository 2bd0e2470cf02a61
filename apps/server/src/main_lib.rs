//! Application state, configuration, and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_core::devices::{DeviceService, DeviceServiceTrait};
use stockroom_core::totals::{TotalService, TotalServiceTrait};
use stockroom_storage_sqlite::{
    create_pool, get_connection, run_migrations, DeviceRepository, TotalRepository, WriteHandle,
};

use crate::api;

pub struct AppState {
    pub device_service: Arc<dyn DeviceServiceTrait>,
    pub total_service: Arc<dyn TotalServiceTrait>,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn database_path() -> String {
    env_or("STOCKROOM_DB_PATH", "stockroom.db")
}

pub(crate) fn listen_port() -> u16 {
    env_or("STOCKROOM_PORT", "3000").parse().unwrap_or(3000)
}

pub(crate) fn assets_dir() -> String {
    env_or("STOCKROOM_ASSETS_DIR", "frontend")
}

/// Builds the service graph over a single database: a shared read pool plus
/// one serialized write handle.
pub fn build_state(database_url: &str) -> anyhow::Result<Arc<AppState>> {
    let pool = create_pool(database_url)?;
    {
        let mut conn = get_connection(&pool)?;
        run_migrations(&mut conn)?;
    }
    let writer = WriteHandle::new(database_url)?;

    let device_repository = Arc::new(DeviceRepository::new(pool.clone(), writer.clone()));
    let total_repository = Arc::new(TotalRepository::new(pool, writer));

    let total_service: Arc<dyn TotalServiceTrait> = Arc::new(TotalService::new(total_repository));
    let device_service: Arc<dyn DeviceServiceTrait> = Arc::new(DeviceService::new(
        device_repository,
        total_service.clone(),
    ));

    Ok(Arc::new(AppState {
        device_service,
        total_service,
    }))
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api::router())
        .fallback_service(ServeDir::new(assets_dir()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = database_path();
    let state = build_state(&database_url)?;
    info!("Using database at {}", database_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], listen_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on port {}", addr.port());
    axum::serve(listener, app(state)).await?;
    Ok(())
}
