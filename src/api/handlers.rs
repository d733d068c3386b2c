//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, KeyPath, StatsResponse};
use crate::proxy::Proxy;
use crate::store::StoreClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The read-through proxy; it owns the cache and the admission gate
    pub proxy: Arc<Proxy>,
}

impl AppState {
    /// Creates a new AppState around a built proxy.
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    /// Creates a new AppState over the given store using the Config settings.
    pub fn from_config(store: Arc<dyn StoreClient>, config: &Config) -> Self {
        Self::new(Proxy::new(store, config))
    }
}

/// Handler for GET /
///
/// Returns plain-text usage and the effective configuration.
pub async fn index_handler(State(state): State<AppState>) -> String {
    let proxy = &state.proxy;
    format!(
        "redis-proxy\n\
         usage:\n\
         \tGET /GET/{{key}} - retrieves key from redis\n\
         \tGET /stats - cache statistics\n\
         \tGET /health - health check\n\
         configuration:\n\
         \tcapacity: {}\n\
         \tcache expiry: {} ms\n\
         \tmax clients: {}\n",
        proxy.capacity(),
        proxy.global_expiry().as_millis(),
        proxy.max_clients(),
    )
}

/// Handler for GET /GET/:key
///
/// Returns the raw value as text/plain. Missing keys are a 404; store
/// failures are a 500 with a generic body.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(path): Path<KeyPath>,
) -> Result<String> {
    if let Some(error_msg) = path.validate() {
        return Err(ProxyError::InvalidRequest(error_msg));
    }

    state.proxy.lookup(&path.key).await
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let proxy = &state.proxy;
    let stats = proxy.stats().await;

    Json(StatsResponse::new(
        &stats,
        proxy.capacity(),
        proxy.global_expiry().as_millis() as u64,
        proxy.max_clients(),
        proxy.available_slots(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
