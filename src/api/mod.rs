//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /` - Usage and configuration
//! - `GET /GET/:key` - Look up a key through the cache
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
