//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Body sent for any failure the caller should not see the detail of.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Service Error";

// == Proxy Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The backing store confirmed the key does not exist
    #[error("Requested key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backing store could not answer
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Startup configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal proxy error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ProxyError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProxyError::Store(_) | ProxyError::InvalidConfig(_) | ProxyError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
