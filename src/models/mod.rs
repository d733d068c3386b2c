//! Request and Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! extracting request parameters and serializing response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{KeyPath, MAX_KEY_LENGTH};
pub use responses::{HealthResponse, StatsResponse};
