//! Data Transfer Objects
//!
//! Response types for the API endpoints.
//! These types are serialized to JSON.

use serde::Serialize;

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Number of samples held in memory
    pub sample_count: usize,
    /// Crate version
    pub version: String,
}
