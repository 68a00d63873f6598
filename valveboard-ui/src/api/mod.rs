//! API Layer
//!
//! HTTP client for the Valveboard REST API.

pub mod client;

pub use client::{get_api_base, ApiClient, FetchError};
