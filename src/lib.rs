//! # Valveboard
//!
//! Heat-meter telemetry backend. Loads valve readings from CSV exports,
//! aggregates them into an hourly temperature heatmap, and serves the result
//! over a REST API consumed by the WASM dashboard.
//!
//! ## Modules
//!
//! - [`store`]: In-memory sample store
//! - [`heatmap`]: Weekday-by-hour aggregation
//! - [`import`]: CSV import with flexible header mapping
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use valveboard::api::{serve, AppState};
//! use valveboard::config::Config;
//! use valveboard::import::CsvImporter;
//! use valveboard::store::SampleStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store = Arc::new(SampleStore::new());
//!
//!     // Load readings exported from the meter cloud
//!     let summary = CsvImporter::new().import_path("readings.csv".as_ref())?;
//!     store.insert_batch(summary.samples).await;
//!
//!     let state = AppState::new(store, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod heatmap;
pub mod import;
pub mod store;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DataConfig, LoggingConfig};

pub use heatmap::{hourly_heatmap, HourlyHeatmap, DAY_LABELS};

pub use import::{CsvImporter, ImportError, ImportSummary};

pub use store::{SampleStore, ValveSample};
