//! Valveboard API Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see [`Config::load_default`])
//! with environment overrides:
//! - `VALVEBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `VALVEBOARD_PORT`: Port to listen on (default: 8000)
//! - `VALVEBOARD_CSV`: CSV file with valve readings to load at startup
//! - `VALVEBOARD_LOG_LEVEL`: Log level when `RUST_LOG` is unset (default: info)
//! - `VALVEBOARD_LOG_FORMAT`: Log format, pretty or json (default: pretty)

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valveboard::api::{serve, AppState};
use valveboard::config::Config;
use valveboard::import::CsvImporter;
use valveboard::store::SampleStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!(
        "Starting Valveboard API server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = Arc::new(SampleStore::new());

    match &config.data.csv_path {
        Some(path) if path.exists() => {
            let importer =
                CsvImporter::new().with_default_device(&config.data.default_device_id);
            let summary = importer
                .import_path(path)
                .with_context(|| format!("importing {}", path.display()))?;

            for error in &summary.errors {
                tracing::warn!("{}", error);
            }
            tracing::info!(
                rows_read = summary.rows_read,
                imported = summary.rows_imported,
                skipped = summary.rows_skipped,
                duplicates = summary.duplicates_dropped,
                "CSV import finished"
            );

            store.insert_batch(summary.samples).await;
        }
        Some(path) => {
            tracing::warn!("CSV file {:?} not found, serving an empty heatmap", path);
        }
        None => {
            tracing::info!("No CSV configured, serving an empty heatmap");
        }
    }

    let api_config = config.api.clone();
    let state = AppState::new(store, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Valveboard API server stopped");
    Ok(())
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to this
/// crate and tower-http request traces.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "valveboard={},tower_http=info",
            config.logging.level
        ))
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
