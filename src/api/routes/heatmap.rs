//! Heatmap Routes
//!
//! The aggregation endpoint backing the dashboard heatmap.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::heatmap::{hourly_heatmap, HourlyHeatmap};

/// GET /api/hourly-heatmap/
///
/// Average remote temperature and sample count per weekday and hour.
/// Takes no parameters; an empty store yields seven rows of zero columns.
pub async fn hourly(State(state): State<Arc<AppState>>) -> ApiResult<Json<HourlyHeatmap>> {
    let samples = state.store.snapshot().await;
    let heatmap = hourly_heatmap(&samples);

    tracing::debug!(
        samples = samples.len(),
        hours = heatmap.hours.len(),
        "Served hourly heatmap"
    );

    Ok(Json(heatmap))
}
