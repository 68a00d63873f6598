//! Hourly Heatmap Aggregation
//!
//! Groups valve readings by weekday and hour of day, averaging the remote
//! temperature sensor and counting samples per cell. The output is the wire
//! payload served by `GET /api/hourly-heatmap/`.

use chrono::{Datelike, Timelike};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::store::ValveSample;

/// Weekday labels for the heatmap rows, Monday first
pub const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Wire payload for the hourly heatmap endpoint
///
/// `values` and `counts` are `days`-by-`hours` grids. A cell with samples but
/// no readable temperature carries a count and a `null` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyHeatmap {
    pub days: Vec<String>,
    pub hours: Vec<u32>,
    pub values: Vec<Vec<Option<f64>>>,
    pub counts: Vec<Vec<u64>>,
}

/// Aggregate samples into the weekday-by-hour heatmap payload
///
/// Rows follow [`DAY_LABELS`]. Columns are the hours that actually occur in
/// the data, ascending. `counts` tallies every sample in a cell; `values`
/// averages only the samples with a present remote temperature.
pub fn hourly_heatmap(samples: &[ValveSample]) -> HourlyHeatmap {
    let hours: Vec<u32> = samples
        .iter()
        .map(|s| s.sample_time.hour())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let col_of: HashMap<u32, usize> = hours.iter().enumerate().map(|(i, &h)| (h, i)).collect();

    let mut sums = vec![vec![0.0f64; hours.len()]; DAY_LABELS.len()];
    let mut sum_counts = vec![vec![0u64; hours.len()]; DAY_LABELS.len()];
    let mut counts = vec![vec![0u64; hours.len()]; DAY_LABELS.len()];

    for sample in samples {
        let row = sample.sample_time.weekday().num_days_from_monday() as usize;
        if let Some(&col) = col_of.get(&sample.sample_time.hour()) {
            counts[row][col] += 1;
            if let Some(t1) = sample.t1_remote_k {
                sums[row][col] += t1;
                sum_counts[row][col] += 1;
            }
        }
    }

    let values = sums
        .iter()
        .zip(&sum_counts)
        .map(|(row_sums, row_counts)| {
            row_sums
                .iter()
                .zip(row_counts)
                .map(|(&sum, &n)| if n > 0 { Some(sum / n as f64) } else { None })
                .collect()
        })
        .collect();

    HourlyHeatmap {
        days: DAY_LABELS.iter().map(|d| d.to_string()).collect(),
        hours,
        values,
        counts,
    }
}
