//! Sample Store
//!
//! In-memory store for heat-meter valve readings. Samples are loaded once at
//! startup and shared read-mostly across API handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A single heat-meter reading
///
/// Every measurement is optional: meters report partial rows when a sensor
/// drops out, and the importer maps unreadable values to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValveSample {
    /// Meter that produced the reading
    pub device_id: String,
    /// When the meter sampled, UTC
    pub sample_time: DateTime<Utc>,
    /// Remote supply temperature sensor (Kelvin)
    pub t1_remote_k: Option<f64>,
    /// Embedded return temperature sensor (Kelvin)
    pub t2_embedded_k: Option<f64>,
    /// Differential between the two sensors (Kelvin)
    pub delta_t_k: Option<f64>,
    /// Cumulative flow volume (cubic meters)
    pub flow_volume_total_m3: Option<f64>,
    /// Meter operating hours counter
    pub operating_hours: Option<f64>,
}

impl ValveSample {
    /// Create a sample with a timestamp and no measurements
    pub fn new(device_id: impl Into<String>, sample_time: DateTime<Utc>) -> Self {
        Self {
            device_id: device_id.into(),
            sample_time,
            t1_remote_k: None,
            t2_embedded_k: None,
            delta_t_k: None,
            flow_volume_total_m3: None,
            operating_hours: None,
        }
    }

    /// Set the remote temperature reading
    pub fn t1_remote_k(mut self, value: f64) -> Self {
        self.t1_remote_k = Some(value);
        self
    }

    /// Set the embedded temperature reading
    pub fn t2_embedded_k(mut self, value: f64) -> Self {
        self.t2_embedded_k = Some(value);
        self
    }

    /// Set the temperature differential
    pub fn delta_t_k(mut self, value: f64) -> Self {
        self.delta_t_k = Some(value);
        self
    }

    /// Set the cumulative flow volume
    pub fn flow_volume_total_m3(mut self, value: f64) -> Self {
        self.flow_volume_total_m3 = Some(value);
        self
    }

    /// Set the operating hours counter
    pub fn operating_hours(mut self, value: f64) -> Self {
        self.operating_hours = Some(value);
        self
    }
}

/// Shared in-memory sample collection
#[derive(Debug, Default)]
pub struct SampleStore {
    samples: RwLock<Vec<ValveSample>>,
}

impl SampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
        }
    }

    /// Append a batch of samples, returning the new total
    pub async fn insert_batch(&self, batch: Vec<ValveSample>) -> usize {
        let mut samples = self.samples.write().await;
        samples.extend(batch);
        samples.len()
    }

    /// Number of stored samples
    pub async fn len(&self) -> usize {
        self.samples.read().await.len()
    }

    /// Whether the store holds no samples
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clone out the current samples for aggregation
    pub async fn snapshot(&self) -> Vec<ValveSample> {
        self.samples.read().await.clone()
    }
}
