//! Heatmap Wire Payload
//!
//! The JSON shape served by `GET /api/hourly-heatmap/`: day and hour axes
//! plus a values grid and a counts grid. Cells with no readable temperature
//! arrive as `null` and decode to `None`.

use serde::Deserialize;

/// Payload for the hourly heatmap endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HeatmapPayload {
    /// Day labels, one per row
    pub days: Vec<String>,
    /// Hours of day, one per column
    pub hours: Vec<u32>,
    /// Average temperature per cell; `None` where no reading exists
    pub values: Vec<Vec<Option<f64>>>,
    /// Samples per cell; can be positive even when the value is absent
    pub counts: Vec<Vec<u64>>,
}

/// Shape violation in a decoded payload
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("{grid} grid has {actual} rows, expected {expected}")]
    RowCount {
        grid: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{grid} grid row {row} has {actual} columns, expected {expected}")]
    ColumnCount {
        grid: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl HeatmapPayload {
    /// Check that both grids are `days x hours`
    ///
    /// A payload that fails here is reported as malformed rather than being
    /// indexed into.
    pub fn validate(&self) -> Result<(), PayloadError> {
        check_grid("values", &self.values, self.days.len(), self.hours.len())?;
        check_grid("counts", &self.counts, self.days.len(), self.hours.len())?;
        Ok(())
    }
}

fn check_grid<T>(
    grid: &'static str,
    rows: &[Vec<T>],
    expected_rows: usize,
    expected_cols: usize,
) -> Result<(), PayloadError> {
    if rows.len() != expected_rows {
        return Err(PayloadError::RowCount {
            grid,
            expected: expected_rows,
            actual: rows.len(),
        });
    }

    for (row, cols) in rows.iter().enumerate() {
        if cols.len() != expected_cols {
            return Err(PayloadError::ColumnCount {
                grid,
                row,
                expected: expected_cols,
                actual: cols.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_nulls_to_none() {
        let json = r#"{
            "days": ["Monday"],
            "hours": [0, 1],
            "values": [[350.0, null]],
            "counts": [[5, 0]]
        }"#;

        let payload: HeatmapPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.values[0][0], Some(350.0));
        assert_eq!(payload.values[0][1], None);
        assert_eq!(payload.counts[0], vec![5, 0]);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_row() {
        let payload = HeatmapPayload {
            days: vec!["Monday".into(), "Tuesday".into()],
            hours: vec![0],
            values: vec![vec![Some(1.0)]],
            counts: vec![vec![1], vec![1]],
        };

        assert_eq!(
            payload.validate(),
            Err(PayloadError::RowCount {
                grid: "values",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_ragged_counts() {
        let payload = HeatmapPayload {
            days: vec!["Monday".into()],
            hours: vec![0, 1],
            values: vec![vec![Some(1.0), None]],
            counts: vec![vec![1]],
        };

        assert_eq!(
            payload.validate(),
            Err(PayloadError::ColumnCount {
                grid: "counts",
                row: 0,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_validate_accepts_empty_axes() {
        let payload = HeatmapPayload {
            days: (1..=7).map(|d| format!("Day {}", d)).collect(),
            hours: Vec::new(),
            values: vec![Vec::new(); 7],
            counts: vec![Vec::new(); 7],
        };

        assert!(payload.validate().is_ok());
    }
}
