//! Heatmap Render Spec
//!
//! Turns a validated [`HeatmapPayload`] into the trace and layout objects
//! Plotly consumes: a heatmap trace plus one text annotation per populated
//! cell. Cells with a zero count or an absent average get no annotation,
//! but absent averages still reach the trace as `null` so Plotly leaves
//! the cell blank.

use serde_json::{json, Value};

use crate::heatmap::{HeatmapPayload, PayloadError};

/// Averages above this read better in light text on the Viridis ramp
pub const LIGHT_TEXT_THRESHOLD_K: f64 = 340.0;

/// Colorscale name passed to Plotly
pub const COLORSCALE: &str = "Viridis";

/// Annotation text color, picked per cell from the average
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmphasisColor {
    Light,
    Dark,
}

impl EmphasisColor {
    /// CSS color string for Plotly's annotation font
    pub fn css(self) -> &'static str {
        match self {
            EmphasisColor::Light => "white",
            EmphasisColor::Dark => "black",
        }
    }
}

/// One cell label: position, text, and emphasis
#[derive(Clone, Debug, PartialEq)]
pub struct CellAnnotation {
    pub x: u32,
    pub y: String,
    pub text: String,
    pub color: EmphasisColor,
    pub show_arrow: bool,
}

/// Build one annotation per populated cell, days outer and hours inner
///
/// A cell is skipped when its count is zero or its average is absent.
pub fn build_annotations(payload: &HeatmapPayload) -> Vec<CellAnnotation> {
    let mut annotations = Vec::new();

    for (day_idx, day) in payload.days.iter().enumerate() {
        for (hour_idx, &hour) in payload.hours.iter().enumerate() {
            let value = payload
                .values
                .get(day_idx)
                .and_then(|row| row.get(hour_idx))
                .copied()
                .flatten();
            let count = payload
                .counts
                .get(day_idx)
                .and_then(|row| row.get(hour_idx))
                .copied()
                .unwrap_or(0);

            let value = match value {
                Some(v) if count > 0 => v,
                _ => continue,
            };

            let color = if value > LIGHT_TEXT_THRESHOLD_K {
                EmphasisColor::Light
            } else {
                EmphasisColor::Dark
            };

            annotations.push(CellAnnotation {
                x: hour,
                y: day.clone(),
                text: format!("{:.1}\nn={}", value, count),
                color,
                show_arrow: false,
            });
        }
    }

    annotations
}

/// Everything Plotly needs to draw the chart
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSpec {
    z: Vec<Vec<Option<f64>>>,
    x_labels: Vec<String>,
    y_labels: Vec<String>,
    colorscale: &'static str,
    annotations: Vec<CellAnnotation>,
}

impl RenderSpec {
    /// Validate the payload and derive the trace data and annotations
    pub fn from_payload(payload: &HeatmapPayload) -> Result<Self, PayloadError> {
        payload.validate()?;

        Ok(RenderSpec {
            z: payload.values.clone(),
            x_labels: payload.hours.iter().map(|h| format!("{}:00", h)).collect(),
            y_labels: payload.days.clone(),
            colorscale: COLORSCALE,
            annotations: build_annotations(payload),
        })
    }

    /// The heatmap trace object
    pub fn trace(&self) -> Value {
        json!({
            "z": self.z,
            "x": self.x_labels,
            "y": self.y_labels,
            "type": "heatmap",
            "colorscale": self.colorscale,
            "showscale": true,
        })
    }

    /// The layout object, annotations included
    pub fn layout(&self) -> Value {
        let annotations: Vec<Value> = self
            .annotations
            .iter()
            .map(|a| {
                json!({
                    "x": a.x,
                    "y": a.y,
                    "text": a.text.replace('\n', "<br>"),
                    "font": {
                        "color": a.color.css(),
                        "size": 8,
                    },
                    "showarrow": a.show_arrow,
                })
            })
            .collect();

        json!({
            "title": "Temperature by Day and Hour",
            "annotations": annotations,
            "width": 900,
            "height": 500,
            "margin": { "l": 80, "r": 50, "t": 100, "b": 80 },
        })
    }

    pub fn annotations(&self) -> &[CellAnnotation] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(
        days: &[&str],
        hours: &[u32],
        values: Vec<Vec<Option<f64>>>,
        counts: Vec<Vec<u64>>,
    ) -> HeatmapPayload {
        HeatmapPayload {
            days: days.iter().map(|d| d.to_string()).collect(),
            hours: hours.to_vec(),
            values,
            counts,
        }
    }

    #[test]
    fn test_annotation_for_populated_cell() {
        let payload = payload(
            &["Mon"],
            &[0, 1],
            vec![vec![Some(350.0), None]],
            vec![vec![5, 0]],
        );

        let annotations = build_annotations(&payload);

        assert_eq!(
            annotations,
            vec![CellAnnotation {
                x: 0,
                y: "Mon".to_string(),
                text: "350.0\nn=5".to_string(),
                color: EmphasisColor::Light,
                show_arrow: false,
            }]
        );
    }

    #[test]
    fn test_zero_count_cell_gets_no_annotation() {
        let payload = payload(&["Mon"], &[8], vec![vec![Some(10.0)]], vec![vec![0]]);

        assert!(build_annotations(&payload).is_empty());
    }

    #[test]
    fn test_absent_value_with_positive_count_gets_no_annotation() {
        let payload = payload(&["Mon"], &[8], vec![vec![None]], vec![vec![3]]);

        assert!(build_annotations(&payload).is_empty());
    }

    #[test]
    fn test_emphasis_compares_the_raw_average() {
        // 339.96 rounds to "340.0" in the label but sits below the threshold
        let payload = payload(
            &["Mon"],
            &[8, 9],
            vec![vec![Some(339.96), Some(10.0)]],
            vec![vec![2, 1]],
        );

        let annotations = build_annotations(&payload);

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].text, "340.0\nn=2");
        assert_eq!(annotations[0].color, EmphasisColor::Dark);
        assert_eq!(annotations[1].text, "10.0\nn=1");
        assert_eq!(annotations[1].color, EmphasisColor::Dark);

        // The threshold itself is not light; anything past it is
        assert_eq!(
            build_annotations(&payload_with_value(340.0))[0].color,
            EmphasisColor::Dark
        );
        assert_eq!(
            build_annotations(&payload_with_value(340.01))[0].color,
            EmphasisColor::Light
        );
    }

    fn payload_with_value(value: f64) -> HeatmapPayload {
        payload(&["Mon"], &[8], vec![vec![Some(value)]], vec![vec![1]])
    }

    #[test]
    fn test_days_outer_hours_inner_ordering() {
        let payload = payload(
            &["Mon", "Tue"],
            &[8, 14],
            vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]],
            vec![vec![1, 1], vec![1, 1]],
        );

        let order: Vec<(String, u32)> = build_annotations(&payload)
            .into_iter()
            .map(|a| (a.y, a.x))
            .collect();

        assert_eq!(
            order,
            vec![
                ("Mon".to_string(), 8),
                ("Mon".to_string(), 14),
                ("Tue".to_string(), 8),
                ("Tue".to_string(), 14),
            ]
        );
    }

    #[test]
    fn test_annotation_count_never_exceeds_grid() {
        let payload = payload(
            &["Mon", "Tue"],
            &[8, 9, 10],
            vec![
                vec![Some(1.0), None, Some(3.0)],
                vec![None, Some(5.0), Some(6.0)],
            ],
            vec![vec![1, 0, 1], vec![0, 1, 1]],
        );

        let annotations = build_annotations(&payload);

        assert_eq!(annotations.len(), 4);
        assert!(annotations.len() <= payload.days.len() * payload.hours.len());
    }

    #[test]
    fn test_build_is_deterministic() {
        let payload = payload(
            &["Mon", "Tue"],
            &[8, 9],
            vec![vec![Some(350.5), None], vec![Some(12.0), Some(340.0)]],
            vec![vec![4, 0], vec![2, 7]],
        );

        assert_eq!(build_annotations(&payload), build_annotations(&payload));
    }

    #[test]
    fn test_empty_axes_produce_no_annotations() {
        let no_days = payload(&[], &[8], vec![], vec![]);
        assert!(build_annotations(&no_days).is_empty());

        let no_hours = payload(&["Mon"], &[], vec![vec![]], vec![vec![]]);
        assert!(build_annotations(&no_hours).is_empty());
    }

    #[test]
    fn test_from_payload_rejects_dimension_mismatch() {
        let bad = payload(&["Mon", "Tue"], &[8], vec![vec![Some(1.0)]], vec![vec![1]]);

        assert_eq!(
            RenderSpec::from_payload(&bad),
            Err(PayloadError::RowCount {
                grid: "values",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_trace_shape() {
        let payload = payload(
            &["Monday"],
            &[0, 13],
            vec![vec![Some(301.5), None]],
            vec![vec![3, 0]],
        );

        let spec = RenderSpec::from_payload(&payload).unwrap();
        assert_eq!(spec.annotations().len(), 1);

        assert_eq!(
            spec.trace(),
            json!({
                "z": [[301.5, null]],
                "x": ["0:00", "13:00"],
                "y": ["Monday"],
                "type": "heatmap",
                "colorscale": "Viridis",
                "showscale": true,
            })
        );
    }

    #[test]
    fn test_layout_shape() {
        let payload = payload(
            &["Monday"],
            &[13],
            vec![vec![Some(355.25)]],
            vec![vec![4]],
        );

        let spec = RenderSpec::from_payload(&payload).unwrap();
        let layout = spec.layout();

        assert_eq!(layout["title"], "Temperature by Day and Hour");
        assert_eq!(layout["width"], 900);
        assert_eq!(layout["height"], 500);
        assert_eq!(
            layout["margin"],
            json!({ "l": 80, "r": 50, "t": 100, "b": 80 })
        );
        assert_eq!(
            layout["annotations"],
            json!([{
                "x": 13,
                "y": "Monday",
                "text": "355.2<br>n=4",
                "font": { "color": "white", "size": 8 },
                "showarrow": false,
            }])
        );
    }

    #[test]
    fn test_layout_uses_dark_text_below_threshold() {
        let payload = payload(&["Monday"], &[8], vec![vec![Some(12.0)]], vec![vec![9]]);

        let spec = RenderSpec::from_payload(&payload).unwrap();
        let layout = spec.layout();

        assert_eq!(layout["annotations"][0]["font"]["color"], "black");
    }
}
