//! UI Components
//!
//! Leptos components for the dashboard.

pub mod heatmap_chart;
pub mod loading;

pub use heatmap_chart::HeatmapChart;
pub use loading::Loading;
