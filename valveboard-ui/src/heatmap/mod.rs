//! Hourly Heatmap
//!
//! Wire payload decoding and chart construction for the temperature heatmap.

pub mod payload;
pub mod render;

pub use payload::{HeatmapPayload, PayloadError};
pub use render::{build_annotations, CellAnnotation, EmphasisColor, RenderSpec};
