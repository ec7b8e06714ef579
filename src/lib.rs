//! scroll-chart-rs: headless dual-pane time-series chart widget.
//!
//! The value axis stays fixed while the plotted series scroll horizontally,
//! and the tooltip tracks the active data point through scrolls, drags and
//! taps. Drawing is delegated to a [`render::Renderer`] that receives fully
//! computed frames.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod source;
pub mod telemetry;

pub use api::{ChartWidget, ChartWidgetConfig};
pub use error::{ChartError, ChartResult};
