mod frame;
mod null_renderer;
mod primitives;
mod style;

pub use frame::{AxisPaneFrame, PlotPaneFrame, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    AxisTick, Color, LinePrimitive, LineStrokeStyle, MarkerRole, MarkerShape, PointMarker,
    SeriesPolyline, TextHAlign, TextPrimitive,
};
pub use style::{ChartPalette, SeriesStyle};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from data, scroll and tooltip logic. Pointer and touch callbacks
/// flow back through the `ChartWidget` input methods.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
