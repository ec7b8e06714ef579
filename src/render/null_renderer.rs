use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless widget usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_vertex_count: usize,
    pub last_marker_count: usize,
    pub last_tick_count: usize,
    pub last_tooltip_visible: bool,
    pub last_scroll_offset_px: f64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_vertex_count = frame.plot_pane.vertex_count();
        self.last_marker_count = frame.plot_pane.markers.len();
        self.last_tick_count = frame.axis_pane.ticks.len();
        self.last_tooltip_visible = frame.tooltip.visible;
        self.last_scroll_offset_px = frame.plot_pane.scroll_offset_px;
        Ok(())
    }
}
