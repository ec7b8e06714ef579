use serde::{Deserialize, Serialize};

use crate::core::ViewportMetrics;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CursorStyle, TooltipModel};
use crate::render::{AxisTick, LinePrimitive, PointMarker, SeriesPolyline, TextPrimitive};

/// Fixed value-axis pane. Tick `y` values share the plot pane's vertical
/// coordinates so both panes line up without any scroll transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPaneFrame {
    pub width_px: f64,
    pub ticks: Vec<AxisTick>,
    pub font_size_px: f64,
}

/// Scrollable plot pane in virtual canvas coordinates.
///
/// Backends translate by `-scroll_offset_px` (or set their native scroll
/// position) and clip to the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPaneFrame {
    pub content_width_px: f64,
    pub content_height_px: f64,
    pub scroll_offset_px: f64,
    pub grid_lines: Vec<LinePrimitive>,
    pub series: Vec<SeriesPolyline>,
    pub x_labels: Vec<TextPrimitive>,
    pub markers: Vec<PointMarker>,
    /// Reference and guide lines drawn over the series.
    pub overlay_lines: Vec<LinePrimitive>,
    /// Annotation captions (special days, extremum value, average label).
    pub annotations: Vec<TextPrimitive>,
}

impl PlotPaneFrame {
    #[must_use]
    pub fn empty(content_width_px: f64, content_height_px: f64, scroll_offset_px: f64) -> Self {
        Self {
            content_width_px,
            content_height_px,
            scroll_offset_px,
            grid_lines: Vec::new(),
            series: Vec::new(),
            x_labels: Vec::new(),
            markers: Vec::new(),
            overlay_lines: Vec::new(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.series.iter().map(|line| line.vertices.len()).sum()
    }
}

/// Backend-agnostic scene for one widget draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub metrics: ViewportMetrics,
    pub cursor: CursorStyle,
    pub axis_pane: AxisPaneFrame,
    pub plot_pane: PlotPaneFrame,
    pub tooltip: TooltipModel,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.metrics.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.metrics.width,
                height: self.metrics.height,
            });
        }

        for tick in &self.axis_pane.ticks {
            if !tick.y.is_finite() || !tick.value.is_finite() {
                return Err(ChartError::InvalidData(
                    "axis tick must be finite".to_owned(),
                ));
            }
        }
        let plot = &self.plot_pane;
        if !plot.scroll_offset_px.is_finite() || plot.scroll_offset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "scroll offset must be finite and >= 0".to_owned(),
            ));
        }
        for line in plot.grid_lines.iter().chain(&plot.overlay_lines) {
            line.validate()?;
        }
        for series in &plot.series {
            series.validate()?;
        }
        for marker in &plot.markers {
            marker.validate()?;
        }
        for text in plot.x_labels.iter().chain(&plot.annotations) {
            text.validate()?;
        }
        if self.tooltip.visible
            && (!self.tooltip.screen_x.is_finite() || !self.tooltip.screen_y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "tooltip position must be finite".to_owned(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plot_pane.series.iter().all(|line| line.vertices.is_empty())
            && self.plot_pane.markers.is_empty()
    }
}
