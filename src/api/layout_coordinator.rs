use tracing::trace;

use crate::core::{GeometryMapper, LayoutProfile, ViewportGeometry, ViewportMetrics};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartWidget;

/// Width of the scroll viewport once the fixed axis pane is carved out.
pub(super) fn scroll_viewport_width(total_width: f64, profile: LayoutProfile) -> f64 {
    (total_width - profile.axis_pane_width_px).max(0.0)
}

impl<R: Renderer> ChartWidget<R> {
    /// Applies new host metrics and re-derives everything that depends on them.
    pub fn resize(&mut self, metrics: ViewportMetrics) -> ChartResult<()> {
        let metrics = metrics.validate()?;
        self.metrics = metrics;
        self.refresh_layout()
    }

    /// Recomputes geometry, domain, label interval, scroll extents and the
    /// tooltip from the current data and metrics, in dependency order.
    pub(super) fn refresh_layout(&mut self) -> ChartResult<()> {
        let point_count = self.store.len();
        let geometry = ViewportGeometry::derive(self.metrics, self.config.layout, point_count)?;
        let domain = self
            .calculator
            .compute_y_domain(self.store.max_tracked_value(), geometry.plot_height_px());
        self.label_interval = self
            .calculator
            .compute_x_label_interval(point_count, geometry.class);
        self.mapper = GeometryMapper::new(geometry, domain);

        let profile = self.config.layout.for_class(geometry.class);
        let viewport_width = scroll_viewport_width(self.metrics.width, profile);
        let clamped = self
            .scroll
            .resize(viewport_width, geometry.canvas_width_px)?;
        trace!(
            point_count,
            canvas_width = geometry.canvas_width_px,
            viewport_width,
            offset_reclamped = clamped,
            "layout refreshed"
        );

        self.refresh_tooltip()
    }

    pub(super) fn refresh_tooltip(&mut self) -> ChartResult<()> {
        self.tooltip
            .recompute(&self.scroll.state(), &self.mapper, &self.store)?;
        Ok(())
    }
}
