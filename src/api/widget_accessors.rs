use crate::core::{
    AxisDomain, DataPoint, DataStore, GeometryMapper, SeriesStats, ViewportGeometry,
    ViewportMetrics,
};
use crate::interaction::{CursorStyle, ScrollMode, ScrollState, TooltipModel};
use crate::render::Renderer;
use crate::source::DataLoad;

use super::{ChartWidget, ChartWidgetConfig};

impl<R: Renderer> ChartWidget<R> {
    #[must_use]
    pub fn config(&self) -> &ChartWidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        self.store.points()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn mapper(&self) -> &GeometryMapper {
        &self.mapper
    }

    #[must_use]
    pub fn geometry(&self) -> &ViewportGeometry {
        self.mapper.geometry()
    }

    #[must_use]
    pub fn domain(&self) -> &AxisDomain {
        self.mapper.domain()
    }

    /// Labels to skip between shown x labels; `0` shows every label.
    #[must_use]
    pub fn x_label_interval(&self) -> usize {
        self.label_interval
    }

    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    #[must_use]
    pub fn scroll_offset_px(&self) -> f64 {
        self.scroll.offset_px()
    }

    #[must_use]
    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll.mode()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.scroll.cursor()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.tooltip.active()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipModel {
        self.tooltip.model()
    }

    #[must_use]
    pub fn load_state(&self) -> &DataLoad {
        &self.load
    }

    /// Whether a delayed initial scroll is still waiting to fire.
    #[must_use]
    pub fn has_pending_initial_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }

    /// Statistics of the extremum series.
    #[must_use]
    pub fn stats(&self) -> SeriesStats {
        self.store.stats(self.store.extremum_series())
    }
}
