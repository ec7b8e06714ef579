use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartWidget, WidgetSnapshot};

impl<R: Renderer> ChartWidget<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            metrics: self.metrics,
            geometry: *self.mapper.geometry(),
            domain: self.mapper.domain().clone(),
            x_label_interval: self.label_interval,
            scroll: self.scroll.state(),
            scroll_mode: self.scroll.mode(),
            cursor: self.scroll.cursor(),
            active_index: self.tooltip.active(),
            tooltip: self.tooltip.model().clone(),
            point_count: self.store.len(),
            extremum_index: self.store.extremum_index(),
            load: self.load.clone(),
            summary: self.summary(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::Serialization(format!("failed to serialize snapshot: {e}")))
    }
}
