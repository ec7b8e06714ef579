use crate::core::{AxisDomainCalculator, DataStore, GeometryMapper, ViewportMetrics};
use crate::error::ChartResult;
use crate::interaction::{ScrollSyncController, TooltipController};
use crate::render::Renderer;
use crate::source::DataLoad;

use super::ChartWidgetConfig;

/// Scroll to a data index that fires once its settle delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PendingScroll {
    pub(super) index: usize,
    pub(super) remaining_seconds: f64,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartWidget` owns the data store, the derived axis domain and canvas
/// geometry, the scroll and tooltip controllers, and the renderer. Every
/// input event recomputes dependent state before returning, so the next
/// `render` call always paints a consistent frame.
pub struct ChartWidget<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartWidgetConfig,
    pub(super) metrics: ViewportMetrics,
    pub(super) store: DataStore,
    pub(super) calculator: AxisDomainCalculator,
    pub(super) mapper: GeometryMapper,
    pub(super) label_interval: usize,
    pub(super) scroll: ScrollSyncController,
    pub(super) tooltip: TooltipController,
    pub(super) load: DataLoad,
    pub(super) pending_scroll: Option<PendingScroll>,
}

impl<R: Renderer> ChartWidget<R> {
    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
