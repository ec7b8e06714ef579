use tracing::debug;

use crate::core::{AxisDomainCalculator, DataStore, GeometryMapper, ViewportGeometry};
use crate::error::ChartResult;
use crate::interaction::{ScrollSyncController, TooltipController};
use crate::render::Renderer;
use crate::source::DataLoad;

use super::layout_coordinator::scroll_viewport_width;
use super::{ChartWidget, ChartWidgetConfig};

impl<R: Renderer> ChartWidget<R> {
    /// Creates an empty widget; data arrives through the data controller.
    pub fn new(renderer: R, config: ChartWidgetConfig) -> ChartResult<Self> {
        config.validate()?;
        let metrics = config.metrics;

        let mut store = DataStore::new(config.tracked_series.iter().cloned())?
            .with_calendar(config.calendar.clone());
        if let Some(series) = &config.extremum_series {
            store = store.with_extremum_series(series.clone())?;
        }

        let calculator = AxisDomainCalculator::new(config.y_domain_policy, config.x_label_density)?;
        let geometry = ViewportGeometry::derive(metrics, config.layout, 0)?;
        let domain = calculator.compute_y_domain(0.0, geometry.plot_height_px());
        let label_interval = calculator.compute_x_label_interval(0, geometry.class);
        let viewport_width =
            scroll_viewport_width(metrics.width, config.layout.for_class(geometry.class));

        let scroll = ScrollSyncController::new(viewport_width, geometry.canvas_width_px)?
            .with_drag_tuning(config.drag_tuning)?
            .with_animation_config(config.scroll_animation)?;
        let tooltip = TooltipController::new(config.series_styles.clone(), config.tooltip.clone());

        debug!(
            width = metrics.width,
            height = metrics.height,
            class = ?geometry.class,
            tracked = config.tracked_series.len(),
            "chart widget initialized"
        );

        Ok(Self {
            renderer,
            config,
            metrics,
            store,
            calculator,
            mapper: GeometryMapper::new(geometry, domain),
            label_interval,
            scroll,
            tooltip,
            load: DataLoad::Idle,
            pending_scroll: None,
        })
    }
}
