use serde::{Deserialize, Serialize};

use crate::core::{AxisDomain, ViewportGeometry, ViewportMetrics};
use crate::interaction::{CursorStyle, ScrollMode, ScrollState, TooltipModel};
use crate::source::DataLoad;

use super::ChartSummary;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub metrics: ViewportMetrics,
    pub geometry: ViewportGeometry,
    pub domain: AxisDomain,
    pub x_label_interval: usize,
    pub scroll: ScrollState,
    pub scroll_mode: ScrollMode,
    pub cursor: CursorStyle,
    pub active_index: Option<usize>,
    pub tooltip: TooltipModel,
    pub point_count: usize,
    pub extremum_index: Option<usize>,
    pub load: DataLoad,
    pub summary: ChartSummary,
}
