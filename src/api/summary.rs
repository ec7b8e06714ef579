use serde::{Deserialize, Serialize};

use crate::core::SeriesStats;
use crate::core::primitives::format_grouped;
use crate::render::Renderer;

use super::ChartWidget;

/// Header content shown above the chart: date range and lowest value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    /// `yy.mm.dd` first and last dates, or the configured fallback.
    pub date_range: Option<(String, String)>,
    pub stats: SeriesStats,
    /// Lowest value with its suffix, or the loading label without data.
    pub headline: String,
}

impl<R: Renderer> ChartWidget<R> {
    #[must_use]
    pub fn summary(&self) -> ChartSummary {
        let labels = &self.config.labels;
        let stats = self.stats();
        let headline = if stats.min > 0.0 {
            format!("{}{}", format_grouped(stats.min), labels.headline_suffix)
        } else {
            labels.loading.clone()
        };
        ChartSummary {
            date_range: self
                .store
                .formatted_date_range()
                .or_else(|| labels.fallback_date_range.clone()),
            stats,
            headline,
        }
    }
}
