use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    LayoutProfiles, SpecialDayCalendar, ViewportMetrics, XLabelDensity, YDomainPolicy,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragTuning, ScrollAnimationConfig, TooltipConfig, TooltipPlacement};
use crate::render::{ChartPalette, Color, SeriesStyle};
use crate::source::{DEFAULT_DATE_LABEL_FORMAT, PRICE_SERIES, validate_date_label_format};

use super::{AxisTickFormat, ChartLabels};

/// Public widget bootstrap configuration.
///
/// This type is serializable so host applications can persist/load widget
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetConfig {
    pub metrics: ViewportMetrics,
    #[serde(default = "default_tracked_series")]
    pub tracked_series: Vec<String>,
    /// Series whose minimum is flagged; the first tracked series when unset.
    #[serde(default)]
    pub extremum_series: Option<String>,
    #[serde(default = "default_series_styles")]
    pub series_styles: IndexMap<String, SeriesStyle>,
    #[serde(default)]
    pub layout: LayoutProfiles,
    #[serde(default)]
    pub y_domain_policy: YDomainPolicy,
    #[serde(default)]
    pub x_label_density: XLabelDensity,
    #[serde(default)]
    pub drag_tuning: DragTuning,
    #[serde(default)]
    pub scroll_animation: ScrollAnimationConfig,
    #[serde(default)]
    pub tooltip: TooltipConfig,
    #[serde(default)]
    pub palette: ChartPalette,
    #[serde(default)]
    pub labels: ChartLabels,
    #[serde(default)]
    pub axis_tick_format: AxisTickFormat,
    #[serde(default)]
    pub calendar: SpecialDayCalendar,
    /// `chrono` format of x labels for calendar window responses.
    #[serde(default = "default_date_label_format")]
    pub date_label_format: String,
    /// Concatenate loaded data with itself for the looping scroll effect.
    #[serde(default)]
    pub duplicate_for_looping: bool,
    /// Anchor the tooltip on the extremum point after a successful load.
    #[serde(default)]
    pub select_extremum_on_load: bool,
    /// Delay before scrolling to the extremum after load; `None` disables it.
    #[serde(default)]
    pub initial_scroll_delay_seconds: Option<f64>,
    /// Extra radius added to markers for their clickable region.
    #[serde(default = "default_marker_hit_slop_px")]
    pub marker_hit_slop_px: f64,
}

impl ChartWidgetConfig {
    /// Creates a minimal single-series config with every optional behavior off.
    #[must_use]
    pub fn new(metrics: ViewportMetrics) -> Self {
        Self {
            metrics,
            tracked_series: default_tracked_series(),
            extremum_series: None,
            series_styles: default_series_styles(),
            layout: LayoutProfiles::default(),
            y_domain_policy: YDomainPolicy::default(),
            x_label_density: XLabelDensity::default(),
            drag_tuning: DragTuning::default(),
            scroll_animation: ScrollAnimationConfig::default(),
            tooltip: TooltipConfig::default(),
            palette: ChartPalette::default(),
            labels: ChartLabels::default(),
            axis_tick_format: AxisTickFormat::default(),
            calendar: SpecialDayCalendar::default(),
            date_label_format: default_date_label_format(),
            duplicate_for_looping: false,
            select_extremum_on_load: false,
            initial_scroll_delay_seconds: None,
            marker_hit_slop_px: default_marker_hit_slop_px(),
        }
    }

    /// Flight price calendar preset: looping data, holiday annotations, a
    /// pinned tooltip on the lowest fare and a delayed scroll to it.
    #[must_use]
    pub fn flight_price_calendar(metrics: ViewportMetrics) -> Self {
        let labels = ChartLabels {
            headline_suffix: "원~".to_owned(),
            ..ChartLabels::default()
        };
        Self::new(metrics)
            .with_series_style(
                PRICE_SERIES,
                SeriesStyle::new("Fare", Color::rgb8(0x21, 0x96, 0xF3)),
            )
            .with_calendar(SpecialDayCalendar::korean_public_holidays())
            .with_tooltip(TooltipConfig {
                placement: TooltipPlacement::PinnedTop { gap_px: 10.0 },
                value_suffix: "원".to_owned(),
                ..TooltipConfig::default()
            })
            .with_labels(labels)
            .with_axis_tick_format(AxisTickFormat::TenThousandUnit {
                suffix: "만".to_owned(),
            })
            .with_date_label_format("%m월 %d일")
            .with_duplicate_for_looping(true)
            .with_select_extremum_on_load(true)
            .with_initial_scroll_delay_seconds(Some(DEFAULT_INITIAL_SCROLL_DELAY_SECONDS))
    }

    /// Replaces the tracked series, keeping styles of names that remain.
    #[must_use]
    pub fn with_tracked_series<I, S>(mut self, series: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tracked_series = series.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_extremum_series(mut self, series: impl Into<String>) -> Self {
        self.extremum_series = Some(series.into());
        self
    }

    #[must_use]
    pub fn with_series_style(mut self, series: impl Into<String>, style: SeriesStyle) -> Self {
        self.series_styles.insert(series.into(), style);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutProfiles) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_y_domain_policy(mut self, policy: YDomainPolicy) -> Self {
        self.y_domain_policy = policy;
        self
    }

    #[must_use]
    pub fn with_x_label_density(mut self, density: XLabelDensity) -> Self {
        self.x_label_density = density;
        self
    }

    #[must_use]
    pub fn with_drag_tuning(mut self, tuning: DragTuning) -> Self {
        self.drag_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_scroll_animation(mut self, animation: ScrollAnimationConfig) -> Self {
        self.scroll_animation = animation;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: ChartLabels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_axis_tick_format(mut self, format: AxisTickFormat) -> Self {
        self.axis_tick_format = format;
        self
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: SpecialDayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub fn with_date_label_format(mut self, format: impl Into<String>) -> Self {
        self.date_label_format = format.into();
        self
    }

    #[must_use]
    pub fn with_duplicate_for_looping(mut self, enabled: bool) -> Self {
        self.duplicate_for_looping = enabled;
        self
    }

    #[must_use]
    pub fn with_select_extremum_on_load(mut self, enabled: bool) -> Self {
        self.select_extremum_on_load = enabled;
        self
    }

    #[must_use]
    pub fn with_initial_scroll_delay_seconds(mut self, delay: Option<f64>) -> Self {
        self.initial_scroll_delay_seconds = delay;
        self
    }

    #[must_use]
    pub fn with_marker_hit_slop_px(mut self, slop_px: f64) -> Self {
        self.marker_hit_slop_px = slop_px;
        self
    }

    /// Validates every nested section.
    pub fn validate(&self) -> ChartResult<()> {
        self.metrics.validate()?;
        if self.tracked_series.is_empty() {
            return Err(ChartError::InvalidData(
                "config needs at least one tracked series".to_owned(),
            ));
        }
        if let Some(series) = &self.extremum_series {
            if !self.tracked_series.contains(series) {
                return Err(ChartError::InvalidData(format!(
                    "extremum series `{series}` is not tracked"
                )));
            }
        }
        for style in self.series_styles.values() {
            style.validate()?;
        }
        self.layout.validate()?;
        self.y_domain_policy.validate()?;
        self.x_label_density.validate()?;
        self.drag_tuning.validate()?;
        self.scroll_animation.validate()?;
        if let TooltipPlacement::PinnedTop { gap_px } = self.tooltip.placement {
            if !gap_px.is_finite() {
                return Err(ChartError::InvalidData(
                    "tooltip gap must be finite".to_owned(),
                ));
            }
        }
        self.palette.validate()?;
        self.labels.validate()?;
        validate_date_label_format(&self.date_label_format)?;
        if let Some(delay) = self.initial_scroll_delay_seconds {
            if !delay.is_finite() || delay < 0.0 {
                return Err(ChartError::InvalidData(
                    "initial scroll delay must be finite and >= 0".to_owned(),
                ));
            }
        }
        if !self.marker_hit_slop_px.is_finite() || self.marker_hit_slop_px < 0.0 {
            return Err(ChartError::InvalidData(
                "marker hit slop must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("failed to parse config: {e}")))
    }
}

/// Settle time before the initial scroll, matching the chart entrance animation.
pub const DEFAULT_INITIAL_SCROLL_DELAY_SECONDS: f64 = 2.5;

fn default_tracked_series() -> Vec<String> {
    vec![PRICE_SERIES.to_owned()]
}

fn default_series_styles() -> IndexMap<String, SeriesStyle> {
    let mut styles = IndexMap::new();
    styles.insert(
        PRICE_SERIES.to_owned(),
        SeriesStyle::new("Price", Color::rgb8(0x21, 0x96, 0xF3)),
    );
    styles
}

fn default_date_label_format() -> String {
    DEFAULT_DATE_LABEL_FORMAT.to_owned()
}

fn default_marker_hit_slop_px() -> f64 {
    8.0
}
