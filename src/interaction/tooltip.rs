use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{
    decimal_to_f64, format_grouped, format_short_date, format_signed_grouped, round_decimal,
};
use crate::core::{DataPoint, DataStore, GeometryMapper};
use crate::error::ChartResult;
use crate::interaction::ScrollState;
use crate::render::{Color, SeriesStyle};

const FALLBACK_ITEM_COLOR: Color = Color::rgb(0.53, 0.53, 0.53);

/// Vertical placement of the tooltip anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TooltipPlacement {
    /// Anchored on the data point itself.
    #[default]
    FollowPoint,
    /// Pinned above the plot, `gap_px` above the top margin.
    PinnedTop { gap_px: f64 },
}

/// What happens when the anchor is scrolled out of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OffscreenPolicy {
    /// Stay visible with an off-screen position.
    #[default]
    Keep,
    /// Report `visible = false` until the anchor scrolls back in.
    Hide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub placement: TooltipPlacement,
    pub offscreen: OffscreenPolicy,
    /// Append the change against the previous point to every item.
    pub show_delta: bool,
    /// Appended to formatted values, e.g. a currency unit.
    #[serde(default)]
    pub value_suffix: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: TooltipPlacement::default(),
            offscreen: OffscreenPolicy::default(),
            show_delta: true,
            value_suffix: String::new(),
        }
    }
}

/// Change of a series value against the preceding point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDelta {
    pub change: f64,
    /// Percentage rounded to one decimal.
    pub percentage: f64,
    /// Rendered annotation, e.g. `▲ +40,000 (+50.0%)`.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub series: String,
    pub label: String,
    /// `"<label>: <value>"` plus the delta annotation when present.
    pub value: String,
    pub color: Color,
    pub delta: Option<ValueDelta>,
}

/// Floating tooltip content and its position inside the scroll viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipModel {
    pub visible: bool,
    pub anchor_data_index: Option<usize>,
    pub screen_x: f64,
    pub screen_y: f64,
    pub title: String,
    /// `yy.mm.dd - yy.mm.dd` range of the anchor point, when it has one.
    pub caption: Option<String>,
    pub items: SmallVec<[TooltipItem; 2]>,
}

impl Default for TooltipModel {
    fn default() -> Self {
        Self::hidden()
    }
}

impl TooltipModel {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            anchor_data_index: None,
            screen_x: 0.0,
            screen_y: 0.0,
            title: String::new(),
            caption: None,
            items: SmallVec::new(),
        }
    }
}

/// Computes the delta annotation of `current` against `previous`.
///
/// `None` when `previous` is zero or the change is not finite. Percentages
/// outside the decimal range fall back to float rounding.
#[must_use]
pub fn value_delta(current: f64, previous: f64) -> Option<ValueDelta> {
    if !current.is_finite() || !previous.is_finite() || previous == 0.0 {
        return None;
    }
    let change = current - previous;
    let raw_percentage = change / previous * 100.0;
    if !change.is_finite() || !raw_percentage.is_finite() {
        return None;
    }
    let percentage = round_decimal(raw_percentage, 1)
        .and_then(|rounded| decimal_to_f64(rounded, "percentage"))
        .unwrap_or_else(|_| (raw_percentage * 10.0).round() / 10.0);
    let arrow = if change < 0.0 { '▼' } else { '▲' };
    let text = format!(
        "{arrow} {} ({percentage:+.1}%)",
        format_signed_grouped(change)
    );
    Some(ValueDelta {
        change,
        percentage,
        text,
    })
}

/// Owner of the active anchor and the tooltip model derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipController {
    anchor: Option<usize>,
    model: TooltipModel,
    config: TooltipConfig,
    series: IndexMap<String, SeriesStyle>,
}

impl TooltipController {
    #[must_use]
    pub fn new(series: IndexMap<String, SeriesStyle>, config: TooltipConfig) -> Self {
        Self {
            anchor: None,
            model: TooltipModel::hidden(),
            config,
            series,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.anchor
    }

    #[must_use]
    pub fn model(&self) -> &TooltipModel {
        &self.model
    }

    /// Sets or clears the anchor. Returns whether it changed.
    pub fn set_active(&mut self, index: Option<usize>) -> bool {
        let changed = self.anchor != index;
        self.anchor = index;
        if index.is_none() {
            self.model = TooltipModel::hidden();
        }
        changed
    }

    /// Rebuilds the model from the current scroll offset and geometry.
    pub fn recompute(
        &mut self,
        scroll: &ScrollState,
        mapper: &GeometryMapper,
        store: &DataStore,
    ) -> ChartResult<&TooltipModel> {
        self.model = match self.anchor.and_then(|index| store.get(index)) {
            Some(point) => self.build_model(point, scroll, mapper, store),
            None => TooltipModel::hidden(),
        };
        Ok(&self.model)
    }

    fn build_model(
        &self,
        point: &DataPoint,
        scroll: &ScrollState,
        mapper: &GeometryMapper,
        store: &DataStore,
    ) -> TooltipModel {
        let canvas_x = mapper.index_to_x(point.index);
        if self.config.offscreen == OffscreenPolicy::Hide && !scroll.is_visible(canvas_x) {
            return TooltipModel {
                anchor_data_index: Some(point.index),
                ..TooltipModel::hidden()
            };
        }

        let screen_y = match self.config.placement {
            TooltipPlacement::FollowPoint => point
                .value(store.extremum_series())
                .map_or_else(|| mapper.geometry().plot_bottom_px(), |value| {
                    mapper.to_pixel(point.index, value).y
                }),
            TooltipPlacement::PinnedTop { gap_px } => mapper.geometry().top_margin_px - gap_px,
        };

        let previous = point
            .index
            .checked_sub(1)
            .and_then(|index| store.get(index));
        let mut items = SmallVec::new();
        for series in store.tracked_series() {
            let Some(value) = point.value(series) else {
                continue;
            };
            let (label, color) = self.series.get(series).map_or_else(
                || (series.clone(), FALLBACK_ITEM_COLOR),
                |style| (style.label.clone(), style.color),
            );

            let delta = match previous.and_then(|prev| prev.value(series)) {
                Some(prev) if self.config.show_delta => value_delta(value, prev),
                _ => None,
            };
            let mut text = format!(
                "{label}: {}{}",
                format_grouped(value),
                self.config.value_suffix
            );
            if let Some(delta) = &delta {
                text.push(' ');
                text.push_str(&delta.text);
            }

            items.push(TooltipItem {
                series: series.clone(),
                label,
                value: text,
                color,
                delta,
            });
        }

        let caption = match (point.source_timestamp, point.source_end_timestamp) {
            (Some(start), Some(end)) => Some(format!(
                "{} - {}",
                format_short_date(start),
                format_short_date(end)
            )),
            (Some(start), None) => Some(format_short_date(start)),
            _ => None,
        };

        TooltipModel {
            visible: true,
            anchor_data_index: Some(point.index),
            screen_x: canvas_x - scroll.offset_px(),
            screen_y,
            title: point.label.clone(),
            caption,
            items,
        }
    }
}
