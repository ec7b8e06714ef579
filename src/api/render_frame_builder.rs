use crate::core::LayoutProfile;
use crate::core::primitives::format_grouped;
use crate::error::ChartResult;
use crate::render::{
    AxisPaneFrame, AxisTick, Color, LinePrimitive, LineStrokeStyle, MarkerRole, MarkerShape,
    PlotPaneFrame, PointMarker, RenderFrame, Renderer, SeriesPolyline, TextHAlign, TextPrimitive,
};

use super::ChartWidget;

const FALLBACK_SERIES_COLOR: Color = Color::rgb(0.53, 0.53, 0.53);
const AVERAGE_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    dash_px: 5.0,
    gap_px: 5.0,
};
const X_LABEL_GAP_PX: f64 = 4.0;
const ACTIVE_MARKER_STROKE_PX: f64 = 2.0;

impl<R: Renderer> ChartWidget<R> {
    /// Materializes both panes and the tooltip overlay for the current state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let frame = RenderFrame {
            metrics: self.metrics,
            cursor: self.scroll.cursor(),
            axis_pane: self.build_axis_pane(),
            plot_pane: self.build_plot_pane(),
            tooltip: self.tooltip.model().clone(),
        };
        frame.validate()?;
        Ok(frame)
    }

    fn profile(&self) -> LayoutProfile {
        self.config.layout.for_class(self.mapper.geometry().class)
    }

    fn build_axis_pane(&self) -> AxisPaneFrame {
        let profile = self.profile();
        let ticks = self
            .mapper
            .domain()
            .ticks
            .iter()
            .map(|&value| AxisTick {
                value,
                y: self.mapper.value_to_y(value),
                label: self.config.axis_tick_format.format(value),
            })
            .collect();
        AxisPaneFrame {
            width_px: profile.axis_pane_width_px,
            ticks,
            font_size_px: profile.axis_font_px,
        }
    }

    fn build_plot_pane(&self) -> PlotPaneFrame {
        let geometry = self.mapper.geometry();
        let profile = self.profile();
        let palette = self.config.palette;
        let mut pane = PlotPaneFrame::empty(
            geometry.canvas_width_px,
            geometry.canvas_height_px,
            self.scroll.offset_px(),
        );

        for &tick in &self.mapper.domain().ticks {
            let y = self.mapper.value_to_y(tick);
            pane.grid_lines.push(LinePrimitive::new(
                0.0,
                y,
                geometry.canvas_width_px,
                y,
                1.0,
                palette.grid_line,
            ));
        }

        for series in self.store.tracked_series() {
            let style = self.config.series_styles.get(series);
            pane.series.push(SeriesPolyline {
                series: series.clone(),
                color: style.map_or(FALLBACK_SERIES_COLOR, |style| style.color),
                stroke_width: style
                    .and_then(|style| style.line_width_px)
                    .unwrap_or(profile.line_width_px),
                vertices: self.mapper.project_series(self.store.points(), series),
            });
        }

        let label_y = geometry.plot_bottom_px() + profile.label_font_px + X_LABEL_GAP_PX;
        let stride = self.label_interval + 1;
        for point in self.store.points().iter().step_by(stride) {
            if point.label.is_empty() {
                continue;
            }
            pane.x_labels.push(TextPrimitive::new(
                point.label.clone(),
                self.mapper.index_to_x(point.index),
                label_y,
                profile.label_font_px,
                palette.axis_text,
                TextHAlign::Center,
            ));
        }

        pane.markers = self.build_markers();

        let stats = self.store.stats(self.store.extremum_series());
        if stats.avg > 0.0 {
            let y = self.mapper.value_to_y(stats.avg);
            pane.overlay_lines.push(
                LinePrimitive::new(0.0, y, geometry.canvas_width_px, y, 1.0, palette.average_line)
                    .with_stroke_style(AVERAGE_DASH),
            );
            pane.annotations.push(TextPrimitive::new(
                self.config.labels.average.clone(),
                X_LABEL_GAP_PX,
                y - X_LABEL_GAP_PX,
                profile.label_font_px,
                palette.average_text,
                TextHAlign::Left,
            ));
        }

        if let Some(index) = self.tooltip.active() {
            let x = self.mapper.index_to_x(index);
            pane.overlay_lines.push(LinePrimitive::new(
                x,
                geometry.top_margin_px,
                x,
                geometry.plot_bottom_px(),
                1.0,
                palette.guide_line,
            ));
        }

        self.push_point_annotations(&mut pane, profile);
        pane
    }

    /// Special-day names above their points and the extremum caption below.
    fn push_point_annotations(&self, pane: &mut PlotPaneFrame, profile: LayoutProfile) {
        let palette = self.config.palette;
        let series = self.store.extremum_series();
        let font = profile.label_font_px;
        let above = font * 1.25;
        let below = font * 2.0;

        for point in self.store.points() {
            let Some(value) = point.value(series) else {
                continue;
            };
            let anchor = self.mapper.to_pixel(point.index, value);

            if let Some(text) = point.flags.annotation_text.as_deref() {
                pane.annotations.push(
                    TextPrimitive::new(
                        text,
                        anchor.x,
                        anchor.y - above,
                        font,
                        palette.special_text,
                        TextHAlign::Center,
                    )
                    .bold(),
                );
            } else if point.flags.is_extremum {
                pane.annotations.push(
                    TextPrimitive::new(
                        format_grouped(value),
                        anchor.x,
                        anchor.y + below,
                        font,
                        palette.extremum_text,
                        TextHAlign::Center,
                    )
                    .bold(),
                );
                pane.annotations.push(
                    TextPrimitive::new(
                        self.config.labels.extremum.clone(),
                        anchor.x,
                        anchor.y + below + font * 1.2,
                        font,
                        palette.extremum_text,
                        TextHAlign::Center,
                    )
                    .bold(),
                );
            }
        }
    }

    /// Special, extremum and active markers in paint order.
    pub(super) fn build_markers(&self) -> Vec<PointMarker> {
        let profile = self.profile();
        let palette = self.config.palette;
        let series = self.store.extremum_series();
        let active = self.tooltip.active();
        let slop = self.config.marker_hit_slop_px;
        let mut markers = Vec::new();
        let mut active_marker = None;

        for point in self.store.points() {
            let Some(value) = point.value(series) else {
                continue;
            };
            let anchor = self.mapper.to_pixel(point.index, value);

            if active == Some(point.index) {
                let fill = if point.flags.is_extremum {
                    palette.extremum_marker
                } else {
                    self.config
                        .series_styles
                        .get(series)
                        .map_or(FALLBACK_SERIES_COLOR, |style| style.color)
                };
                active_marker = Some(PointMarker {
                    index: point.index,
                    x: anchor.x,
                    y: anchor.y,
                    shape: MarkerShape::Circle,
                    role: MarkerRole::Active,
                    radius_px: profile.active_marker_radius_px,
                    hit_radius_px: profile.active_marker_radius_px + slop,
                    fill,
                    stroke: palette.marker_stroke,
                    stroke_width: ACTIVE_MARKER_STROKE_PX,
                });
                continue;
            }

            let (role, fill) = if point.flags.special {
                (MarkerRole::Special, palette.special_marker)
            } else if point.flags.is_extremum {
                (MarkerRole::Extremum, palette.extremum_marker)
            } else {
                continue;
            };
            markers.push(PointMarker {
                index: point.index,
                x: anchor.x,
                y: anchor.y,
                shape: MarkerShape::Circle,
                role,
                radius_px: profile.marker_radius_px,
                hit_radius_px: profile.marker_radius_px + slop,
                fill,
                stroke: palette.marker_stroke,
                stroke_width: profile.line_width_px,
            });
        }

        markers.extend(active_marker);
        markers
    }
}
