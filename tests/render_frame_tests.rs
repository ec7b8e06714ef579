use approx::assert_abs_diff_eq;
use scroll_chart::api::AxisTickFormat;
use scroll_chart::core::primitives::parse_timestamp;
use scroll_chart::core::{SeriesRecord, SpecialDayCalendar, ViewportMetrics};
use scroll_chart::render::{LineStrokeStyle, MarkerRole, NullRenderer};
use scroll_chart::{ChartWidget, ChartWidgetConfig};

fn widget_with(config: ChartWidgetConfig, prices: &[f64]) -> ChartWidget<NullRenderer> {
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");
    let _ = widget
        .set_records(
            prices
                .iter()
                .enumerate()
                .map(|(i, price)| SeriesRecord::new(format!("d{i}")).with_value("price", *price)),
        )
        .expect("records");
    widget
}

fn wide_config() -> ChartWidgetConfig {
    ChartWidgetConfig::new(ViewportMetrics::new(1024.0, 480.0))
}

fn sixty_prices() -> Vec<f64> {
    let mut prices = vec![100_000.0; 60];
    prices[1] = 120_000.0;
    prices[3] = 50_000.0;
    prices
}

#[test]
fn axis_ticks_share_plot_coordinates() {
    let widget = widget_with(wide_config(), &sixty_prices());
    let frame = widget.build_render_frame().expect("frame");

    let labels: Vec<&str> = frame
        .axis_pane
        .ticks
        .iter()
        .map(|tick| tick.label.as_str())
        .collect();
    assert_eq!(labels, vec!["0", "75,000", "150,000", "225,000", "300,000"]);
    assert_eq!(frame.axis_pane.width_px, 45.0);
    assert_eq!(frame.axis_pane.font_size_px, 13.0);

    let top = frame.axis_pane.ticks.last().expect("top tick");
    assert_abs_diff_eq!(top.y, 50.0, epsilon = 1e-9);
    let bottom = frame.axis_pane.ticks.first().expect("bottom tick");
    assert_abs_diff_eq!(bottom.y, 400.0, epsilon = 1e-9);

    assert_eq!(frame.plot_pane.grid_lines.len(), 5);
    for (line, tick) in frame.plot_pane.grid_lines.iter().zip(&frame.axis_pane.ticks) {
        assert_eq!(line.y1, tick.y);
        assert_eq!(line.x2, frame.plot_pane.content_width_px);
    }
}

#[test]
fn ten_thousand_unit_tick_labels() {
    let config = wide_config().with_axis_tick_format(AxisTickFormat::TenThousandUnit {
        suffix: "만".to_owned(),
    });
    let widget = widget_with(config, &[120_000.0, 80_000.0]);
    let frame = widget.build_render_frame().expect("frame");
    let labels: Vec<&str> = frame
        .axis_pane
        .ticks
        .iter()
        .map(|tick| tick.label.as_str())
        .collect();
    assert_eq!(labels, vec!["0만", "7.5만", "15만", "22.5만", "30만"]);
}

#[test]
fn x_labels_follow_the_label_interval() {
    let widget = widget_with(wide_config(), &sixty_prices());
    let stride = widget.x_label_interval() + 1;
    let frame = widget.build_render_frame().expect("frame");

    let labels = &frame.plot_pane.x_labels;
    assert_eq!(labels.len(), 60_usize.div_ceil(stride));
    assert_eq!(labels[0].text, "d0");
    assert_eq!(labels[1].text, format!("d{stride}"));
    assert_eq!(labels[1].x, widget.mapper().index_to_x(stride));
    // plot bottom 400 + 12px font + 4px gap
    assert_eq!(labels[0].y, 416.0);
}

#[test]
fn series_polyline_uses_configured_style() {
    let widget = widget_with(wide_config(), &sixty_prices());
    let frame = widget.build_render_frame().expect("frame");

    assert_eq!(frame.plot_pane.series.len(), 1);
    let line = &frame.plot_pane.series[0];
    assert_eq!(line.series, "price");
    assert_eq!(line.vertices.len(), 60);
    assert_eq!(line.stroke_width, 2.0);
    assert_eq!(
        line.color,
        widget.config().series_styles["price"].color
    );
}

#[test]
fn average_line_is_dashed_and_labelled() {
    let widget = widget_with(wide_config(), &sixty_prices());
    let frame = widget.build_render_frame().expect("frame");

    // (58 * 100000 + 120000 + 50000) / 60 = 99500
    let average_y = widget.mapper().value_to_y(99_500.0);
    assert_eq!(frame.plot_pane.overlay_lines.len(), 1);
    let line = frame.plot_pane.overlay_lines[0];
    assert_eq!(line.y1, average_y);
    assert_eq!(
        line.stroke_style,
        LineStrokeStyle::Dashed {
            dash_px: 5.0,
            gap_px: 5.0
        }
    );
    assert!(
        frame
            .plot_pane
            .annotations
            .iter()
            .any(|text| text.text == "Average")
    );
}

#[test]
fn extremum_gets_marker_and_two_captions() {
    let widget = widget_with(wide_config(), &sixty_prices());
    let frame = widget.build_render_frame().expect("frame");

    assert_eq!(frame.plot_pane.markers.len(), 1);
    let marker = frame.plot_pane.markers[0];
    assert_eq!(marker.index, 3);
    assert_eq!(marker.role, MarkerRole::Extremum);
    assert_eq!(marker.radius_px, 5.0);
    assert_eq!(marker.hit_radius_px, 13.0);

    let value = frame
        .plot_pane
        .annotations
        .iter()
        .find(|text| text.text == "50,000")
        .expect("value caption");
    let caption = frame
        .plot_pane
        .annotations
        .iter()
        .find(|text| text.text == "Lowest")
        .expect("lowest caption");
    assert_eq!(value.x, marker.x);
    assert_eq!(value.y, marker.y + 24.0);
    assert!(caption.y > value.y);
    assert!(value.bold);
}

#[test]
fn active_point_adds_guide_line_and_replaces_its_marker() {
    let mut widget = widget_with(wide_config(), &sixty_prices());

    let _ = widget.set_active_index(Some(3)).expect("select");
    let frame = widget.build_render_frame().expect("frame");
    assert_eq!(frame.plot_pane.markers.len(), 1);
    let active = frame.plot_pane.markers[0];
    assert_eq!(active.role, MarkerRole::Active);
    assert_eq!(active.radius_px, 6.0);
    assert_eq!(active.fill, widget.config().palette.extremum_marker);

    let _ = widget.set_active_index(Some(5)).expect("select");
    let frame = widget.build_render_frame().expect("frame");
    let roles: Vec<MarkerRole> = frame
        .plot_pane
        .markers
        .iter()
        .map(|marker| marker.role)
        .collect();
    assert_eq!(roles, vec![MarkerRole::Extremum, MarkerRole::Active]);
    assert_eq!(
        frame.plot_pane.markers[1].fill,
        widget.config().series_styles["price"].color
    );

    let guide = frame.plot_pane.overlay_lines.last().expect("guide line");
    assert_eq!(guide.x1, 100.0);
    assert_eq!(guide.x2, 100.0);
    assert_eq!(guide.y1, 50.0);
    assert_eq!(guide.y2, 400.0);
    assert!(frame.tooltip.visible);
}

#[test]
fn special_days_get_marker_and_bold_caption_above() {
    let config = wide_config().with_calendar(SpecialDayCalendar::new().with_day(5, 5, "Children's Day"));
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");
    let _ = widget
        .set_records([
            SeriesRecord::new("05-04")
                .with_value("price", 90_000.0)
                .with_timestamp(parse_timestamp("2025-05-04").expect("date")),
            SeriesRecord::new("05-05")
                .with_value("price", 110_000.0)
                .with_timestamp(parse_timestamp("2025-05-05").expect("date")),
        ])
        .expect("records");
    let frame = widget.build_render_frame().expect("frame");

    let special = frame
        .plot_pane
        .markers
        .iter()
        .find(|marker| marker.role == MarkerRole::Special)
        .expect("special marker");
    assert_eq!(special.index, 1);

    let caption = frame
        .plot_pane
        .annotations
        .iter()
        .find(|text| text.text == "Children's Day")
        .expect("holiday caption");
    assert!(caption.bold);
    assert_eq!(caption.y, special.y - 15.0);
}

#[test]
fn blank_special_day_renders_as_an_ordinary_point() {
    let config = wide_config().with_calendar(SpecialDayCalendar::new().with_day(1, 1, ""));
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");
    let _ = widget
        .set_records([
            SeriesRecord::new("01-01")
                .with_value("price", 90_000.0)
                .with_timestamp(parse_timestamp("2026-01-01").expect("date")),
            SeriesRecord::new("01-02")
                .with_value("price", 110_000.0)
                .with_timestamp(parse_timestamp("2026-01-02").expect("date")),
        ])
        .expect("records");

    let frame = widget.build_render_frame().expect("frame");
    assert!(
        frame
            .plot_pane
            .markers
            .iter()
            .all(|marker| marker.role != MarkerRole::Special)
    );
    assert!(frame.plot_pane.annotations.iter().all(|text| !text.text.is_empty()));
    assert!(widget.render().is_ok());
}

#[test]
fn marker_hit_accounts_for_scroll_offset() {
    let mut widget = widget_with(wide_config(), &sixty_prices());
    let marker_y = widget.mapper().to_pixel(3, 50_000.0).y;

    assert_eq!(widget.marker_hit(60.0, marker_y).expect("hit"), Some(3));
    assert_eq!(widget.marker_hit(60.0, marker_y + 14.0).expect("hit"), None);

    let _ = widget.scroll_to_offset(40.0).expect("scroll");
    assert_eq!(widget.marker_hit(20.0, marker_y).expect("hit"), Some(3));
    assert_eq!(widget.marker_hit(60.0, marker_y).expect("hit"), None);
    assert!(widget.marker_hit(f64::INFINITY, 0.0).is_err());
}

#[test]
fn rendered_frame_reports_cursor_and_offset() {
    let mut widget = widget_with(wide_config(), &sixty_prices());
    let _ = widget.pointer_down(300.0).expect("down");
    let frame = widget.build_render_frame().expect("frame");
    assert_eq!(frame.cursor, widget.cursor());
    assert!(frame.validate().is_ok());
    assert!(!frame.is_empty());
}
