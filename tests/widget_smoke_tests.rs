use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use scroll_chart::api::{WIDGET_SNAPSHOT_JSON_SCHEMA_V1, WidgetSnapshot};
use scroll_chart::core::{SeriesRecord, ViewportClass, ViewportMetrics};
use scroll_chart::interaction::{CaptureChange, DragInput, ScrollMode};
use scroll_chart::render::NullRenderer;
use scroll_chart::source::{CalendarWindowQuery, DataLoad, StaticPriceSource};
use scroll_chart::{ChartError, ChartWidget, ChartWidgetConfig};
use serde_json::{Value, json};

const APRIL_PRICES: [f64; 10] = [
    150_000.0, 140_000.0, 130_000.0, 160_000.0, 170_000.0, 120_000.0, 125_000.0, 90_000.0,
    110_000.0, 130_000.0,
];

fn calendar_payload() -> Value {
    let results: Vec<Value> = APRIL_PRICES
        .iter()
        .enumerate()
        .map(|(i, price)| {
            json!({
                "departureDate": format!("2025-04-{:02}", i + 1),
                "returnDate": format!("2025-04-{:02}", i + 6),
                "totalPrice": price,
                "airline": "KE"
            })
        })
        .collect();
    json!({ "flightWindowInfoResults": results })
}

fn query() -> CalendarWindowQuery {
    CalendarWindowQuery::new(
        "ICN",
        "NRT",
        NaiveDate::from_ymd_opt(2025, 4, 1).expect("date"),
    )
}

fn narrow_calendar_widget() -> ChartWidget<NullRenderer> {
    let config = ChartWidgetConfig::flight_price_calendar(ViewportMetrics::new(360.0, 640.0));
    ChartWidget::new(NullRenderer::default(), config).expect("widget")
}

fn wide_widget_with(prices: &[f64]) -> ChartWidget<NullRenderer> {
    let config = ChartWidgetConfig::new(ViewportMetrics::new(1024.0, 480.0));
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");
    let count = widget
        .set_records(
            prices
                .iter()
                .enumerate()
                .map(|(i, price)| SeriesRecord::new(format!("d{i}")).with_value("price", *price)),
        )
        .expect("records");
    assert_eq!(count, prices.len());
    widget
}

fn sixty_prices() -> Vec<f64> {
    let mut prices = vec![100_000.0; 60];
    prices[1] = 120_000.0;
    prices[3] = 50_000.0;
    prices
}

#[test]
fn empty_widget_renders_a_valid_frame() {
    let config = ChartWidgetConfig::new(ViewportMetrics::new(1024.0, 480.0));
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");

    assert_eq!(widget.point_count(), 0);
    assert_eq!(widget.load_state(), &DataLoad::Idle);
    assert_eq!(widget.domain().ticks.len(), 5);
    assert_eq!(widget.summary().headline, "Loading...");

    widget.render().expect("render");
    let renderer = widget.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_vertex_count, 0);
    assert_eq!(renderer.last_marker_count, 0);
    assert!(!renderer.last_tooltip_visible);
}

#[test]
fn invalid_config_is_rejected() {
    let metrics = ViewportMetrics::new(0.0, 480.0);
    assert!(ChartWidget::new(NullRenderer::default(), ChartWidgetConfig::new(metrics)).is_err());

    let config = ChartWidgetConfig::new(ViewportMetrics::new(800.0, 480.0))
        .with_tracked_series(["price"])
        .with_extremum_series("seats");
    assert!(ChartWidget::new(NullRenderer::default(), config).is_err());

    let config = ChartWidgetConfig::new(ViewportMetrics::new(800.0, 480.0))
        .with_date_label_format("%Q");
    assert!(config.validate().is_err());
    assert!(ChartWidget::new(NullRenderer::default(), config).is_err());
}

#[test]
fn looping_duplicate_doubles_content_width_above_the_floor() {
    let records = |count: usize| {
        (0..count)
            .map(|i| SeriesRecord::new(format!("d{i}")).with_value("price", 100_000.0 + i as f64))
            .collect::<Vec<_>>()
    };
    let widths = |count: usize, looping: bool| {
        let config = ChartWidgetConfig::new(ViewportMetrics::new(1024.0, 480.0))
            .with_duplicate_for_looping(looping);
        let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget");
        let _ = widget.set_records(records(count)).expect("records");
        (widget.mapper().content_width(), widget.geometry().canvas_width_px)
    };

    // 60 * 20px clears the 800px wide floor
    let (single, single_canvas) = widths(60, false);
    let (doubled, doubled_canvas) = widths(60, true);
    assert_eq!(single, 1_200.0);
    assert_eq!(doubled, 2.0 * single);
    // canvas adds the right margin once: (n - 1) * 20 + 30
    assert_eq!(single_canvas, 1_210.0);
    assert_eq!(doubled_canvas, 2_410.0);

    // 10 * 20px sits under the floor, and so does its 20-point duplicate
    assert_eq!(widths(10, false).0, 800.0);
    assert_eq!(widths(10, true).0, 800.0);
}

#[test]
fn set_records_derives_layout_and_renders_markers() {
    let mut widget = wide_widget_with(&sixty_prices());

    assert_eq!(widget.geometry().class, ViewportClass::Wide);
    // 59 * 20 + 0 + 30
    assert_eq!(widget.geometry().canvas_width_px, 1_210.0);
    assert_eq!(widget.scroll_state().viewport_width_px(), 979.0);
    assert_eq!(widget.domain().max, 300_000.0);
    assert_eq!(widget.store().extremum_index(), Some(3));

    widget.render().expect("render");
    let renderer = widget.renderer();
    assert_eq!(renderer.last_vertex_count, 60);
    assert_eq!(renderer.last_marker_count, 1);
    assert_eq!(renderer.last_tick_count, 5);
}

#[test]
fn hover_and_clear_selection_drive_the_tooltip() {
    let mut widget = wide_widget_with(&sixty_prices());

    assert_eq!(widget.hover_at(100.0).expect("hover"), Some(5));
    assert_eq!(widget.active_index(), Some(5));
    assert!(widget.tooltip().visible);
    assert_eq!(widget.tooltip().title, "d5");

    assert!(widget.clear_selection().expect("clear"));
    assert!(!widget.tooltip().visible);
    assert!(widget.hover_at(f64::NAN).is_err());
    assert!(widget.set_active_index(Some(60)).is_err());
}

#[test]
fn selecting_a_huge_jump_keeps_the_tooltip_consistent() {
    let mut widget = wide_widget_with(&[0.001, 1e27]);

    assert!(widget.set_active_index(Some(1)).is_ok());
    assert_eq!(widget.active_index(), Some(1));
    let tooltip = widget.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.anchor_data_index, Some(1));
    assert_eq!(tooltip.title, "d1");
    let delta = tooltip.items[0].delta.as_ref().expect("delta");
    assert!(delta.percentage.is_finite());
    assert!(widget.render().is_ok());
}

#[test]
fn tap_prefers_marker_under_finger_over_nearest_column() {
    let mut widget = wide_widget_with(&sixty_prices());
    let extremum_y = widget.mapper().to_pixel(3, 50_000.0).y;

    // nearest column would be 4, but the extremum marker at x = 60 is hit
    assert_eq!(widget.tap_at(72.0, extremum_y + 3.0).expect("tap"), Some(3));
    assert_eq!(widget.marker_hit(72.0, extremum_y).expect("hit"), Some(3));

    assert_eq!(widget.tap_at(100.0, 20.0).expect("tap"), Some(5));
    assert_eq!(widget.active_index(), Some(5));
}

#[test]
fn drag_scrolls_the_plot_and_moves_the_tooltip() {
    let mut widget = wide_widget_with(&sixty_prices());
    let _ = widget.hover_at(100.0).expect("hover");
    let before_x = widget.tooltip().screen_x;

    let start = widget.pointer_down(500.0).expect("down");
    assert_eq!(start.capture, Some(CaptureChange::Acquire(DragInput::Pointer)));
    let moved = widget.pointer_move(450.0).expect("move");
    assert!(moved.offset_changed);
    assert_eq!(widget.scroll_offset_px(), 100.0);
    assert_eq!(widget.tooltip().screen_x, before_x - 100.0);

    let end = widget.pointer_up().expect("up");
    assert_eq!(end.capture, Some(CaptureChange::Release(DragInput::Pointer)));
    assert_eq!(widget.scroll_mode(), ScrollMode::Idle);

    widget.render().expect("render");
    assert_eq!(widget.renderer().last_scroll_offset_px, 100.0);
}

#[test]
fn successful_load_selects_lowest_fare_and_schedules_scroll() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::new(calendar_payload());

    assert!(widget.load_from(&mut source, &query()).expect("load"));
    assert_eq!(source.requests(), 1);
    assert_eq!(widget.load_state(), &DataLoad::Loaded { point_count: 20 });
    assert_eq!(widget.point_count(), 20);
    assert_eq!(widget.store().extremum_index(), Some(7));
    assert_eq!(widget.active_index(), Some(7));
    assert!(widget.tooltip().visible);
    assert_eq!(widget.tooltip().title, "04월 08일");
    assert_eq!(widget.tooltip().screen_y, 20.0);
    assert!(widget.has_pending_initial_scroll());

    assert!(!widget.tick(1.0).expect("tick"));
    assert!(widget.has_pending_initial_scroll());
    assert_eq!(widget.scroll_offset_px(), 0.0);

    assert!(!widget.tick(2.0).expect("tick"));
    assert!(!widget.has_pending_initial_scroll());
    assert_eq!(widget.scroll_mode(), ScrollMode::AnimatingToTarget);

    // 7 * 40 - 315 / 2 + 20
    assert!(widget.tick(1.0).expect("tick"));
    assert_abs_diff_eq!(widget.scroll_offset_px(), 142.5, epsilon = 1e-9);
    assert_eq!(widget.scroll_mode(), ScrollMode::Idle);
    assert_abs_diff_eq!(widget.tooltip().screen_x, 137.5, epsilon = 1e-9);
    assert!(!widget.tick(0.1).expect("tick"));
}

#[test]
fn load_happens_only_once() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::new(calendar_payload());

    assert!(widget.load_from(&mut source, &query()).expect("load"));
    assert!(!widget.load_from(&mut source, &query()).expect("second load"));
    assert_eq!(source.requests(), 1);
    assert!(!widget.begin_load());
    assert!(!widget.complete_load(Ok(calendar_payload())).expect("late"));
    assert_eq!(widget.point_count(), 20);
}

#[test]
fn failed_load_leaves_an_empty_chart() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::failing("gateway timeout");

    assert!(widget.load_from(&mut source, &query()).expect("load"));
    match widget.load_state() {
        DataLoad::Failed { message } => assert!(message.contains("gateway timeout")),
        other => panic!("unexpected load state: {other:?}"),
    }
    assert_eq!(widget.point_count(), 0);
    assert!(!widget.has_pending_initial_scroll());
    assert!(widget.load_state().is_resolved());

    widget.render().expect("render");
    assert_eq!(widget.renderer().last_vertex_count, 0);
    assert_eq!(widget.summary().headline, "Loading...");
}

#[test]
fn manual_load_lifecycle_accepts_fetch_errors() {
    let mut widget = narrow_calendar_widget();
    assert!(widget.begin_load());
    assert!(widget.load_state().is_pending());
    assert!(
        widget
            .complete_load(Err(ChartError::DataFetch("offline".to_owned())))
            .expect("complete")
    );
    assert!(matches!(widget.load_state(), DataLoad::Failed { .. }));
}

#[test]
fn drag_cancels_pending_initial_scroll() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::new(calendar_payload());
    assert!(widget.load_from(&mut source, &query()).expect("load"));
    assert!(widget.has_pending_initial_scroll());

    let _ = widget.touch_start(200.0).expect("touch");
    assert!(!widget.has_pending_initial_scroll());
    let _ = widget.touch_end().expect("touch end");

    assert!(!widget.tick(5.0).expect("tick"));
    assert_eq!(widget.scroll_mode(), ScrollMode::Idle);
}

#[test]
fn summary_reports_range_and_lowest_fare() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::new(calendar_payload());
    assert!(widget.load_from(&mut source, &query()).expect("load"));

    let summary = widget.summary();
    assert_eq!(summary.headline, "90,000원~");
    assert_eq!(summary.stats.min, 90_000.0);
    assert_eq!(summary.stats.max, 170_000.0);
    assert_eq!(
        summary.date_range,
        Some(("25.04.01".to_owned(), "25.04.10".to_owned()))
    );
}

#[test]
fn resize_switches_layout_class_and_reclamps_scroll() {
    let mut widget = wide_widget_with(&sixty_prices());
    let _ = widget.scroll_to_offset(231.0).expect("scroll");
    assert_eq!(widget.scroll_offset_px(), 231.0);

    widget
        .resize(ViewportMetrics::new(360.0, 640.0))
        .expect("resize");
    assert_eq!(widget.geometry().class, ViewportClass::Narrow);
    assert_eq!(widget.geometry().point_spacing_px, 40.0);
    assert_eq!(widget.scroll_state().viewport_width_px(), 315.0);
    assert_eq!(widget.scroll_offset_px(), 231.0);

    widget
        .resize(ViewportMetrics::new(2_000.0, 640.0))
        .expect("resize");
    assert_eq!(widget.scroll_offset_px(), 0.0);
    assert!(widget.resize(ViewportMetrics::new(f64::NAN, 10.0)).is_err());
}

#[test]
fn scroll_to_index_validates_range() {
    let mut widget = wide_widget_with(&sixty_prices());
    assert!(widget.scroll_to_index(60).is_err());
    assert!(widget.scroll_to_index(59).expect("scroll").is_some());
    assert!(widget.tick(-1.0).is_err());
}

#[test]
fn snapshot_contract_round_trips() {
    let mut widget = narrow_calendar_widget();
    let mut source = StaticPriceSource::new(calendar_payload());
    assert!(widget.load_from(&mut source, &query()).expect("load"));

    let contract = widget
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("contract");
    assert!(contract.contains(&format!(
        "\"schema_version\": {WIDGET_SNAPSHOT_JSON_SCHEMA_V1}"
    )));

    let parsed = WidgetSnapshot::from_json_compat_str(&contract).expect("parse contract");
    assert_eq!(parsed.point_count, 20);
    assert_eq!(parsed.active_index, Some(7));
    assert_eq!(parsed.extremum_index, Some(7));
    assert_eq!(parsed.summary.headline, "90,000원~");

    let bare = widget.snapshot_json_pretty().expect("snapshot");
    let parsed_bare = WidgetSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare.load, DataLoad::Loaded { point_count: 20 });

    let future = contract.replace(
        &format!("\"schema_version\": {WIDGET_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );
    assert!(WidgetSnapshot::from_json_compat_str(&future).is_err());
}

#[test]
fn config_json_round_trips() {
    let config = ChartWidgetConfig::flight_price_calendar(ViewportMetrics::new(360.0, 640.0));
    let json = config.to_json_pretty().expect("json");
    let parsed = ChartWidgetConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed.tracked_series, config.tracked_series);
    assert_eq!(parsed.date_label_format, "%m월 %d일");
    assert!(parsed.duplicate_for_looping);
    assert!(ChartWidgetConfig::from_json_str("{").is_err());
}
