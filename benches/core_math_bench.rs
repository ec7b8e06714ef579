use criterion::{Criterion, criterion_group, criterion_main};
use scroll_chart::core::{
    AxisDomainCalculator, DataStore, GeometryMapper, LayoutProfiles, SeriesRecord,
    ViewportGeometry, ViewportMetrics,
};
use scroll_chart::interaction::ScrollSyncController;
use scroll_chart::render::NullRenderer;
use scroll_chart::{ChartWidget, ChartWidgetConfig};
use std::hint::black_box;

fn price_records(count: usize) -> Vec<SeriesRecord> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let price = 150_000.0 + (t * 0.37).sin() * 40_000.0 + (i % 7) as f64 * 1_500.0;
            SeriesRecord::new(format!("{:02}-{:02}", i / 28 % 12 + 1, i % 28 + 1))
                .with_value("price", price)
        })
        .collect()
}

fn bench_y_domain(c: &mut Criterion) {
    let calculator = AxisDomainCalculator::default();

    c.bench_function("y_domain_rounded_headroom", |b| {
        b.iter(|| {
            let _ = calculator.compute_y_domain(black_box(123_456.0), black_box(350.0));
        })
    });
}

fn bench_series_projection_10k(c: &mut Criterion) {
    let mut store = DataStore::new(["price"]).expect("store");
    store.ingest(price_records(10_000));
    let geometry = ViewportGeometry::derive(
        ViewportMetrics::new(1920.0, 1080.0),
        LayoutProfiles::default(),
        store.len(),
    )
    .expect("geometry");
    let domain = AxisDomainCalculator::default()
        .compute_y_domain(store.max_tracked_value(), geometry.plot_height_px());
    let mapper = GeometryMapper::new(geometry, domain);

    c.bench_function("series_projection_10k", |b| {
        b.iter(|| {
            let _ = mapper.project_series(black_box(store.points()), black_box("price"));
        })
    });
}

fn bench_drag_sequence(c: &mut Criterion) {
    c.bench_function("pointer_drag_200_moves", |b| {
        b.iter(|| {
            let mut scroll = ScrollSyncController::new(980.0, 20_000.0).expect("scroll");
            let _ = scroll.pointer_down(500.0).expect("down");
            for step in 0..200 {
                let _ = scroll
                    .pointer_move(black_box(500.0 - f64::from(step) * 3.0))
                    .expect("move");
            }
            let _ = scroll.pointer_up();
        })
    });
}

fn bench_widget_frame_2k(c: &mut Criterion) {
    let config = ChartWidgetConfig::new(ViewportMetrics::new(1600.0, 900.0))
        .with_duplicate_for_looping(true);
    let mut widget = ChartWidget::new(NullRenderer::default(), config).expect("widget init");
    let _ = widget.set_records(price_records(1_000)).expect("records");
    let _ = widget.hover_at(400.0).expect("hover");

    c.bench_function("widget_render_frame_2k", |b| {
        b.iter(|| {
            let _ = widget.build_render_frame().expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_y_domain,
    bench_series_projection_10k,
    bench_drag_sequence,
    bench_widget_frame_2k
);
criterion_main!(benches);
