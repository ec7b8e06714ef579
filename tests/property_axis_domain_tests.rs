use proptest::prelude::*;
use scroll_chart::core::axis_domain::{DEFAULT_GRANULARITY, ROUNDED_TICK_COUNT};
use scroll_chart::core::{AxisDomainCalculator, ViewportClass};

proptest! {
    #[test]
    fn rounded_domain_always_clears_the_data_max(
        max_value in 1.0f64..50_000_000.0,
        plot_height in 1.0f64..2_000.0
    ) {
        let domain = AxisDomainCalculator::default().compute_y_domain(max_value, plot_height);

        prop_assert_eq!(domain.min, 0.0);
        prop_assert!(domain.max >= max_value + DEFAULT_GRANULARITY - 1e-6);
        prop_assert!(domain.max <= max_value + 2.0 * DEFAULT_GRANULARITY + 1e-6);
        prop_assert_eq!(domain.ticks.len(), ROUNDED_TICK_COUNT);
        prop_assert_eq!(domain.ticks.last().copied(), Some(domain.max));
        prop_assert!(domain.ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!((domain.tick_interval_px * 4.0 - plot_height).abs() <= 1e-9);
    }

    #[test]
    fn label_interval_keeps_labels_under_target(
        point_count in 0usize..2_000,
        narrow in any::<bool>()
    ) {
        let class = if narrow { ViewportClass::Narrow } else { ViewportClass::Wide };
        let interval = AxisDomainCalculator::default().compute_x_label_interval(point_count, class);
        let labels = point_count.div_ceil(interval + 1);

        prop_assert!(labels <= 10);
    }
}
