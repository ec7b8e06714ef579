pub mod axis_domain;
pub mod calendar;
pub mod data_store;
pub mod geometry;
pub mod primitives;
pub mod types;

pub use axis_domain::{AxisDomain, AxisDomainCalculator, XLabelDensity, YDomainPolicy};
pub use calendar::SpecialDayCalendar;
pub use data_store::{
    DataPoint, DataStore, PointFlags, SeriesRecord, SeriesStats, compute_stats, ingest_records,
    mark_extrema,
};
pub use geometry::{
    GeometryMapper, LayoutProfile, LayoutProfiles, ViewportGeometry, WidthFloor, content_width,
    to_index, to_pixel,
};
pub use types::{DEFAULT_NARROW_BREAKPOINT_PX, PixelPoint, ViewportClass, ViewportMetrics};
