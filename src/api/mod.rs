mod axis_label_format;
mod data_controller;
mod interaction_controller;
mod json_contract;
mod layout_coordinator;
mod render_frame_builder;
mod snapshot_controller;
mod summary;
mod widget;
mod widget_accessors;
mod widget_config;
mod widget_init;
mod widget_snapshot;

pub use axis_label_format::{AxisTickFormat, ChartLabels};
pub use json_contract::{WIDGET_SNAPSHOT_JSON_SCHEMA_V1, WidgetSnapshotJsonContractV1};
pub use summary::ChartSummary;
pub use widget::ChartWidget;
pub use widget_config::{ChartWidgetConfig, DEFAULT_INITIAL_SCROLL_DELAY_SECONDS};
pub use widget_snapshot::WidgetSnapshot;

pub use crate::render::SeriesStyle;
