//! Data-source boundary: the calendar window request, its response decoding
//! and the one-shot load state.

mod calendar_window;
#[cfg(feature = "http-source")]
mod http;

pub use calendar_window::{
    AIRLINE_METADATA_KEY, CalendarWindowQuery, DEFAULT_DATE_LABEL_FORMAT, FlightWindowInfo,
    PRICE_SERIES, calendar_records, validate_date_label_format,
};
#[cfg(feature = "http-source")]
pub use http::HttpPriceSource;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Anything that can answer a calendar window query with a raw JSON payload.
pub trait PriceSource {
    fn fetch(&mut self, query: &CalendarWindowQuery) -> ChartResult<Value>;
}

/// In-memory source returning a canned payload or a canned failure.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPriceSource {
    response: Result<Value, String>,
    requests: usize,
}

impl StaticPriceSource {
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self {
            response: Ok(payload),
            requests: 0,
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            requests: 0,
        }
    }

    /// Number of `fetch` calls served so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl PriceSource for StaticPriceSource {
    fn fetch(&mut self, query: &CalendarWindowQuery) -> ChartResult<Value> {
        query.validate()?;
        self.requests += 1;
        self.response.clone().map_err(ChartError::DataFetch)
    }
}

/// Lifecycle of the single data load a widget performs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataLoad {
    #[default]
    Idle,
    Pending,
    Loaded { point_count: usize },
    Failed { message: String },
}

impl DataLoad {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the load already resolved, successfully or not.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed { .. })
    }
}
