use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::{CalendarWindowQuery, PriceSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Blocking HTTP implementation of [`PriceSource`].
///
/// Sends the query as a JSON POST body and returns the decoded response.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpPriceSource {
    pub fn new(endpoint: impl Into<String>) -> ChartResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> ChartResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "price source endpoint must not be empty".to_owned(),
            ));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChartError::DataFetch(format!("http client error: {e}")))?;
        Ok(Self { endpoint, client })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&mut self, query: &CalendarWindowQuery) -> ChartResult<Value> {
        query.validate()?;
        debug!(endpoint = %self.endpoint, from = %query.from, to = %query.to, "fetching price calendar");
        self.client
            .post(&self.endpoint)
            .json(query)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| ChartError::DataFetch(format!("price calendar request error: {e}")))?
            .json::<Value>()
            .map_err(|e| ChartError::DataFetch(format!("price calendar decode error: {e}")))
    }
}
