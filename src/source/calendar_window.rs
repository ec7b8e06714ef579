use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::SeriesRecord;
use crate::core::primitives::parse_timestamp;
use crate::error::{ChartError, ChartResult};

/// Series name carrying the round-trip total price.
pub const PRICE_SERIES: &str = "price";
/// Metadata key holding the operating airline.
pub const AIRLINE_METADATA_KEY: &str = "airline";
/// Default `chrono` format for x-axis labels built from the departure date.
pub const DEFAULT_DATE_LABEL_FORMAT: &str = "%m-%d";

const RESULTS_KEY: &str = "flightWindowInfoResults";

/// Rejects blank label formats and unknown `chrono` specifiers.
pub fn validate_date_label_format(format: &str) -> ChartResult<()> {
    if format.trim().is_empty() {
        return Err(ChartError::InvalidData(
            "date label format must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidData(format!(
            "date label format `{format}` has an invalid specifier"
        )));
    }
    Ok(())
}

/// POST body of the price calendar window request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWindowQuery {
    pub airlines: Vec<String>,
    pub departure_date: NaiveDate,
    pub from: String,
    pub international: bool,
    /// Trip length in days between departure and return.
    pub period: u32,
    pub to: String,
    /// Maximum number of transfers; `0` means direct flights only.
    pub transfer: u32,
}

impl CalendarWindowQuery {
    /// Creates a query for every airline, international, five-day trips, direct only.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, departure_date: NaiveDate) -> Self {
        Self {
            airlines: vec!["All".to_owned()],
            departure_date,
            from: from.into(),
            international: true,
            period: 5,
            to: to.into(),
            transfer: 0,
        }
    }

    #[must_use]
    pub fn with_airlines<I, S>(mut self, airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines = airlines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub fn with_transfer(mut self, transfer: u32) -> Self {
        self.transfer = transfer;
        self
    }

    #[must_use]
    pub fn domestic(mut self) -> Self {
        self.international = false;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "query origin and destination must not be empty".to_owned(),
            ));
        }
        if self.airlines.is_empty() {
            return Err(ChartError::InvalidData(
                "query needs at least one airline filter".to_owned(),
            ));
        }
        if self.period == 0 {
            return Err(ChartError::InvalidData(
                "query period must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_value(&self) -> ChartResult<Value> {
        serde_json::to_value(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize calendar query: {e}"))
        })
    }
}

/// One entry of the `flightWindowInfoResults` response array.
///
/// Every field is optional on the wire; validation happens in
/// [`calendar_records`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightWindowInfo {
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub airline: Option<String>,
}

impl FlightWindowInfo {
    /// Converts the entry into a price record, `None` when it is unusable.
    #[must_use]
    pub fn to_record(&self, date_label_format: &str) -> Option<SeriesRecord> {
        let departure = self.departure_date.as_deref().and_then(parse_timestamp)?;
        let return_at = self.return_date.as_deref().and_then(parse_timestamp)?;
        let price = self
            .total_price
            .filter(|price| price.is_finite() && *price > 0.0)?;

        let mut label = String::new();
        // invalid format specifiers surface as a formatting error
        write!(label, "{}", departure.format(date_label_format)).ok()?;

        let mut record = SeriesRecord::new(label)
            .with_value(PRICE_SERIES, price)
            .with_timestamp(departure)
            .with_end_timestamp(return_at);
        if let Some(airline) = self.airline.as_deref().filter(|name| !name.is_empty()) {
            record = record.with_metadata(AIRLINE_METADATA_KEY, airline);
        }
        Some(record)
    }
}

/// Extracts price records from a calendar window response.
///
/// A payload without a `flightWindowInfoResults` array yields no records.
/// Entries missing a departure or return date, or with a non-positive price,
/// are skipped.
#[must_use]
pub fn calendar_records(raw: &Value, date_label_format: &str) -> Vec<SeriesRecord> {
    let Some(items) = raw.get(RESULTS_KEY).and_then(Value::as_array) else {
        warn!(key = RESULTS_KEY, "calendar response has no result list");
        return Vec::new();
    };

    let records: Vec<SeriesRecord> = items
        .iter()
        .filter_map(|item| {
            let info = match FlightWindowInfo::deserialize(item) {
                Ok(info) => info,
                Err(err) => {
                    trace!(error = %err, "dropping undecodable calendar entry");
                    return None;
                }
            };
            let record = info.to_record(date_label_format);
            if record.is_none() {
                trace!(
                    departure = ?info.departure_date,
                    price = ?info.total_price,
                    "dropping incomplete calendar entry"
                );
            }
            record
        })
        .collect();

    debug!(
        raw_count = items.len(),
        kept_count = records.len(),
        "decoded calendar window response"
    );
    records
}
