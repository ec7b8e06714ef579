use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

/// Parses the timestamp shapes accepted at the data-source boundary.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD`.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.naive_local());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a timestamp as `yy.mm.dd`.
#[must_use]
pub fn format_short_date(timestamp: NaiveDateTime) -> String {
    format!(
        "{:02}.{:02}.{:02}",
        timestamp.year().rem_euclid(100),
        timestamp.month(),
        timestamp.day()
    )
}

/// Formats a value with thousands separators, e.g. `120000.0` -> `120,000`.
///
/// Fractional parts are kept up to two decimals with trailing zeros removed.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let integer = abs.trunc();
    let fraction = abs - integer;

    let digits = format!("{integer:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction > 0.0 {
        let cents = format!("{fraction:.2}");
        let trimmed = cents.trim_start_matches('0').trim_end_matches('0');
        if trimmed != "." {
            grouped.push_str(trimmed);
        }
    }

    if negative && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Like [`format_grouped`] but always carries a sign.
#[must_use]
pub fn format_signed_grouped(value: f64) -> String {
    if value < 0.0 {
        format_grouped(value)
    } else {
        format!("+{}", format_grouped(value))
    }
}

/// Rounds `value` to `places` decimals, half away from zero.
pub fn round_decimal(value: f64, places: u32) -> ChartResult<Decimal> {
    let decimal = Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData(format!("{value} cannot be represented as decimal"))
    })?;
    Ok(decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}
