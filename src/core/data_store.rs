use chrono::NaiveDateTime;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::calendar::SpecialDayCalendar;
use crate::core::primitives::format_short_date;
use crate::error::{ChartError, ChartResult};

/// Semantic tags attached to one data point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointFlags {
    /// Calendar marker (holiday or similar); `annotation_text` carries its name.
    pub special: bool,
    /// Minimum of the designated extremum series within its loop period.
    pub is_extremum: bool,
    pub annotation_text: Option<String>,
}

/// One validated sample on the time axis.
///
/// Tracked series values are always finite and positive; invalid samples are
/// dropped during ingestion instead of being represented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub index: usize,
    pub label: String,
    pub values: IndexMap<String, f64>,
    pub flags: PointFlags,
    pub source_timestamp: Option<NaiveDateTime>,
    pub source_end_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl DataPoint {
    #[must_use]
    pub fn value(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// External record before validation and index assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub label: String,
    #[serde(default)]
    pub values: IndexMap<String, f64>,
    #[serde(default)]
    pub source_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub source_end_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl SeriesRecord {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, series: impl Into<String>, value: f64) -> Self {
        self.values.insert(series.into(), value);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.source_timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_end_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.source_end_timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Summary statistics for one series.
///
/// All fields are `0.0` when the series has no usable values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    /// Mean rounded to the nearest integer.
    pub avg: f64,
}

/// Owner of the ordered point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStore {
    points: Vec<DataPoint>,
    tracked_series: Vec<String>,
    extremum_series: String,
    period_len: usize,
    calendar: SpecialDayCalendar,
}

impl DataStore {
    /// Creates an empty store. The first tracked series drives extremum marking.
    pub fn new<I, S>(tracked_series: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracked: Vec<String> = Vec::new();
        for series in tracked_series {
            let series = series.into();
            if series.is_empty() {
                return Err(ChartError::InvalidData(
                    "tracked series name must not be empty".to_owned(),
                ));
            }
            if tracked.contains(&series) {
                return Err(ChartError::InvalidData(format!(
                    "tracked series `{series}` declared twice"
                )));
            }
            tracked.push(series);
        }
        let Some(extremum_series) = tracked.first().cloned() else {
            return Err(ChartError::InvalidData(
                "data store needs at least one tracked series".to_owned(),
            ));
        };

        Ok(Self {
            points: Vec::new(),
            tracked_series: tracked,
            extremum_series,
            period_len: 0,
            calendar: SpecialDayCalendar::default(),
        })
    }

    pub fn with_extremum_series(mut self, series: impl Into<String>) -> ChartResult<Self> {
        let series = series.into();
        if !self.tracked_series.contains(&series) {
            return Err(ChartError::InvalidData(format!(
                "extremum series `{series}` is not tracked"
            )));
        }
        self.extremum_series = series;
        mark_extrema(&mut self.points, &self.extremum_series, self.period_len);
        Ok(self)
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: SpecialDayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub fn tracked_series(&self) -> &[String] {
        &self.tracked_series
    }

    #[must_use]
    pub fn extremum_series(&self) -> &str {
        &self.extremum_series
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Length of one loop period; equals `len()` unless the data was duplicated.
    #[must_use]
    pub fn period_len(&self) -> usize {
        self.period_len
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.period_len = 0;
    }

    /// Replaces the sequence with validated points built from `records`.
    pub fn ingest<I>(&mut self, records: I) -> &[DataPoint]
    where
        I: IntoIterator<Item = SeriesRecord>,
    {
        self.points = ingest_records(records, &self.tracked_series, &self.calendar);
        self.period_len = self.points.len();
        mark_extrema(&mut self.points, &self.extremum_series, self.period_len);
        &self.points
    }

    /// Ingests a JSON list of [`SeriesRecord`] objects.
    ///
    /// Anything other than a list produces an empty store; list entries that do
    /// not deserialize are skipped.
    pub fn ingest_json(&mut self, raw: &Value) -> &[DataPoint] {
        let Some(items) = raw.as_array() else {
            warn!("raw records are not a list, treating as no data");
            self.clear();
            return &self.points;
        };

        let records: Vec<SeriesRecord> = items
            .iter()
            .filter_map(|item| match SeriesRecord::deserialize(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    trace!(error = %err, "dropping malformed record");
                    None
                }
            })
            .collect();
        self.ingest(records)
    }

    /// Concatenates the sequence with itself for the looping scroll illusion.
    ///
    /// Indices are reassigned over the doubled range and extremum flags are
    /// re-derived once per loop period.
    pub fn duplicate_for_looping(&mut self) {
        if self.points.is_empty() {
            return;
        }
        let mut doubled = Vec::with_capacity(self.points.len() * 2);
        doubled.extend(self.points.iter().cloned());
        doubled.extend(self.points.iter().cloned());
        for (index, point) in doubled.iter_mut().enumerate() {
            point.index = index;
        }
        self.points = doubled;
        mark_extrema(&mut self.points, &self.extremum_series, self.period_len);
        debug!(
            point_count = self.points.len(),
            period_len = self.period_len,
            "duplicated data for looping"
        );
    }

    #[must_use]
    pub fn stats(&self, series: &str) -> SeriesStats {
        compute_stats(&self.points, series)
    }

    /// Largest value over every tracked series, `0.0` when empty.
    #[must_use]
    pub fn max_tracked_value(&self) -> f64 {
        self.tracked_series
            .iter()
            .map(|series| self.stats(series).max)
            .fold(0.0, f64::max)
    }

    /// First point flagged as extremum.
    #[must_use]
    pub fn extremum_index(&self) -> Option<usize> {
        self.points
            .iter()
            .position(|point| point.flags.is_extremum)
    }

    /// Timestamps of the first and last point, when both are known.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.points.first()?.source_timestamp?;
        let last = self.points.last()?.source_timestamp?;
        Some((first, last))
    }

    /// `yy.mm.dd` rendering of [`DataStore::date_range`].
    #[must_use]
    pub fn formatted_date_range(&self) -> Option<(String, String)> {
        self.date_range()
            .map(|(first, last)| (format_short_date(first), format_short_date(last)))
    }
}

/// Validates `records` and assigns sequential indices to the survivors.
///
/// A record is dropped when any tracked series is missing, non-finite or
/// non-positive. Calendar annotations are applied from `source_timestamp`.
pub fn ingest_records<I>(
    records: I,
    tracked_series: &[String],
    calendar: &SpecialDayCalendar,
) -> Vec<DataPoint>
where
    I: IntoIterator<Item = SeriesRecord>,
{
    let mut points = Vec::new();
    let mut raw_count = 0usize;

    for mut record in records {
        raw_count += 1;
        if let Some(series) = tracked_series.iter().find(|series| {
            !record
                .values
                .get(series.as_str())
                .is_some_and(|value| value.is_finite() && *value > 0.0)
        }) {
            trace!(
                label = %record.label,
                series = %series,
                "dropping record with invalid tracked value"
            );
            continue;
        }
        record.values.retain(|_, value| value.is_finite());

        let annotation = record
            .source_timestamp
            .and_then(|timestamp| calendar.annotation_for(timestamp))
            .map(str::to_owned);

        points.push(DataPoint {
            index: points.len(),
            label: record.label,
            values: record.values,
            flags: PointFlags {
                special: annotation.is_some(),
                is_extremum: false,
                annotation_text: annotation,
            },
            source_timestamp: record.source_timestamp,
            source_end_timestamp: record.source_end_timestamp,
            metadata: record.metadata,
        });
    }

    debug!(raw_count, kept_count = points.len(), "ingested records");
    points
}

/// Computes min/max/avg over the usable values of `series`.
#[must_use]
pub fn compute_stats(points: &[DataPoint], series: &str) -> SeriesStats {
    let values: Vec<f64> = points
        .iter()
        .filter_map(|point| point.value(series))
        .filter(|value| value.is_finite() && *value != 0.0)
        .collect();

    let (Some(min), Some(max)) = (
        values.iter().copied().map(OrderedFloat).min(),
        values.iter().copied().map(OrderedFloat).max(),
    ) else {
        return SeriesStats::default();
    };

    let sum: f64 = values.iter().sum();
    SeriesStats {
        min: min.into_inner(),
        max: max.into_inner(),
        avg: (sum / values.len() as f64).round(),
    }
}

/// Flags the minimum of `series` once per `period_len`-sized chunk.
///
/// Ties resolve to the first occurrence within the chunk. A `period_len` of
/// zero treats the whole slice as one period.
pub fn mark_extrema(points: &mut [DataPoint], series: &str, period_len: usize) {
    for point in points.iter_mut() {
        point.flags.is_extremum = false;
    }
    if points.is_empty() {
        return;
    }

    let period = if period_len == 0 {
        points.len()
    } else {
        period_len
    };
    for chunk in points.chunks_mut(period) {
        let mut best: Option<(usize, OrderedFloat<f64>)> = None;
        for (offset, point) in chunk.iter().enumerate() {
            let Some(value) = point.value(series).filter(|value| value.is_finite()) else {
                continue;
            };
            let value = OrderedFloat(value);
            if best.is_none_or(|(_, current)| value < current) {
                best = Some((offset, value));
            }
        }
        if let Some((offset, _)) = best {
            chunk[offset].flags.is_extremum = true;
        }
    }
}
