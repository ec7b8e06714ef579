use chrono::{Datelike, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Recurring calendar days annotated on the chart (holidays and the like).
///
/// Keys are `MM-DD` so one entry matches the same day in every year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDayCalendar {
    days: IndexMap<String, String>,
}

impl SpecialDayCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Public holidays highlighted by the flight price calendar.
    #[must_use]
    pub fn korean_public_holidays() -> Self {
        Self::new()
            .with_day(12, 25, "Christmas")
            .with_day(1, 29, "Seollal")
            .with_day(3, 1, "Independence Movement Day")
            .with_day(5, 1, "Workers' Day")
            .with_day(5, 5, "Children's Day")
            .with_day(8, 15, "Liberation Day")
            .with_day(10, 3, "National Foundation Day")
            .with_day(10, 9, "Hangul Day")
    }

    #[must_use]
    pub fn with_day(mut self, month: u32, day: u32, annotation: impl Into<String>) -> Self {
        self.days.insert(day_key(month, day), annotation.into());
        self
    }

    /// Blank annotations count as no annotation.
    #[must_use]
    pub fn annotation_for(&self, timestamp: NaiveDateTime) -> Option<&str> {
        self.days
            .get(&day_key(timestamp.month(), timestamp.day()))
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn day_key(month: u32, day: u32) -> String {
    format!("{month:02}-{day:02}")
}
