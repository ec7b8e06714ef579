use serde_json::Value;
use tracing::{debug, warn};

use crate::core::SeriesRecord;
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::source::{CalendarWindowQuery, DataLoad, PriceSource, calendar_records};

use super::ChartWidget;
use super::widget::PendingScroll;

impl<R: Renderer> ChartWidget<R> {
    /// Replaces the data with validated points built from `records`.
    ///
    /// Returns the number of points kept, after looping duplication.
    pub fn set_records<I>(&mut self, records: I) -> ChartResult<usize>
    where
        I: IntoIterator<Item = SeriesRecord>,
    {
        self.store.ingest(records);
        self.apply_ingested_data()
    }

    /// Ingests a JSON list of series records; anything else clears the data.
    pub fn ingest_json(&mut self, raw: &Value) -> ChartResult<usize> {
        self.store.ingest_json(raw);
        self.apply_ingested_data()
    }

    /// Ingests a price calendar window response.
    pub fn ingest_calendar_response(&mut self, raw: &Value) -> ChartResult<usize> {
        let records = calendar_records(raw, &self.config.date_label_format);
        self.set_records(records)
    }

    /// Marks the single data load as in flight.
    ///
    /// Returns `false` when a load was already started; a widget loads once.
    pub fn begin_load(&mut self) -> bool {
        if self.load != DataLoad::Idle {
            warn!(state = ?self.load, "ignoring second data load request");
            return false;
        }
        self.load = DataLoad::Pending;
        debug!("data load started");
        true
    }

    /// Resolves the pending load with a raw calendar response or a failure.
    ///
    /// Failures leave an empty chart instead of surfacing an error. Returns
    /// `false` when no load was pending, e.g. a late duplicate completion.
    pub fn complete_load(&mut self, result: ChartResult<Value>) -> ChartResult<bool> {
        if !self.load.is_pending() {
            warn!(state = ?self.load, "ignoring data load completion without a pending load");
            return Ok(false);
        }

        match result {
            Ok(raw) => {
                let point_count = self.ingest_calendar_response(&raw)?;
                self.load = DataLoad::Loaded { point_count };
                self.after_successful_load()?;
                debug!(point_count, "data load finished");
            }
            Err(err) => {
                warn!(error = %err, "data load failed, showing empty chart");
                self.store.clear();
                self.tooltip.set_active(None);
                self.pending_scroll = None;
                self.load = DataLoad::Failed {
                    message: err.to_string(),
                };
                self.refresh_layout()?;
            }
        }
        Ok(true)
    }

    /// Runs the whole one-shot load against `source`.
    pub fn load_from<S>(&mut self, source: &mut S, query: &CalendarWindowQuery) -> ChartResult<bool>
    where
        S: PriceSource + ?Sized,
    {
        if !self.begin_load() {
            return Ok(false);
        }
        let result = source.fetch(query);
        self.complete_load(result)
    }

    fn apply_ingested_data(&mut self) -> ChartResult<usize> {
        if self.config.duplicate_for_looping {
            self.store.duplicate_for_looping();
        }
        if self
            .tooltip
            .active()
            .is_some_and(|index| index >= self.store.len())
        {
            self.tooltip.set_active(None);
        }
        if self
            .pending_scroll
            .is_some_and(|pending| pending.index >= self.store.len())
        {
            self.pending_scroll = None;
        }
        self.refresh_layout()?;
        Ok(self.store.len())
    }

    fn after_successful_load(&mut self) -> ChartResult<()> {
        let Some(index) = self.store.extremum_index() else {
            return Ok(());
        };
        if self.config.select_extremum_on_load {
            self.tooltip.set_active(Some(index));
            self.refresh_tooltip()?;
        }
        if let Some(delay) = self.config.initial_scroll_delay_seconds {
            self.pending_scroll = Some(PendingScroll {
                index,
                remaining_seconds: delay,
            });
            debug!(index, delay_seconds = delay, "initial scroll scheduled");
        }
        Ok(())
    }
}
