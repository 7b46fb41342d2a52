use crate::errors::WellnessError;
use crate::models::{SleepChartPoint, SleepEntry, SleepOverview};
use crate::seed;
use crate::storage::{SLEEP_KEY, Store};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

const CHART_WINDOW: usize = 7;
const HISTORY_PREVIEW: usize = 5;

/// Sleep log keyed by calendar day.
pub struct SleepTracker {
    store: Store,
    entries: Vec<SleepEntry>,
}

impl SleepTracker {
    pub fn load(store: Store) -> Self {
        Self::load_at(store, Local::now().date_naive())
    }

    pub fn load_at(store: Store, today: NaiveDate) -> Self {
        let entries = match store.load::<SleepEntry>(SLEEP_KEY) {
            Some(entries) => dedupe_by_date(entries),
            None => {
                let entries = seed::sample_sleep(today);
                info!(count = entries.len(), "seeding sample sleep data");
                store.save(SLEEP_KEY, &entries);
                entries
            }
        };
        Self { store, entries }
    }

    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    /// Records `hours` for `date`, replacing whatever that day held before.
    pub fn upsert(&mut self, date: NaiveDate, hours: f64) -> Result<&SleepEntry, WellnessError> {
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
            return Err(WellnessError::validation("hours must be between 0 and 24"));
        }

        let index = match self.entries.iter().position(|entry| entry.date == date) {
            Some(index) => {
                self.entries[index].hours = hours;
                index
            }
            None => {
                self.entries.push(SleepEntry { date, hours });
                self.entries.len() - 1
            }
        };
        debug!(%date, hours, "sleep entry recorded");

        self.store.save(SLEEP_KEY, &self.entries);
        Ok(&self.entries[index])
    }

    /// Newest first.
    pub fn history(&self) -> Vec<SleepEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn recent(&self, limit: usize) -> Vec<SleepEntry> {
        let mut history = self.history();
        history.truncate(limit);
        history
    }

    /// The last seven entries in ascending date order, labelled for charting.
    pub fn chart(&self) -> Vec<SleepChartPoint> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| entry.date);
        let skip = sorted.len().saturating_sub(CHART_WINDOW);
        sorted
            .into_iter()
            .skip(skip)
            .map(|entry| SleepChartPoint {
                date: entry.date.format("%b %d").to_string(),
                hours: entry.hours,
            })
            .collect()
    }

    pub fn overview(&self) -> SleepOverview {
        SleepOverview {
            history: self.recent(HISTORY_PREVIEW),
            chart: self.chart(),
        }
    }
}

/// Keeps the last record seen for each date, in first-seen position.
fn dedupe_by_date(entries: Vec<SleepEntry>) -> Vec<SleepEntry> {
    let mut unique: Vec<SleepEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match unique.iter_mut().find(|kept| kept.date == entry.date) {
            Some(kept) => kept.hours = entry.hours,
            None => unique.push(entry),
        }
    }
    unique
}
