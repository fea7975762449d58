//! Ordered solar-day acquisition with backup fallback and atomic publication.
//!
//! A refresh cycle walks the date range in strict ascending order, issuing
//! one remote fetch per day and waiting for it before issuing the next. The
//! ordering is a deliberate guarantee, not a byproduct: days are appended in
//! fetch order and nothing downstream re-sorts them. The first failure
//! abandons the live attempt entirely and loads the whole range from the
//! backup store instead, so the published list is never a mix of live and
//! backup days.
//!
//! Publication swaps an `Arc<Vec<SolarDay>>` wholesale; readers snapshotting
//! mid-refresh always see a fully-formed list from either the previous or the
//! new cycle. A cycle counter lets a fresher refresh (day rollover, location
//! change) supersede an in-flight one, which then abandons itself without
//! publishing.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use crate::constants::ACQUISITION_RANGE_PADDING_DAYS;
use crate::error::SolarDataError;
use crate::fetch::SolarDayFetcher;
use crate::logger::Log;
use crate::solar_day::SolarDay;
use crate::store::SolarDayStore;

/// Monotonic counter identifying the freshest acquisition cycle.
///
/// Shared between the pipeline and whatever triggers refreshes; bumping it
/// invalidates any cycle still in flight.
#[derive(Clone, Debug, Default)]
pub struct CycleCounter(Arc<AtomicU64>);

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, invalidating all earlier ones. Returns the new
    /// cycle's id.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a refresh cycle concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Every day fetched live; backup replaced with the fresh set.
    Live,
    /// A fetch failed; the whole range was served from the backup store.
    Backup,
    /// A newer cycle started mid-flight; nothing was published.
    Superseded,
}

/// Orchestrates acquisition and owns the published solar-day list.
pub struct AcquisitionPipeline<F: SolarDayFetcher> {
    fetcher: F,
    store: SolarDayStore,
    cycles: CycleCounter,
    published: RwLock<Arc<Vec<SolarDay>>>,
    last_live_fetch: RwLock<Option<NaiveDate>>,
}

impl<F: SolarDayFetcher> AcquisitionPipeline<F> {
    pub fn new(fetcher: F, store: SolarDayStore, cycles: CycleCounter) -> Self {
        Self {
            fetcher,
            store,
            cycles,
            published: RwLock::new(Arc::new(Vec::new())),
            last_live_fetch: RwLock::new(None),
        }
    }

    /// Snapshot of the currently published list. Always fully-formed; empty
    /// until the first successful cycle.
    pub fn published(&self) -> Arc<Vec<SolarDay>> {
        self.published.read().unwrap().clone()
    }

    /// Days elapsed since the last fully-live refresh, for soft staleness
    /// warnings. `None` before any live cycle has completed.
    pub fn days_since_last_fetch(&self) -> Option<i64> {
        self.last_live_fetch
            .read()
            .unwrap()
            .map(|date| (Local::now().date_naive() - date).num_days().max(0))
    }

    /// Run one acquisition cycle over `[min_day, max_day]` inclusive.
    ///
    /// Returns `NoBackupAvailable` only when live acquisition failed AND the
    /// backup store is empty; the published list is left untouched in that
    /// case.
    pub fn refresh(
        &self,
        latitude: f64,
        longitude: f64,
        min_day: NaiveDate,
        max_day: NaiveDate,
    ) -> Result<RefreshOutcome, SolarDataError> {
        let cycle = self.cycles.begin();
        Log::log_block_start(&format!(
            "Acquiring solar data for {} through {}",
            min_day, max_day
        ));

        let mut acquired: Vec<SolarDay> = Vec::new();
        let mut fell_back = false;

        let mut day = min_day;
        while day <= max_day {
            if self.cycles.current() != cycle {
                Log::log_indented("Acquisition superseded by a newer cycle, abandoning");
                return Ok(RefreshOutcome::Superseded);
            }

            match self.fetcher.fetch(latitude, longitude, day) {
                Ok(solar_day) => acquired.push(solar_day),
                Err(e) => {
                    // One bad day poisons the whole live attempt; a mixed
                    // live/backup list would be internally inconsistent.
                    Log::log_warning(&format!("Fetch failed for {}: {}", day, e));
                    fell_back = true;
                    break;
                }
            }

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        let (days, outcome) = if fell_back {
            Log::log_indented("Falling back to persisted backup for the entire range");
            (self.store.load(min_day, max_day)?, RefreshOutcome::Backup)
        } else {
            if let Err(e) = self.store.save(&acquired) {
                // Backup refresh failure is non-fatal; the live data still flows
                Log::log_warning(&format!("Could not persist solar backup: {:#}", e));
            }
            *self.last_live_fetch.write().unwrap() = Some(Local::now().date_naive());
            (acquired, RefreshOutcome::Live)
        };

        if self.cycles.current() != cycle {
            Log::log_indented("Acquisition superseded before publish, discarding");
            return Ok(RefreshOutcome::Superseded);
        }

        Log::log_decorated(&format!(
            "Published {} solar day(s) ({})",
            days.len(),
            match outcome {
                RefreshOutcome::Live => "live",
                RefreshOutcome::Backup => "backup",
                RefreshOutcome::Superseded => unreachable!(),
            }
        ));
        *self.published.write().unwrap() = Arc::new(days);
        Ok(outcome)
    }
}

/// Acquisition date range for a given "today": one day of padding behind,
/// `max_future_days` plus one day of padding ahead.
pub fn acquisition_range(today: NaiveDate, max_future_days: i64) -> (NaiveDate, NaiveDate) {
    let min_day = today - chrono::Duration::days(ACQUISITION_RANGE_PADDING_DAYS);
    let max_day = today + chrono::Duration::days(max_future_days + ACQUISITION_RANGE_PADDING_DAYS);
    (min_day, max_day)
}

/// Duration until the next local midnight, when the daily refresh re-runs.
pub fn time_until_next_refresh(now: DateTime<Local>) -> Duration {
    let next_day = match now.date_naive().succ_opt() {
        Some(d) => d,
        None => return Duration::from_secs(24 * 3600),
    };
    let midnight = next_day.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    match Local.from_local_datetime(&midnight).earliest() {
        Some(next) => {
            let secs = (next - now).num_seconds().max(1);
            Duration::from_secs(secs as u64)
        }
        // A DST transition swallowing midnight itself; fall back to a day
        None => Duration::from_secs(24 * 3600),
    }
}
