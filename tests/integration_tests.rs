//! End-to-end flows through the public API: configuration from disk, the
//! acquisition pipeline with a scripted fetcher, and gradient synthesis from
//! the published list.

use chrono::{Local, NaiveDate, TimeZone};
use serial_test::serial;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

use solarium::config::Config;
use solarium::error::SolarDataError;
use solarium::fetch::SolarDayFetcher;
use solarium::gradient::gradient_stops;
use solarium::pipeline::{AcquisitionPipeline, CycleCounter, RefreshOutcome};
use solarium::solar_day::SolarDay;
use solarium::store::SolarDayStore;
use solarium::test_support::{consecutive_days, solar_day};
use solarium::time_window::{TimeWindow, instant_secs};

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

/// Deterministic fetcher: serves fixture days, optionally failing from a
/// given date onward, and records the order it was asked in.
struct ScriptedFetcher {
    fail_from: Option<NaiveDate>,
    requested: Arc<Mutex<Vec<NaiveDate>>>,
}

impl ScriptedFetcher {
    fn live() -> Self {
        Self {
            fail_from: None,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing_from(date: NaiveDate) -> Self {
        Self {
            fail_from: Some(date),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn request_log(&self) -> Arc<Mutex<Vec<NaiveDate>>> {
        self.requested.clone()
    }
}

impl SolarDayFetcher for ScriptedFetcher {
    fn fetch(
        &self,
        _latitude: f64,
        _longitude: f64,
        date: NaiveDate,
    ) -> Result<SolarDay, SolarDataError> {
        self.requested.lock().unwrap().push(date);
        if self.fail_from.is_some_and(|cutoff| date >= cutoff) {
            return Err(SolarDataError::NetworkUnavailable(
                "scripted outage".to_string(),
            ));
        }
        Ok(solar_day(date))
    }
}

fn temp_store() -> (tempfile::TempDir, SolarDayStore) {
    let dir = tempdir().unwrap();
    let store = SolarDayStore::new(dir.path().join("solar_backup.toml"));
    (dir, store)
}

#[test]
#[serial]
fn test_config_loads_from_explicit_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("solarium.toml");
    fs::write(
        &path,
        "latitude = 47.6\nlongitude = -122.3\ndefault_span_hours = 8.0\nmax_future_days = 7\n",
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.latitude, 47.6);
    assert_eq!(config.default_span_secs(), 8.0 * 3600.0);
    assert_eq!(config.max_future_days(), 7);
}

#[test]
#[serial]
fn test_config_rejects_invalid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("solarium.toml");
    fs::write(&path, "latitude = 200.0\nlongitude = 0.0\n").unwrap();
    assert!(Config::load_from_path(&path).is_err());

    fs::write(&path, "longitude = 0.0\n").unwrap();
    let err = Config::load_from_path(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("parse"));
}

#[test]
#[serial]
fn test_live_refresh_feeds_the_gradient() {
    let (_dir, store) = temp_store();
    let fetcher = ScriptedFetcher::live();
    let requested = fetcher.request_log();
    let pipeline = AcquisitionPipeline::new(fetcher, store, CycleCounter::new());

    let outcome = pipeline.refresh(47.6, -122.3, day(1), day(3)).unwrap();
    assert_eq!(outcome, RefreshOutcome::Live);
    // Requests went out in strict ascending date order
    assert_eq!(*requested.lock().unwrap(), vec![day(1), day(2), day(3)]);

    let days = pipeline.published();
    let naive = day(2).and_hms_opt(10, 0, 0).unwrap();
    let now = instant_secs(Local.from_local_datetime(&naive).earliest().unwrap());
    let window = TimeWindow::new(now, 0.2, 5.0 * 3600.0, 3600.0, 168.0 * 3600.0);

    let stops = gradient_stops(&days, &window, 0.78);
    assert!(stops.len() >= 2);
    assert_eq!(stops.first().unwrap().location, 0.0);
    assert_eq!(stops.last().unwrap().location, 1.0);
}

#[test]
#[serial]
fn test_outage_after_prior_success_serves_yesterdays_backup() {
    let (_dir, store) = temp_store();
    store.save(&consecutive_days(day(1), 5)).unwrap();

    let fetcher = ScriptedFetcher::failing_from(day(1));
    let pipeline = AcquisitionPipeline::new(fetcher, store, CycleCounter::new());

    let outcome = pipeline.refresh(47.6, -122.3, day(2), day(7)).unwrap();
    assert_eq!(outcome, RefreshOutcome::Backup);

    // The backup covers days 2-5; 6 and 7 are filled forward from day 5.
    let days = pipeline.published();
    assert_eq!(days.len(), 6);
    let dates: Vec<_> = days.iter().map(|d| d.date()).collect();
    assert_eq!(dates, vec![day(2), day(3), day(4), day(5), day(6), day(7)]);
}

#[test]
#[serial]
fn test_outage_with_no_backup_leaves_display_on_fallback() {
    let (_dir, store) = temp_store();
    let fetcher = ScriptedFetcher::failing_from(day(1));
    let pipeline = AcquisitionPipeline::new(fetcher, store, CycleCounter::new());

    let err = pipeline.refresh(47.6, -122.3, day(1), day(3)).unwrap_err();
    assert!(matches!(err, SolarDataError::NoBackupAvailable));

    // With nothing published the gradient degrades to a single flat stop.
    let days = pipeline.published();
    let window = TimeWindow::new(1_700_000_000.0, 0.2, 5.0 * 3600.0, 3600.0, 168.0 * 3600.0);
    let stops = gradient_stops(&days, &window, 0.78);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].location, 0.0);
}
