//! Gradient synthesis scenarios against fixture solar days.
//!
//! Fixture days come from `test_support::standard_record`: first light
//! 3:26:05, dawn 4:53:36, sunrise 5:28:14, solar noon 12:54:00, sunset
//! 8:19:46 PM, dusk 8:54:24 PM, last light 10:21:55 PM, all local time.

use chrono::{Local, NaiveDate, TimeZone};

use solarium::color::{EVENING_COLOR, MIDNIGHT_COLOR, NOON_COLOR};
use solarium::gradient::{GradientStop, gradient_stops};
use solarium::test_support::{consecutive_days, solar_day};
use solarium::time_window::{TimeWindow, instant_secs};

const HOUR: f64 = 3600.0;
const NOON_SPLIT: f64 = 0.78;

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

/// Epoch seconds for a local wall-clock time on a fixture day.
fn local_secs(date: NaiveDate, h: u32, m: u32, s: u32) -> f64 {
    let naive = date.and_hms_opt(h, m, s).unwrap();
    let instant = Local.from_local_datetime(&naive).earliest().unwrap();
    instant_secs(instant)
}

/// Window with `now` at the given local time and the given visible span.
fn window_at(now: f64, span: f64) -> TimeWindow {
    TimeWindow::new(now, 0.2, span, 0.25 * HOUR, 168.0 * HOUR)
}

fn assert_non_decreasing(stops: &[GradientStop]) {
    for pair in stops.windows(2) {
        assert!(
            pair[0].location <= pair[1].location,
            "locations regressed: {} then {}",
            pair[0].location,
            pair[1].location
        );
    }
}

#[test]
fn test_empty_day_list_yields_static_noon_fallback() {
    let window = window_at(local_secs(day(1), 10, 0, 0), 5.0 * HOUR);
    let stops = gradient_stops(&[], &window, NOON_SPLIT);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].color, NOON_COLOR);
    assert_eq!(stops[0].location, 0.0);
}

#[test]
fn test_daytime_window_covers_unit_interval() {
    // leading 09:00, now 10:00, trailing 14:00
    let days = consecutive_days(day(1), 2);
    let window = window_at(local_secs(day(1), 10, 0, 0), 5.0 * HOUR);

    let stops = gradient_stops(&days, &window, NOON_SPLIT);
    assert_non_decreasing(&stops);
    assert_eq!(stops.first().unwrap().location, 0.0);
    assert_eq!(stops.last().unwrap().location, 1.0);

    // The leading edge falls between sunrise and the noon plateau; the
    // trailing edge inside the plateau, so the ramp closes on pure noon.
    assert_eq!(stops.last().unwrap().color, NOON_COLOR);
}

#[test]
fn test_onscreen_events_keep_their_exact_colors() {
    let days = consecutive_days(day(1), 2);
    let window = window_at(local_secs(day(1), 10, 0, 0), 5.0 * HOUR);
    let stops = gradient_stops(&days, &window, NOON_SPLIT);

    // The first noon-plateau entry (11:15:55 local) is fully onscreen and
    // must land at its exact unit position with the exact noon color.
    let entries = solar_day(day(1)).colors_and_times(NOON_SPLIT);
    let expected_location = window.unit_x(instant_secs(entries[3].1));
    let onscreen = stops
        .iter()
        .find(|s| (s.location - expected_location).abs() < 1e-9)
        .expect("noon plateau entry missing from stops");
    assert_eq!(onscreen.color, NOON_COLOR);
}

#[test]
fn test_window_inside_noon_plateau_is_two_flat_stops() {
    // leading 12:52:30, trailing 13:30: both inside the noon plateau, so a
    // single pair spans the whole screen and terminates the scan.
    let days = consecutive_days(day(1), 2);
    let mut window = window_at(local_secs(day(1), 13, 0, 0), HOUR);
    window.set_trailing_time(local_secs(day(1), 13, 30, 0));

    let stops = gradient_stops(&days, &window, NOON_SPLIT);
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0], GradientStop { color: NOON_COLOR, location: 0.0 });
    assert_eq!(stops[1], GradientStop { color: NOON_COLOR, location: 1.0 });
}

#[test]
fn test_window_straddling_midnight_uses_cross_day_pair() {
    // leading 21:00, trailing 23:30: the trailing edge falls in the overnight
    // segment between this day's last entry and the next day's first entry.
    let days = consecutive_days(day(1), 3);
    let mut window = window_at(local_secs(day(1), 21, 30, 0), 2.0 * HOUR);
    window.set_trailing_time(local_secs(day(1), 23, 30, 0));

    let stops = gradient_stops(&days, &window, NOON_SPLIT);
    assert_non_decreasing(&stops);
    assert_eq!(stops.first().unwrap().location, 0.0);
    assert_eq!(stops.last().unwrap().location, 1.0);
    // Overnight is constant midnight color on both sides of the boundary
    assert_eq!(stops.last().unwrap().color, MIDNIGHT_COLOR);
}

#[test]
fn test_missing_day_truncates_scan() {
    // Day 2 is absent: the scan stops at the end of day 1's pair list and
    // the gradient never reaches location 1.0.
    let days = vec![solar_day(day(1)), solar_day(day(3))];
    let mut window = window_at(local_secs(day(1), 22, 0, 0), 10.0 * HOUR);
    window.set_trailing_time(local_secs(day(2), 6, 0, 0));

    let stops = gradient_stops(&days, &window, NOON_SPLIT);
    assert_non_decreasing(&stops);
    assert_eq!(stops.first().unwrap().location, 0.0);

    // leading = 20:00 on day 1; visible day-1 events are sunset and dusk.
    assert_eq!(stops.len(), 3);
    let last = stops.last().unwrap();
    assert!(last.location < 1.0, "truncated gradient must not reach 1.0");
    assert_eq!(last.color, EVENING_COLOR);

    let entries = solar_day(day(1)).colors_and_times(NOON_SPLIT);
    let dusk_location = window.unit_x(instant_secs(entries[6].1));
    assert!((last.location - dusk_location).abs() < 1e-9);
}

#[test]
fn test_generation_is_idempotent() {
    let days = consecutive_days(day(1), 3);
    let window = window_at(local_secs(day(1), 10, 0, 0), 5.0 * HOUR);
    let first = gradient_stops(&days, &window, NOON_SPLIT);
    let second = gradient_stops(&days, &window, NOON_SPLIT);
    assert_eq!(first, second);
}

#[test]
fn test_multi_day_window_walks_every_day() {
    // A three-day span sees two full day cycles; every stop still lands in
    // [0, 1] in order, opening at 0 and closing at 1.
    let days = consecutive_days(day(1), 5);
    let window = window_at(local_secs(day(2), 12, 0, 0), 72.0 * HOUR);

    let stops = gradient_stops(&days, &window, NOON_SPLIT);
    assert_non_decreasing(&stops);
    assert_eq!(stops.first().unwrap().location, 0.0);
    assert_eq!(stops.last().unwrap().location, 1.0);
    assert!(stops.len() > 16, "expected stops from multiple days");
    for stop in &stops {
        assert!((0.0..=1.0).contains(&stop.location));
    }
}
