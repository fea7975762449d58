//! Gradient stop synthesis from solar days and the live viewport.
//!
//! Converts an ordered, gap-free `[SolarDay]` plus a `TimeWindow` snapshot
//! into a list of (color, unit-location) stops covering the visible window.
//! The scan is day-major and event-minor: walk calendar days from the one
//! containing the leading edge, and within each day walk adjacent entries of
//! its `colors_and_times` sequence, where the last entry of a day pairs with
//! the first entry of the next day (the constant-midnight overnight segment).
//!
//! Each pair is classified against the window by four non-exclusive checks;
//! a pair that contains the trailing edge (or spans the whole window)
//! terminates the scan. If a day in the scan range has no SolarDay entry the
//! scan stops there, leaving the gradient truncated beyond that point; the
//! renderer extends the last stop's color to the edge.
//!
//! Pure and idempotent: identical inputs always produce identical output.

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::color::{Hsb, NOON_COLOR};
use crate::solar_day::SolarDay;
use crate::time_window::{TimeWindow, instant_secs};

/// One color stop for the background ramp. `location` is in unit space;
/// a generated sequence is non-decreasing in location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Hsb,
    pub location: f64,
}

impl GradientStop {
    fn new(color: Hsb, location: f64) -> Self {
        Self { color, location }
    }
}

/// Synthesize the gradient stops for the current window.
///
/// `days` must be ordered by date with no duplicates (the acquisition
/// pipeline's published list guarantees this). `noon_split` is the fraction
/// used to place the noon plateau within each day; see
/// [`SolarDay::colors_and_times`].
///
/// With an empty day list there is nothing to derive a gradient from, so a
/// single flat noon-colored stop is returned as the static fallback.
pub fn gradient_stops(days: &[SolarDay], window: &TimeWindow, noon_split: f64) -> Vec<GradientStop> {
    if days.is_empty() {
        return vec![GradientStop::new(NOON_COLOR, 0.0)];
    }

    let leading = window.leading_time();
    let trailing = window.trailing_time();

    let mut stops = Vec::new();
    let mut day = date_of_secs(leading);
    let last_day = date_of_secs(trailing);

    'scan: while day <= last_day {
        let Some(solar_day) = find_day(days, day) else {
            // No data for this day: truncate rather than patch per-day.
            break;
        };

        let entries = solar_day.colors_and_times(noon_split);
        let next_first = day
            .checked_add_days(Days::new(1))
            .and_then(|next| find_day(days, next))
            .map(|next_day| next_day.colors_and_times(noon_split)[0]);

        let mut pairs: Vec<((Hsb, DateTime<Local>), (Hsb, DateTime<Local>))> =
            entries.windows(2).map(|w| (w[0], w[1])).collect();
        if let Some(first_of_next) = next_first {
            pairs.push((entries[entries.len() - 1], first_of_next));
        }

        for ((c1, e1), (c2, e2)) in pairs {
            let t1 = instant_secs(e1);
            let t2 = instant_secs(e2);

            // Window-spans-pair: this single pair covers the whole screen.
            if t1 <= leading && t2 >= trailing {
                stops.push(GradientStop::new(
                    Hsb::lerp_at_time(&c1, t1, &c2, t2, leading),
                    0.0,
                ));
                stops.push(GradientStop::new(
                    Hsb::lerp_at_time(&c1, t1, &c2, t2, trailing),
                    1.0,
                ));
                break 'scan;
            }

            // Pair contains the leading edge: open the ramp at location 0.
            if t1 <= leading && leading <= t2 {
                stops.push(GradientStop::new(
                    Hsb::lerp_at_time(&c1, t1, &c2, t2, leading),
                    0.0,
                ));
            }

            // Pair fully onscreen: the first event lands at its exact color.
            if t1 >= leading && t2 <= trailing {
                stops.push(GradientStop::new(c1, window.unit_x(t1)));
            }

            // Pair contains the trailing edge: close the ramp at location 1.
            if t1 <= trailing && trailing <= t2 {
                stops.push(GradientStop::new(c1, window.unit_x(t1)));
                stops.push(GradientStop::new(
                    Hsb::lerp_at_time(&c1, t1, &c2, t2, trailing),
                    1.0,
                ));
                break 'scan;
            }
        }

        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }

    stops
}

/// Calendar day containing an epoch-seconds instant, in local time.
fn date_of_secs(secs: f64) -> NaiveDate {
    use chrono::TimeZone;
    Local
        .timestamp_millis_opt((secs * 1000.0) as i64)
        .earliest()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Locate the SolarDay for a date in an ordered list.
fn find_day(days: &[SolarDay], date: NaiveDate) -> Option<&SolarDay> {
    days.binary_search_by_key(&date, |d| d.date())
        .ok()
        .map(|index| &days[index])
}
