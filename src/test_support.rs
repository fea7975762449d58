//! Fixture builders for integration tests (behind the `testing-support`
//! feature, enabled by the crate's own dev-dependency).

use chrono::{Days, NaiveDate};

use crate::solar_day::{SolarDay, SolarDayRecord};

/// A plausible mid-latitude summer day record for the given date.
pub fn standard_record(date: NaiveDate) -> SolarDayRecord {
    SolarDayRecord {
        date: date.format("%Y-%m-%d").to_string(),
        first_light: "3:26:05 AM".to_string(),
        dawn: "4:53:36 AM".to_string(),
        sunrise: "5:28:14 AM".to_string(),
        solar_noon: "12:54:00 PM".to_string(),
        sunset: "8:19:46 PM".to_string(),
        dusk: "8:54:24 PM".to_string(),
        last_light: "10:21:55 PM".to_string(),
    }
}

/// A decoded standard day.
pub fn solar_day(date: NaiveDate) -> SolarDay {
    SolarDay::from_record(standard_record(date)).expect("standard fixture record decodes")
}

/// `count` consecutive standard days starting at `start`.
pub fn consecutive_days(start: NaiveDate, count: u64) -> Vec<SolarDay> {
    (0..count)
        .map(|offset| {
            solar_day(
                start
                    .checked_add_days(Days::new(offset))
                    .expect("fixture dates stay in range"),
            )
        })
        .collect()
}
