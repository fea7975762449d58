//! SolarDay data model: one calendar day's named solar-event timestamps.
//!
//! A `SolarDay` is decoded from the raw string fields of an API response (or a
//! persisted backup row) by combining each `h:mm:ss a` time string with the
//! record's date. Instances are immutable once constructed; refresh cycles
//! replace the published list wholesale rather than mutating days in place.
//!
//! The derived `colors_and_times` sequence is the bridge between solar events
//! and the background gradient: eight time-anchored colors per day, covering
//! midnight through midnight.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::color::{
    EVENING_COLOR, Hsb, MIDNIGHT_COLOR, MORNING_COLOR, NOON_COLOR, SUNRISE_COLOR, SUNSET_COLOR,
};

/// Raw string form of one day's solar events, exactly as the remote API and
/// the backup store carry them. Times are `h:mm:ss a` strings relative to the
/// record's date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarDayRecord {
    /// Calendar date in `YYYY-MM-DD` form. Identity key: no two records in a
    /// published list share a date.
    pub date: String,
    pub first_light: String,
    pub dawn: String,
    pub sunrise: String,
    pub solar_noon: String,
    pub sunset: String,
    pub dusk: String,
    pub last_light: String,
}

/// One calendar day's parsed solar timeline.
#[derive(Debug, Clone)]
pub struct SolarDay {
    date: NaiveDate,
    first_light: DateTime<Local>,
    dawn: DateTime<Local>,
    sunrise: DateTime<Local>,
    solar_noon: DateTime<Local>,
    sunset: DateTime<Local>,
    dusk: DateTime<Local>,
    last_light: DateTime<Local>,
    record: SolarDayRecord,
}

impl SolarDay {
    /// Decode a raw record into a SolarDay, parsing every event time against
    /// the record's own date.
    pub fn from_record(record: SolarDayRecord) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date string '{}'", record.date))?;
        Self::from_record_on_date(record, date)
    }

    /// Rebuild this day's event pattern under a different date.
    ///
    /// Used by backup fill-forward: the raw time-of-day strings are reparsed
    /// against the new date, so every event shifts by whole days.
    pub fn relabeled(&self, date: NaiveDate) -> Result<Self> {
        Self::from_record_on_date(self.record.clone(), date)
    }

    fn from_record_on_date(mut record: SolarDayRecord, date: NaiveDate) -> Result<Self> {
        record.date = date.format("%Y-%m-%d").to_string();

        let parse = |field: &str, name: &str| -> Result<DateTime<Local>> {
            parse_event_time(date, field)
                .with_context(|| format!("Invalid {} time '{}' for {}", name, field, date))
        };

        let day = Self {
            date,
            first_light: parse(&record.first_light, "first_light")?,
            dawn: parse(&record.dawn, "dawn")?,
            sunrise: parse(&record.sunrise, "sunrise")?,
            solar_noon: parse(&record.solar_noon, "solar_noon")?,
            sunset: parse(&record.sunset, "sunset")?,
            dusk: parse(&record.dusk, "dusk")?,
            last_light: parse(&record.last_light, "last_light")?,
            record,
        };
        day.validate_ordering()?;
        Ok(day)
    }

    /// Event times must be strictly increasing within the day. A response that
    /// violates this would corrupt the gradient scan downstream, so it is
    /// rejected at decode time.
    fn validate_ordering(&self) -> Result<()> {
        let events = [
            ("first_light", self.first_light),
            ("dawn", self.dawn),
            ("sunrise", self.sunrise),
            ("solar_noon", self.solar_noon),
            ("sunset", self.sunset),
            ("dusk", self.dusk),
            ("last_light", self.last_light),
        ];
        for pair in events.windows(2) {
            if pair[0].1 >= pair[1].1 {
                anyhow::bail!(
                    "Solar events out of order for {}: {} ({}) is not before {} ({})",
                    self.date,
                    pair[0].0,
                    pair[0].1.format("%H:%M:%S"),
                    pair[1].0,
                    pair[1].1.format("%H:%M:%S")
                );
            }
        }
        Ok(())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The raw record this day was decoded from (persisted by the backup store).
    pub fn record(&self) -> &SolarDayRecord {
        &self.record
    }

    pub fn sunrise(&self) -> DateTime<Local> {
        self.sunrise
    }

    pub fn sunset(&self) -> DateTime<Local> {
        self.sunset
    }

    pub fn solar_noon(&self) -> DateTime<Local> {
        self.solar_noon
    }

    /// The day's gradient anchor sequence: eight (color, time) entries in
    /// strictly increasing time order.
    ///
    /// The two noon entries straddle solar noon, placed `noon_split` of the way
    /// along the sunrise-to-noon and noon-to-sunset intervals respectively, so
    /// the bright midday plateau holds through the middle of the day. The
    /// midnight color anchors both ends; the gap between one day's last entry
    /// and the next day's first entry renders as constant midnight.
    pub fn colors_and_times(&self, noon_split: f64) -> Vec<(Hsb, DateTime<Local>)> {
        let noon_start = self.sunrise + fraction_of(self.solar_noon - self.sunrise, noon_split);
        let noon_end = self.solar_noon + fraction_of(self.sunset - self.solar_noon, noon_split);

        vec![
            (MIDNIGHT_COLOR, self.first_light),
            (MORNING_COLOR, self.dawn),
            (SUNRISE_COLOR, self.sunrise),
            (NOON_COLOR, noon_start),
            (NOON_COLOR, noon_end),
            (SUNSET_COLOR, self.sunset),
            (EVENING_COLOR, self.dusk),
            (MIDNIGHT_COLOR, self.last_light),
        ]
    }
}

/// Scale a duration by a fraction, rounding to milliseconds.
fn fraction_of(duration: Duration, fraction: f64) -> Duration {
    Duration::milliseconds((duration.num_milliseconds() as f64 * fraction) as i64)
}

/// Combine a calendar date with an `h:mm:ss a` time string into an absolute
/// local instant.
///
/// The remote API reports all times relative to the requested date, so the two
/// must be joined before parsing; a bare time string carries no day identity.
pub fn parse_event_time(date: NaiveDate, time: &str) -> Result<DateTime<Local>> {
    let time = NaiveTime::parse_from_str(time.trim(), "%I:%M:%S %p")
        .with_context(|| format!("Unparseable time-of-day string '{}'", time))?;
    let naive = date.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("No local representation for {}", naive))
}
