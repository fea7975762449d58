//! Remote solar-events API client.
//!
//! One fetch covers one calendar day:
//! `GET {base_url}?lat={lat}&lng={lng}&date=YYYY-MM-DD` returning a JSON body
//! with per-event time strings in `h:mm:ss a` format, relative to the
//! requested date. The fetcher joins them with the request date and decodes
//! the result into a [`SolarDay`].
//!
//! The [`SolarDayFetcher`] trait is the seam the acquisition pipeline fetches
//! through, so tests can drive the pipeline with scripted outcomes instead of
//! a live endpoint.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::error::SolarDataError;
use crate::solar_day::{SolarDay, SolarDayRecord};

/// Performs one remote lookup for one day.
#[cfg_attr(test, automock)]
pub trait SolarDayFetcher {
    fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<SolarDay, SolarDataError>;
}

/// Wire format of the remote API's response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    results: ApiResults,
    status: String,
}

/// All fields the API reports for one day. Only the seven event times feed
/// the gradient; the remainder are accepted so a strict decode doesn't break
/// on a well-formed response.
#[derive(Debug, Deserialize)]
struct ApiResults {
    sunrise: String,
    sunset: String,
    first_light: String,
    last_light: String,
    dawn: String,
    dusk: String,
    solar_noon: String,
    #[allow(dead_code)]
    golden_hour: Option<String>,
    #[allow(dead_code)]
    day_length: Option<String>,
    #[allow(dead_code)]
    timezone: Option<String>,
    #[allow(dead_code)]
    utc_offset: Option<i64>,
}

impl ApiResults {
    fn into_record(self, date: NaiveDate) -> SolarDayRecord {
        SolarDayRecord {
            date: date.format("%Y-%m-%d").to_string(),
            first_light: self.first_light,
            dawn: self.dawn,
            sunrise: self.sunrise,
            solar_noon: self.solar_noon,
            sunset: self.sunset,
            dusk: self.dusk,
            last_light: self.last_light,
        }
    }
}

/// HTTP-backed fetcher with a bounded per-request timeout.
pub struct HttpSolarDayFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSolarDayFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for solar data fetches")?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl SolarDayFetcher for HttpSolarDayFetcher {
    fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<SolarDay, SolarDataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .map_err(|e| SolarDataError::NetworkUnavailable(e.to_string()))?;

        // Timeouts and non-success statuses take the same fallback path as a
        // dead network.
        let response = response
            .error_for_status()
            .map_err(|e| SolarDataError::NetworkUnavailable(e.to_string()))?;

        let body: ApiResponse = response
            .json()
            .map_err(|e| SolarDataError::MalformedResponse(e.to_string()))?;

        decode_response(body, date)
    }
}

fn decode_response(body: ApiResponse, date: NaiveDate) -> Result<SolarDay, SolarDataError> {
    if body.status != "OK" {
        return Err(SolarDataError::MalformedResponse(format!(
            "API status '{}' for {}",
            body.status, date
        )));
    }
    SolarDay::from_record(body.results.into_record(date))
        .map_err(|e| SolarDataError::MalformedResponse(format!("{:#}", e)))
}
