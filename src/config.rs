//! Configuration system for solarium with validation and default generation.
//!
//! Handles the TOML-based `solarium.toml` configuration file: loading,
//! validation against the limits in [`constants`](crate::constants), and
//! generation of a commented default file when none exists.
//!
//! ## Configuration Structure
//!
//! ```toml
//! # Geographic coordinates for solar event lookups
//! latitude = 40.7128
//! longitude = -74.0060
//!
//! # Viewport geometry
//! now_location = 0.2            # unit-space position of "now" (0-1, exclusive)
//! default_span_hours = 5.0      # visible duration at default zoom
//! min_span_hours = 1.0          # tightest allowed zoom
//! max_span_hours = 168.0        # widest allowed zoom
//!
//! # Solar data acquisition
//! max_future_days = 10          # days of data fetched ahead of today
//! fetch_timeout_secs = 10       # per-day request timeout
//! stale_warning_days = 3        # warn after this many days without a live fetch
//!
//! # Gradient shape
//! noon_split_fraction = 0.78    # placement of the noon plateau within the day
//! ```
//!
//! ## Validation and Error Handling
//!
//! All values are range-checked during loading; invalid configurations
//! produce error messages naming the offending field and the accepted range.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::logger::Log;

/// Configuration for the solarium display engine.
///
/// Most fields are optional and fall back to the defaults in `constants`.
/// Coordinates are the exception: without them no solar data can be fetched,
/// so they are required.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Geographic latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Geographic longitude in degrees (-180 to +180)
    pub longitude: f64,

    /// Unit-space position of "now" inside the window, strictly inside (0, 1)
    pub now_location: Option<f64>,
    /// Visible duration at default zoom, in hours
    pub default_span_hours: Option<f64>,
    /// Tightest allowed zoom, in hours
    pub min_span_hours: Option<f64>,
    /// Widest allowed zoom, in hours
    pub max_span_hours: Option<f64>,

    /// Days of solar data fetched ahead of today
    pub max_future_days: Option<i64>,
    /// Per-day remote request timeout, in seconds
    pub fetch_timeout_secs: Option<u64>,
    /// Soft staleness threshold, in days without a live fetch
    pub stale_warning_days: Option<u32>,
    /// Remote solar-events API endpoint
    pub api_url: Option<String>,
    /// Override for the backup store location
    pub backup_path: Option<PathBuf>,

    /// Placement fraction of the noon plateau within each day
    pub noon_split_fraction: Option<f64>,
}

impl Config {
    /// Path of `solarium.toml` under the user config directory.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("solarium").join("solarium.toml"))
    }

    /// Load the configuration from the default location, generating a
    /// commented default file first if none exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            anyhow::bail!(
                "Created default configuration at {}.\n\
                Set your latitude and longitude there, then start solarium again.",
                config_path.display()
            );
        }
        Self::load_from_path(&config_path)
    }

    /// Load and validate a configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Write a commented default configuration file.
    fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = format!(
            r#"# Solarium configuration
# Coordinates are required: solar event times are looked up remotely per day.
latitude = 0.0
longitude = 0.0

# Viewport geometry
now_location = {}            # unit-space position of "now" (0-1, exclusive)
default_span_hours = {}      # visible duration at default zoom
min_span_hours = {}          # tightest allowed zoom
max_span_hours = {}          # widest allowed zoom

# Solar data acquisition
max_future_days = {}         # days of data fetched ahead of today
fetch_timeout_secs = {}      # per-day request timeout
stale_warning_days = {}      # warn after this many days without a live fetch

# Gradient shape
noon_split_fraction = {}     # placement of the noon plateau within the day
"#,
            DEFAULT_NOW_LOCATION,
            DEFAULT_SPAN_HOURS,
            DEFAULT_MIN_SPAN_HOURS,
            DEFAULT_MAX_SPAN_HOURS,
            DEFAULT_MAX_FUTURE_DAYS,
            DEFAULT_FETCH_TIMEOUT_SECS,
            DEFAULT_STALE_WARNING_DAYS,
            DEFAULT_NOON_SPLIT_FRACTION,
        );

        fs::write(path, content)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        Log::log_decorated(&format!(
            "Created default configuration at {}",
            path.display()
        ));
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            anyhow::bail!(
                "Invalid latitude: {}. Must be between -90 and 90 degrees",
                self.latitude
            );
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            anyhow::bail!(
                "Invalid longitude: {}. Must be between -180 and 180 degrees",
                self.longitude
            );
        }

        let now_location = self.now_location();
        if !(MINIMUM_NOW_LOCATION..=MAXIMUM_NOW_LOCATION).contains(&now_location) {
            anyhow::bail!(
                "Invalid now_location: {}. Must be between {} and {}",
                now_location,
                MINIMUM_NOW_LOCATION,
                MAXIMUM_NOW_LOCATION
            );
        }

        let min_span = self.min_span_hours.unwrap_or(DEFAULT_MIN_SPAN_HOURS);
        let max_span = self.max_span_hours.unwrap_or(DEFAULT_MAX_SPAN_HOURS);
        for (name, value) in [("min_span_hours", min_span), ("max_span_hours", max_span)] {
            if !(MINIMUM_SPAN_HOURS..=MAXIMUM_SPAN_HOURS).contains(&value) {
                anyhow::bail!(
                    "Invalid {}: {}. Must be between {} and {} hours",
                    name,
                    value,
                    MINIMUM_SPAN_HOURS,
                    MAXIMUM_SPAN_HOURS
                );
            }
        }
        if min_span >= max_span {
            anyhow::bail!(
                "min_span_hours ({}) must be less than max_span_hours ({})",
                min_span,
                max_span
            );
        }
        let default_span = self.default_span_hours.unwrap_or(DEFAULT_SPAN_HOURS);
        if !(min_span..=max_span).contains(&default_span) {
            anyhow::bail!(
                "default_span_hours ({}) must fall between min_span_hours and max_span_hours",
                default_span
            );
        }

        let max_future_days = self.max_future_days.unwrap_or(DEFAULT_MAX_FUTURE_DAYS);
        if !(MINIMUM_MAX_FUTURE_DAYS..=MAXIMUM_MAX_FUTURE_DAYS).contains(&max_future_days) {
            anyhow::bail!(
                "Invalid max_future_days: {}. Must be between {} and {}",
                max_future_days,
                MINIMUM_MAX_FUTURE_DAYS,
                MAXIMUM_MAX_FUTURE_DAYS
            );
        }

        let noon_split = self.noon_split_fraction();
        if !(MINIMUM_NOON_SPLIT_FRACTION..=MAXIMUM_NOON_SPLIT_FRACTION).contains(&noon_split) {
            anyhow::bail!(
                "Invalid noon_split_fraction: {}. Must be between {} and {}",
                noon_split,
                MINIMUM_NOON_SPLIT_FRACTION,
                MAXIMUM_NOON_SPLIT_FRACTION
            );
        }

        let timeout = self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        if !(MINIMUM_FETCH_TIMEOUT_SECS..=MAXIMUM_FETCH_TIMEOUT_SECS).contains(&timeout) {
            anyhow::bail!(
                "Invalid fetch_timeout_secs: {}. Must be between {} and {} seconds",
                timeout,
                MINIMUM_FETCH_TIMEOUT_SECS,
                MAXIMUM_FETCH_TIMEOUT_SECS
            );
        }

        Ok(())
    }

    // ═══ Resolved Accessors ═══
    // Option fields resolved against their defaults

    pub fn now_location(&self) -> f64 {
        self.now_location.unwrap_or(DEFAULT_NOW_LOCATION)
    }

    pub fn default_span_secs(&self) -> f64 {
        self.default_span_hours.unwrap_or(DEFAULT_SPAN_HOURS) * 3600.0
    }

    pub fn min_span_secs(&self) -> f64 {
        self.min_span_hours.unwrap_or(DEFAULT_MIN_SPAN_HOURS) * 3600.0
    }

    pub fn max_span_secs(&self) -> f64 {
        self.max_span_hours.unwrap_or(DEFAULT_MAX_SPAN_HOURS) * 3600.0
    }

    pub fn max_future_days(&self) -> i64 {
        self.max_future_days.unwrap_or(DEFAULT_MAX_FUTURE_DAYS)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    pub fn stale_warning_days(&self) -> u32 {
        self.stale_warning_days.unwrap_or(DEFAULT_STALE_WARNING_DAYS)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn noon_split_fraction(&self) -> f64 {
        self.noon_split_fraction
            .unwrap_or(DEFAULT_NOON_SPLIT_FRACTION)
    }
}
