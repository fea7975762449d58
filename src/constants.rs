//! Application constants and default values for solarium.
//!
//! This module contains all the configuration defaults, validation limits,
//! and operational constants used throughout the application.

// ═══ Viewport Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_NOW_LOCATION: f64 = 0.2; // unit-space position of "now" inside the window
pub const DEFAULT_SPAN_HOURS: f64 = 5.0; // visible duration at default zoom
pub const DEFAULT_MIN_SPAN_HOURS: f64 = 1.0; // tightest allowed zoom
pub const DEFAULT_MAX_SPAN_HOURS: f64 = 168.0; // widest allowed zoom (one week)

// ═══ Solar Data Acquisition Defaults ═══

pub const DEFAULT_API_URL: &str = "https://api.sunrisesunset.io/json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10; // per-day request timeout
pub const DEFAULT_MAX_FUTURE_DAYS: i64 = 10; // days of solar data ahead of today
pub const DEFAULT_STALE_WARNING_DAYS: u32 = 3; // soft warning threshold after fetch failures
pub const ACQUISITION_RANGE_PADDING_DAYS: i64 = 1; // extra day on each side of the visible range

// ═══ Gradient Synthesis Constants ═══

// The two noon color entries straddle solar noon: one at this fraction along
// the sunrise-to-noon interval, one at the same fraction along noon-to-sunset.
pub const DEFAULT_NOON_SPLIT_FRACTION: f64 = 0.78;

// ═══ Zoom Animation Constants ═══

pub const ZOOM_APPROACH_RATE: f64 = 0.022; // per-tick fraction of remaining distance
pub const ZOOM_SETTLE_EPSILON_SECS: f64 = 1.0; // snap to target inside this remainder
pub const ZOOM_TARGET_EDGE_FACTOR: f64 = 0.8; // zoom targets land at 1 - (1 - now_location) * this
pub const DRAG_MIN_UNIT_AHEAD_OF_NOW: f64 = 0.1; // drag points must stay this far past "now"

// ═══ Validation Limits ═══
// These limits ensure user inputs are within reasonable and safe ranges

pub const MINIMUM_NOW_LOCATION: f64 = 0.05;
pub const MAXIMUM_NOW_LOCATION: f64 = 0.45;

pub const MINIMUM_SPAN_HOURS: f64 = 0.25; // 15 minutes
pub const MAXIMUM_SPAN_HOURS: f64 = 720.0; // 30 days

pub const MINIMUM_MAX_FUTURE_DAYS: i64 = 1;
pub const MAXIMUM_MAX_FUTURE_DAYS: i64 = 60;

pub const MINIMUM_NOON_SPLIT_FRACTION: f64 = 0.5;
pub const MAXIMUM_NOON_SPLIT_FRACTION: f64 = 0.95;

pub const MINIMUM_FETCH_TIMEOUT_SECS: u64 = 1;
pub const MAXIMUM_FETCH_TIMEOUT_SECS: u64 = 120;

// ═══ Scheduler Constants ═══

pub const REFRESH_RETRY_DELAY_SECS: u64 = 300; // retry delay after a failed refresh cycle
pub const LOCATION_POLL_INTERVAL_SECS: u64 = 60; // how often the shell re-checks coordinates

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure
