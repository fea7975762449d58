//! # Solarium
//!
//! A solar gradient timeline engine for kiosk calendar displays.
//!
//! Solarium drives a display whose background color continuously represents
//! the time of day: per-day sunrise/sunset/twilight timestamps are acquired
//! from a remote source (with a persisted backup fallback), combined with a
//! zoomable viewport onto the timeline, and synthesized into a list of color
//! stops ready for a gradient renderer.
//!
//! ## Architecture
//!
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **color**: HSB color model, palette, and interpolation
//! - **solar_day**: One calendar day's solar-event timeline
//! - **fetch**: Remote solar-events API client
//! - **store**: Persisted backup with fill-forward repair
//! - **pipeline**: Ordered acquisition, fallback, and atomic publication
//! - **time_window**: Time-to-unit-space coordinate model
//! - **gradient**: Gradient stop synthesis for the visible window
//! - **zoom**: Span animation and drag-to-zoom gesture math
//! - **location**: Location provider seam
//! - **logger**: Structured logging with visual formatting

pub mod args;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod gradient;
pub mod location;
pub mod logger;
pub mod pipeline;
pub mod solar_day;
pub mod store;
pub mod time_window;
pub mod zoom;

#[cfg(feature = "testing-support")]
pub mod test_support;

// Re-export important types for easier access
pub use color::Hsb;
pub use config::Config;
pub use error::SolarDataError;
pub use fetch::{HttpSolarDayFetcher, SolarDayFetcher};
pub use gradient::{GradientStop, gradient_stops};
pub use logger::{Log, LogLevel};
pub use pipeline::{AcquisitionPipeline, CycleCounter, RefreshOutcome};
pub use solar_day::{SolarDay, SolarDayRecord};
pub use store::SolarDayStore;
pub use time_window::TimeWindow;
pub use zoom::{ZoomAnimator, apply_drag_zoom};
