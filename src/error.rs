//! Failure taxonomy for solar data acquisition.
//!
//! These classes drive the fallback policy: network and decode failures are
//! recovered locally by switching to the backup store, and only an empty
//! backup surfaces as a genuinely empty solar-day set. None of them are hard
//! failures for the display; the renderer degrades to a flat noon background.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarDataError {
    /// The remote fetch failed or timed out. Timeouts are deliberately folded
    /// in here: they trigger the same backup fallback as a dead network.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The remote answered but the payload did not decode into a usable
    /// solar day (bad JSON, non-OK status, unparseable or misordered times).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The backup store holds no days at all, so the fallback path cannot
    /// produce a list either.
    #[error("no backup solar data available")]
    NoBackupAvailable,
}
