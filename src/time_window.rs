//! Viewport coordinate model mapping wall-clock time onto the unit axis.
//!
//! The window is defined by two instants: `now` (refreshed by the host at
//! least once per second) and `trailing_time` (the right edge, the single
//! mutable degree of freedom). "Now" is pinned at a fixed fractional position
//! `now_location` inside the window rather than at an edge, so the leading
//! edge is derived, not stored.
//!
//! All mappings are pure functions of the current fields; nothing here does
//! I/O or caches derived state, so the mapper is safe to call from any thread
//! given a stable snapshot.
//!
//! Times are f64 seconds since the Unix epoch ("time space"); the horizontal
//! axis is the normalized [0, 1] viewport ("unit space").

use chrono::{DateTime, Local};

/// The live viewport onto the timeline.
///
/// Invariant: `min_span <= span <= max_span` after every mutation. Violations
/// are clamped, never surfaced as errors. Because `min_span > 0`, clamping
/// also guarantees `trailing_time > now`, which keeps the affine map's slope
/// finite.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    now: f64,
    trailing_time: f64,
    now_location: f64,
    min_span: f64,
    max_span: f64,
}

impl TimeWindow {
    /// Create a window with the given span bounds, opening at `default_span`.
    ///
    /// `now_location` must sit strictly inside (0, 1); the config layer
    /// validates the user-facing range before this is reached.
    pub fn new(now: f64, now_location: f64, default_span: f64, min_span: f64, max_span: f64) -> Self {
        let mut window = Self {
            now,
            trailing_time: now,
            now_location,
            min_span,
            max_span,
        };
        window.set_span(default_span);
        window
    }

    /// Convenience constructor from a chrono instant.
    pub fn at(
        now: DateTime<Local>,
        now_location: f64,
        default_span: f64,
        min_span: f64,
        max_span: f64,
    ) -> Self {
        Self::new(instant_secs(now), now_location, default_span, min_span, max_span)
    }

    // ═══ Accessors ═══

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn now_location(&self) -> f64 {
        self.now_location
    }

    pub fn trailing_time(&self) -> f64 {
        self.trailing_time
    }

    /// Left edge of the viewport, derived from the pinned-now constraint:
    /// `leading = (now - now_location * trailing) / (1 - now_location)`.
    pub fn leading_time(&self) -> f64 {
        (self.now - self.now_location * self.trailing_time) / (1.0 - self.now_location)
    }

    /// Total visible duration. Algebraically equal to
    /// `(trailing - now) / (1 - now_location)`.
    pub fn span(&self) -> f64 {
        self.trailing_time - self.leading_time()
    }

    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    pub fn max_span(&self) -> f64 {
        self.max_span
    }

    // ═══ Coordinate Mapping ═══

    /// Map an absolute time to its unit-space position.
    ///
    /// Affine map `x = m*t + b` with `m = (1 - now_location) / (trailing - now)`
    /// and `b = 1 - m*trailing`, which fixes `now -> now_location` and
    /// `trailing -> 1`. Evaluated in the anchored form below so both fixed
    /// points hold exactly in floating point, not just to rounding error.
    pub fn unit_x(&self, time: f64) -> f64 {
        self.now_location
            + (1.0 - self.now_location) * (time - self.now) / (self.trailing_time - self.now)
    }

    /// Map a unit-space position back to an absolute time. Exact inverse of
    /// [`unit_x`](Self::unit_x).
    pub fn time_x(&self, unit: f64) -> f64 {
        self.now
            + (unit - self.now_location) * (self.trailing_time - self.now)
                / (1.0 - self.now_location)
    }

    // ═══ Mutation ═══

    /// Advance the current instant. The trailing edge stays put, so the
    /// visible window slides under a fixed zoom level; the span invariant is
    /// re-clamped in case "now" caught up with the trailing edge.
    pub fn set_now(&mut self, now: f64) {
        self.now = now;
        self.clamp_trailing();
    }

    pub fn set_now_instant(&mut self, now: DateTime<Local>) {
        self.set_now(instant_secs(now));
    }

    /// Move the trailing edge, clamping the resulting span into bounds.
    pub fn set_trailing_time(&mut self, trailing_time: f64) {
        self.trailing_time = trailing_time;
        self.clamp_trailing();
    }

    /// Set the visible span directly, clamped into bounds.
    ///
    /// Uses `span = (trailing - now) / (1 - now_location)`, so
    /// `trailing = now + span * (1 - now_location)`.
    pub fn set_span(&mut self, span: f64) {
        let span = span.clamp(self.min_span, self.max_span);
        self.trailing_time = self.now + span * (1.0 - self.now_location);
    }

    fn clamp_trailing(&mut self) {
        let span = (self.trailing_time - self.now) / (1.0 - self.now_location);
        if span < self.min_span || span > self.max_span {
            self.set_span(span);
        }
    }
}

/// An absolute chrono instant as f64 seconds since the epoch.
pub fn instant_secs(instant: DateTime<Local>) -> f64 {
    instant.timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    const HOUR: f64 = 3600.0;

    fn standard_window() -> TimeWindow {
        // now = 2024-06-01T12:00:00Z as epoch seconds, 5 hour span
        TimeWindow::new(
            1_717_243_200.0,
            TEST_NOW_LOCATION,
            5.0 * HOUR,
            TEST_MIN_SPAN_SECS,
            TEST_MAX_SPAN_SECS,
        )
    }

    #[test]
    fn test_now_maps_to_now_location() {
        let w = standard_window();
        assert_eq!(w.unit_x(w.now()), w.now_location());
    }

    #[test]
    fn test_trailing_maps_to_one() {
        let w = standard_window();
        assert_eq!(w.unit_x(w.trailing_time()), 1.0);
    }

    #[test]
    fn test_leading_maps_to_zero() {
        let w = standard_window();
        assert!(w.unit_x(w.leading_time()).abs() < 1e-9);
    }

    #[test]
    fn test_leading_time_formula() {
        // now = 12:00, trailing = now + 4h, now_location = 0.2:
        // span = 4h / 0.8 = 5h, so leading = now - 1h.
        let mut w = standard_window();
        w.set_trailing_time(w.now() + 4.0 * HOUR);
        assert!((w.span() - 5.0 * HOUR).abs() < 1e-6);
        assert!((w.leading_time() - (w.now() - HOUR)).abs() < 1e-6);

        // And directly against the derivation: (now - 0.2*trailing) / 0.8
        let expected = (w.now() - 0.2 * w.trailing_time()) / 0.8;
        assert!((w.leading_time() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_time_to_unit() {
        let w = standard_window();
        for offset in [-3600.0, -1.0, 0.0, 0.5, 900.0, 7200.0, 86_400.0] {
            let t = w.now() + offset;
            let back = w.time_x(w.unit_x(t));
            assert!((back - t).abs() < 1e-6, "round trip drifted for {}", t);
        }
    }

    #[test]
    fn test_round_trip_unit_to_time() {
        let w = standard_window();
        for x in [-0.5, 0.0, 0.2, 0.4667, 1.0, 1.5] {
            let back = w.unit_x(w.time_x(x));
            assert!((back - x).abs() < 1e-9, "round trip drifted for {}", x);
        }
    }

    #[test]
    fn test_span_clamped_to_minimum() {
        let mut w = standard_window();
        // Trailing edge dragged onto "now" would make the map degenerate
        w.set_trailing_time(w.now());
        assert!((w.span() - TEST_MIN_SPAN_SECS).abs() < 1e-6);
        assert!(w.trailing_time() > w.now());
    }

    #[test]
    fn test_span_clamped_to_maximum() {
        let mut w = standard_window();
        w.set_trailing_time(w.now() + 365.0 * 24.0 * HOUR);
        assert!((w.span() - TEST_MAX_SPAN_SECS).abs() < 1e-3);
    }

    #[test]
    fn test_advancing_now_keeps_span_valid() {
        let mut w = standard_window();
        w.set_span(TEST_MIN_SPAN_SECS);
        // Jump "now" past the trailing edge (e.g. host resumed from sleep)
        w.set_now(w.trailing_time() + HOUR);
        assert!(w.trailing_time() > w.now());
        assert!(w.span() >= TEST_MIN_SPAN_SECS - 1e-6);
    }

    #[test]
    fn test_set_span_positions_trailing() {
        let mut w = standard_window();
        w.set_span(2.0 * HOUR);
        // trailing = now + span * (1 - now_location)
        assert!((w.trailing_time() - (w.now() + 2.0 * HOUR * 0.8)).abs() < 1e-6);
    }
}
