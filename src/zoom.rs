//! Span animation and drag-to-zoom gesture math.
//!
//! The animator owns a target span and eases the window toward it one tick at
//! a time with an exponential approach: each tick closes a fixed fraction of
//! the remaining distance, then snaps and halts once the remainder falls
//! under a settle threshold. The host drives ticks at its display cadence.
//!
//! The `animating` flag doubles as the writer lock for `trailing_time`:
//! gesture handlers clear it when a drag begins, and ticks are no-ops while
//! it is clear, so the animator and gesture code never write concurrently.

use crate::constants::{
    DRAG_MIN_UNIT_AHEAD_OF_NOW, ZOOM_APPROACH_RATE, ZOOM_SETTLE_EPSILON_SECS,
    ZOOM_TARGET_EDGE_FACTOR,
};
use crate::time_window::TimeWindow;

/// Eases the window span toward a target across successive ticks.
#[derive(Debug, Clone, Copy)]
pub struct ZoomAnimator {
    default_span: f64,
    target_span: f64,
    animating: bool,
    rate: f64,
    settle_epsilon: f64,
}

impl ZoomAnimator {
    /// `default_span` is the resting zoom level the animator returns to when
    /// the host dismisses whatever the user was looking at.
    pub fn new(default_span: f64) -> Self {
        Self {
            default_span,
            target_span: default_span,
            animating: false,
            rate: ZOOM_APPROACH_RATE,
            settle_epsilon: ZOOM_SETTLE_EPSILON_SECS,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target_span(&self) -> f64 {
        self.target_span
    }

    /// Begin animating toward an explicit span (clamped by the window).
    pub fn animate_to_span(&mut self, span: f64) {
        self.target_span = span;
        self.animating = true;
    }

    /// Begin animating so that `target_time` lands near the trailing edge,
    /// at unit location `1 - (1 - now_location) * ZOOM_TARGET_EDGE_FACTOR`,
    /// leaving visual room between the target and the window edge.
    ///
    /// Solving `unit_x(target_time) = location` for the span gives
    /// `span = (target_time - now) / (location - now_location)`.
    pub fn animate_to_time(&mut self, window: &TimeWindow, target_time: f64) {
        let location = 1.0 - (1.0 - window.now_location()) * ZOOM_TARGET_EDGE_FACTOR;
        let span = (target_time - window.now()) / (location - window.now_location());
        self.target_span = span.clamp(window.min_span(), window.max_span());
        self.animating = true;
    }

    /// Begin animating back to the resting zoom level.
    pub fn resume_default_zoom(&mut self) {
        self.animate_to_span(self.default_span);
    }

    /// Stop animating, leaving the window wherever the last tick put it.
    /// Called when a gesture takes over the trailing edge.
    pub fn cancel(&mut self) {
        self.animating = false;
    }

    /// Advance one tick of the exponential approach. Returns true if the
    /// window was mutated.
    pub fn tick(&mut self, window: &mut TimeWindow) -> bool {
        if !self.animating {
            return false;
        }
        let span = window.span();
        let remaining = self.target_span - span;
        if remaining.abs() < self.settle_epsilon {
            window.set_span(self.target_span);
            self.animating = false;
        } else {
            window.set_span(span + self.rate * remaining);
        }
        true
    }
}

impl Default for ZoomAnimator {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SPAN_HOURS * 3600.0)
    }
}

/// Apply a one-finger drag-to-zoom gesture.
///
/// `start` and `end` are the unit-space positions of the finger at gesture
/// start and now. The zoom is the affine map that keeps `now_location` fixed
/// and carries `start` to `end`: `m = (now_location - start) / (now_location -
/// end)`, `b = start - m * end`. Applying it to unit location 1.0 yields the
/// new trailing edge in the old window's unit space, converted back to a time
/// via `time_x`; the window then clamps the resulting span.
///
/// Both points are constrained to the future side of "now" by at least
/// `DRAG_MIN_UNIT_AHEAD_OF_NOW` so the map can never pin the window onto the
/// fixed point itself.
pub fn apply_drag_zoom(window: &mut TimeWindow, start: f64, end: f64) {
    let floor = window.now_location() + DRAG_MIN_UNIT_AHEAD_OF_NOW;
    let start = start.max(floor);
    let end = end.max(floor);

    let m = (window.now_location() - start) / (window.now_location() - end);
    let b = start - m * end;
    let new_trailing_unit = m + b;
    let new_trailing_time = window.time_x(new_trailing_unit);
    window.set_trailing_time(new_trailing_time);
}
