//! HSB color model and interpolation for the time-of-day gradient.
//!
//! Colors are carried as explicit hue/saturation/brightness triples rather than
//! through any UI toolkit's color type, so the gradient math stays portable and
//! testable. Interpolation is a direct linear blend of each component.

/// A color in hue/saturation/brightness space, each component in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsb {
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Linearly blend toward `other` by `percent` (clamped to [0, 1]).
    ///
    /// Hue is blended as a raw linear value, NOT along the shortest arc of the
    /// hue wheel. Pairs straddling hue 0/1 therefore take the long way around.
    /// This matches the display's established rendering and is kept for parity.
    pub fn lerp(&self, other: &Hsb, percent: f64) -> Hsb {
        let p = percent.clamp(0.0, 1.0);
        Hsb {
            hue: interpolate_f64(self.hue, other.hue, p),
            saturation: interpolate_f64(self.saturation, other.saturation, p),
            brightness: interpolate_f64(self.brightness, other.brightness, p),
        }
    }

    /// Blend between two time-anchored colors, evaluated at time `t`.
    ///
    /// `percent = (t - t1) / (t2 - t1)`; degenerate intervals (`t2 <= t1`)
    /// resolve to the first color.
    pub fn lerp_at_time(c1: &Hsb, t1: f64, c2: &Hsb, t2: f64, t: f64) -> Hsb {
        if t2 <= t1 {
            return *c1;
        }
        let percent = (t - t1) / (t2 - t1);
        c1.lerp(c2, percent)
    }
}

/// Interpolate between two f64 values based on progress (0.0 to 1.0).
pub fn interpolate_f64(start: f64, end: f64, progress: f64) -> f64 {
    start + (end - start) * progress.clamp(0.0, 1.0)
}

// ═══ Time-of-Day Palette ═══
// Anchor colors for the eight per-day gradient entries. Hues are fractions of
// the full wheel (0.0 = red, 1/3 = green, 2/3 = blue).

pub const MIDNIGHT_COLOR: Hsb = Hsb::new(0.65, 0.85, 0.15); // deep night blue
pub const MORNING_COLOR: Hsb = Hsb::new(0.60, 0.55, 0.45); // lightening slate at dawn
pub const SUNRISE_COLOR: Hsb = Hsb::new(0.07, 0.70, 0.95); // low-sun orange
pub const NOON_COLOR: Hsb = Hsb::new(0.55, 0.35, 0.97); // bright daytime sky
pub const SUNSET_COLOR: Hsb = Hsb::new(0.04, 0.75, 0.90); // low-sun red-orange
pub const EVENING_COLOR: Hsb = Hsb::new(0.72, 0.60, 0.35); // dusk violet
