//! Color mapping utilities for SVG visualization.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Linear interpolation towards `other`, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Trend line and point color.
pub const TREND_GREEN: Rgb = Rgb::new(0x1d, 0xb9, 0x54);

/// Countries without a usage row.
pub const NO_DATA_GRAY: Rgb = Rgb::new(0xd1, 0xd5, 0xdb);

/// Hovered country.
pub const HIGHLIGHT: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);

const RAMP_LOW: Rgb = Rgb::new(0xde, 0xeb, 0xf7);
const RAMP_HIGH: Rgb = Rgb::new(0x08, 0x51, 0x9c);

/// Choropleth fill for `value` on a light-to-dark blue ramp over `[min, max]`.
pub fn ramp_color(value: f64, min: f64, max: f64) -> Rgb {
    let range = if max > min { max - min } else { 1.0 };
    RAMP_LOW.lerp(RAMP_HIGH, (value - min) / range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_display() {
        assert_eq!(TREND_GREEN.to_string(), "#1db954");
    }

    #[test]
    fn ramp_endpoints() {
        assert_eq!(ramp_color(0.0, 0.0, 10.0), RAMP_LOW);
        assert_eq!(ramp_color(10.0, 0.0, 10.0), RAMP_HIGH);
        assert_eq!(ramp_color(99.0, 0.0, 10.0), RAMP_HIGH);
    }

    #[test]
    fn ramp_single_value_is_low() {
        assert_eq!(ramp_color(5.0, 5.0, 5.0), RAMP_LOW);
    }
}
