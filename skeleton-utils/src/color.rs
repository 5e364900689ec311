// SkeletonView: Colour values
//
// Straight (non-premultiplied) RGBA colours shared by gradients, masks and
// the terminal compositor. Channels are 8-bit, alpha is a 0.0..=1.0 opacity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a `#rrggbb` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}', expected #rrggbb")]
pub struct ParseColorError(pub String);

/// An RGB colour with an opacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    /// Neutral tone used for placeholder shapes
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(170, 170, 170);
    pub const CLEAR: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        alpha: 0.0,
    };

    /// Fully opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Same colour with a different opacity (clamped to 0.0..=1.0)
    pub fn opacity(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// True when both colours share red, green and blue channels
    pub fn same_hue(&self, other: &Rgba) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Linear interpolation between two colours, `t` clamped to 0.0..=1.0
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }

    /// Composite this colour over an opaque background
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.alpha.clamp(0.0, 1.0);
        let channel = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Rgba::rgb(
            channel(self.r, background.r),
            channel(self.g, background.g),
            channel(self.b, background.b),
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgba::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#808080".parse::<Rgba>(), Ok(Rgba::GRAY));
        assert_eq!("#FFFFFF".parse::<Rgba>(), Ok(Rgba::WHITE));
        assert!("808080".parse::<Rgba>().is_err());
        assert!("#80808".parse::<Rgba>().is_err());
        assert!("#zz8080".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = Rgba::rgb(18, 52, 86);
        assert_eq!(color.to_string(), "#123456");
        assert_eq!(color.to_string().parse::<Rgba>(), Ok(color));
    }

    #[test]
    fn test_opacity_clamps() {
        assert_eq!(Rgba::GRAY.opacity(1.7).alpha, 1.0);
        assert_eq!(Rgba::GRAY.opacity(-0.2).alpha, 0.0);
        assert!(Rgba::GRAY.opacity(0.5).same_hue(&Rgba::GRAY));
    }

    #[test]
    fn test_over_background() {
        let half = Rgba::WHITE.opacity(0.5);
        assert_eq!(half.over(Rgba::BLACK), Rgba::rgb(128, 128, 128));
        assert_eq!(Rgba::WHITE.over(Rgba::BLACK), Rgba::WHITE);
        assert_eq!(Rgba::CLEAR.over(Rgba::GRAY), Rgba::GRAY);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgba::BLACK.opacity(0.0).lerp(Rgba::WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 128));
        assert!((mid.alpha - 0.5).abs() < 1e-6);
    }
}
