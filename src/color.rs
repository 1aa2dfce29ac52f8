//! Color model: HSVA working space, RGBA exchange form, hex text I/O.
//!
//! The picker edits colors in [`Hsva`]; everything that leaves the crate
//! (stop colors, scene fills) travels as `#RRGGBB` / `#RRGGBBAA` strings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math;

/// Hue in degrees `[0, 360)`, saturation/value/alpha in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsva {
    pub h: f64,
    pub s: f64,
    pub v: f64,
    pub a: f64,
}

impl Hsva {
    /// Builds a color, wrapping hue and clamping the other channels.
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self {
            h: math::wrap_hue(h),
            s: math::clamp01(s),
            v: math::clamp01(v),
            a: math::clamp01(a),
        }
    }

    pub fn with_hue(self, h: f64) -> Self {
        Self::new(h, self.s, self.v, self.a)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self::new(self.h, self.s, self.v, a)
    }

    pub fn to_rgba(self) -> Rgba {
        hsva_to_rgba(self)
    }

    /// `#RRGGBB`, alpha ignored.
    pub fn to_hex(self) -> String {
        let c = self.to_rgba();
        rgb_to_hex(c.r, c.g, c.b)
    }

    /// `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_hexa(self) -> String {
        rgba_to_hexa(self.to_rgba(), false)
    }
}

impl Default for Hsva {
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0, 1.0)
    }
}

/// 8-bit RGB with a normalized alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: math::clamp01(a),
        }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse any 3, 6 or 8 digit hex, `#` optional.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidHex(hex.to_string()));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let parsed = match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|n| n * 17);
                nibble(0).and_then(|r| Ok(Self::opaque(r, nibble(1)?, nibble(2)?)))
            }
            6 => byte(0).and_then(|r| Ok(Self::opaque(r, byte(2)?, byte(4)?))),
            8 => byte(0).and_then(|r| {
                let a = byte(6)? as f64 / 255.0;
                Ok(Self::new(r, byte(2)?, byte(4)?, a))
            }),
            _ => return Err(Error::InvalidHex(hex.to_string())),
        };
        parsed.map_err(|_| Error::InvalidHex(hex.to_string()))
    }

    /// Alpha as a rounded byte.
    pub fn alpha_byte(&self) -> u8 {
        math::to_byte(self.a)
    }

    /// Fully opaque copy; used for the alpha slider backdrop.
    pub fn opaque_copy(&self) -> Self {
        Self::opaque(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(0, 0, 0)
    }
}

/// Parse a hex color into HSVA. Missing alpha means opaque.
pub fn hex_to_hsva(hex: &str) -> Result<Hsva> {
    Rgba::from_hex(hex).map(rgba_to_hsva)
}

pub fn hsva_to_rgba(c: Hsva) -> Rgba {
    let (r, g, b) = math::hsv_to_rgb(c.h, c.s, c.v);
    Rgba::new(math::to_byte(r), math::to_byte(g), math::to_byte(b), c.a)
}

pub fn rgba_to_hsva(c: Rgba) -> Hsva {
    let (h, s, v) = math::rgb_to_hsv(
        c.r as f64 / 255.0,
        c.g as f64 / 255.0,
        c.b as f64 / 255.0,
    );
    Hsva::new(h, s, v, c.a)
}

/// Two uppercase hex digits.
pub fn component_to_hex(c: u8) -> String {
    format!("{:02X}", c)
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!(
        "#{}{}{}",
        component_to_hex(r),
        component_to_hex(g),
        component_to_hex(b)
    )
}

/// Hex with alpha appended unless the color is opaque. `force_alpha` always
/// appends it.
pub fn rgba_to_hexa(c: Rgba, force_alpha: bool) -> String {
    let hex = rgb_to_hex(c.r, c.g, c.b);
    let alpha = c.alpha_byte();
    if alpha == 255 && !force_alpha {
        hex
    } else {
        hex + &component_to_hex(alpha)
    }
}

/// Strict format check for interactive input: leading `#`, then 3, 6 or 8
/// hex digits.
pub fn is_valid_hex(text: &str) -> bool {
    match text.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Linear interpolation in RGB(A); `t` is clamped to 0.0–1.0.
pub fn lerp_rgba(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let t = math::clamp01(t);
    let channel = |a: u8, b: u8| math::lerp(a as f64, b as f64, t).round() as u8;
    Rgba::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
        math::lerp(from.a, to.a, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_long_and_alpha_forms() {
        assert_eq!(Rgba::from_hex("#f80").unwrap(), Rgba::opaque(255, 136, 0));
        assert_eq!(Rgba::from_hex("3B82F6").unwrap(), Rgba::opaque(59, 130, 246));
        let c = Rgba::from_hex("#FF000080").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(hex_to_hsva("#12345"), Err(Error::InvalidHex(_))));
        assert!(matches!(hex_to_hsva("#GGGGGG"), Err(Error::InvalidHex(_))));
        assert!(hex_to_hsva("").is_err());
        // multi-byte chars must not panic the slicing
        assert!(hex_to_hsva("#ééé").is_err());
    }

    #[test]
    fn strict_pattern_needs_hash() {
        assert!(is_valid_hex("#abc"));
        assert!(is_valid_hex("#AABBCC"));
        assert!(is_valid_hex("#aabbcc80"));
        assert!(!is_valid_hex("aabbcc"));
        assert!(!is_valid_hex("#aabbc"));
        assert!(!is_valid_hex("#aabbccd"));
        assert!(!is_valid_hex("#xyz"));
    }

    #[test]
    fn opaque_hex_round_trips_exactly() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(51) {
                for b in [0u16, 1, 127, 128, 254, 255] {
                    let hex = rgb_to_hex(r as u8, g as u8, b as u8);
                    let hsva = hex_to_hsva(&hex).unwrap();
                    let back = hsva_to_rgba(hsva);
                    assert_eq!(rgb_to_hex(back.r, back.g, back.b), hex);
                }
            }
        }
    }

    #[test]
    fn hsva_round_trip_within_tolerance() {
        let samples = [
            Hsva::new(12.0, 0.8, 0.9, 1.0),
            Hsva::new(200.0, 0.35, 0.6, 0.5),
            Hsva::new(359.0, 1.0, 1.0, 1.0),
            Hsva::new(90.0, 0.5, 0.25, 0.0),
            Hsva::new(45.0, 0.75, 0.8, 1.0),
            Hsva::new(300.0, 0.6, 1.0, 1.0),
        ];
        for c in samples {
            let back = rgba_to_hsva(hsva_to_rgba(c));
            let dh = (back.h - c.h).abs();
            assert!(dh.min(360.0 - dh) <= 1.0, "{c:?} -> {back:?}");
            assert!((back.s - c.s).abs() <= 1.0 / 255.0, "{c:?} -> {back:?}");
            assert!((back.v - c.v).abs() <= 1.0 / 255.0, "{c:?} -> {back:?}");
        }
    }

    #[test]
    fn gray_round_trip_does_not_error() {
        let gray = hsva_to_rgba(Hsva::new(123.0, 0.0, 0.5, 1.0));
        assert_eq!((gray.r, gray.g, gray.b), (128, 128, 128));
        assert_eq!(rgba_to_hsva(gray).s, 0.0);
    }

    #[test]
    fn hexa_appends_alpha_only_when_translucent() {
        assert_eq!(Hsva::new(0.0, 1.0, 1.0, 1.0).to_hexa(), "#FF0000");
        assert_eq!(Hsva::new(0.0, 1.0, 1.0, 0.0).to_hexa(), "#FF000000");
        assert_eq!(rgba_to_hexa(Rgba::opaque(1, 2, 3), true), "#010203FF");
    }

    #[test]
    fn construction_normalizes() {
        let c = Hsva::new(-30.0, 2.0, -1.0, 1.5);
        assert_eq!(c, Hsva { h: 330.0, s: 1.0, v: 0.0, a: 1.0 });
    }

    #[test]
    fn lerp_midpoint_of_black_and_white() {
        let mid = lerp_rgba(Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255), 0.5);
        assert_eq!(rgb_to_hex(mid.r, mid.g, mid.b), "#808080");
    }
}
