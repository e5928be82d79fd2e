// SPDX-License-Identifier: MIT
//
// lens-term color science — hex parsing, sRGB linearization, Oklab/OKLCH.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   #RRGGBB ↔ Rgb (u8) → sRGB (0–1) → Linear sRGB → LMS → Oklab → OKLCH
//
// All math is f64. The matrix constants are Björn Ottosson's published
// values to ten decimal places; hue and chroma reports are compared
// against other tools, so they must not be rounded or re-derived.
//
// The linearization here uses the IEC 61966-2-1 threshold (0.04045). WCAG
// luminance in lens-theme uses its own 0.03928 threshold on purpose: the
// two standards define them separately.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color, the unit every palette slot is stored in.
///
/// Displays as lowercase `#rrggbb` and parses from `#RRGGBB` in either case:
///
/// ```
/// use lens_term::color::Rgb;
///
/// let c: Rgb = "#EBDBB2".parse().unwrap();
/// assert_eq!(c, Rgb::new(0xeb, 0xdb, 0xb2));
/// assert_eq!(c.to_string(), "#ebdbb2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Convert to Oklab.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        rgb_to_oklab(self)
    }

    /// Convert to OKLCH.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        rgb_to_oklch(self)
    }

    /// The three channels as a tuple, for destructuring.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ─── Oklab / OKLCH ───────────────────────────────────────────────────────────

/// A color in Oklab: perceptual lightness plus two opponent axes.
///
/// Derived on demand from an [`Rgb`]; nothing in the workspace caches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness, 0.0 (black) to ~1.0 (white).
    pub l: f64,
    /// Green (−) to red (+) axis.
    pub a: f64,
    /// Blue (−) to yellow (+) axis.
    pub b: f64,
}

/// A color in OKLCH, the polar form of Oklab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness, identical to [`Oklab::l`].
    pub l: f64,
    /// Chroma: distance from the neutral axis.
    pub c: f64,
    /// Hue angle in degrees, in `[0, 360)`.
    pub h: f64,
}

impl Oklab {
    /// Polar form of this color.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let mut h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Oklch { l: self.l, c, h }
    }
}

impl Oklch {
    /// Rebuild the Cartesian Oklab coordinates.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * h_rad.cos(),
            b: self.c * h_rad.sin(),
        }
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse a `#RRGGBB` string.
///
/// # Errors
///
/// Returns [`Error::InvalidHex`] if the string does not start with `#`, is
/// not exactly seven bytes long, or contains a non-hexadecimal digit.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    parse_hex(hex).ok_or_else(|| Error::InvalidHex(hex.to_owned()))
}

/// Format a color as lowercase `#rrggbb`.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

/// Whether `s` is a valid `#RRGGBB` color.
///
/// Same rules as [`hex_to_rgb`]; meant for probing text that is still being
/// typed before committing it anywhere.
#[must_use]
pub fn is_valid_hex_color(s: &str) -> bool {
    parse_hex(s).is_some()
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let digits = s.strip_prefix('#')?.as_bytes();
    if digits.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&digits[0..2])?;
    let g = parse_hex_byte(&digits[2..4])?;
    let b = parse_hex_byte(&digits[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── sRGB → Oklab ────────────────────────────────────────────────────────────
//
// Reference: https://bottosson.github.io/posts/oklab/

/// Linear sRGB → LMS cone response.
const LMS_FROM_LINEAR: [[f64; 3]; 3] = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

/// Cube-rooted LMS → Oklab.
const LAB_FROM_LMS: [[f64; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

/// Convert one 8-bit sRGB channel (as 0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an 8-bit sRGB color to Oklab.
#[must_use]
pub fn rgb_to_oklab(rgb: Rgb) -> Oklab {
    let linear = [
        srgb_to_linear(f64::from(rgb.r) / 255.0),
        srgb_to_linear(f64::from(rgb.g) / 255.0),
        srgb_to_linear(f64::from(rgb.b) / 255.0),
    ];

    let lms = mat_mul(&LMS_FROM_LINEAR, linear).map(cbrt_or_zero);
    let [l, a, b] = mat_mul(&LAB_FROM_LMS, lms);

    Oklab { l, a, b }
}

/// Convert an 8-bit sRGB color to OKLCH, hue normalized to `[0, 360)`.
#[must_use]
pub fn rgb_to_oklch(rgb: Rgb) -> Oklch {
    rgb_to_oklab(rgb).to_oklch()
}

/// Shortest angular distance between two hues, in `[0, 180]`.
#[must_use]
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

// Plain products and sums, evaluated left to right. Fused multiply-add
// would move results in the last digit.
#[allow(clippy::suboptimal_flops)]
#[inline]
fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// Cube root that maps zero and negative inputs to 0.
#[inline]
fn cbrt_or_zero(v: f64) -> f64 {
    if v > 0.0 { v.cbrt() } else { 0.0 }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex Parsing ──────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_lowercase() {
        assert_eq!(hex_to_rgb("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn hex_parsing_uppercase() {
        assert_eq!(hex_to_rgb("#1D2021").unwrap(), Rgb::new(0x1d, 0x20, 0x21));
    }

    #[test]
    fn hex_parsing_requires_hash() {
        assert_eq!(
            hex_to_rgb("ff8000"),
            Err(Error::InvalidHex("ff8000".into()))
        );
    }

    #[test]
    fn hex_parsing_rejects_wrong_length() {
        assert!(hex_to_rgb("#f80").is_err());
        assert!(hex_to_rgb("#ff800000").is_err());
        assert!(hex_to_rgb("#").is_err());
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn hex_parsing_rejects_non_hex_digits() {
        assert!(hex_to_rgb("#gg0000").is_err());
        assert!(hex_to_rgb("#12345z").is_err());
        assert!(hex_to_rgb("#-12345").is_err());
    }

    #[test]
    fn hex_parsing_rejects_multibyte_text() {
        // Seven bytes, but not seven characters of hex.
        assert!(hex_to_rgb("#ééé").is_err());
    }

    #[test]
    fn valid_hex_probe_matches_parser() {
        for s in ["#000000", "#ABCDEF", "#abcdef", "#a", "000000", "#12345g"] {
            assert_eq!(is_valid_hex_color(s), hex_to_rgb(s).is_ok(), "{s}");
        }
    }

    #[test]
    fn hex_formatting_is_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(0xAB, 0x0C, 0xEF)), "#ab0cef");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn from_str_parses() {
        let c: Rgb = "#ebdbb2".parse().unwrap();
        assert_eq!(c.channels(), (0xeb, 0xdb, 0xb2));
    }

    // ── Linearization ────────────────────────────────────────────────────

    #[test]
    fn linearization_endpoints() {
        assert!(approx_eq(srgb_to_linear(0.0), 0.0, 1e-12));
        assert!(approx_eq(srgb_to_linear(1.0), 1.0, 1e-12));
    }

    #[test]
    fn linearization_below_threshold_is_linear() {
        assert!(approx_eq(srgb_to_linear(0.04), 0.04 / 12.92, 1e-12));
    }

    #[test]
    fn linearization_mid_gray() {
        // sRGB 0.5 linearizes to ~0.214.
        let v = srgb_to_linear(0.5);
        assert!(approx_eq(v, 0.214_041, 1e-5), "{v}");
    }

    // ── Known Values ─────────────────────────────────────────────────────

    #[test]
    fn oklab_pure_red() {
        let lab = rgb_to_oklab(Rgb::new(255, 0, 0));
        assert!(approx_eq(lab.l, 0.627_955_360_6, 1e-9), "L {}", lab.l);
        assert!(approx_eq(lab.a, 0.224_863_061_1, 1e-9), "a {}", lab.a);
        assert!(approx_eq(lab.b, 0.125_846_298_5, 1e-9), "b {}", lab.b);
    }

    #[test]
    fn oklab_pure_blue() {
        let lab = rgb_to_oklab(Rgb::new(0, 0, 255));
        assert!(approx_eq(lab.l, 0.452_013_718_4, 1e-9));
        assert!(approx_eq(lab.a, -0.032_456_984_2, 1e-9));
        assert!(approx_eq(lab.b, -0.311_528_147_7, 1e-9));
    }

    #[test]
    fn oklab_black_is_origin() {
        let lab = rgb_to_oklab(Rgb::BLACK);
        assert_eq!((lab.l, lab.a, lab.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn oklab_white_is_full_lightness() {
        let lab = rgb_to_oklab(Rgb::WHITE);
        assert!(approx_eq(lab.l, 1.0, 1e-7));
        assert!(approx_eq(lab.a, 0.0, 1e-6));
        assert!(approx_eq(lab.b, 0.0, 1e-6));
    }

    #[test]
    fn oklch_red_hue_near_29() {
        let lch = rgb_to_oklch(Rgb::new(255, 0, 0));
        assert!(approx_eq(lch.h, 29.233_885, 1e-5), "hue {}", lch.h);
        assert!(approx_eq(lch.c, 0.257_683, 1e-5), "chroma {}", lch.c);
    }

    #[test]
    fn oklch_negative_angle_wraps() {
        // Pure blue sits in the third quadrant: atan2 is negative.
        let lch = rgb_to_oklch(Rgb::new(0, 0, 255));
        assert!(approx_eq(lch.h, 264.052_021, 1e-5), "hue {}", lch.h);
    }

    #[test]
    fn gray_has_no_chroma() {
        let lch = rgb_to_oklch(Rgb::new(128, 128, 128));
        assert!(lch.c < 1e-6, "chroma {}", lch.c);
    }

    // ── Hue Distance ─────────────────────────────────────────────────────

    #[test]
    fn hue_distance_wraps_around() {
        assert!(approx_eq(hue_distance(10.0, 350.0), 20.0, 1e-12));
        assert!(approx_eq(hue_distance(350.0, 10.0), 20.0, 1e-12));
    }

    #[test]
    fn hue_distance_opposite_is_180() {
        assert!(approx_eq(hue_distance(0.0, 180.0), 180.0, 1e-12));
        assert!(approx_eq(hue_distance(90.0, 270.0), 180.0, 1e-12));
    }

    #[test]
    fn hue_distance_same_hue_is_zero() {
        assert_eq!(hue_distance(123.4, 123.4), 0.0);
    }

    // ── Properties ───────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn hex_roundtrip(r: u8, g: u8, b: u8, upper: bool) {
            let hex = format!("#{r:02x}{g:02x}{b:02x}");
            let input = if upper { hex.to_uppercase() } else { hex.clone() };
            prop_assert_eq!(rgb_to_hex(hex_to_rgb(&input).unwrap()), hex);
        }

        #[test]
        fn oklch_reconstructs_oklab(r: u8, g: u8, b: u8) {
            let rgb = Rgb::new(r, g, b);
            let lab = rgb_to_oklab(rgb);
            let back = rgb_to_oklch(rgb).to_oklab();
            prop_assert!((lab.a - back.a).abs() < 1e-6);
            prop_assert!((lab.b - back.b).abs() < 1e-6);
            prop_assert!((lab.l - back.l).abs() < 1e-12);
        }

        #[test]
        fn oklch_hue_in_range(r: u8, g: u8, b: u8) {
            let h = rgb_to_oklch(Rgb::new(r, g, b)).h;
            prop_assert!((0.0..360.0).contains(&h), "hue {}", h);
        }

        #[test]
        fn hue_distance_bounded(h1 in 0.0f64..360.0, h2 in 0.0f64..360.0) {
            let d = hue_distance(h1, h2);
            prop_assert!((0.0..=180.0).contains(&d));
            prop_assert!((d - hue_distance(h2, h1)).abs() < 1e-12);
        }
    }
}
