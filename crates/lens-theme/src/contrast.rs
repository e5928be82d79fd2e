//! WCAG 2.1 contrast ratios and the pass/marginal/fail rating.
//!
//! Linearization here uses WCAG's own 0.03928 threshold rather than the
//! IEC 61966-2-1 value (0.04045) that the Oklab conversion in `lens-term`
//! uses. No 8-bit channel falls between the two, so results are identical;
//! the constant still follows the WCAG text.
//!
//! Thresholds follow WCAG AA: 4.5:1 for normal text, 3:1 for large text.
//! Anything below large-text AA fails.

use lens_term::Result;
use lens_term::color::{Rgb, hex_to_rgb};

/// Minimum ratio for normal text (WCAG AA).
pub const AA_NORMAL: f64 = 4.5;

/// Minimum ratio for large text (WCAG AA).
pub const AA_LARGE: f64 = 3.0;

#[inline]
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an 8-bit color, in `[0, 1]`.
///
/// Plain products and sums, so black/white contrast comes out at exactly 21.
#[allow(clippy::suboptimal_flops)]
#[must_use]
pub fn luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Relative luminance of a `#RRGGBB` color.
///
/// # Errors
///
/// [`lens_term::Error::InvalidHex`] if `hex` does not parse.
pub fn relative_luminance(hex: &str) -> Result<f64> {
    hex_to_rgb(hex).map(luminance)
}

/// Contrast ratio of two colors, in `[1, 21]`. Symmetric.
#[must_use]
pub fn ratio(a: Rgb, b: Rgb) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of two `#RRGGBB` colors.
///
/// # Errors
///
/// [`lens_term::Error::InvalidHex`] if either string does not parse.
pub fn contrast_ratio(c1: &str, c2: &str) -> Result<f64> {
    Ok(ratio(hex_to_rgb(c1)?, hex_to_rgb(c2)?))
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Accessibility verdict for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    /// Meets AA for normal text.
    Pass,
    /// Meets AA for large text only.
    Marginal,
    Fail,
}

impl Rating {
    #[must_use]
    pub fn of(ratio: f64) -> Self {
        if ratio >= AA_NORMAL {
            Self::Pass
        } else if ratio >= AA_LARGE {
            Self::Marginal
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Marginal => "marginal",
            Self::Fail => "fail",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Pass => '✓',
            Self::Marginal => '~',
            Self::Fail => '✗',
        }
    }
}
