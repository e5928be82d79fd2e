//! Palette analysis — the numbers behind the report tables.
//!
//! Every value here is derived from a [`Palette`] alone and returned as a
//! plain struct. Formatting (column widths, colors, symbols) is the
//! caller's business.
//!
//! Slot groups examined:
//!
//! - palette ratios: each slot against the background (slot 0)
//! - constraints: the six base hues (slots 1–6) against the background
//! - bright pairs: each bright slot on its regular counterpart
//! - file-manager pairs: common text colors on blue and green panels, the
//!   backgrounds that Midnight Commander style tools paint with
//! - hue spacing: how far apart the six base hues sit on the OKLCH wheel

use lens_term::color::{Rgb, hue_distance};

use crate::contrast::{Rating, ratio};
use crate::palette::{Palette, SLOT_NAMES};

/// Background slot.
const BG: usize = 0;

/// The six base hues: red, green, yellow, blue, magenta, cyan.
const BASE_SLOTS: [usize; 6] = [1, 2, 3, 4, 5, 6];

const BLUE: usize = 4;
const GREEN: usize = 2;

/// Foreground slots checked on a blue panel.
pub const ON_BLUE: [usize; 6] = [7, 3, 5, 6, 2, 1];

/// Foreground slots checked on a green panel.
pub const ON_GREEN: [usize; 6] = [7, 3, 5, 4, 1, 6];

/// Ideal spacing between six evenly distributed hues.
pub const IDEAL_HUE_SPACING: f64 = 60.0;

// ---------------------------------------------------------------------------
// Contrast values
// ---------------------------------------------------------------------------

/// A contrast ratio and its rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    pub ratio: f64,
    pub rating: Rating,
}

impl Contrast {
    #[must_use]
    pub fn between(fg: Rgb, bg: Rgb) -> Self {
        Self::from_ratio(ratio(fg, bg))
    }

    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            rating: Rating::of(ratio),
        }
    }
}

/// One slot of the palette table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotContrast {
    pub index: usize,
    pub color: Rgb,
    /// Against the background; `None` for the background itself.
    pub contrast: Option<Contrast>,
}

/// A foreground slot drawn on a background slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContrast {
    pub fg: usize,
    pub bg: usize,
    pub contrast: Contrast,
}

impl PairContrast {
    fn of(palette: &Palette, fg: usize, bg: usize) -> Self {
        let colors = palette.colors();
        Self {
            fg,
            bg,
            contrast: Contrast::between(colors[fg], colors[bg]),
        }
    }

    /// `"br.red on red"` style label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} on {}", SLOT_NAMES[self.fg], SLOT_NAMES[self.bg])
    }
}

/// Every slot's contrast against the background.
#[must_use]
pub fn palette_ratios(palette: &Palette) -> Vec<SlotContrast> {
    let bg = palette.background();
    palette
        .colors()
        .iter()
        .enumerate()
        .map(|(index, &color)| SlotContrast {
            index,
            color,
            contrast: (index != BG).then(|| Contrast::between(color, bg)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// The base hues against the background, and the weakest of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    pub slots: Vec<PairContrast>,
    pub min: Contrast,
}

#[must_use]
pub fn constraints(palette: &Palette) -> Constraints {
    let slots: Vec<_> = BASE_SLOTS
        .iter()
        .map(|&fg| PairContrast::of(palette, fg, BG))
        .collect();
    let min = slots
        .iter()
        .map(|p| p.contrast.ratio)
        .fold(f64::INFINITY, f64::min);
    Constraints {
        slots,
        min: Contrast::from_ratio(min),
    }
}

/// Bright slots on their regular counterparts: `(8,0)`, `(9,1)`…`(14,6)`,
/// `(15,7)`.
#[must_use]
pub fn bright_pairs(palette: &Palette) -> Vec<PairContrast> {
    (0..8)
        .map(|base| PairContrast::of(palette, base + 8, base))
        .collect()
}

/// Text colors on the blue and green panels of a file manager.
#[derive(Debug, Clone, PartialEq)]
pub struct FmPairs {
    pub on_blue: Vec<PairContrast>,
    pub on_green: Vec<PairContrast>,
}

#[must_use]
pub fn fm_pairs(palette: &Palette) -> FmPairs {
    FmPairs {
        on_blue: ON_BLUE
            .iter()
            .map(|&fg| PairContrast::of(palette, fg, BLUE))
            .collect(),
        on_green: ON_GREEN
            .iter()
            .map(|&fg| PairContrast::of(palette, fg, GREEN))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Hue spacing
// ---------------------------------------------------------------------------

/// How well separated the base hues are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueVerdict {
    /// Closest pair at least 50° apart.
    Good,
    /// At least 30°.
    Ok,
    Close,
}

impl HueVerdict {
    #[must_use]
    pub fn of(min_distance: f64) -> Self {
        if min_distance >= 50.0 {
            Self::Good
        } else if min_distance >= 30.0 {
            Self::Ok
        } else {
            Self::Close
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Ok => "OK",
            Self::Close => "Close",
        }
    }

    /// The contrast rating with the same color and symbol.
    #[must_use]
    pub const fn as_rating(self) -> Rating {
        match self {
            Self::Good => Rating::Pass,
            Self::Ok => Rating::Marginal,
            Self::Close => Rating::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSpacing {
    /// OKLCH hue of slots 1–6, in slot order.
    pub hues: [f64; 6],
    /// Smallest pairwise hue distance, in degrees.
    pub min_distance: f64,
    /// Slot indices of the first pair reaching `min_distance`.
    pub closest: (usize, usize),
    pub verdict: HueVerdict,
}

#[must_use]
pub fn hue_spacing(palette: &Palette) -> HueSpacing {
    let colors = palette.colors();
    let hues = BASE_SLOTS.map(|slot| colors[slot].to_oklch().h);

    let mut min_distance = 360.0;
    let mut closest = (BASE_SLOTS[0], BASE_SLOTS[1]);
    for i in 0..hues.len() {
        for j in i + 1..hues.len() {
            let d = hue_distance(hues[i], hues[j]);
            if d < min_distance {
                min_distance = d;
                closest = (BASE_SLOTS[i], BASE_SLOTS[j]);
            }
        }
    }

    HueSpacing {
        hues,
        min_distance,
        closest,
        verdict: HueVerdict::of(min_distance),
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// All analysis tables for one palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub palette: Palette,
    pub ratios: Vec<SlotContrast>,
    pub constraints: Constraints,
    pub bright_pairs: Vec<PairContrast>,
    pub fm_pairs: FmPairs,
    pub hue_spacing: HueSpacing,
}

impl Report {
    #[must_use]
    pub fn build(palette: &Palette) -> Self {
        Self {
            palette: *palette,
            ratios: palette_ratios(palette),
            constraints: constraints(palette),
            bright_pairs: bright_pairs(palette),
            fm_pairs: fm_pairs(palette),
            hue_spacing: hue_spacing(palette),
        }
    }
}
