//! The 16-slot terminal palette and named themes.
//!
//! A [`Palette`] is immutable: editing a slot produces a new palette, so the
//! editor can keep the committed and working versions side by side without
//! aliasing.

use std::collections::BTreeMap;

use lens_term::color::{Rgb, hex_to_rgb};
use lens_term::{Error, Result};

/// Number of slots in a terminal palette.
pub const SLOT_COUNT: usize = 16;

/// Short slot names, for compact tables.
pub const SLOT_NAMES: [&str; SLOT_COUNT] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", //
    "br.blk", "br.red", "br.grn", "br.yel", "br.blu", "br.mag", "br.cyn", "br.wht",
];

/// Long slot names, for the palette table.
pub const SLOT_NAMES_LONG: [&str; SLOT_COUNT] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", //
    "br.black", "br.red", "br.green", "br.yellow", "br.blue", "br.magenta", "br.cyan",
    "br.white",
];

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Exactly 16 colors, indexed 0–15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Rgb; SLOT_COUNT],
}

impl Palette {
    /// Wrap a full color array.
    #[must_use]
    pub const fn new(colors: [Rgb; SLOT_COUNT]) -> Self {
        Self { colors }
    }

    /// Build from an index → hex mapping, the shape theme files parse into.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] for a key above 15, [`Error::MissingSlot`]
    /// for the first absent slot, or [`Error::InvalidHex`] for a bad value.
    pub fn from_hex_map(map: &BTreeMap<usize, String>) -> Result<Self> {
        if let Some((&idx, _)) = map.range(SLOT_COUNT..).next() {
            return Err(Error::IndexOutOfRange(idx));
        }
        let mut colors = [Rgb::BLACK; SLOT_COUNT];
        for (i, slot) in colors.iter_mut().enumerate() {
            let hex = map.get(&i).ok_or(Error::MissingSlot(i))?;
            *slot = hex_to_rgb(hex)?;
        }
        Ok(Self { colors })
    }

    /// Build from hex strings in slot order.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSlot`] if fewer than 16 strings are given,
    /// [`Error::IndexOutOfRange`] for a 17th, or [`Error::InvalidHex`].
    pub fn from_hex_slice(hexes: &[&str]) -> Result<Self> {
        if hexes.len() > SLOT_COUNT {
            return Err(Error::IndexOutOfRange(SLOT_COUNT));
        }
        let mut colors = [Rgb::BLACK; SLOT_COUNT];
        for (i, slot) in colors.iter_mut().enumerate() {
            let hex = hexes.get(i).ok_or(Error::MissingSlot(i))?;
            *slot = hex_to_rgb(hex)?;
        }
        Ok(Self { colors })
    }

    /// Color of slot `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] outside 0–15.
    pub fn color_of(&self, index: usize) -> Result<Rgb> {
        self.colors
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange(index))
    }

    /// Lowercase `#rrggbb` of slot `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] outside 0–15.
    pub fn hex_of(&self, index: usize) -> Result<String> {
        self.color_of(index).map(Rgb::to_hex)
    }

    /// All 16 colors in slot order.
    #[must_use]
    pub const fn colors(&self) -> &[Rgb; SLOT_COUNT] {
        &self.colors
    }

    /// Background slot (0).
    #[must_use]
    pub const fn background(&self) -> Rgb {
        self.colors[0]
    }

    /// A copy with slot `index` replaced.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] outside 0–15; `self` is unchanged either way.
    pub fn with_color(&self, index: usize, rgb: Rgb) -> Result<Self> {
        let mut colors = self.colors;
        *colors.get_mut(index).ok_or(Error::IndexOutOfRange(index))? = rgb;
        Ok(Self { colors })
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A named palette. The name is the file name it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

impl Theme {
    #[must_use]
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
