// SPDX-License-Identifier: MIT
//
// Cell — one character position of a replayed capture.
//
// Captures are recolored after the fact, so a cell never stores RGB. It
// stores the *symbolic* color the captured program asked for (red, bright
// blue, terminal default, ...). The mockup compositor later resolves those
// names against whichever palette is being previewed.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the character; the second is a continuation cell (ch = '\0'). The
// compositor skips the continuation cell's glyph but still applies its
// colors.

use std::fmt;

use crate::error::{Error, Result};

/// Palette slot used for a `Default` foreground.
pub const DEFAULT_FG_INDEX: usize = 7;

/// Palette slot used for a `Default` background.
pub const DEFAULT_BG_INDEX: usize = 0;

// ─── NamedColor ──────────────────────────────────────────────────────────────

/// The 16 ANSI color names plus the terminal default.
///
/// This is the whole color vocabulary of a replayed capture. Extended
/// (256-color and true-color) SGR selections collapse to [`Default`],
/// because only the 16 named slots can be remapped by a palette.
///
/// [`Default`]: NamedColor::Default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamedColor {
    /// Terminal default: slot 7 as a foreground, slot 0 as a background.
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// The 16 non-default names in palette order (index 0 through 15).
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Palette slot of this name, or `None` for [`NamedColor::Default`].
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        Some(match self {
            Self::Default => return None,
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
            Self::BrightRed => 9,
            Self::BrightGreen => 10,
            Self::BrightYellow => 11,
            Self::BrightBlue => 12,
            Self::BrightMagenta => 13,
            Self::BrightCyan => 14,
            Self::BrightWhite => 15,
        })
    }

    /// Palette slot when used as a foreground.
    #[inline]
    #[must_use]
    pub const fn fg_index(self) -> usize {
        match self.index() {
            Some(idx) => idx,
            None => DEFAULT_FG_INDEX,
        }
    }

    /// Palette slot when used as a background.
    #[inline]
    #[must_use]
    pub const fn bg_index(self) -> usize {
        match self.index() {
            Some(idx) => idx,
            None => DEFAULT_BG_INDEX,
        }
    }

    /// Lowercase name as written in captures and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "brightblack",
            Self::BrightRed => "brightred",
            Self::BrightGreen => "brightgreen",
            Self::BrightYellow => "brightyellow",
            Self::BrightBlue => "brightblue",
            Self::BrightMagenta => "brightmagenta",
            Self::BrightCyan => "brightcyan",
            Self::BrightWhite => "brightwhite",
        }
    }

    /// Look up a color by name.
    ///
    /// Accepts the names returned by [`name`](Self::name), case-insensitively,
    /// plus the xterm spelling `brown` / `brightbrown` for yellow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColorName`] for anything else.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "default" => Ok(Self::Default),
            "brown" => Ok(Self::Yellow),
            "brightbrown" => Ok(Self::BrightYellow),
            other => Self::ALL
                .into_iter()
                .find(|c| c.name() == other)
                .ok_or_else(|| Error::UnknownColorName(name.to_owned())),
        }
    }

    /// Standard color for an SGR offset 0–7 (as in `30 + n`).
    #[must_use]
    pub const fn standard(offset: u16) -> Option<Self> {
        if offset < 8 {
            Some(Self::ALL[offset as usize])
        } else {
            None
        }
    }

    /// Bright color for an SGR offset 0–7 (as in `90 + n`).
    #[must_use]
    pub const fn bright(offset: u16) -> Option<Self> {
        if offset < 8 {
            Some(Self::ALL[offset as usize + 8])
        } else {
            None
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single grid position: a character and its symbolic colors.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display.
    ///
    /// - `'\0'` = continuation cell (second column of a wide character)
    /// - `' '` = empty / space (the default)
    pub ch: char,

    /// Foreground (text) color.
    pub fg: NamedColor,

    /// Background color.
    pub bg: NamedColor,
}

/// Continuation marker for the second column of a wide character.
const CONTINUATION: char = '\0';

impl Cell {
    /// An empty cell: space character, default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: NamedColor::Default,
        bg: NamedColor::Default,
    };

    /// Create a cell with a character and default colors.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: NamedColor::Default,
            bg: NamedColor::Default,
        }
    }

    /// Create a cell with explicit colors.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: NamedColor, bg: NamedColor) -> Self {
        Self { ch, fg, bg }
    }

    /// The continuation half of a wide character, carrying its colors.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: NamedColor, bg: NamedColor) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
        }
    }

    /// Whether this is the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The displayable character, or `None` for a continuation cell.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.is_continuation() {
            None
        } else {
            Some(self.ch)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_continuation() {
            write!(f, "Cell(cont, {}/{})", self.fg, self.bg)
        } else {
            write!(f, "Cell({:?}, {}/{})", self.ch, self.fg, self.bg)
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
