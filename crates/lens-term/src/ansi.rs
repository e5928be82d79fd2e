// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that append escape sequences to any `impl fmt::Write`.
// Mockups and reports are assembled as `String`s line by line, so there is
// no byte sink here; `String`'s `fmt::Write` impl never fails, and callers
// that write into one may discard the `fmt::Result`.

use std::fmt::{self, Write};

use crate::cell::NamedColor;
use crate::color::Rgb;

/// SGR reset, as a constant for callers that build lines with `push_str`.
pub const RESET: &str = "\x1b[0m";

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Bold on (SGR 1).
#[inline]
pub fn bold(w: &mut impl Write) -> fmt::Result {
    w.write_str("\x1b[1m")
}

/// Dim on (SGR 2).
#[inline]
pub fn dim(w: &mut impl Write) -> fmt::Result {
    w.write_str("\x1b[2m")
}

// ─── True color ──────────────────────────────────────────────────────────────

/// 24-bit foreground: `ESC[38;2;r;g;bm`.
#[inline]
pub fn fg_rgb(w: &mut impl Write, rgb: Rgb) -> fmt::Result {
    write!(w, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// 24-bit background: `ESC[48;2;r;g;bm`.
#[inline]
pub fn bg_rgb(w: &mut impl Write, rgb: Rgb) -> fmt::Result {
    write!(w, "\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

// ─── Named color ─────────────────────────────────────────────────────────────

/// Named foreground using the compact codes (30–37, 90–97, 39 for default).
pub fn fg_named(w: &mut impl Write, color: NamedColor) -> fmt::Result {
    match color.index() {
        None => w.write_str("\x1b[39m"),
        Some(idx @ 0..=7) => write!(w, "\x1b[{}m", 30 + idx),
        Some(idx) => write!(w, "\x1b[{}m", 82 + idx),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut String) -> fmt::Result,
    {
        let mut buf = String::new();
        f(&mut buf).unwrap();
        buf
    }

    // ── Attributes ──────────────────────────────────────────────────────

    #[test]
    fn attributes() {
        assert_eq!(emit(|w| bold(w)), "\x1b[1m");
        assert_eq!(emit(|w| dim(w)), "\x1b[2m");
    }

    // ── True color ──────────────────────────────────────────────────────

    #[test]
    fn truecolor_sequences() {
        let rgb = Rgb::new(29, 32, 33);
        assert_eq!(emit(|w| fg_rgb(w, rgb)), "\x1b[38;2;29;32;33m");
        assert_eq!(emit(|w| bg_rgb(w, rgb)), "\x1b[48;2;29;32;33m");
    }

    // ── Named ───────────────────────────────────────────────────────────

    #[test]
    fn named_fg_codes() {
        assert_eq!(emit(|w| fg_named(w, NamedColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| fg_named(w, NamedColor::Black)), "\x1b[30m");
        assert_eq!(emit(|w| fg_named(w, NamedColor::White)), "\x1b[37m");
        assert_eq!(emit(|w| fg_named(w, NamedColor::BrightBlack)), "\x1b[90m");
        assert_eq!(emit(|w| fg_named(w, NamedColor::BrightWhite)), "\x1b[97m");
    }
}
