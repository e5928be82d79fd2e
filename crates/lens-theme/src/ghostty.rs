//! Ghostty theme files: `palette = N=#RRGGBB` lines.
//!
//! Only palette lines are read; everything else in the file (background,
//! cursor colors, comments) is ignored. Writing produces a complete theme
//! that Ghostty can load directly, deriving the other keys from the
//! palette.

use std::collections::BTreeMap;
use std::fmt::Write;

use lens_term::Error;

use crate::error::ThemeError;
use crate::palette::{Palette, SLOT_COUNT, Theme};

const PALETTE_PREFIX: &str = "palette = ";

/// Parse the text of a theme file.
///
/// For every trimmed line starting with `palette = `, the remainder is split
/// at its first `=` into an index and a color. Later lines override earlier
/// ones for the same index. Lines without a second `=` are skipped.
///
/// # Errors
///
/// - [`ThemeError::InvalidIndex`] for a non-integer index (1-based line)
/// - [`ThemeError::Color`] with `IndexOutOfRange` for an index above 15
/// - [`ThemeError::SlotCount`] unless exactly 16 slots are defined
/// - [`ThemeError::Color`] with `InvalidHex` for a malformed color
pub fn parse_theme(name: &str, text: &str) -> Result<Theme, ThemeError> {
    let mut slots: BTreeMap<usize, String> = BTreeMap::new();

    for (n, line) in text.lines().enumerate() {
        let Some(rest) = line.trim().strip_prefix(PALETTE_PREFIX) else {
            continue;
        };
        let Some((idx, color)) = rest.split_once('=') else {
            continue;
        };
        let idx: usize = idx
            .trim()
            .parse()
            .map_err(|_| ThemeError::InvalidIndex { line: n + 1 })?;
        if idx >= SLOT_COUNT {
            return Err(Error::IndexOutOfRange(idx).into());
        }
        slots.insert(idx, color.trim().to_owned());
    }

    if slots.len() != SLOT_COUNT {
        return Err(ThemeError::SlotCount {
            name: name.to_owned(),
            found: slots.len(),
        });
    }

    Ok(Theme::new(name, Palette::from_hex_map(&slots)?))
}

/// Serialize a theme in Ghostty format.
///
/// Besides the 16 palette lines, background and cursor-text take slot 0,
/// foreground slot 7, cursor-color slot 11 (bright yellow), and
/// selection-background slot 4 with a white selection foreground.
#[must_use]
pub fn to_ghostty(theme: &Theme) -> String {
    let colors = theme.palette.colors();
    let mut out = String::with_capacity(640);

    writeln!(out, "# {}", theme.name).ok();
    out.push_str("#\n");
    for (i, rgb) in colors.iter().enumerate() {
        writeln!(out, "palette = {i}={rgb}").ok();
    }
    out.push('\n');
    writeln!(out, "background = {}", colors[0]).ok();
    writeln!(out, "foreground = {}", colors[7]).ok();
    out.push('\n');
    writeln!(out, "cursor-color = {}", colors[11]).ok();
    writeln!(out, "cursor-text = {}", colors[0]).ok();
    out.push('\n');
    writeln!(out, "selection-background = {}", colors[4]).ok();
    out.push_str("selection-foreground = #ffffff");
    out
}

/// File name for a theme: spaces and `/` become `-`, parentheses vanish.
#[must_use]
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '(' && c != ')')
        .map(|c| if c == ' ' || c == '/' { '-' } else { c })
        .collect()
}
