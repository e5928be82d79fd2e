//! Mockup composition — replayed captures recolored with a palette.
//!
//! A replayed [`ScreenGrid`] only knows color *names*. Composition resolves
//! each name to a palette slot and emits true-color escapes, so the preview
//! shows exactly the RGB values the palette would put on screen regardless
//! of the palette of the terminal that is displaying the report.
//!
//! Escapes are emitted once per run: a new fg/bg pair is written only when
//! the (fg slot, bg slot) pair changes, and the run state starts fresh on
//! every row. Every line ends with SGR reset.
//!
//! The same encoding is used for the swatch rows, the sample matrix, and the
//! divider between side-by-side mockups.

use std::fmt::Write;

use lens_term::{Result, ScreenGrid, ansi, replay};

use crate::palette::{Palette, SLOT_COUNT};

/// Push a true-color fg/bg pair for two palette slots.
fn push_pair(line: &mut String, palette: &Palette, fg: usize, bg: usize) -> Result<()> {
    ansi::fg_rgb(line, palette.color_of(fg)?).ok();
    ansi::bg_rgb(line, palette.color_of(bg)?).ok();
    Ok(())
}

/// Render a replayed grid as `height` true-color lines.
///
/// `Default` resolves to slot 7 as a foreground and slot 0 as a background.
/// Continuation cells of wide characters contribute no glyph.
///
/// # Errors
///
/// Only through palette lookup ([`lens_term::Error::IndexOutOfRange`]).
pub fn compose(grid: &ScreenGrid, palette: &Palette) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(usize::from(grid.height()));

    for row in grid.rows() {
        let mut line = String::with_capacity(row.len() + 40);
        let mut last: Option<(usize, usize)> = None;

        for cell in row {
            let pair = (cell.fg.fg_index(), cell.bg.bg_index());
            if last != Some(pair) {
                push_pair(&mut line, palette, pair.0, pair.1)?;
                last = Some(pair);
            }
            if let Some(ch) = cell.character() {
                line.push(ch);
            }
        }

        line.push_str(ansi::RESET);
        lines.push(line);
    }

    Ok(lines)
}

/// Replay a raw capture and compose it in one step.
///
/// # Errors
///
/// As [`compose`].
pub fn render_capture(
    raw: &str,
    width: u16,
    height: u16,
    palette: &Palette,
) -> Result<Vec<String>> {
    compose(&replay(raw, width, height), palette)
}

/// The two swatch rows: slots 0–7 and 8–15 as colored blocks.
#[must_use]
pub fn swatch_lines(palette: &Palette) -> [String; 2] {
    let colors = palette.colors();
    let mut low = String::from(" 0-7: ");
    let mut high = String::from("8-15: ");
    for (i, &rgb) in colors.iter().enumerate() {
        let (line, label) = if i < 8 {
            (&mut low, format!("  {i}  "))
        } else {
            (&mut high, format!(" {i:2}  "))
        };
        ansi::bg_rgb(line, rgb).ok();
        line.push_str(&label);
        line.push_str(ansi::RESET);
    }
    [low, high]
}

/// Every foreground slot on every background slot.
///
/// Title, header, then one row per foreground slot with its two-digit index
/// drawn on each of the 16 backgrounds.
#[must_use]
pub fn sample_matrix_lines(palette: &Palette) -> Vec<String> {
    let colors = palette.colors();
    let mut lines = Vec::with_capacity(SLOT_COUNT + 2);
    lines.push("Sample Matrix (FG on BG)".to_owned());

    let mut header = String::from("FG\\BG");
    for bg in 0..SLOT_COUNT {
        write!(header, " {bg:02} ").ok();
    }
    lines.push(header);

    for (fg, &fg_rgb) in colors.iter().enumerate() {
        let mut row = format!("  {fg:02} ");
        for &bg_rgb in colors {
            ansi::fg_rgb(&mut row, fg_rgb).ok();
            ansi::bg_rgb(&mut row, bg_rgb).ok();
            write!(row, " {fg:02} ").ok();
            row.push_str(ansi::RESET);
        }
        lines.push(row);
    }
    lines
}

/// A one-column divider: `│` in the background color on the background.
#[must_use]
pub fn divider(palette: &Palette) -> String {
    let bg = palette.background();
    let mut out = String::new();
    ansi::fg_rgb(&mut out, bg).ok();
    ansi::bg_rgb(&mut out, bg).ok();
    out.push('│');
    out.push_str(ansi::RESET);
    out
}
