// SPDX-License-Identifier: MIT
//
// Report layout.
//
// Everything here produces lines of text with embedded SGR sequences; the
// caller prints them. The layout is a fixed two-column grid:
//
//   ┌──────────────────────────────────────────┬───────────────────────┐
//   │ swatches                 hue spacing     │ constraints  bright   │
//   │                                          │                       │
//   │ palette table            sample matrix   │ fm pairs              │
//   ├──────────────────────────────────────────┴───────────────────────┤
//   │ mc │ mcedit │ htop                                               │
//   │ tig                                                              │
//   └──────────────────────────────────────────────────────────────────┘
//
// Column widths are measured in visible cells: escapes are stripped before
// measuring, so colored cells pad the same as plain ones.

use std::fmt::Write;
use std::sync::LazyLock;

use lens_term::ansi::{self, RESET};
use lens_term::NamedColor;
use lens_theme::analysis::{Contrast, HueSpacing, PairContrast};
use lens_theme::mockup::{divider, render_capture, sample_matrix_lines, swatch_lines};
use lens_theme::palette::{SLOT_NAMES, SLOT_NAMES_LONG};
use lens_theme::{CaptureCache, Palette, Rating, Report};
use regex::Regex;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::config::MockupLayout;

const SWATCH_WIDTH: usize = 60;
const PALETTE_WIDTH: usize = 52;
const MATRIX_WIDTH: usize = 53;
const LEFT_WIDTH: usize = 125;
const CONSTRAINT_WIDTH: usize = 30;

static SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid regex"));

// ─── Measuring ──────────────────────────────────────────────────────────────

/// Display width of `s` with SGR sequences removed.
pub fn visible_width(s: &str) -> usize {
    SGR.replace_all(s, "").width()
}

/// Pad `s` with spaces to `width` visible cells. Never truncates.
pub fn pad_ansi(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(visible));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(visible)));
    out
}

/// Line `i` of `lines`, or empty past the end.
fn line_at(lines: &[String], i: usize) -> &str {
    lines.get(i).map_or("", String::as_str)
}

/// Join two blocks side by side, padding the left one to `width`.
fn beside(left: &[String], width: usize, sep: &str, right: &[String]) -> Vec<String> {
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| format!("{}{sep}{}", pad_ansi(line_at(left, i), width), line_at(right, i)))
        .collect()
}

// ─── Colored fragments ──────────────────────────────────────────────────────

const fn rating_color(rating: Rating) -> NamedColor {
    match rating {
        Rating::Pass => NamedColor::Green,
        Rating::Marginal => NamedColor::Yellow,
        Rating::Fail => NamedColor::Red,
    }
}

fn colored(text: &str, color: NamedColor) -> String {
    let mut out = String::new();
    ansi::fg_named(&mut out, color).ok();
    out.push_str(text);
    out.push_str(RESET);
    out
}

fn ratio_text(contrast: Contrast) -> String {
    colored(&format!("{:.1}", contrast.ratio), rating_color(contrast.rating))
}

fn status_text(contrast: Contrast) -> String {
    colored(
        &contrast.rating.symbol().to_string(),
        rating_color(contrast.rating),
    )
}

/// ` {fg} on {bg} ` drawn in the pair's own colors.
fn pair_sample(palette: &Palette, pair: &PairContrast) -> String {
    let colors = palette.colors();
    let mut out = String::new();
    ansi::fg_rgb(&mut out, colors[pair.fg]).ok();
    ansi::bg_rgb(&mut out, colors[pair.bg]).ok();
    write!(out, " {} ", pair.label()).ok();
    out.push_str(RESET);
    out
}

fn dimmed(text: &str) -> String {
    let mut out = String::new();
    ansi::dim(&mut out).ok();
    out.push_str(text);
    out.push_str(RESET);
    out
}

// ─── Tables ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const fn col(header: &'static str, width: usize) -> Column {
    Column {
        header,
        width,
        align: Align::Left,
    }
}

const fn num(header: &'static str, width: usize) -> Column {
    Column {
        header,
        width,
        align: Align::Right,
    }
}

fn fit(text: &str, column: &Column) -> String {
    let fill = column.width.saturating_sub(visible_width(text));
    match column.align {
        Align::Left => format!("{text}{}", " ".repeat(fill)),
        Align::Right => format!("{}{text}", " ".repeat(fill)),
    }
}

/// A borderless table: centered title, bold header, one space of padding
/// around every cell.
fn table(title: &str, columns: &[Column], rows: &[Vec<String>]) -> Vec<String> {
    let width: usize = columns.iter().map(|c| c.width + 2).sum();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{title:^width$}"));

    let mut header = String::new();
    ansi::bold(&mut header).ok();
    for column in columns {
        write!(header, " {} ", fit(column.header, column)).ok();
    }
    header.push_str(RESET);
    lines.push(header);

    for row in rows {
        let mut line = String::new();
        for (cell, column) in row.iter().zip(columns) {
            write!(line, " {} ", fit(cell, column)).ok();
        }
        lines.push(line);
    }
    lines
}

/// All 16 slots with hex, swatch, and contrast against the background.
pub fn palette_table(report: &Report) -> Vec<String> {
    let columns = [
        num("#", 2),
        col("Name", 10),
        col("Hex", 9),
        col("", 6),
        num("CR", 5),
        col("", 2),
    ];

    let rows: Vec<Vec<String>> = report
        .ratios
        .iter()
        .map(|slot| {
            let mut swatch = String::new();
            ansi::bg_rgb(&mut swatch, slot.color).ok();
            swatch.push_str("      ");
            swatch.push_str(RESET);

            let (cr, status) = slot
                .contrast
                .map_or_else(|| ("---".to_owned(), String::new()), |c| {
                    (ratio_text(c), status_text(c))
                });

            vec![
                dimmed(&slot.index.to_string()),
                SLOT_NAMES_LONG[slot.index].to_owned(),
                slot.color.to_hex(),
                swatch,
                cr,
                status,
            ]
        })
        .collect();

    table("Palette", &columns, &rows)
}

/// The six base colors against the background, then their minimum.
pub fn constraint_table(report: &Report) -> Vec<String> {
    let columns = [col("Color", 7), num("CR", 5), col("", 4)];
    let mut rows: Vec<Vec<String>> = report
        .constraints
        .slots
        .iter()
        .map(|pair| {
            vec![
                SLOT_NAMES[pair.fg].to_owned(),
                ratio_text(pair.contrast),
                status_text(pair.contrast),
            ]
        })
        .collect();
    rows.push(vec![String::new(); 3]);
    rows.push(vec![
        dimmed("min"),
        ratio_text(report.constraints.min),
        String::new(),
    ]);
    table("Constraints", &columns, &rows)
}

/// Each bright slot drawn on its regular counterpart.
pub fn bright_table(report: &Report) -> Vec<String> {
    let columns = [col("Pair", 18), num("CR", 5), col("", 2)];
    let rows: Vec<Vec<String>> = report
        .bright_pairs
        .iter()
        .map(|pair| {
            vec![
                pair_sample(&report.palette, pair),
                ratio_text(pair.contrast),
                status_text(pair.contrast),
            ]
        })
        .collect();
    table("Bright/Reg", &columns, &rows)
}

/// File-manager pairs: text colors on blue and on green, side by side.
pub fn fm_table(report: &Report) -> Vec<String> {
    let columns = [
        col("On Blue", 18),
        num("CR", 5),
        col("", 2),
        col("On Green", 18),
        num("CR", 5),
        col("", 2),
    ];
    let fm = &report.fm_pairs;
    let rows: Vec<Vec<String>> = fm
        .on_blue
        .iter()
        .zip(&fm.on_green)
        .map(|(blue, green)| {
            vec![
                pair_sample(&report.palette, blue),
                ratio_text(blue.contrast),
                status_text(blue.contrast),
                pair_sample(&report.palette, green),
                ratio_text(green.contrast),
                status_text(green.contrast),
            ]
        })
        .collect();
    table("FM Pairs", &columns, &rows)
}

// ─── Sections ───────────────────────────────────────────────────────────────

/// `═══ THEME ANALYZER │ [i/n] name ═══`, `position` 1-based.
pub fn header(name: &str, position: usize, total: usize) -> String {
    let mut out = String::new();
    ansi::bold(&mut out).ok();
    write!(out, "═══ THEME ANALYZER │ [{position}/{total}] {name} ═══").ok();
    out.push_str(RESET);
    out
}

pub fn hue_lines(hue: &HueSpacing) -> [String; 2] {
    let rating = hue.verdict.as_rating();
    let verdict = colored(
        &format!("{} {}", rating.symbol(), hue.verdict.label()),
        rating_color(rating),
    );
    [
        format!("Hue Spacing (ideal: {:.0}°)", lens_theme::analysis::IDEAL_HUE_SPACING),
        format!(
            "  Min: {:.0}° ({}/{}) {verdict}",
            hue.min_distance, SLOT_NAMES[hue.closest.0], SLOT_NAMES[hue.closest.1]
        ),
    ]
}

/// Swatches, hue spacing, tables, and matrix in the two-column grid.
pub fn analysis_lines(report: &Report) -> Vec<String> {
    let top = beside(
        &swatch_lines(&report.palette),
        SWATCH_WIDTH,
        " ",
        &hue_lines(&report.hue_spacing),
    );
    let middle = beside(
        &palette_table(report),
        PALETTE_WIDTH,
        " ",
        &sample_matrix_lines(&report.palette)
            .iter()
            .map(|line| pad_ansi(line, MATRIX_WIDTH))
            .collect::<Vec<_>>(),
    );
    let mut left = top;
    left.push(String::new());
    left.extend(middle);

    let mut grid = beside(
        &constraint_table(report),
        CONSTRAINT_WIDTH,
        "",
        &bright_table(report),
    );
    grid.push(String::new());
    grid.extend(fm_table(report));

    beside(&left, LEFT_WIDTH, " ", &grid)
}

/// Total width of the mockup row, dividers included.
pub fn mockup_width(layout: &MockupLayout) -> usize {
    let cells: usize = layout.row.iter().map(|s| usize::from(s.width)).sum();
    cells + layout.row.len().saturating_sub(1)
}

/// Captures recolored with `palette`: the row side by side, then each
/// capture listed below on its own. A missing capture in the row is a blank
/// column; a missing capture below is left out.
///
/// # Errors
///
/// Palette lookup errors from composition.
pub fn mockup_lines(
    palette: &Palette,
    layout: &MockupLayout,
    captures: &mut CaptureCache,
) -> lens_term::Result<Vec<String>> {
    let mut columns = Vec::with_capacity(layout.row.len());
    for slot in &layout.row {
        let lines = match captures.get(slot.name) {
            Some(raw) => render_capture(raw, slot.width, slot.height, palette)?,
            None => Vec::new(),
        };
        columns.push((usize::from(slot.width), lines));
    }

    let div = divider(palette);
    let rows = columns.iter().map(|(_, lines)| lines.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let parts: Vec<String> = columns
            .iter()
            .map(|(width, lines)| {
                lines
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| " ".repeat(*width))
            })
            .collect();
        out.push(parts.join(&div));
    }

    for slot in &layout.below {
        match captures.get(slot.name) {
            Some(raw) => {
                out.push(String::new());
                out.extend(render_capture(raw, slot.width, slot.height, palette)?);
            }
            None => debug!(capture = slot.name, "no capture, skipping"),
        }
    }
    Ok(out)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptureSlot;
    use pretty_assertions::assert_eq;

    const GRUVBOX: [&str; 16] = [
        "#282828", "#cc241d", "#98971a", "#d79921", "#458588", "#b16286", "#689d6a", "#a89984",
        "#928374", "#fb4934", "#b8bb26", "#fabd2f", "#83a598", "#d3869b", "#8ec07c", "#ebdbb2",
    ];

    fn gruvbox() -> Palette {
        Palette::from_hex_slice(&GRUVBOX).unwrap()
    }

    fn strip(s: &str) -> String {
        SGR.replace_all(s, "").into_owned()
    }

    // ── Measuring ───────────────────────────────────────────────────────

    #[test]
    fn visible_width_ignores_sgr() {
        assert_eq!(visible_width("\x1b[38;2;1;2;3mabc\x1b[0m"), 3);
        assert_eq!(visible_width("═══ │"), 5);
        assert_eq!(visible_width("中"), 2);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn pad_ansi_pads_visible_cells() {
        assert_eq!(pad_ansi("\x1b[31mab\x1b[0m", 4), "\x1b[31mab\x1b[0m  ");
        assert_eq!(pad_ansi("abcdef", 3), "abcdef");
    }

    #[test]
    fn beside_handles_uneven_blocks() {
        let left = vec!["a".to_owned()];
        let right = vec!["x".to_owned(), "y".to_owned()];
        assert_eq!(beside(&left, 3, "|", &right), ["a  |x", "   |y"]);
    }

    // ── Tables ──────────────────────────────────────────────────────────

    #[test]
    fn palette_table_rows() {
        let report = Report::build(&gruvbox());
        let lines = palette_table(&report);
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0].trim(), "Palette");

        let black = strip(&lines[2]);
        assert!(black.contains("black"), "{black}");
        assert!(black.contains("#282828"));
        assert!(black.contains("---"));

        let white = strip(&lines[17]);
        assert!(white.contains("br.white"));
        assert!(white.contains("10.7"), "{white}");
        assert!(white.contains('✓'));
    }

    #[test]
    fn palette_table_rows_share_width() {
        let report = Report::build(&gruvbox());
        let lines = palette_table(&report);
        let width = visible_width(&lines[2]);
        assert!(lines[2..].iter().all(|l| visible_width(l) == width));
        assert!(width <= PALETTE_WIDTH);
    }

    #[test]
    fn constraint_table_ends_with_min() {
        let report = Report::build(&gruvbox());
        let lines = constraint_table(&report);
        assert_eq!(lines.len(), 2 + 6 + 2);
        assert_eq!(strip(&lines[2]).split_whitespace().next(), Some("red"));
        let min = strip(&lines[9]);
        assert!(min.trim_start().starts_with("min"), "{min}");
    }

    #[test]
    fn bright_table_draws_pairs_in_their_colors() {
        let report = Report::build(&gruvbox());
        let lines = bright_table(&report);
        assert_eq!(lines.len(), 2 + 8);
        assert!(lines[2].contains("\x1b[38;2;146;131;116m\x1b[48;2;40;40;40m br.blk on black "));
        assert!(strip(&lines[2]).contains("4.0"));
    }

    #[test]
    fn fm_table_has_both_columns() {
        let report = Report::build(&gruvbox());
        let lines = fm_table(&report);
        assert_eq!(lines.len(), 2 + 6);
        let first = strip(&lines[2]);
        assert!(first.contains("white on blue"), "{first}");
        assert!(first.contains("white on green"), "{first}");
    }

    // ── Sections ────────────────────────────────────────────────────────

    #[test]
    fn header_line() {
        assert_eq!(
            strip(&header("gruvbox", 2, 5)),
            "═══ THEME ANALYZER │ [2/5] gruvbox ═══"
        );
    }

    #[test]
    fn hue_spacing_lines() {
        let report = Report::build(&gruvbox());
        let [title, min] = hue_lines(&report.hue_spacing);
        assert_eq!(title, "Hue Spacing (ideal: 60°)");
        assert!(strip(&min).starts_with("  Min: "));
        assert!(min.contains('°'));
    }

    #[test]
    fn analysis_grid() {
        let report = Report::build(&gruvbox());
        let lines = analysis_lines(&report);
        // Two swatch rows, a gap, then the taller of palette and matrix.
        assert_eq!(lines.len(), 2 + 1 + 18);
        assert!(strip(&lines[0]).starts_with(" 0-7: "));
        assert!(strip(&lines[0]).contains("Hue Spacing"));
        // Right grid starts after the padded left column.
        let grid: String = strip(&lines[0]).chars().skip(LEFT_WIDTH).collect();
        assert!(grid.contains("Constraints"), "{grid}");
    }

    // ── Mockups ─────────────────────────────────────────────────────────

    fn layout() -> MockupLayout {
        MockupLayout {
            row: vec![
                CaptureSlot { name: "a", width: 4, height: 2 },
                CaptureSlot { name: "b", width: 3, height: 2 },
            ],
            below: vec![CaptureSlot { name: "c", width: 2, height: 1 }],
        }
    }

    #[test]
    fn mockup_width_counts_dividers() {
        assert_eq!(mockup_width(&layout()), 4 + 1 + 3);
        assert_eq!(mockup_width(&MockupLayout::default()), 80 + 80 + 50 + 2);
    }

    #[test]
    fn missing_captures_are_blank_columns() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "hi").unwrap();
        let mut cache = CaptureCache::new(tmp.path());

        let lines = mockup_lines(&gruvbox(), &layout(), &mut cache).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(strip(&lines[0]), "hi  │   ");
        assert_eq!(visible_width(&lines[1]), 8);
    }

    #[test]
    fn capture_below_follows_blank_line() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("c.txt"), "\x1b[31mok").unwrap();
        let mut cache = CaptureCache::new(tmp.path());

        let lines = mockup_lines(&gruvbox(), &layout(), &mut cache).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "\x1b[38;2;204;36;29m\x1b[48;2;40;40;40mok\x1b[0m");
    }

    #[test]
    fn no_captures_no_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cache = CaptureCache::new(tmp.path());
        assert!(mockup_lines(&gruvbox(), &layout(), &mut cache).unwrap().is_empty());
    }
}
