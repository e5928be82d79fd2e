// SPDX-License-Identifier: MIT
//
// Capture replay — a tiny VT emulator.
//
// A capture is a text dump of a terminal program's screen: plain characters
// interleaved with cursor-positioning and SGR color escapes. `replay` feeds
// it into a fixed-size `ScreenGrid` the way a terminal would, keeping colors
// symbolic so the result can be recolored with any palette.
//
// Only a small, well-defined subset of VT behavior matters here:
//
//   - CUP (`CSI row;col H` / `f`) moves the cursor, clamped into the grid.
//   - SGR (`CSI ... m`) selects the 16 named colors or the default.
//   - CR, BS and TAB move the cursor within the current row.
//   - Printable characters land at the cursor. There is no wrapping: once
//     the cursor reaches the right edge, further text on that source line
//     is discarded.
//
// Everything else (private-mode CSIs, OSC strings, charset designations,
// unknown controls, truncated sequences) is consumed and ignored. No input
// is an error.
//
// Source lines are replayed one per row: line `i` starts at row `i`,
// column 0. When a line ends short of the right edge, the rest of the
// cursor's row is padded with spaces in the active colors, so a trailing
// background color bleeds to the edge exactly as it would on a real
// terminal that received the padding.

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, NamedColor};
use crate::grid::ScreenGrid;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// One numeric CSI parameter.
///
/// `value` is `None` for an empty field (`CSI ;5H`). `colon` marks a field
/// that carried ITU sub-parameters (`38:2:r:g:b`), which must not consume
/// the following `;`-separated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Param {
    value: Option<u16>,
    colon: bool,
}

/// A lexical unit of a capture line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Print(char),
    Control(char),
    Csi { params: Vec<Param>, final_byte: u8 },
    Ignored,
}

/// Lex the token starting at byte `pos`. Returns the token and the number
/// of bytes it spans; always at least 1 and always on a char boundary.
fn next_token(line: &str, pos: usize) -> (Token, usize) {
    let rest = &line[pos..];
    match rest.chars().next() {
        None => (Token::Ignored, 1),
        Some('\x1b') => parse_escape(rest),
        Some(c) if c.is_control() => (Token::Control(c), c.len_utf8()),
        Some(c) => (Token::Print(c), c.len_utf8()),
    }
}

/// Lex an escape sequence. `rest` starts with ESC.
fn parse_escape(rest: &str) -> (Token, usize) {
    let bytes = rest.as_bytes();
    match bytes.get(1) {
        None => (Token::Ignored, 1),
        Some(b'[') => parse_csi(bytes),
        Some(b']') => (Token::Ignored, osc_len(bytes)),
        Some(_) => {
            // nF sequences: intermediates (0x20..=0x2F) then one final char,
            // e.g. `ESC ( B`.
            let mut end = 1;
            while end < bytes.len() && (0x20..=0x2F).contains(&bytes[end]) {
                end += 1;
            }
            let final_len = rest[end..].chars().next().map_or(0, char::len_utf8);
            (Token::Ignored, end + final_len)
        }
    }
}

/// Lex a CSI sequence. `bytes` starts with `ESC [`.
fn parse_csi(bytes: &[u8]) -> (Token, usize) {
    // Parameter bytes are 0x30..=0x3F, intermediates 0x20..=0x2F, and the
    // final byte 0x40..=0x7E.
    let mut end = 2;
    while end < bytes.len() {
        let b = bytes[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            // Invalid byte: drop the sequence, reprocess the byte.
            return (Token::Ignored, end);
        }
        end += 1;
    }

    if end >= bytes.len() {
        return (Token::Ignored, bytes.len());
    }

    let raw = &bytes[2..end];
    let private = raw.first().is_some_and(|b| (b'<'..=b'?').contains(b));
    let intermediate = raw.iter().any(|b| (0x20..=0x2F).contains(b));
    if private || intermediate {
        return (Token::Ignored, end + 1);
    }

    let token = Token::Csi {
        params: parse_params(raw),
        final_byte: bytes[end],
    };
    (token, end + 1)
}

/// Length of an OSC string starting at `bytes[0] == ESC`, through its BEL or
/// ST terminator. Unterminated strings run to the end of the line.
fn osc_len(bytes: &[u8]) -> usize {
    let mut i = 2;
    while i < bytes.len() {
        match bytes[i] {
            BEL => return i + 1,
            ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
            // Any other ESC aborts the string and starts a new sequence.
            ESC => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Split raw CSI parameter bytes into `;`-separated fields.
fn parse_params(raw: &[u8]) -> Vec<Param> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            let digits = field.iter().take_while(|b| b.is_ascii_digit());
            let mut value: Option<u16> = None;
            for &d in digits {
                let v = value.unwrap_or(0);
                value = Some(v.saturating_mul(10).saturating_add(u16::from(d - b'0')));
            }
            Param {
                value,
                colon: field.contains(&b':'),
            }
        })
        .collect()
}

// ─── Replayer ────────────────────────────────────────────────────────────────

struct Replayer {
    grid: ScreenGrid,
    fg: NamedColor,
    bg: NamedColor,
    ignored: usize,
}

impl Replayer {
    fn new(width: u16, height: u16) -> Self {
        Self {
            grid: ScreenGrid::new(width, height),
            fg: NamedColor::Default,
            bg: NamedColor::Default,
            ignored: 0,
        }
    }

    fn line(&mut self, row: u16, line: &str) {
        self.grid.move_cursor(0, row);

        let mut pos = 0;
        while pos < line.len() {
            let (token, len) = next_token(line, pos);
            pos += len;
            match token {
                Token::Print(ch) => self.print(ch),
                Token::Control(ch) => self.control(ch),
                Token::Csi { params, final_byte } => self.csi(&params, final_byte),
                Token::Ignored => self.ignored += 1,
            }
        }

        self.pad_row();
    }

    fn print(&mut self, ch: char) {
        let width = self.grid.width();
        let cursor = self.grid.cursor();
        if cursor.x >= width {
            return;
        }
        match ch.width().unwrap_or(0) {
            0 => {}
            1 => {
                self.vacate(cursor.x, cursor.y);
                self.grid
                    .set(cursor.x, cursor.y, Cell::styled(ch, self.fg, self.bg));
                self.grid.set_cursor_x(cursor.x + 1);
            }
            _ => {
                if cursor.x + 1 < width {
                    self.vacate(cursor.x, cursor.y);
                    self.vacate(cursor.x + 1, cursor.y);
                    self.grid
                        .set(cursor.x, cursor.y, Cell::styled(ch, self.fg, self.bg));
                    self.grid
                        .set(cursor.x + 1, cursor.y, Cell::continuation(self.fg, self.bg));
                    self.grid.set_cursor_x(cursor.x + 2);
                } else {
                    self.grid.set_cursor_x(width);
                }
            }
        }
    }

    /// Break up any wide character that overlaps `(x, y)` before it is
    /// overwritten, so every row stays exactly `width` columns wide. The
    /// orphaned half becomes a blank in its own colors.
    fn vacate(&mut self, x: u16, y: u16) {
        let Some(&cell) = self.grid.get(x, y) else {
            return;
        };
        if cell.is_continuation() {
            if let Some(x) = x.checked_sub(1) {
                self.blank(x, y);
            }
        } else if self.grid.get(x + 1, y).is_some_and(|next| next.is_continuation()) {
            self.blank(x + 1, y);
        }
    }

    fn blank(&mut self, x: u16, y: u16) {
        if let Some(&cell) = self.grid.get(x, y) {
            self.grid.set(x, y, Cell::styled(' ', cell.fg, cell.bg));
        }
    }

    fn control(&mut self, ch: char) {
        let cursor = self.grid.cursor();
        match ch {
            '\r' => self.grid.set_cursor_x(0),
            '\x08' => self.grid.set_cursor_x(cursor.x.saturating_sub(1)),
            '\t' => {
                let last = self.grid.width().saturating_sub(1);
                let next = (cursor.x / 8 + 1).saturating_mul(8);
                self.grid.set_cursor_x(next.min(last));
            }
            _ => {}
        }
    }

    fn csi(&mut self, params: &[Param], final_byte: u8) {
        match final_byte {
            b'H' | b'f' => self.cursor_position(params),
            b'm' => self.sgr(params),
            _ => self.ignored += 1,
        }
    }

    fn cursor_position(&mut self, params: &[Param]) {
        // 1-based; missing or zero means 1.
        let one_based = |i: usize| {
            params
                .get(i)
                .and_then(|p| p.value)
                .unwrap_or(1)
                .max(1)
        };
        let row = one_based(0) - 1;
        let col = one_based(1) - 1;
        let last_col = self.grid.width().saturating_sub(1);
        self.grid.move_cursor(col.min(last_col), row);
    }

    fn sgr(&mut self, params: &[Param]) {
        if params.is_empty() {
            self.fg = NamedColor::Default;
            self.bg = NamedColor::Default;
            return;
        }

        let mut i = 0;
        while i < params.len() {
            let param = params[i];
            match param.value.unwrap_or(0) {
                0 => {
                    self.fg = NamedColor::Default;
                    self.bg = NamedColor::Default;
                }
                code @ 30..=37 => self.fg = NamedColor::standard(code - 30).unwrap_or_default(),
                code @ 40..=47 => self.bg = NamedColor::standard(code - 40).unwrap_or_default(),
                code @ 90..=97 => self.fg = NamedColor::bright(code - 90).unwrap_or_default(),
                code @ 100..=107 => self.bg = NamedColor::bright(code - 100).unwrap_or_default(),
                39 => self.fg = NamedColor::Default,
                49 => self.bg = NamedColor::Default,
                code @ (38 | 48) => {
                    // Indexed and true colors cannot be remapped by a palette,
                    // so they render as the default.
                    if !param.colon {
                        i += match params.get(i + 1).and_then(|p| p.value) {
                            Some(5) => 2,
                            Some(2) => 4,
                            _ => 1,
                        };
                    }
                    if code == 38 {
                        self.fg = NamedColor::Default;
                    } else {
                        self.bg = NamedColor::Default;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Fill the rest of the cursor's row with spaces in the active colors.
    fn pad_row(&mut self) {
        let width = self.grid.width();
        let cursor = self.grid.cursor();
        if cursor.x >= width {
            return;
        }
        self.vacate(cursor.x, cursor.y);
        let blank = Cell::styled(' ', self.fg, self.bg);
        for x in cursor.x..width {
            self.grid.set(x, cursor.y, blank);
        }
        self.grid.set_cursor_x(width);
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Replay a raw capture into a `width × height` grid.
///
/// Only the first `height` source lines are replayed, one per row. Rows
/// beyond the input stay default. A zero dimension yields an empty grid.
///
/// # Examples
///
/// ```
/// use lens_term::{replay, NamedColor};
///
/// let grid = replay("\x1b[2;3H\x1b[31mX", 10, 5);
/// let cell = grid.get(2, 1).unwrap();
/// assert_eq!(cell.ch, 'X');
/// assert_eq!(cell.fg, NamedColor::Red);
/// ```
#[must_use]
pub fn replay(raw: &str, width: u16, height: u16) -> ScreenGrid {
    let mut replayer = Replayer::new(width, height);
    if replayer.grid.is_empty() {
        return replayer.grid;
    }

    // Every '\n' starts a line, so a trailing newline replays (and pads)
    // one more, empty line under the colors still active.
    let rows = replayer.grid.height();
    let lines = raw.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    if !raw.is_empty() {
        for (row, line) in (0..rows).zip(lines) {
            replayer.line(row, line);
        }
    }

    trace!(
        width,
        height,
        ignored = replayer.ignored,
        "replayed capture"
    );
    replayer.grid
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cursor;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use unicode_width::UnicodeWidthStr;

    fn text(grid: &ScreenGrid, y: u16) -> String {
        grid.text_row(y).unwrap()
    }

    // ── Basics ──────────────────────────────────────────────────────────

    #[test]
    fn empty_input_is_default_grid() {
        let grid = replay("", 10, 5);
        assert_eq!(grid, ScreenGrid::new(10, 5));
    }

    #[test]
    fn zero_dimensions_yield_empty_grid() {
        assert!(replay("abc", 0, 5).is_empty());
        assert!(replay("abc", 5, 0).is_empty());
    }

    #[test]
    fn plain_lines_fill_rows() {
        let grid = replay("hello\nworld", 8, 3);
        assert_eq!(text(&grid, 0), "hello   ");
        assert_eq!(text(&grid, 1), "world   ");
        assert_eq!(text(&grid, 2), "        ");
    }

    #[test]
    fn crlf_line_endings() {
        let grid = replay("ab\r\ncd\r\n", 4, 2);
        assert_eq!(text(&grid, 0), "ab  ");
        assert_eq!(text(&grid, 1), "cd  ");
    }

    #[test]
    fn trailing_newline_pads_next_row_with_active_colors() {
        let grid = replay("\x1b[44mab\n", 4, 2);
        assert_eq!(text(&grid, 0), "ab  ");
        assert_eq!(text(&grid, 1), "    ");
        for x in 0..4 {
            assert_eq!(grid.get(x, 1).unwrap().bg, NamedColor::Blue);
        }
    }

    #[test]
    fn lines_beyond_height_are_dropped() {
        let grid = replay("a\nb\nc\nd", 3, 2);
        assert_eq!(text(&grid, 0), "a  ");
        assert_eq!(text(&grid, 1), "b  ");
    }

    #[test]
    fn no_wrap_past_right_edge() {
        let grid = replay("abcdefgh", 4, 2);
        assert_eq!(text(&grid, 0), "abcd");
        assert_eq!(text(&grid, 1), "    ");
        assert_eq!(grid.cursor(), Cursor { x: 4, y: 0 });
    }

    // ── Cursor positioning ──────────────────────────────────────────────

    #[test]
    fn cup_moves_cursor() {
        let grid = replay("\x1b[2;3HX", 10, 5);
        assert_eq!(*grid.get(2, 1).unwrap(), Cell::new('X'));
        for y in 0..5 {
            for x in 0..10 {
                if (x, y) != (2, 1) {
                    assert_eq!(*grid.get(x, y).unwrap(), Cell::EMPTY, "cell ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn cup_defaults_and_f_final() {
        // Padding starts at the cursor, so the tail of the row is blanked.
        let grid = replay("abc\x1b[HZ", 5, 2);
        assert_eq!(text(&grid, 0), "Z    ");

        let grid = replay("abc\x1b[0;0HZ", 5, 2);
        assert_eq!(grid.get(0, 0).unwrap().ch, 'Z');

        let grid = replay("\x1b[2;2fQ", 5, 2);
        assert_eq!(grid.get(1, 1).unwrap().ch, 'Q');
    }

    #[test]
    fn cup_clamps_into_grid() {
        let grid = replay("\x1b[99;99HZ", 10, 5);
        assert_eq!(grid.get(9, 4).unwrap().ch, 'Z');
    }

    #[test]
    fn cup_with_empty_row_field() {
        let grid = replay("\x1b[;4HZ", 10, 5);
        assert_eq!(grid.get(3, 0).unwrap().ch, 'Z');
    }

    // ── Controls ────────────────────────────────────────────────────────

    #[test]
    fn carriage_return_and_backspace() {
        assert_eq!(text(&replay("abc\rX", 5, 1), 0), "X    ");
        assert_eq!(text(&replay("abc\rX\x1b[1;4H", 5, 1), 0), "Xbc  ");
        assert_eq!(text(&replay("ab\x08X", 5, 1), 0), "aX   ");
        assert_eq!(text(&replay("\x08X", 3, 1), 0), "X  ");
    }

    #[test]
    fn tab_advances_to_next_stop() {
        let grid = replay("a\tb", 20, 1);
        assert_eq!(grid.get(8, 0).unwrap().ch, 'b');

        let grid = replay("a\t\tb", 10, 1);
        assert_eq!(grid.get(9, 0).unwrap().ch, 'b');
    }

    #[test]
    fn other_controls_are_ignored() {
        assert_eq!(text(&replay("a\x07b\x00c\u{85}d", 5, 1), 0), "abcd ");
    }

    // ── SGR ─────────────────────────────────────────────────────────────

    #[test]
    fn sgr_standard_colors_and_reset() {
        let grid = replay("\x1b[31;44mAB\x1b[0mC", 4, 1);
        let a = grid.get(0, 0).unwrap();
        assert_eq!((a.fg, a.bg), (NamedColor::Red, NamedColor::Blue));
        let c = grid.get(2, 0).unwrap();
        assert_eq!((c.fg, c.bg), (NamedColor::Default, NamedColor::Default));
    }

    #[test]
    fn sgr_bright_colors() {
        let grid = replay("\x1b[91;102mX", 2, 1);
        let x = grid.get(0, 0).unwrap();
        assert_eq!((x.fg, x.bg), (NamedColor::BrightRed, NamedColor::BrightGreen));
    }

    #[test]
    fn sgr_empty_resets() {
        let grid = replay("\x1b[33;45m\x1b[mX", 2, 1);
        assert_eq!(*grid.get(0, 0).unwrap(), Cell::new('X'));
    }

    #[test]
    fn sgr_39_and_49_reset_one_side() {
        let grid = replay("\x1b[32;42m\x1b[39mA\x1b[32;49mB", 3, 1);
        let a = grid.get(0, 0).unwrap();
        assert_eq!((a.fg, a.bg), (NamedColor::Default, NamedColor::Green));
        let b = grid.get(1, 0).unwrap();
        assert_eq!((b.fg, b.bg), (NamedColor::Green, NamedColor::Default));
    }

    #[test]
    fn sgr_ignores_attributes() {
        let grid = replay("\x1b[1;4;35mX", 2, 1);
        assert_eq!(grid.get(0, 0).unwrap().fg, NamedColor::Magenta);
    }

    #[test]
    fn sgr_extended_colors_consume_subparams() {
        // `31` is the palette index, not a red foreground.
        let grid = replay("\x1b[48;5;31mX", 2, 1);
        let x = grid.get(0, 0).unwrap();
        assert_eq!((x.fg, x.bg), (NamedColor::Default, NamedColor::Default));

        let grid = replay("\x1b[41m\x1b[38;2;31;32;33;44mX", 2, 1);
        let x = grid.get(0, 0).unwrap();
        assert_eq!((x.fg, x.bg), (NamedColor::Default, NamedColor::Blue));
    }

    #[test]
    fn sgr_extended_colon_form() {
        let grid = replay("\x1b[35m\x1b[38:5:196;41mX", 2, 1);
        let x = grid.get(0, 0).unwrap();
        assert_eq!((x.fg, x.bg), (NamedColor::Default, NamedColor::Red));
    }

    #[test]
    fn color_state_persists_across_lines() {
        let grid = replay("\x1b[31mA\nB", 2, 2);
        assert_eq!(grid.get(0, 1).unwrap().fg, NamedColor::Red);
    }

    #[test]
    fn padding_uses_active_colors() {
        let grid = replay("\x1b[32;41mhi", 5, 1);
        for x in 2..5 {
            let cell = grid.get(x, 0).unwrap();
            assert_eq!(*cell, Cell::styled(' ', NamedColor::Green, NamedColor::Red));
        }
    }

    #[test]
    fn padding_follows_cursor_row() {
        let grid = replay("\x1b[2;1H\x1b[44mab", 4, 3);
        assert_eq!(grid.get(3, 1).unwrap().bg, NamedColor::Blue);
        assert_eq!(grid.get(3, 0).unwrap().bg, NamedColor::Default);
    }

    // ── Ignored sequences ───────────────────────────────────────────────

    #[test]
    fn private_and_unknown_csi_are_ignored() {
        assert_eq!(text(&replay("\x1b[?25lX\x1b[2JY", 3, 1), 0), "XY ");
        assert_eq!(text(&replay("\x1b[1 qZ", 2, 1), 0), "Z ");
    }

    #[test]
    fn osc_is_ignored() {
        assert_eq!(text(&replay("\x1b]0;title\x07hi", 3, 1), 0), "hi ");
        assert_eq!(text(&replay("\x1b]2;t\x1b\\hi", 3, 1), 0), "hi ");
        assert_eq!(text(&replay("\x1b]2;never ends", 3, 1), 0), "   ");
    }

    #[test]
    fn charset_designation_is_ignored() {
        assert_eq!(text(&replay("\x1b(Bx\x1b7y", 3, 1), 0), "xy ");
    }

    #[test]
    fn truncated_sequences_are_ignored() {
        assert_eq!(text(&replay("ab\x1b[3", 4, 1), 0), "ab  ");
        assert_eq!(text(&replay("ab\x1b", 4, 1), 0), "ab  ");
    }

    #[test]
    fn invalid_byte_aborts_csi() {
        assert_eq!(text(&replay("\x1b[3éx", 3, 1), 0), "éx ");
        assert_eq!(text(&replay("\x1b[3\x1b[32mx", 2, 1), 0), "x ");
    }

    // ── Width ───────────────────────────────────────────────────────────

    #[test]
    fn wide_character_writes_continuation() {
        let grid = replay("中a", 4, 1);
        assert_eq!(grid.get(0, 0).unwrap().ch, '中');
        assert!(grid.get(1, 0).unwrap().is_continuation());
        assert_eq!(grid.get(2, 0).unwrap().ch, 'a');
        assert_eq!(text(&grid, 0), "中a ");
    }

    #[test]
    fn wide_character_that_does_not_fit() {
        let grid = replay("abc中", 4, 1);
        assert_eq!(*grid.get(3, 0).unwrap(), Cell::EMPTY);
        assert_eq!(grid.cursor().x, 4);
    }

    #[test]
    fn overwriting_wide_glyph_blanks_its_continuation() {
        let grid = replay("中b\x1b[1;1HX\x1b[1;3H", 4, 1);
        assert_eq!(grid.get(0, 0).unwrap().ch, 'X');
        assert_eq!(*grid.get(1, 0).unwrap(), Cell::EMPTY);
        assert_eq!(text(&grid, 0), "X   ");
        assert_eq!(text(&grid, 0).width(), 4);
    }

    #[test]
    fn writing_into_continuation_blanks_wide_glyph() {
        let grid = replay("\x1b[31m中\x1b[0m\x08文", 4, 1);
        assert_eq!(
            *grid.get(0, 0).unwrap(),
            Cell::styled(' ', NamedColor::Red, NamedColor::Default)
        );
        assert_eq!(grid.get(1, 0).unwrap().ch, '文');
        assert!(grid.get(2, 0).unwrap().is_continuation());
        assert_eq!(text(&grid, 0), " 文 ");
    }

    #[test]
    fn wide_over_wide_shifted_by_one() {
        // 文 at column 1 covers 中's continuation and the first half of 字.
        let grid = replay("中字\x1b[1;2H文", 6, 1);
        assert_eq!(text(&grid, 0), " 文   ");
        assert_eq!(text(&grid, 0).width(), 6);
    }

    #[test]
    fn padding_from_continuation_blanks_wide_glyph() {
        let grid = replay("\x1b[41m中\x1b[0m\x1b[1;2H", 4, 1);
        assert_eq!(
            *grid.get(0, 0).unwrap(),
            Cell::styled(' ', NamedColor::Default, NamedColor::Red)
        );
        assert!((1..4).all(|x| *grid.get(x, 0).unwrap() == Cell::EMPTY));
    }

    #[test]
    fn zero_width_characters_are_dropped() {
        assert_eq!(text(&replay("e\u{301}x", 3, 1), 0), "ex ");
    }

    // ── Properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn replay_never_panics(
            raw in "[\\x1b\\[\\]0-9;:?a-zA-Z中é \\t\\r\\n\\x07\\x08\\\\]{0,120}",
            width in 0u16..40,
            height in 0u16..10,
        ) {
            let grid = replay(&raw, width, height);
            if width == 0 || height == 0 {
                prop_assert!(grid.is_empty());
            } else {
                prop_assert_eq!(grid.width(), width);
                prop_assert_eq!(grid.height(), height);
                prop_assert_eq!(grid.cells().len(), usize::from(width) * usize::from(height));
                prop_assert!(grid.cursor().x <= width);
                prop_assert!(grid.cursor().y < height);
            }
        }

        #[test]
        fn rows_keep_their_width_under_wide_overwrites(
            raw in r"([ab中文字 \x08\r\n]|\x1b\[[1-3];[1-6]H){0,40}",
        ) {
            let grid = replay(&raw, 6, 3);
            for y in 0..3 {
                prop_assert_eq!(grid.text_row(y).unwrap().width(), 6);
            }
        }

        #[test]
        fn replay_arbitrary_unicode(raw in any::<String>()) {
            let grid = replay(&raw, 12, 4);
            prop_assert_eq!(grid.cells().len(), 48);
        }
    }
}
