// SPDX-License-Identifier: MIT
//
// ScreenGrid — the cell matrix a capture replays into.
//
// Flat `Vec<Cell>` with row-major indexing (`y * width + x`), so a row is a
// contiguous slice and the compositor's left-to-right scan is linear.
//
// The grid also owns the replay cursor. The cursor column may sit one past
// the last column (x == width): that is where it lands after writing the
// final cell of a row, and where it stays because the emulator never wraps.

use std::fmt;

use crate::cell::Cell;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Replay cursor position. `x` ranges over `0..=width`, `y` over `0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}

// ─── ScreenGrid ──────────────────────────────────────────────────────────────

/// A `width × height` matrix of [`Cell`]s plus the replay cursor.
///
/// A zero width or height yields an empty 0×0 grid.
///
/// # Examples
///
/// ```
/// use lens_term::{Cell, ScreenGrid};
///
/// let grid = ScreenGrid::new(10, 5);
/// assert_eq!(grid.width(), 10);
/// assert_eq!(grid.height(), 5);
/// assert_eq!(grid.get(9, 4), Some(&Cell::EMPTY));
/// assert_eq!(grid.get(10, 0), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: Cursor,
}

impl ScreenGrid {
    /// Create a grid of empty cells with the cursor at the origin.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
            cursor: Cursor::default(),
        }
    }

    /// Grid width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether the grid has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// The raw cell slice, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single row as a slice. Returns `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks_exact panics on 0; an empty grid has no cells anyway.
        self.cells.chunks_exact(usize::from(self.width).max(1))
    }

    /// The characters of row `y`, continuation cells skipped.
    #[must_use]
    pub fn text_row(&self, y: u16) -> Option<String> {
        self.row(y)
            .map(|row| row.iter().filter_map(|c| c.character()).collect())
    }

    // ─── Mutation (emulator only) ────────────────────────────────────────

    /// Bounds-checked write. Returns `true` if the position was in bounds.
    #[inline]
    pub(crate) fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Move the cursor, clamping `x` to `0..=width` and `y` to `0..height`.
    pub(crate) fn move_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Cursor {
            x: x.min(self.width),
            y: y.min(self.height.saturating_sub(1)),
        };
    }

    pub(crate) fn set_cursor_x(&mut self, x: u16) {
        self.cursor.x = x.min(self.width);
    }
}

impl fmt::Debug for ScreenGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ScreenGrid {}x{} cursor=({}, {})",
            self.width, self.height, self.cursor.x, self.cursor.y
        )?;
        for y in 0..self.height {
            if let Some(text) = self.text_row(y) {
                writeln!(f, "  |{text}|")?;
            }
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::NamedColor;

    #[test]
    fn new_grid_is_default() {
        let grid = ScreenGrid::new(4, 3);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.cells().iter().all(|&c| c == Cell::EMPTY));
        assert_eq!(grid.cursor(), Cursor { x: 0, y: 0 });
    }

    #[test]
    fn zero_dimension_normalizes_to_empty() {
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            let grid = ScreenGrid::new(w, h);
            assert!(grid.is_empty());
            assert_eq!(grid.width(), 0);
            assert_eq!(grid.height(), 0);
            assert_eq!(grid.rows().count(), 0);
        }
    }

    #[test]
    fn set_and_get() {
        let mut grid = ScreenGrid::new(5, 2);
        let cell = Cell::styled('Z', NamedColor::Red, NamedColor::Blue);
        assert!(grid.set(4, 1, cell));
        assert_eq!(grid.get(4, 1), Some(&cell));
        assert!(!grid.set(5, 1, cell));
        assert!(!grid.set(0, 2, cell));
    }

    #[test]
    fn rows_are_contiguous() {
        let mut grid = ScreenGrid::new(3, 2);
        grid.set(0, 1, Cell::new('a'));
        grid.set(2, 1, Cell::new('b'));
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], grid.row(1).unwrap());
        assert_eq!(grid.text_row(1).as_deref(), Some("a b"));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn text_row_skips_continuation() {
        let mut grid = ScreenGrid::new(3, 1);
        grid.set(0, 0, Cell::new('中'));
        grid.set(1, 0, Cell::continuation(NamedColor::Default, NamedColor::Default));
        grid.set(2, 0, Cell::new('x'));
        assert_eq!(grid.text_row(0).as_deref(), Some("中x"));
    }

    #[test]
    fn cursor_clamps() {
        let mut grid = ScreenGrid::new(10, 4);
        grid.move_cursor(50, 50);
        assert_eq!(grid.cursor(), Cursor { x: 10, y: 3 });
        grid.set_cursor_x(3);
        assert_eq!(grid.cursor(), Cursor { x: 3, y: 3 });
    }

    #[test]
    fn debug_shows_rows() {
        let mut grid = ScreenGrid::new(2, 1);
        grid.set(0, 0, Cell::new('h'));
        grid.set(1, 0, Cell::new('i'));
        let dbg = format!("{grid:?}");
        assert!(dbg.starts_with("ScreenGrid 2x1"));
        assert!(dbg.contains("|hi|"));
    }
}
