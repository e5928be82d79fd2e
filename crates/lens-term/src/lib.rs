// SPDX-License-Identifier: MIT
//
// lens-term — Color science and capture replay for theme-lens.
//
// Two halves live here. The color half converts between hex, sRGB, Oklab
// and OKLCH with the exact Ottosson matrices, so every accessibility
// judgment upstream is reproducible to the last digit. The terminal half
// replays captured screen dumps (plain text plus cursor and SGR escapes)
// into a fixed-size grid of cells whose colors are still symbolic, ready
// to be recolored with any 16-slot palette.
//
// Nothing in this crate performs I/O. Callers hand in text that is already
// in memory and get plain values back.

pub mod ansi;
pub mod cell;
pub mod color;
pub mod emulator;
pub mod error;
pub mod grid;

pub use cell::{Cell, NamedColor};
pub use color::{Oklab, Oklch, Rgb};
pub use emulator::replay;
pub use error::{Error, Result};
pub use grid::{Cursor, ScreenGrid};
