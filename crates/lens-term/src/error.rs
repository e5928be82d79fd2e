// SPDX-License-Identifier: MIT
//
// Error type shared by the color and palette layers.
//
// Capture replay never fails, so there is no variant for malformed escape
// sequences. Everything here is a caller error: a hex string that is not
// `#RRGGBB`, a slot outside 0–15 (or missing from a mapping), or a color
// name outside the 16-name set.

use thiserror::Error;

/// Errors produced by color parsing and palette lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The string is not a `#RRGGBB` hex color.
    #[error("invalid hex color {0:?} (expected #RRGGBB)")]
    InvalidHex(String),

    /// A palette slot outside `0..16` was requested.
    #[error("palette index {0} out of range (expected 0-15)")]
    IndexOutOfRange(usize),

    /// A palette was built from a mapping that lacks this slot.
    #[error("palette slot {0} is not defined")]
    MissingSlot(usize),

    /// A symbolic color name outside the 16 ANSI names plus `default`.
    #[error("unknown color name {0:?}")]
    UnknownColorName(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
