//! # lens-theme — palette accessibility analysis and mockups
//!
//! Everything that needs a 16-slot palette lives here: WCAG contrast,
//! the palette model itself, the analysis tables, mockup composition over
//! replayed captures, the Ghostty theme format, and the on-disk stores.
//!
//! # Architecture
//!
//! ```text
//! themes/*  ──ghostty.rs──▶ Theme { name, Palette }
//!                                │
//!                 ┌──────────────┼──────────────────┐
//!                 ▼              ▼                  ▼
//!          contrast.rs     analysis.rs          editor.rs
//!          (WCAG ratio)    (tables, hues)       (working copy)
//!
//! captures/*.txt ──store.rs──▶ raw text ──lens_term::replay──▶ ScreenGrid
//!                                                                  │
//!                                        mockup.rs (+ Palette) ◀───┘
//!                                              │
//!                                              ▼
//!                                    true-color display lines
//! ```
//!
//! Color science (hex, Oklab, OKLCH) and the VT replay engine come from
//! `lens-term`; this crate only decides what to compare and how to show it.

// Luminance math uses single-letter channel names.
#![allow(clippy::many_single_char_names)]

pub mod analysis;
pub mod contrast;
pub mod editor;
pub mod error;
pub mod ghostty;
pub mod mockup;
pub mod palette;
pub mod store;

pub use analysis::Report;
pub use contrast::{Rating, contrast_ratio, ratio};
pub use editor::{EditKey, EditOutcome, PaletteEditor};
pub use error::ThemeError;
pub use palette::{Palette, Theme};
pub use store::{CaptureCache, ThemeStore};
