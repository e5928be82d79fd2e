//! Palette editor — a key-driven state machine over two palettes.
//!
//! The editor holds the *committed* palette it was opened with and a
//! *working* copy that edits are applied to. Nothing reaches the committed
//! palette until the user confirms with Enter in selecting mode; Escape
//! throws the working copy away.
//!
//! Two modes:
//!
//! ```text
//!              Char(c)                        Enter / Escape
//!  Selecting ───────────▶ Typing { buffer } ─────────────────▶ Selecting
//!  ↑↓ Tab ⇤ move slot      alnum/# append, Backspace pop
//!  Enter → Committed | Unchanged
//!  Escape → Cancelled
//! ```
//!
//! In typing mode Enter applies the buffer to the selected slot of the
//! working palette if, after adding a missing `#` and lowercasing, it is a
//! valid `#rrggbb`. An invalid buffer is discarded silently.

use lens_term::color::{Rgb, hex_to_rgb};
use tracing::debug;

use crate::palette::{Palette, SLOT_COUNT};

/// Longest hex buffer accepted (`#rrggbb`).
const MAX_BUFFER: usize = 7;

/// Swatch shown while the buffer is not yet a valid color.
pub const INVALID_PREVIEW: Rgb = Rgb::new(128, 128, 128);

/// Keys the editor understands. Anything else is the caller's to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    Up,
    Down,
    Tab,
    BackTab,
    Enter,
    Escape,
    Backspace,
    Char(char),
}

/// How an editing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Confirmed with changes; carries the new palette.
    Committed(Palette),
    /// Confirmed, but the working palette equals the committed one.
    Unchanged,
    /// Abandoned with Escape.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PaletteEditor {
    committed: Palette,
    working: Palette,
    selected: usize,
    /// `Some` while typing a hex value.
    buffer: Option<String>,
}

impl PaletteEditor {
    /// Start editing `committed` with slot 0 selected.
    #[must_use]
    pub const fn open(committed: Palette) -> Self {
        Self {
            committed,
            working: committed,
            selected: 0,
            buffer: None,
        }
    }

    #[must_use]
    pub const fn committed(&self) -> &Palette {
        &self.committed
    }

    /// The palette with all applied edits.
    #[must_use]
    pub const fn working(&self) -> &Palette {
        &self.working
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.buffer.is_some()
    }

    /// Text typed so far, while typing.
    #[must_use]
    pub fn buffer(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    /// Color to show for the selected slot while typing: the buffer if it
    /// parses, [`INVALID_PREVIEW`] otherwise. `None` when not typing.
    #[must_use]
    pub fn preview(&self) -> Option<Rgb> {
        self.buffer
            .as_deref()
            .map(|buf| hex_to_rgb(&normalize(buf)).unwrap_or(INVALID_PREVIEW))
    }

    /// Feed one key. Returns the outcome when the session ends.
    pub fn handle(&mut self, key: EditKey) -> Option<EditOutcome> {
        if self.buffer.is_some() {
            self.handle_typing(key);
            return None;
        }

        match key {
            EditKey::Up | EditKey::BackTab => {
                self.selected = (self.selected + SLOT_COUNT - 1) % SLOT_COUNT;
            }
            EditKey::Down | EditKey::Tab => {
                self.selected = (self.selected + 1) % SLOT_COUNT;
            }
            EditKey::Char(c) => {
                let mut buf = String::with_capacity(MAX_BUFFER);
                if c != ' ' {
                    buf.push(c);
                }
                self.buffer = Some(buf);
            }
            EditKey::Enter => {
                return Some(if self.working == self.committed {
                    EditOutcome::Unchanged
                } else {
                    EditOutcome::Committed(self.working)
                });
            }
            EditKey::Escape => return Some(EditOutcome::Cancelled),
            EditKey::Backspace => {}
        }
        None
    }

    fn handle_typing(&mut self, key: EditKey) {
        let Some(buf) = self.buffer.as_mut() else {
            return;
        };
        match key {
            EditKey::Escape => self.buffer = None,
            EditKey::Enter => {
                let value = normalize(buf);
                self.buffer = None;
                let edited = hex_to_rgb(&value)
                    .and_then(|rgb| self.working.with_color(self.selected, rgb));
                if let Ok(working) = edited {
                    debug!(slot = self.selected, color = %value, "applied palette edit");
                    self.working = working;
                }
            }
            EditKey::Backspace => {
                buf.pop();
            }
            EditKey::Char(c) if c.is_alphanumeric() || c == '#' => {
                if buf.chars().count() < MAX_BUFFER {
                    buf.push(c);
                }
            }
            _ => {}
        }
    }
}

/// Prefix `#` if missing and lowercase.
fn normalize(buf: &str) -> String {
    if buf.starts_with('#') {
        buf.to_lowercase()
    } else {
        format!("#{}", buf.to_lowercase())
    }
}
