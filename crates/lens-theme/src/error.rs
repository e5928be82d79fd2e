//! Errors from loading, parsing, and saving themes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a theme file into a [`Theme`](crate::Theme), or to
/// write one back.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `palette = N=...` line whose `N` is not an integer.
    #[error("line {line}: palette index is not an integer")]
    InvalidIndex { line: usize },

    /// The file defines a number of slots other than 16.
    #[error("theme {name} has {found} colors, expected 16")]
    SlotCount { name: String, found: usize },

    /// A slot index or color value was rejected.
    #[error(transparent)]
    Color(#[from] lens_term::Error),
}

impl ThemeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
