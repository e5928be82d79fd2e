//! On-disk stores: the theme directory and the capture directory.
//!
//! Both are thin. `ThemeStore` turns a directory of Ghostty files into
//! themes, skipping what it cannot parse; `CaptureCache` reads each capture
//! once and hands out borrowed text afterwards.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::ThemeError;
use crate::ghostty::{parse_theme, safe_file_name, to_ghostty};
use crate::palette::Theme;

// ---------------------------------------------------------------------------
// ThemeStore
// ---------------------------------------------------------------------------

/// A directory of Ghostty theme files.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every theme in the directory, sorted by file name.
    ///
    /// Hidden files and non-files are ignored. Files that cannot be read or
    /// parsed are skipped with a warning. A missing directory holds no
    /// themes.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Io`] if the directory exists but cannot be listed.
    pub fn load_all(&self) -> Result<Vec<Theme>, ThemeError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "theme directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ThemeError::io(&self.dir, e)),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && !is_hidden(path))
            .collect();
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut themes = Vec::with_capacity(paths.len());
        for path in paths {
            match load_file(&path) {
                Ok(theme) => themes.push(theme),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping theme file"),
            }
        }
        debug!(dir = %self.dir.display(), count = themes.len(), "loaded themes");
        Ok(themes)
    }

    /// Write `theme` in Ghostty format, creating the directory if needed.
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Io`] if the directory or file cannot be written.
    pub fn save(&self, theme: &Theme) -> Result<PathBuf, ThemeError> {
        fs::create_dir_all(&self.dir).map_err(|e| ThemeError::io(&self.dir, e))?;
        let path = self.dir.join(safe_file_name(&theme.name));
        fs::write(&path, to_ghostty(theme)).map_err(|e| ThemeError::io(&path, e))?;
        debug!(path = %path.display(), "saved theme");
        Ok(path)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn load_file(path: &Path) -> Result<Theme, ThemeError> {
    let text = fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_theme(&name, &text)
}

// ---------------------------------------------------------------------------
// CaptureCache
// ---------------------------------------------------------------------------

/// Captures (`<name>.txt`) read on first use and kept in memory.
#[derive(Debug, Clone)]
pub struct CaptureCache {
    dir: PathBuf,
    cache: HashMap<String, String>,
}

impl CaptureCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Raw text of capture `name`, or `None` if it does not exist.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; captures are dumps
    /// of arbitrary programs. Misses are not cached, so a capture that
    /// appears later is picked up.
    pub fn get(&mut self, name: &str) -> Option<&str> {
        if self.cache.contains_key(name) {
            trace!(name, "capture cache hit");
        } else {
            let path = self.dir.join(format!("{name}.txt"));
            match fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    debug!(path = %path.display(), bytes = bytes.len(), "loaded capture");
                    self.cache.insert(name.to_owned(), text);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "capture not found");
                    return None;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read capture");
                    return None;
                }
            }
        }
        self.cache.get(name).map(String::as_str)
    }
}
