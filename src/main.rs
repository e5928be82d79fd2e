// SPDX-License-Identifier: MIT
//
// theme-lens — terminal palette accessibility analyzer.
//
// This is the binary that wires the two crates together:
//
//   lens-theme → theme files, contrast analysis, mockup composition
//   lens-term  → color math and the screen emulator behind the mockups
//
// A run is a single pass:
//
//   args → Config → ThemeStore::load_all → select theme
//        → --set edits (PaletteEditor) → --save (ThemeStore::save)
//        → Report::build → report lines → stdout
//        → CaptureCache → mockup lines → stdout
//
// Logs go to stderr (filter from THEME_LENS_LOG) so the report can be piped.

mod config;
mod report;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use chrono::{Local, NaiveTime};
use lens_theme::palette::SLOT_COUNT;
use lens_theme::{
    CaptureCache, EditKey, EditOutcome, Palette, PaletteEditor, Report, Theme, ThemeError,
    ThemeStore,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ArgError, Config, SlotEdit, ThemeSelector, USAGE};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Args(#[from] ArgError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Color(#[from] lens_term::Error),

    #[error("no themes found in {}", .0.display())]
    NoThemes(PathBuf),

    #[error("no theme named '{0}'")]
    UnknownTheme(String),

    #[error("theme index {index} is out of range (1-{count})")]
    ThemeIndex { index: usize, count: usize },

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

// ─── Theme selection ────────────────────────────────────────────────────────

/// Resolve the selector against the sorted theme list. Returns the 0-based
/// position and the theme. No selector picks the last theme; names match
/// exactly first, then case-insensitively.
fn select<'a>(
    themes: &'a [Theme],
    selector: Option<&ThemeSelector>,
) -> Result<(usize, &'a Theme), AppError> {
    let count = themes.len();
    let position = match selector {
        None => count.checked_sub(1),
        Some(&ThemeSelector::Index(index)) => {
            if index == 0 || index > count {
                return Err(AppError::ThemeIndex { index, count });
            }
            Some(index - 1)
        }
        Some(ThemeSelector::Name(name)) => Some(
            themes
                .iter()
                .position(|t| t.name == *name)
                .or_else(|| themes.iter().position(|t| t.name.eq_ignore_ascii_case(name)))
                .ok_or_else(|| AppError::UnknownTheme(name.clone()))?,
        ),
    };

    position
        .and_then(|i| themes.get(i).map(|t| (i, t)))
        .ok_or(AppError::ThemeIndex { index: 0, count })
}

// ─── Editing ────────────────────────────────────────────────────────────────

/// Replay `--set` edits as one editor session: move to each slot, type its
/// color, confirm, then commit. `None` when nothing changed.
fn apply_edits(palette: Palette, edits: &[SlotEdit]) -> Option<Palette> {
    let mut editor = PaletteEditor::open(palette);
    for edit in edits {
        let steps = (edit.slot + SLOT_COUNT - editor.selected()) % SLOT_COUNT;
        for _ in 0..steps {
            editor.handle(EditKey::Down);
        }
        // Space opens an empty buffer.
        editor.handle(EditKey::Char(' '));
        for c in edit.hex.chars() {
            editor.handle(EditKey::Char(c));
        }
        editor.handle(EditKey::Enter);
    }
    match editor.handle(EditKey::Enter) {
        Some(EditOutcome::Committed(edited)) => Some(edited),
        _ => None,
    }
}

/// The edited theme, shown as `<name>-modified`.
fn edit_theme(theme: &Theme, edits: &[SlotEdit]) -> Option<Theme> {
    if edits.is_empty() {
        return None;
    }
    let edited = apply_edits(theme.palette, edits);
    if edited.is_none() {
        info!(theme = %theme.name, "edits leave the palette unchanged");
    }
    edited.map(|palette| Theme::new(format!("{}-modified", theme.name), palette))
}

/// `<first dash-separated word of name>-HHMMSS`.
fn saved_name(name: &str, at: NaiveTime) -> String {
    let stem = name.split('-').next().unwrap_or(name);
    format!("{stem}-{}", at.format("%H%M%S"))
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn load_themes(config: &Config) -> Result<Vec<Theme>, AppError> {
    let themes = ThemeStore::new(&config.themes_dir).load_all()?;
    if themes.is_empty() {
        return Err(AppError::NoThemes(config.themes_dir.clone()));
    }
    Ok(themes)
}

fn list(themes: &[Theme], out: &mut impl Write) -> io::Result<()> {
    for (i, theme) in themes.iter().enumerate() {
        writeln!(out, "{:>3}  {}", i + 1, theme.name)?;
    }
    Ok(())
}

fn run(config: &Config, out: &mut impl Write) -> Result<(), AppError> {
    let themes = load_themes(config)?;
    if config.list {
        list(&themes, out)?;
        return Ok(());
    }

    let (index, selected) = select(&themes, config.theme.as_ref())?;
    let edited = edit_theme(selected, &config.edits);
    let theme = edited.as_ref().unwrap_or(selected);

    if config.save {
        match &edited {
            Some(edited) => {
                let name = saved_name(&selected.name, Local::now().time());
                let path = ThemeStore::new(&config.themes_dir)
                    .save(&Theme::new(name, edited.palette))?;
                writeln!(out, "Saved {}", path.display())?;
            }
            None => warn!("--save given without a palette change; nothing saved"),
        }
    }

    info!(theme = %theme.name, "analyzing");
    let analysis = Report::build(&theme.palette);

    writeln!(out, "{}", report::header(&theme.name, index + 1, themes.len()))?;
    writeln!(out)?;
    for line in report::analysis_lines(&analysis) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    if config.mockups {
        let mut captures = CaptureCache::new(&config.captures_dir);
        for line in report::mockup_lines(&theme.palette, &config.layout, &mut captures)? {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "─".repeat(report::mockup_width(&config.layout)))?;
    out.flush()?;
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("THEME_LENS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_logging();

    let config = Config::parse(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("theme-lens: {e}");
        eprintln!("Try 'theme-lens --help' for more information.");
        process::exit(1);
    });

    if config.help {
        println!("{USAGE}");
        return;
    }
    if config.version {
        println!("theme-lens {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let stdout = io::stdout();
    if let Err(e) = run(&config, &mut stdout.lock()) {
        eprintln!("theme-lens: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
