// SPDX-License-Identifier: MIT
//
// Command-line configuration.
//
// Arguments are read straight from `env::args()`; there are few enough of
// them that a hand-written loop stays readable. Parsing is separated from
// `main` so it can be tested with plain string slices.

use std::path::PathBuf;

use lens_term::color::is_valid_hex_color;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: theme-lens [OPTIONS] [THEME]

Analyze a terminal color theme for WCAG contrast and preview it on
captured program screens in 24-bit color.

Arguments:
  [THEME]  Theme name or 1-based index (default: last theme)

Options:
      --themes <DIR>    Theme directory (default: ./themes)
      --captures <DIR>  Capture directory (default: ./screenshots)
      --list            List themes and exit
      --no-mockups      Skip the capture mockups
      --set <N=#HEX>    Replace palette slot N (0-15) before analysis;
                        repeatable
      --save            Write the edited theme as <name>-HHMMSS
  -h, --help            Print help
  -V, --version         Print version

Environment:
  THEME_LENS_LOG        Log filter, e.g. `debug` (default: warn)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' requires a value")]
    MissingValue(&'static str),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("invalid --set value '{0}' (expected N=#rrggbb with N in 0-15)")]
    InvalidSet(String),
}

/// How the user picked a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSelector {
    /// 1-based position in the sorted theme list.
    Index(usize),
    Name(String),
}

impl ThemeSelector {
    fn parse(arg: &str) -> Self {
        arg.parse()
            .map_or_else(|_| Self::Name(arg.to_owned()), Self::Index)
    }
}

/// A `--set N=#hex` edit: one palette slot and its new color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEdit {
    pub slot: usize,
    /// Lowercase `#rrggbb`.
    pub hex: String,
}

impl SlotEdit {
    /// Parse `N=#rrggbb`; the `#` is optional and case is ignored.
    fn parse(value: &str) -> Result<Self, ArgError> {
        let invalid = || ArgError::InvalidSet(value.to_owned());
        let (slot, hex) = value.split_once('=').ok_or_else(invalid)?;
        let slot: usize = slot.trim().parse().map_err(|_| invalid())?;
        let hex = hex.trim().to_lowercase();
        let hex = if hex.starts_with('#') {
            hex
        } else {
            format!("#{hex}")
        };
        if slot >= 16 || !is_valid_hex_color(&hex) {
            return Err(invalid());
        }
        Ok(Self { slot, hex })
    }
}

/// One capture shown in the mockup section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSlot {
    pub name: &'static str,
    pub width: u16,
    pub height: u16,
}

impl CaptureSlot {
    const fn new(name: &'static str, width: u16, height: u16) -> Self {
        Self {
            name,
            width,
            height,
        }
    }
}

/// Which captures are shown and at what size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupLayout {
    /// Side by side, separated by dividers.
    pub row: Vec<CaptureSlot>,
    /// Each on its own below the row, only if the capture exists.
    pub below: Vec<CaptureSlot>,
}

impl Default for MockupLayout {
    fn default() -> Self {
        Self {
            row: vec![
                CaptureSlot::new("mc", 80, 20),
                CaptureSlot::new("mcedit", 80, 20),
                CaptureSlot::new("htop", 50, 20),
            ],
            below: vec![CaptureSlot::new("tig", 80, 10)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub themes_dir: PathBuf,
    pub captures_dir: PathBuf,
    pub theme: Option<ThemeSelector>,
    pub list: bool,
    pub mockups: bool,
    /// Applied in order, so a later edit of the same slot wins.
    pub edits: Vec<SlotEdit>,
    pub save: bool,
    pub help: bool,
    pub version: bool,
    pub layout: MockupLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("themes"),
            captures_dir: PathBuf::from("screenshots"),
            theme: None,
            list: false,
            mockups: true,
            edits: Vec::new(),
            save: false,
            help: false,
            version: false,
            layout: MockupLayout::default(),
        }
    }
}

impl Config {
    /// Parse arguments, not including the program name.
    ///
    /// `--opt=value` and `--opt value` are both accepted.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(|a| a.as_ref().to_owned());

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_owned(), Some(value.to_owned()))
                }
                _ => (arg.clone(), None),
            };

            match flag.as_str() {
                "--themes" => {
                    let dir = inline.or_else(|| args.next());
                    config.themes_dir = dir.ok_or(ArgError::MissingValue("--themes"))?.into();
                }
                "--captures" => {
                    let dir = inline.or_else(|| args.next());
                    config.captures_dir =
                        dir.ok_or(ArgError::MissingValue("--captures"))?.into();
                }
                "--set" => {
                    let value = inline.or_else(|| args.next());
                    let value = value.ok_or(ArgError::MissingValue("--set"))?;
                    config.edits.push(SlotEdit::parse(&value)?);
                }
                "--save" => config.save = true,
                "--list" => config.list = true,
                "--no-mockups" => config.mockups = false,
                "-h" | "--help" => config.help = true,
                "-V" | "--version" => config.version = true,
                s if s.starts_with('-') && s.len() > 1 => {
                    return Err(ArgError::UnknownOption(arg));
                }
                _ if config.theme.is_some() => {
                    return Err(ArgError::UnexpectedArgument(arg));
                }
                _ => config.theme = Some(ThemeSelector::parse(&arg)),
            }
        }

        Ok(config)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
