//! `Config` and the console verbosity type.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::listing::ListOptions;

use super::{DEFAULT_DIFF_ARGS, DEFAULT_MISMATCH_DELAY};

/// Console verbosity as written in the config file or on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Info,
    Debug,
}

impl LogLevel {
    const NAMES: [(LogLevel, &'static str); 4] = [
        (LogLevel::Quiet, "quiet"),
        (LogLevel::Normal, "normal"),
        (LogLevel::Info, "info"),
        (LogLevel::Debug, "debug"),
    ];

    /// Case-insensitive; accepts a few aliases (`error`, `verbose`, `trace`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let canonical = match lower.as_str() {
            "error" | "none" => "quiet",
            "verbose" | "detailed" => "info",
            "trace" => "debug",
            other => other,
        };
        Self::NAMES
            .iter()
            .find(|(_, name)| *name == canonical)
            .map(|(lvl, _)| *lvl)
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(lvl, _)| *lvl == self)
            .map_or("normal", |(_, name)| name)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid log level '{s}' (expected quiet, normal, info or debug)")
        })
    }
}

/// Runtime configuration threaded through a session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Working root; every listing entry is relative to it
    pub root: PathBuf,
    /// Editor command line; None falls back to $VISUAL, $EDITOR, then vim
    pub editor: Option<String>,
    /// Extra editor arguments for side-by-side compare mode
    pub diff_args: String,
    /// Rename instead of overwriting an existing destination file
    pub safe: bool,
    /// Skip the confirmation pass
    pub fast: bool,
    /// Re-list and edit again after a cycle that applied changes
    pub loop_mode: bool,
    /// Allow deleting non-empty directories with their contents
    pub recursive_delete: bool,
    /// If true, print planned operations but do not modify the filesystem
    pub dry_run: bool,
    /// How the working root is listed
    pub listing: ListOptions,
    /// Pause before reopening the editor after a line-count change
    pub mismatch_delay: Duration,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            editor: None,
            diff_args: DEFAULT_DIFF_ARGS.to_string(),
            safe: false,
            fast: false,
            loop_mode: false,
            recursive_delete: false,
            dry_run: false,
            listing: ListOptions::default(),
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config rooted at `root`; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
