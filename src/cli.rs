//! Command-line definition.
//!
//! Flags only ever switch features on; anything left unset keeps the value from the
//! config file (or the built-in default). `--debug` is shorthand for `--log-level debug`.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::listing::SortKey;

/// Rename, move and delete files by editing their names in a text editor.
///
/// Each line of the listing is one entry. Change a line to rename or move it, empty it
/// to delete the entry, or replace it with `!command` to run a shell command on it
/// (`{}` stands for the path).
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about)]
pub struct Args {
    /// Directory to work in
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Editor command line (default: $VISUAL, $EDITOR, then vim)
    #[arg(short, long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Editor arguments for side-by-side compare mode
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub diff_args: Option<String>,

    /// Never overwrite: pick "name (2).ext" when the destination exists
    #[arg(long)]
    pub safe: bool,

    /// Apply changes without the confirmation pass
    #[arg(short, long)]
    pub fast: bool,

    /// Edit again after every cycle that changed something
    #[arg(short = 'l', long = "loop")]
    pub loop_mode: bool,

    /// List subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Include hidden entries
    #[arg(short = 'a', long = "all")]
    pub hidden: bool,

    /// Order within each directory: name, size, modified, accessed, extension, random
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Reverse the sort order
    #[arg(long)]
    pub reverse: bool,

    /// Let deleting a directory remove its contents too
    #[arg(long)]
    pub rm_recursive: bool,

    /// Show what would be done without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Log level: quiet, normal, info, debug
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the config file location and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write a commented config template to the default location and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Precedence: --debug > --log-level > None (keep config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides onto a loaded Config. Unset flags leave it untouched.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = root.clone();
        }
        if let Some(editor) = &self.editor {
            cfg.editor = Some(editor.clone());
        }
        if let Some(args) = &self.diff_args {
            cfg.diff_args = args.clone();
        }
        cfg.safe |= self.safe;
        cfg.fast |= self.fast;
        cfg.loop_mode |= self.loop_mode;
        cfg.recursive_delete |= self.rm_recursive;
        cfg.dry_run |= self.dry_run;
        cfg.listing.recursive |= self.recursive;
        cfg.listing.hidden |= self.hidden;
        cfg.listing.reverse |= self.reverse;
        if let Some(key) = self.sort {
            cfg.listing.sort = key;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
