//! Launching the user's editor on a listing.
//!
//! The listing is written one path per line to a temp file, the editor runs in the
//! foreground, and the file is read back. Compare mode also writes a read-only
//! reference listing and passes both files (vim: `vim -d edited reference`).

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use tempfile::{Builder, TempPath};
use tracing::{debug, trace};

use crate::config::Config;
use crate::errors::EdmvError;

/// Last resort when nothing else names an editor.
pub const FALLBACK_EDITOR: &str = "vim";

/// Something that lets the user edit a list of lines.
pub trait ListEditor {
    /// Edit `lines`; when `reference` is given, show it alongside for comparison.
    /// Returns the edited lines, which may differ in number from the input.
    fn edit(
        &mut self,
        lines: &[String],
        reference: Option<&[String]>,
    ) -> Result<Vec<String>, EdmvError>;
}

impl<F> ListEditor for F
where
    F: FnMut(&[String], Option<&[String]>) -> Result<Vec<String>, EdmvError>,
{
    fn edit(
        &mut self,
        lines: &[String],
        reference: Option<&[String]>,
    ) -> Result<Vec<String>, EdmvError> {
        self(lines, reference)
    }
}

/// Pick the editor command line: explicit setting, `$VISUAL`, `$EDITOR`, then vim.
pub fn resolve_editor_command(explicit: Option<&str>) -> String {
    let from_env = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
    explicit
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
        .or_else(|| from_env("VISUAL"))
        .or_else(|| from_env("EDITOR"))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// An external editor program.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
    diff_args: Vec<String>,
}

impl CommandEditor {
    /// Build from a shell-like command line such as `"code --wait"`.
    pub fn new(command_line: &str, diff_args: &str) -> Result<Self, EdmvError> {
        let mut words = split_words(command_line)?;
        if words.is_empty() {
            return Err(EdmvError::NoEditor);
        }
        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
            diff_args: split_words(diff_args)?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, EdmvError> {
        let command_line = resolve_editor_command(cfg.editor.as_deref());
        Self::new(&command_line, &cfg.diff_args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, file: &Path, reference: Option<&Path>) -> Result<(), EdmvError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(r) = reference {
            cmd.args(&self.diff_args).arg(file).arg(r);
        } else {
            cmd.arg(file);
        }
        debug!(program = %self.program, compare = reference.is_some(), "launching editor");

        let status = cmd.status().map_err(|source| EdmvError::EditorSpawn {
            program: self.program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(EdmvError::EditorInvocationFailed {
                program: self.program.clone(),
                status: status.code(),
            });
        }
        Ok(())
    }
}

impl ListEditor for CommandEditor {
    fn edit(
        &mut self,
        lines: &[String],
        reference: Option<&[String]>,
    ) -> Result<Vec<String>, EdmvError> {
        let file = write_listing(lines)?;
        let reference_file = reference.map(write_listing).transpose()?;
        self.run(&file, reference_file.as_deref())?;

        let content = fs::read_to_string(&file).map_err(|source| EdmvError::EditorIo {
            path: file.to_path_buf(),
            source,
        })?;
        let edited: Vec<String> = content.lines().map(str::to_owned).collect();
        trace!(before = lines.len(), after = edited.len(), "read back edited listing");
        Ok(edited)
    }
}

fn split_words(s: &str) -> Result<Vec<String>, EdmvError> {
    shlex::split(s).ok_or_else(|| EdmvError::EditorSpawn {
        program: s.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "unbalanced quotes in command"),
    })
}

/// Write `lines` to a fresh temp file, removed when the returned path is dropped.
fn write_listing(lines: &[String]) -> Result<TempPath, EdmvError> {
    let tmp = Builder::new()
        .prefix("edmv-")
        .suffix(".txt")
        .tempfile()
        .map_err(|source| EdmvError::EditorIo {
            path: env::temp_dir(),
            source,
        })?;
    let path = tmp.path().to_path_buf();
    let io_err = |source| EdmvError::EditorIo {
        path: path.clone(),
        source,
    };
    {
        let mut f = tmp.as_file();
        for line in lines {
            writeln!(f, "{line}").map_err(io_err)?;
        }
        f.flush().map_err(io_err)?;
    }
    Ok(tmp.into_temp_path())
}
