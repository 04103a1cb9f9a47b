//! Turning a changed line into an operation.
//!
//! - empty edited value      -> delete the original entry
//! - `!cmd` edited value     -> run `cmd` in the shell, `{}` standing for the quoted source path
//! - anything else           -> move/rename the original entry to the edited path

use std::borrow::Cow;
use std::fmt;

use crate::diff::ChangePair;
use crate::errors::EdmvError;

/// Marker turning an edited line into a shell command.
pub const SHELL_MARKER: char = '!';

/// Source-path placeholder inside a shell command.
pub const PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Move { src: String, dst: String },
    Delete { src: String },
    ShellExec { cmd: String, src: String },
}

impl Operation {
    pub fn src(&self) -> &str {
        match self {
            Operation::Move { src, .. }
            | Operation::Delete { src }
            | Operation::ShellExec { src, .. } => src,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Move { src, dst } => write!(f, "mv '{src}' -> '{dst}'"),
            Operation::Delete { src } => write!(f, "rm '{src}'"),
            Operation::ShellExec { cmd, .. } => write!(f, "$ {cmd}"),
        }
    }
}

/// Classify one change.
pub fn plan(pair: &ChangePair) -> Result<Operation, EdmvError> {
    let src = pair.original.clone();
    let edited = pair.edited.as_str();

    if edited.trim().is_empty() {
        return Ok(Operation::Delete { src });
    }

    if let Some(template) = edited.strip_prefix(SHELL_MARKER) {
        let cmd = substitute(template.trim(), &shell_quote(&src)?);
        return Ok(Operation::ShellExec { cmd, src });
    }

    Ok(Operation::Move {
        src,
        dst: edited.to_string(),
    })
}

/// Plan every pair, stopping at the first path that cannot be quoted.
pub fn plan_all(pairs: &[ChangePair]) -> Result<Vec<Operation>, EdmvError> {
    pairs.iter().map(plan).collect()
}

/// Replace every placeholder with `quoted`, or append it after a space when there is none.
fn substitute(template: &str, quoted: &str) -> String {
    if template.contains(PLACEHOLDER) {
        template.replace(PLACEHOLDER, quoted)
    } else if template.is_empty() {
        quoted.to_string()
    } else {
        format!("{template} {quoted}")
    }
}

/// Quote `path` as a single POSIX shell word. Plain names come back unchanged.
pub fn shell_quote(path: &str) -> Result<String, EdmvError> {
    shlex::try_quote(path)
        .map(Cow::into_owned)
        .map_err(|_| EdmvError::UnquotablePath(path.to_string()))
}
