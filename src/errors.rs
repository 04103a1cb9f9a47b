//! Typed error definitions for edmv.
//!
//! Two families:
//! - `EdmvError`: fatal for the current cycle (editor failures, unparsable review lines).
//! - `OpFailure`: per-operation failures collected during the apply phase; never abort a batch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdmvError {
    #[error("listing has {edited} lines but {original} were expected; keep one line per entry")]
    LengthMismatch { original: usize, edited: usize },

    #[error("editor '{program}' exited with {}", status_label(.status))]
    EditorInvocationFailed { program: String, status: Option<i32> },

    #[error("failed to launch editor '{program}': {source}")]
    EditorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("editor temp file {path}: {source}")]
    EditorIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no editor configured; set $VISUAL or $EDITOR, or pass --editor")]
    NoEditor,

    #[error("review line {line}: cannot parse {text:?}: {reason}")]
    MalformedChangeLine {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("path cannot be quoted for the shell: {0:?}")]
    UnquotablePath(String),

    #[error("cannot list {root}: {message}")]
    Listing { root: PathBuf, message: String },
}

impl EdmvError {
    /// Stable numeric code for logs.
    pub fn code(&self) -> u16 {
        match self {
            EdmvError::LengthMismatch { .. } => 10,
            EdmvError::EditorInvocationFailed { .. } => 11,
            EdmvError::EditorSpawn { .. } => 12,
            EdmvError::EditorIo { .. } => 13,
            EdmvError::NoEditor => 14,
            EdmvError::MalformedChangeLine { .. } => 15,
            EdmvError::UnquotablePath(_) => 16,
            EdmvError::Listing { .. } => 17,
        }
    }
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Why a single operation failed.
///
/// The first four variants mirror the diagnostics `mv` prints under the C locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpFailure {
    #[error("cannot create regular file: permission denied")]
    PermissionDeniedCreate,

    #[error("cannot move: no such file or directory (does the destination directory exist?)")]
    SourceMissing,

    #[error("cannot move: permission denied")]
    PermissionDeniedMove,

    #[error("cannot stat: no such file or directory")]
    StatMissing,

    #[error("directory not empty; use --rm-recursive to remove a directory with its contents")]
    DirectoryNotEmpty,

    #[error("failed: {0}")]
    Unclassified(String),
}

impl OpFailure {
    /// Stable numeric code; 2-5 follow the historic `mv` wrapper numbering.
    pub fn code(&self) -> u16 {
        match self {
            OpFailure::Unclassified(_) => 1,
            OpFailure::PermissionDeniedCreate => 2,
            OpFailure::SourceMissing => 3,
            OpFailure::PermissionDeniedMove => 4,
            OpFailure::StatMissing => 5,
            OpFailure::DirectoryNotEmpty => 6,
        }
    }

    /// Short machine-friendly name used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            OpFailure::Unclassified(_) => "unclassified",
            OpFailure::PermissionDeniedCreate => "permission_denied_create",
            OpFailure::SourceMissing => "source_missing",
            OpFailure::PermissionDeniedMove => "permission_denied_move",
            OpFailure::StatMissing => "stat_missing",
            OpFailure::DirectoryNotEmpty => "directory_not_empty",
        }
    }
}

/// Outcome of one executed operation.
pub type MoveResult = Result<(), OpFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_codes_are_stable() {
        assert_eq!(OpFailure::PermissionDeniedCreate.code(), 2);
        assert_eq!(OpFailure::SourceMissing.code(), 3);
        assert_eq!(OpFailure::PermissionDeniedMove.code(), 4);
        assert_eq!(OpFailure::StatMissing.code(), 5);
        assert_eq!(OpFailure::Unclassified("x".into()).code(), 1);
    }

    #[test]
    fn editor_failure_message_names_status() {
        let e = EdmvError::EditorInvocationFailed {
            program: "vim".into(),
            status: Some(3),
        };
        assert_eq!(e.to_string(), "editor 'vim' exited with status 3");
        let e = EdmvError::EditorInvocationFailed {
            program: "vim".into(),
            status: None,
        };
        assert!(e.to_string().ends_with("a signal"));
    }

    #[test]
    fn unclassified_display_keeps_raw_text() {
        let f = OpFailure::Unclassified("mv: something odd".into());
        assert_eq!(f.to_string(), "failed: mv: something odd");
    }
}
