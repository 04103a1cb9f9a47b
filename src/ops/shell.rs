//! Shell command execution for `!` lines.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::trace;

use super::helpers::describe_io_error;
use crate::errors::{MoveResult, OpFailure};

/// Run `sh -c cmd` in `root`. Stdout goes to the terminal; stderr is captured and
/// reported on failure.
pub fn run_shell(root: &Path, cmd: &str) -> MoveResult {
    trace!(cmd, root = %root.display(), "spawning shell");
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| OpFailure::Unclassified(describe_io_error("spawn sh in", root, &e)))?;

    if output.status.success() {
        return Ok(());
    }
    let status = match output.status.code() {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    };
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        Err(OpFailure::Unclassified(format!("`{cmd}` exited with {status}")))
    } else {
        Err(OpFailure::Unclassified(format!(
            "`{cmd}` exited with {status}: {stderr}"
        )))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn runs_in_the_root() {
        let td = tempdir().unwrap();
        assert_eq!(run_shell(td.path(), "echo hi > out.txt"), Ok(()));
        assert_eq!(fs::read_to_string(td.path().join("out.txt")).unwrap(), "hi\n");
    }

    #[test]
    fn failure_carries_status_and_stderr() {
        let td = tempdir().unwrap();
        let err = run_shell(td.path(), "echo broken >&2; exit 3").unwrap_err();
        let OpFailure::Unclassified(msg) = err else {
            panic!("expected unclassified");
        };
        assert!(msg.contains("status 3"), "{msg}");
        assert!(msg.ends_with("broken"), "{msg}");
    }
}
