//! The external `mv` primitive.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::trace;

use super::classify::classify_mv;
use super::helpers::describe_io_error;
use crate::errors::{MoveResult, OpFailure};

/// Run `mv -- src dst` inside `root` under the C locale and classify the outcome.
pub fn run_mv(root: &Path, src: &str, dst: &str) -> MoveResult {
    trace!(src, dst, root = %root.display(), "spawning mv");
    let output = Command::new("mv")
        .arg("--")
        .arg(src)
        .arg(dst)
        .current_dir(root)
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| OpFailure::Unclassified(describe_io_error("spawn mv in", root, &e)))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    classify_mv(output.status.code(), stderr.trim_end())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn renames_a_file() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("a"), b"hello").unwrap();
        assert_eq!(run_mv(td.path(), "a", "b"), Ok(()));
        assert_eq!(fs::read(td.path().join("b")).unwrap(), b"hello");
        assert!(!td.path().join("a").exists());
    }

    #[test]
    fn dash_prefixed_names_are_not_options() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("-n"), b"").unwrap();
        assert_eq!(run_mv(td.path(), "-n", "plain"), Ok(()));
        assert!(td.path().join("plain").exists());
    }

    #[test]
    fn missing_source_is_stat_missing() {
        let td = tempdir().unwrap();
        assert_eq!(
            run_mv(td.path(), "nope", "other"),
            Err(OpFailure::StatMissing)
        );
    }
}
