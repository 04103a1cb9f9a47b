//! Deleting listed entries.
//!
//! What gets removed follows the entry on disk (symlinks are never followed), so a
//! trailing `/` on the line is optional. Without recursive delete only empty
//! directories go away; after a directory is removed, ancestors left empty are pruned
//! too, stopping below the root.

use std::fs;
use std::io;
use std::path::{Component, Path};
use tracing::debug;

use super::helpers::describe_io_error;
use crate::errors::{MoveResult, OpFailure};
use crate::listing::{EntryKind, classify};

pub fn delete_entry(root: &Path, src: &str, recursive: bool) -> MoveResult {
    let rel = src.trim_end_matches('/');
    if rel.is_empty() {
        return Err(OpFailure::Unclassified(format!(
            "refusing to delete '{src}': not a path below the working directory"
        )));
    }
    let path = root.join(rel);

    let kind = match classify(&path) {
        Ok(kind) => kind,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(OpFailure::StatMissing),
        Err(e) => return Err(OpFailure::Unclassified(describe_io_error("stat", &path, &e))),
    };

    if kind == EntryKind::Dir {
        let removed = if recursive {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_dir(&path)
        };
        match removed {
            Ok(()) => {
                debug!(path = %path.display(), recursive, "removed directory");
                prune_empty_ancestors(root, rel);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                Err(OpFailure::DirectoryNotEmpty)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(OpFailure::StatMissing),
            Err(e) => Err(OpFailure::Unclassified(describe_io_error(
                "remove dir",
                &path,
                &e,
            ))),
        }
    } else {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), ?kind, "removed entry");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(OpFailure::StatMissing),
            Err(e) => Err(OpFailure::Unclassified(describe_io_error(
                "remove file",
                &path,
                &e,
            ))),
        }
    }
}

/// Remove now-empty parents of `rel`, bottom-up, stopping at the first that is not
/// empty. The root itself is never touched, and neither is anything outside it: an
/// absolute `rel` or one containing `..` prunes nothing.
fn prune_empty_ancestors(root: &Path, rel: &str) {
    let mut parts = Vec::new();
    for comp in Path::new(rel).components() {
        match comp {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            _ => {
                debug!(rel, "not below the root; skipping parent pruning");
                return;
            }
        }
    }
    parts.pop();

    while !parts.is_empty() {
        let full = parts.iter().fold(root.to_path_buf(), |acc, p| acc.join(p));
        if fs::remove_dir(&full).is_err() {
            break;
        }
        debug!(path = %full.display(), "pruned empty parent directory");
        parts.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_a_file() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("f"), b"").unwrap();
        assert_eq!(delete_entry(td.path(), "f", false), Ok(()));
        assert!(!td.path().join("f").exists());
    }

    #[test]
    fn missing_file_is_stat_missing() {
        let td = tempdir().unwrap();
        assert_eq!(delete_entry(td.path(), "nope", false), Err(OpFailure::StatMissing));
        assert_eq!(delete_entry(td.path(), "nope/", false), Err(OpFailure::StatMissing));
    }

    #[test]
    fn non_empty_dir_needs_recursive() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("d")).unwrap();
        fs::write(td.path().join("d/x"), b"").unwrap();
        assert_eq!(
            delete_entry(td.path(), "d/", false),
            Err(OpFailure::DirectoryNotEmpty)
        );
        assert!(td.path().join("d/x").exists());
        assert_eq!(delete_entry(td.path(), "d/", true), Ok(()));
        assert!(!td.path().join("d").exists());
    }

    #[test]
    fn empty_ancestors_are_pruned_but_not_root() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/b/c")).unwrap();
        assert_eq!(delete_entry(td.path(), "a/b/c/", false), Ok(()));
        assert!(!td.path().join("a").exists());
        assert!(td.path().exists());
    }

    #[test]
    fn absolute_source_prunes_nothing_outside_root() {
        let td = tempdir().unwrap();
        let other = tempdir().unwrap();
        fs::create_dir_all(other.path().join("keep/empty_parent/child")).unwrap();
        let src = format!("{}/", other.path().join("keep/empty_parent/child").display());
        assert_eq!(delete_entry(td.path(), &src, false), Ok(()));
        assert!(!other.path().join("keep/empty_parent/child").exists());
        assert!(other.path().join("keep/empty_parent").is_dir());
    }

    #[test]
    fn dot_dot_source_prunes_nothing_outside_root() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("root");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(outer.path().join("side/child")).unwrap();
        assert_eq!(delete_entry(&root, "../side/child/", false), Ok(()));
        assert!(outer.path().join("side").is_dir());
        assert!(root.is_dir());
    }

    #[test]
    fn leading_dot_slash_still_prunes_below_root() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/b")).unwrap();
        assert_eq!(delete_entry(td.path(), "./a/b/", false), Ok(()));
        assert!(!td.path().join("a").exists());
        assert!(td.path().exists());
    }

    #[test]
    fn pruning_stops_at_a_populated_parent() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/b")).unwrap();
        fs::write(td.path().join("a/keep"), b"").unwrap();
        assert_eq!(delete_entry(td.path(), "a/b/", false), Ok(()));
        assert!(td.path().join("a/keep").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_removed_not_its_target() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("target"), b"keep").unwrap();
        std::os::unix::fs::symlink("target", td.path().join("link")).unwrap();
        assert_eq!(delete_entry(td.path(), "link", false), Ok(()));
        assert!(td.path().join("target").exists());
    }

    #[test]
    fn directory_line_without_slash_still_works() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("d")).unwrap();
        assert_eq!(delete_entry(td.path(), "d", false), Ok(()));
        assert!(!td.path().join("d").exists());
    }

    #[test]
    fn bare_slash_is_refused() {
        let td = tempdir().unwrap();
        assert!(matches!(
            delete_entry(td.path(), "/", true),
            Err(OpFailure::Unclassified(_))
        ));
        assert!(td.path().exists());
    }
}
