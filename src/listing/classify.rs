//! Entry classification for listings and deletes.

use std::fs::{self, FileType};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

impl EntryKind {
    /// Classify from a non-following file type. Sockets, fifos and devices count as files.
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        }
    }

    /// Whether the listing shows this entry with a trailing `/`.
    /// Symlinks never do, even when they point at a directory.
    pub fn is_listed_as_dir(self) -> bool {
        self == EntryKind::Dir
    }
}

/// Classify `path` without following a final symlink.
pub fn classify(path: &Path) -> io::Result<EntryKind> {
    fs::symlink_metadata(path).map(|m| EntryKind::from_file_type(m.file_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn classifies_files_and_dirs() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        assert_eq!(classify(&f).unwrap(), EntryKind::File);
        assert_eq!(classify(td.path()).unwrap(), EntryKind::Dir);
        assert!(classify(&td.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_dir_is_not_a_dir() {
        let td = tempdir().unwrap();
        let d = td.path().join("d");
        fs::create_dir(&d).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&d, &link).unwrap();
        let kind = classify(&link).unwrap();
        assert_eq!(kind, EntryKind::Symlink);
        assert!(!kind.is_listed_as_dir());
    }
}
