//! Directory listing.
//!
//! Produces the ordered sequence of paths the user edits. Entries are relative to
//! the working root; directories carry a trailing `/`.
//!
//! Ordering, per directory level:
//! - directories first, then everything else
//! - each group ordered by the configured `SortKey` (ties broken by name)
//! - in recursive mode a directory is immediately followed by its own contents

mod classify;

pub use classify::{EntryKind, classify};

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::fmt;
use std::fs::Metadata;
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Order key applied within each group of a directory level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Modified,
    Accessed,
    Extension,
    Random,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "lexical" | "alpha" => Some(SortKey::Name),
            "size" => Some(SortKey::Size),
            "modified" | "mtime" | "time" => Some(SortKey::Modified),
            "accessed" | "atime" => Some(SortKey::Accessed),
            "extension" | "ext" => Some(SortKey::Extension),
            "random" | "shuffle" => Some(SortKey::Random),
            _ => None,
        }
    }

    fn needs_metadata(self) -> bool {
        matches!(self, SortKey::Size | SortKey::Modified | SortKey::Accessed)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Modified => "modified",
            SortKey::Accessed => "accessed",
            SortKey::Extension => "extension",
            SortKey::Random => "random",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "invalid sort key: '{s}' (expected name, size, modified, accessed, extension or random)"
            )
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Include dot entries (and descend into dot directories)
    pub hidden: bool,
    pub sort: SortKey,
    /// Reverse each group after sorting
    pub reverse: bool,
}

struct Item {
    name: String,
    kind: EntryKind,
    meta: Option<Metadata>,
}

/// List `root` according to `opts`.
pub fn list_entries(root: &Path, opts: &ListOptions) -> Result<Vec<String>> {
    let mut rng = rand::rng();
    let mut out = Vec::new();
    list_level(root, "", opts, &mut rng, &mut out)?;
    debug!(root = %root.display(), entries = out.len(), sort = %opts.sort, recursive = opts.recursive, "listed");
    Ok(out)
}

fn list_level<R: Rng + ?Sized>(
    root: &Path,
    prefix: &str,
    opts: &ListOptions,
    rng: &mut R,
    out: &mut Vec<String>,
) -> Result<()> {
    let dir = root.join(prefix);
    let mut dirs = Vec::new();
    let mut others = Vec::new();

    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.with_context(|| format!("read directory '{}'", dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "skipping entry with a non-UTF-8 name");
            continue;
        };
        if !opts.hidden && name.starts_with('.') {
            continue;
        }
        let kind = EntryKind::from_file_type(entry.file_type());
        let meta = if opts.sort.needs_metadata() {
            entry.metadata().ok()
        } else {
            None
        };
        let item = Item { name, kind, meta };
        if kind.is_listed_as_dir() {
            dirs.push(item);
        } else {
            others.push(item);
        }
    }

    order(&mut dirs, opts, rng);
    order(&mut others, opts, rng);

    for d in dirs {
        let rel = format!("{prefix}{}/", d.name);
        out.push(rel.clone());
        if opts.recursive {
            list_level(root, &rel, opts, rng, out)?;
        }
    }
    out.extend(others.into_iter().map(|f| format!("{prefix}{}", f.name)));
    Ok(())
}

fn order<R: Rng + ?Sized>(items: &mut [Item], opts: &ListOptions, rng: &mut R) {
    match opts.sort {
        SortKey::Random => items.shuffle(rng),
        SortKey::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Size => items.sort_by(|a, b| by_key(a, b, |m| m.len())),
        SortKey::Modified => items.sort_by(|a, b| by_key(a, b, |m| time_or_epoch(m.modified()))),
        SortKey::Accessed => items.sort_by(|a, b| by_key(a, b, |m| time_or_epoch(m.accessed()))),
        SortKey::Extension => items.sort_by(|a, b| {
            extension(&a.name)
                .cmp(extension(&b.name))
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
    if opts.reverse {
        items.reverse();
    }
}

fn by_key<K: Ord>(a: &Item, b: &Item, key: impl Fn(&Metadata) -> K) -> Ordering {
    let ka = a.meta.as_ref().map(&key);
    let kb = b.meta.as_ref().map(&key);
    ka.cmp(&kb).then_with(|| a.name.cmp(&b.name))
}

fn time_or_epoch(t: std::io::Result<SystemTime>) -> SystemTime {
    t.unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Extension as `Path::extension` sees it; dotfiles have none.
fn extension(name: &str) -> &str {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn opts() -> ListOptions {
        ListOptions::default()
    }

    #[test]
    fn dirs_first_then_files_by_name() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("b.txt"), b"").unwrap();
        fs::write(td.path().join("a.txt"), b"").unwrap();
        fs::create_dir(td.path().join("zdir")).unwrap();
        fs::create_dir(td.path().join("adir")).unwrap();
        let got = list_entries(td.path(), &opts()).unwrap();
        assert_eq!(got, vec!["adir/", "zdir/", "a.txt", "b.txt"]);
    }

    #[test]
    fn hidden_entries_need_opt_in() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(".env"), b"").unwrap();
        fs::write(td.path().join("x"), b"").unwrap();
        assert_eq!(list_entries(td.path(), &opts()).unwrap(), vec!["x"]);
        let with_hidden = ListOptions {
            hidden: true,
            ..opts()
        };
        assert_eq!(
            list_entries(td.path(), &with_hidden).unwrap(),
            vec![".env", "x"]
        );
    }

    #[test]
    fn recursive_places_children_after_their_dir() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/inner")).unwrap();
        fs::write(td.path().join("a/inner/deep.txt"), b"").unwrap();
        fs::write(td.path().join("a/one.txt"), b"").unwrap();
        fs::create_dir(td.path().join("b")).unwrap();
        fs::write(td.path().join("top.txt"), b"").unwrap();
        let o = ListOptions {
            recursive: true,
            ..opts()
        };
        let got = list_entries(td.path(), &o).unwrap();
        assert_eq!(
            got,
            vec![
                "a/",
                "a/inner/",
                "a/inner/deep.txt",
                "a/one.txt",
                "b/",
                "top.txt"
            ]
        );
    }

    #[test]
    fn recursive_skips_hidden_dirs() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join(".git")).unwrap();
        fs::write(td.path().join(".git/HEAD"), b"").unwrap();
        let o = ListOptions {
            recursive: true,
            ..opts()
        };
        assert!(list_entries(td.path(), &o).unwrap().is_empty());
    }

    #[test]
    fn size_sort_and_reverse() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("big"), vec![0u8; 300]).unwrap();
        fs::write(td.path().join("small"), vec![0u8; 3]).unwrap();
        fs::write(td.path().join("mid"), vec![0u8; 30]).unwrap();
        let o = ListOptions {
            sort: SortKey::Size,
            ..opts()
        };
        assert_eq!(list_entries(td.path(), &o).unwrap(), vec!["small", "mid", "big"]);
        let o = ListOptions {
            sort: SortKey::Size,
            reverse: true,
            ..opts()
        };
        assert_eq!(list_entries(td.path(), &o).unwrap(), vec!["big", "mid", "small"]);
    }

    #[test]
    fn modified_sort_uses_mtime() {
        let td = tempdir().unwrap();
        let old = td.path().join("z_old");
        let new = td.path().join("a_new");
        fs::write(&old, b"").unwrap();
        fs::write(&new, b"").unwrap();
        let past = SystemTime::now() - Duration::from_secs(3600);
        filetime::set_file_mtime(&old, filetime::FileTime::from_system_time(past)).unwrap();
        let o = ListOptions {
            sort: SortKey::Modified,
            ..opts()
        };
        assert_eq!(list_entries(td.path(), &o).unwrap(), vec!["z_old", "a_new"]);
    }

    #[test]
    fn extension_sort_groups_by_suffix() {
        let td = tempdir().unwrap();
        for n in ["b.txt", "a.rs", "c.md", "noext"] {
            fs::write(td.path().join(n), b"").unwrap();
        }
        let o = ListOptions {
            sort: SortKey::Extension,
            ..opts()
        };
        assert_eq!(
            list_entries(td.path(), &o).unwrap(),
            vec!["noext", "c.md", "a.rs", "b.txt"]
        );
    }

    #[test]
    fn random_sort_keeps_every_entry() {
        let td = tempdir().unwrap();
        for i in 0..20 {
            fs::write(td.path().join(format!("f{i:02}")), b"").unwrap();
        }
        fs::create_dir(td.path().join("d")).unwrap();
        let o = ListOptions {
            sort: SortKey::Random,
            ..opts()
        };
        let mut got = list_entries(td.path(), &o).unwrap();
        assert_eq!(got[0], "d/", "directories still come first");
        got.sort();
        assert_eq!(got.len(), 21);
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("mtime".parse::<SortKey>().unwrap(), SortKey::Modified);
        assert_eq!("RANDOM".parse::<SortKey>().unwrap(), SortKey::Random);
        assert!("colour".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Accessed.to_string().parse::<SortKey>().unwrap(), SortKey::Accessed);
    }

    #[test]
    fn missing_root_is_an_error() {
        let td = tempdir().unwrap();
        assert!(list_entries(&td.path().join("nope"), &opts()).is_err());
    }
}
