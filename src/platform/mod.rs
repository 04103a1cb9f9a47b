//! Platform helpers for the log file and the config template.
//!
//! The logic lives here; `unix`/`other` only supply permission bits and directory
//! syncing, which have no portable equivalent.

mod temp;
#[cfg(not(unix))]
mod other;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
use other as sys;
#[cfg(unix)]
use unix as sys;

pub use sys::{set_dir_mode_0700, set_file_mode_0600};

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Open `path` for appending. A new file is created owner-only; an existing one
/// keeps whatever mode it has.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    sys::owner_only(&mut opts);
    opts.open(path)
}

/// Write `contents` to `path` through an owner-only temp sibling, then rename it
/// into place and sync the directory. The temp file never outlives a failure.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let tmp = temp::tmp_config_sibling_name(path);
    let written = (|| -> Result<()> {
        let mut opts = OpenOptions::new();
        opts.write(true).create_new(true);
        sys::owner_only(&mut opts);
        let mut f = opts
            .open(&tmp)
            .with_context(|| format!("create temp '{}'", tmp.display()))?;
        f.write_all(contents).context("write temp")?;
        f.sync_all().context("fsync temp")?;
        fs::rename(&tmp, path)
            .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()))
    })();
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written?;

    sys::sync_dir(parent).with_context(|| format!("fsync dir '{}'", parent.display()))
}
