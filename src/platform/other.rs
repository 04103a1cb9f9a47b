//! No permission bits and no directory handles to sync on these targets.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

pub(super) fn owner_only(_opts: &mut OpenOptions) {}

pub(super) fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}
