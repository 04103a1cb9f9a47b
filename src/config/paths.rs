//! Where the config and log files live by default, and the symlink check used
//! before writing to a user-supplied location.

use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

const APP_DIR: &str = "edmv";

/// `<base>/edmv/<file>`, with `$HOME/<home_rel>` standing in for a missing base.
fn app_file(base: Option<PathBuf>, home_rel: &[&str], file: &str) -> Option<PathBuf> {
    let base = base.or_else(|| {
        let home = PathBuf::from(std::env::var_os("HOME")?);
        Some(home_rel.iter().fold(home, |acc, part| acc.join(part)))
    })?;
    Some(base.join(APP_DIR).join(file))
}

/// Config file path: `$EDMV_CONFIG` when set, else `<config_dir>/edmv/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(p) if !p.is_empty() => Some(PathBuf::from(p)),
        _ => app_file(config_dir(), &[".config"], "config.xml"),
    }
}

/// `<data_dir>/edmv/edmv.log`. Nothing is created here.
pub fn default_log_path() -> Option<PathBuf> {
    app_file(data_dir(), &[".local", "share"], "edmv.log")
}

/// True when some existing proper ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    for anc in path.ancestors().skip(1).filter(|a| !a.as_os_str().is_empty()) {
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}
