//! Sibling temp names for atomic config writes.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling of `target` that is unique within this process.
/// Pattern: .edmv.config.tmp.<pid>.<seq>.<target name>
pub fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".into());
    let name = format!(".edmv.config.tmp.{pid}.{seq}.{stem}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}
