//! Destination resolution for moves.
//!
//! Policy:
//! - a destination containing `/` gets its directory part created first (like `mkdir -p "$(dirname dst)"`)
//! - a destination naming an existing directory means "into that directory"
//! - in safe mode a destination that is an existing regular file is renamed with a " (n)" suffix before the
//!   extension: "b.txt" -> "b (2).txt" -> "b (3).txt"
//!
//! Nothing is moved here; callers still race with anything else touching the tree.

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::helpers::io_error_with_help;

const MAX_TRIES: usize = 10_000;

static NUMBERED_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \((\d+)\)$").expect("valid numbered stem regex"));

/// Compute where `src` ends up when moved to `dst`, both relative to `root`.
pub fn resolve_destination(root: &Path, src: &str, dst: &str, safe: bool) -> Result<String> {
    if let Some(idx) = dst.rfind('/') {
        let parent = &dst[..idx];
        if !parent.is_empty() {
            let dir = root.join(parent);
            if !dir.exists() {
                debug!(dir = %dir.display(), "creating destination directory");
                fs::create_dir_all(&dir).map_err(io_error_with_help("create dir", &dir))?;
            }
        }
    }

    let mut candidate = into_existing_dir(root, src, dst.to_string());
    if !safe {
        return Ok(candidate);
    }

    for attempt in 0..MAX_TRIES {
        if !root.join(&candidate).is_file() {
            if attempt > 0 {
                debug!(src, requested = dst, chosen = %candidate, "destination taken; using suffixed name");
            }
            return Ok(candidate);
        }
        if attempt == 3 {
            trace!(src, dst, "several collisions; still searching for a free suffix");
        }
        candidate = into_existing_dir(root, src, next_numbered(&candidate));
    }
    bail!("no free name for '{dst}' after {MAX_TRIES} attempts")
}

/// `dst/basename(src)` when `dst` is an existing directory, otherwise `dst`.
fn into_existing_dir(root: &Path, src: &str, dst: String) -> String {
    if !root.join(&dst).is_dir() {
        return dst;
    }
    let base = src.trim_end_matches('/').rsplit('/').next().unwrap_or(src);
    if dst.ends_with('/') {
        format!("{dst}{base}")
    } else {
        format!("{dst}/{base}")
    }
}

/// "dir/b.txt" -> "dir/b (2).txt"; "dir/b (2).txt" -> "dir/b (3).txt".
fn next_numbered(path: &str) -> String {
    let (parent, name) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };
    let p = Path::new(name);
    let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let ext = p.extension().and_then(|e| e.to_str());

    let bumped = match NUMBERED_STEM.captures(stem) {
        Some(caps) => {
            let n: u64 = caps[2].parse().unwrap_or(1);
            format!("{} ({})", &caps[1], n.saturating_add(1))
        }
        None => format!("{stem} (2)"),
    };

    match ext {
        Some(e) => format!("{parent}{bumped}.{e}"),
        None => format!("{parent}{bumped}"),
    }
}
