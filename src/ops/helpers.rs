//! I/O error enrichment.
//!
//! Turns a bare `io::Error` into a message naming the operation, the path, a short
//! hint and the OS code, e.g.
//! `remove dir 'a/b/': Permission denied (os error 13); check ownership and write permissions [os code: 13]`.

use anyhow::anyhow;
use std::io;
use std::path::Path;

fn hint_for_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "check ownership and write permissions",
            libc::ENOENT => "path not found; it may have been moved by an earlier line",
            libc::EEXIST => "already exists; pick another name",
            libc::ENOTEMPTY => "directory not empty",
            libc::ENOTDIR => "a path component is not a directory",
            libc::EISDIR => "is a directory",
            libc::EBUSY => "resource busy",
            libc::EROFS => "read-only filesystem",
            libc::ENOSPC => "no space left on device",
            libc::ELOOP => "too many levels of symbolic links",
            libc::ENAMETOOLONG => "file name too long; shorten path segments",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(not(unix))]
    {
        let _ = code;
        None
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists; pick another name"),
        _ => None,
    }
}

/// Human-readable description of `e` while performing `op` on `path`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{op} '{}': {e}", path.display());
    match e.raw_os_error() {
        Some(code) => {
            if let Some(h) = hint_for_code(code) {
                msg.push_str("; ");
                msg.push_str(h);
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(h) = hint_for_kind(e.kind()) {
                msg.push_str("; ");
                msg.push_str(h);
            }
        }
    }
    msg
}

/// `.map_err` adapter for anyhow code paths.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_op_path_and_code() {
        let e = io::Error::from_raw_os_error(libc::EACCES);
        let msg = describe_io_error("remove file", Path::new("x/y"), &e);
        assert!(msg.starts_with("remove file 'x/y': "));
        assert!(msg.contains("check ownership"));
        assert!(msg.ends_with(&format!("[os code: {}]", libc::EACCES)));
    }

    #[test]
    fn kind_only_errors_get_kind_hint() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = describe_io_error("stat", Path::new("a"), &e);
        assert_eq!(msg, "stat 'a': gone; path not found");
    }

    #[test]
    fn anyhow_adapter_keeps_message() {
        let p = Path::new("dir");
        let err = io_error_with_help("create dir", p)(io::Error::from_raw_os_error(libc::EROFS));
        assert!(err.to_string().contains("read-only filesystem"));
    }
}
