//! I/O error helpers.
//!
//! Enrich io::Error messages with the failed operation, the path and a
//! platform-aware hint, while keeping the original ErrorKind.
//!
//! Usage:
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use std::io;
use std::path::Path;

/// Hint for a raw OS error code, if we know one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; ensure no other process is writing"),
            libc::ENOENT => Some("path not found; verify it exists"),
            libc::EEXIST => Some("already exists; remove the target first"),
            libc::ENOTEMPTY => Some("directory not empty"),
            libc::EISDIR => Some("is a directory; expected a file"),
            libc::ENOTDIR => Some("not a directory; a file is in the way"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("file name or path too long"),
            libc::EMFILE => Some("process file descriptor limit reached"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found; verify it exists"),
            80 | 183 => Some("already exists; remove the target first"),
            112 => Some("insufficient disk space"),
            206 => Some("file name or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the target first"),
        _ => None,
    }
}

/// Human-friendly message: `<op> '<path>': <error> (<hint>) [os code: N]`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Returns a closure for `.map_err(...)` that rewrites the message and
/// preserves the ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notfound_hint_includes_op_and_path() {
        let p = Path::new("/nonexistent/path/for/test");
        let msg = describe_io_error("open", p, &io::Error::from(io::ErrorKind::NotFound));
        assert!(msg.contains("open"));
        assert!(msg.contains("/nonexistent/path/for/test"));
        assert!(msg.contains("path not found"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_codes_get_hints() {
        let p = Path::new("/tmp");
        let msg = describe_io_error("write", p, &io::Error::from_raw_os_error(libc::ENOSPC));
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.contains("os code"), "msg was: {msg}");
        let msg = describe_io_error("rename", p, &io::Error::from_raw_os_error(libc::EXDEV));
        assert!(msg.contains("cross-filesystem"), "msg was: {msg}");
    }

    #[test]
    fn adapter_preserves_kind() {
        let p = Path::new("/tmp/test.txt");
        let wrapped = io_error_with_help_io("create", p)(io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(wrapped.kind(), io::ErrorKind::AlreadyExists);
        assert!(wrapped.to_string().contains("already exists"));
    }
}
