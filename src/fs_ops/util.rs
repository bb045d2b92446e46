use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden, unique temp name inside `dst_dir`:
/// `.sidematter.<pid>.<nanos>.<seq>.tmp`. The sequence keeps parallel
/// copies from colliding within one process.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!(".sidematter.{pid}.{nanos}.{seq}.tmp"))
}

/// Parent directory of `path`; a bare file name lives in ".".
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// True when `a` and `b` name the same directory entry, e.g. `doc.assets`
/// and `./doc.assets`. Parents are canonicalized and the final names
/// compared, so `b` need not exist; two existing paths that resolve to the
/// same target also count.
pub fn same_location(a: &Path, b: &Path) -> bool {
    if let (Ok(x), Ok(y)) = (fs::canonicalize(a), fs::canonicalize(b))
        && x == y
    {
        return true;
    }
    match (anchored(a), anchored(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn anchored(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = fs::canonicalize(parent_dir(path)).ok()?;
    Some(parent.join(name))
}

pub(super) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        // ERROR_NOT_SAME_DEVICE
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
