//! Atomic rename helper.
//! - Returns the raw io::Error so callers can inspect the OS code (EXDEV).
//! - On Windows, removes an existing destination file first (rename doesn't overwrite there).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

use super::util::{fsync_dir, parent_dir};

pub(super) fn rename_replacing(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.is_file() {
            match fs::remove_file(dst) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
    }

    fs::rename(src, dst)?;

    // A failed fsync must not turn a completed rename into an error.
    let _ = fsync_dir(parent_dir(dst));
    Ok(())
}
