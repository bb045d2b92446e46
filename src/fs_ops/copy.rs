//! Atomic single-file copy and atomic write.
//! - Data goes to a hidden temp file in the destination directory (fsynced).
//! - The temp file is renamed over the destination, so readers see either the
//!   old file or the complete new one, never a partial write.
//! - The temp file is removed if anything fails.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::trace;

use super::atomic::rename_replacing;
use super::helpers::io_error_with_help_io;
use super::metadata::preserve_metadata;
use super::{io_copy, util};

/// Options for the copy primitives.
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Create missing parent directories of the destination.
    pub make_parents: bool,
    /// Carry timestamps and permissions over to the destination.
    pub preserve_metadata: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            make_parents: true,
            preserve_metadata: false,
        }
    }
}

/// Make sure `dir` exists: create it when allowed, otherwise report NotFound.
pub(super) fn prepare_dir(dir: &Path, create: bool) -> io::Result<()> {
    if create {
        fs::create_dir_all(dir).map_err(io_error_with_help_io("create directory", dir))
    } else if dir.is_dir() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory does not exist: {}", dir.display()),
        ))
    }
}

/// Copy `src` to `dest` atomically. Returns bytes copied.
pub fn copy_file_atomic(src: &Path, dest: &Path, opts: CopyOptions) -> io::Result<u64> {
    let dest_dir = util::parent_dir(dest);
    prepare_dir(dest_dir, opts.make_parents)?;

    let src_meta = if opts.preserve_metadata {
        Some(fs::metadata(src).map_err(io_error_with_help_io("stat source", src))?)
    } else {
        None
    };

    let tmp = util::unique_temp_path(dest_dir);
    let bytes = match io_copy::copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io_error_with_help_io("copy file", src)(e));
        }
    };

    if let Some(meta) = &src_meta {
        preserve_metadata(&tmp, meta);
    }

    if let Err(e) = rename_replacing(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help_io("rename into place", dest)(e));
    }

    trace!(src = %src.display(), dest = %dest.display(), bytes, "copied file atomically");
    Ok(bytes)
}

/// Write `contents` to `path` atomically (temp file + fsync + rename).
pub fn write_atomic(path: &Path, contents: &[u8], make_parents: bool) -> io::Result<()> {
    let dir = util::parent_dir(path);
    prepare_dir(dir, make_parents)?;

    let tmp = util::unique_temp_path(dir);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(contents)?;
            f.sync_all()
        });
    if let Err(e) = written.and_then(|()| rename_replacing(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help_io("write", path)(e));
    }
    Ok(())
}
