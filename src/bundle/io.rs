//! File-system capabilities needed by bundle operations.

use std::io;
use std::path::Path;

use crate::fs_ops::{self, CopyOptions};

/// The primitives a bundle transfer is built from.
///
/// Parent directories are prepared by the caller, so implementations may
/// assume the destination's parent exists.
pub trait BundleIo {
    fn dir_exists(&self, dir: &Path) -> bool;
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
    fn copy_file(&self, from: &Path, to: &Path, preserve_metadata: bool) -> io::Result<()>;
    fn copy_dir(&self, from: &Path, to: &Path, preserve_metadata: bool) -> io::Result<()>;
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn move_dir(&self, from: &Path, to: &Path) -> io::Result<()>;
    /// `Ok(false)` when nothing was there.
    fn remove_file(&self, path: &Path) -> io::Result<bool>;
    /// `Ok(false)` when nothing was there.
    fn remove_dir(&self, path: &Path) -> io::Result<bool>;

    /// Whether `from` and `to` are the same entry, so a transfer between
    /// them must not touch it.
    fn same_entry(&self, from: &Path, to: &Path) -> bool {
        fs_ops::same_location(from, to)
    }
}

/// The local file system, via `fs_ops`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl BundleIo for LocalFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)
    }

    fn copy_file(&self, from: &Path, to: &Path, preserve_metadata: bool) -> io::Result<()> {
        let opts = CopyOptions {
            make_parents: false,
            preserve_metadata,
        };
        fs_ops::copy_file_atomic(from, to, opts).map(|_| ())
    }

    fn copy_dir(&self, from: &Path, to: &Path, preserve_metadata: bool) -> io::Result<()> {
        let opts = CopyOptions {
            make_parents: false,
            preserve_metadata,
        };
        fs_ops::copy_tree(from, to, opts).map(|_| ())
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs_ops::move_file(from, to, false)
    }

    fn move_dir(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs_ops::move_dir(from, to, false)
    }

    fn remove_file(&self, path: &Path) -> io::Result<bool> {
        fs_ops::remove_file_if_exists(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<bool> {
        fs_ops::remove_dir_if_exists(path)
    }
}
