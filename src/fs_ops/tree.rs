//! Recursive directory copy.
//! Directories are created first; files are then copied in parallel, each one
//! atomically. Existing destination entries are overwritten and unrelated
//! destination entries are left alone (merge semantics).

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::copy::{copy_file_atomic, prepare_dir, CopyOptions};
use super::helpers::io_error_with_help_io;
use super::util::parent_dir;

/// Copy the tree rooted at `src` into `dest`. Symlinks are followed. Returns
/// the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path, opts: CopyOptions) -> io::Result<usize> {
    prepare_dir(parent_dir(dest), opts.make_parents)?;

    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error_with_help_io("create directory", &target))?;
        } else {
            files.push((entry.into_path(), target));
        }
    }

    let per_file = CopyOptions {
        make_parents: false,
        ..opts
    };
    files
        .par_iter()
        .try_for_each(|(from, to)| copy_file_atomic(from, to, per_file).map(|_| ()))?;

    debug!(src = %src.display(), dest = %dest.display(), files = files.len(), "copied directory tree");
    Ok(files.len())
}
