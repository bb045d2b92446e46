//! Moves for files and directories.
//! Both try a rename first. Only a cross-device error (EXDEV) triggers the
//! copy-then-delete fallback; any other rename failure is returned as is.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::atomic::rename_replacing;
use super::copy::{copy_file_atomic, prepare_dir, CopyOptions};
use super::helpers::io_error_with_help_io;
use super::tree::copy_tree;
use super::util::{is_cross_device, parent_dir, same_location};

/// Move a file, replacing `dest` if it exists.
pub fn move_file(src: &Path, dest: &Path, make_parents: bool) -> io::Result<()> {
    prepare_dir(parent_dir(dest), make_parents)?;

    match rename_replacing(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            let opts = CopyOptions {
                make_parents: false,
                preserve_metadata: true,
            };
            copy_file_atomic(src, dest, opts)?;
            fs::remove_file(src).map_err(io_error_with_help_io("remove source file", src))?;
            info!(src = %src.display(), dest = %dest.display(), "moved file across devices (copy + delete)");
            Ok(())
        }
        Err(e) => Err(io_error_with_help_io("rename file", src)(e)),
    }
}

/// Move a directory. When `dest` already is a directory the contents of
/// `src` are merged into it, overwriting files with the same relative path.
/// Moving a directory onto itself is a no-op.
pub fn move_dir(src: &Path, dest: &Path, make_parents: bool) -> io::Result<()> {
    prepare_dir(parent_dir(dest), make_parents)?;

    if same_location(src, dest) {
        debug!(path = %src.display(), "directory already in place");
        return Ok(());
    }
    if dest.is_dir() {
        return merge_dir(src, dest);
    }
    if dest.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination exists and is not a directory: {}", dest.display()),
        ));
    }

    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed directory");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            let opts = CopyOptions {
                make_parents: false,
                preserve_metadata: true,
            };
            let files = copy_tree(src, dest, opts)?;
            fs::remove_dir_all(src).map_err(io_error_with_help_io("remove source directory", src))?;
            info!(src = %src.display(), dest = %dest.display(), files, "moved directory across devices (copy + delete)");
            Ok(())
        }
        Err(e) => Err(io_error_with_help_io("rename directory", src)(e)),
    }
}

fn merge_dir(src: &Path, dest: &Path) -> io::Result<()> {
    // Collect first; the source tree is emptied while we move.
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .to_path_buf();
        if entry.file_type().is_dir() {
            dirs.push(rel);
        } else {
            files.push(rel);
        }
    }

    // Parents come before children in walk order.
    for rel in &dirs {
        let target = dest.join(rel);
        fs::create_dir_all(&target).map_err(io_error_with_help_io("create directory", &target))?;
    }
    for rel in &files {
        move_file(&src.join(rel), &dest.join(rel), false)?;
    }
    fs::remove_dir_all(src).map_err(io_error_with_help_io("remove source directory", src))?;
    debug!(src = %src.display(), dest = %dest.display(), moved = files.len(), "merged directory into existing destination");
    Ok(())
}
