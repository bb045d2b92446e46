//! Filesystem primitives used by the bundle operations.
//!
//! Everything here speaks `std::io::Result`; the typed error layer lives in
//! `crate::errors`. Error messages are enriched with the operation, the path
//! and an OS hint while keeping the original `ErrorKind`.

mod atomic;
mod copy;
mod helpers;
mod io_copy;
mod metadata;
mod relocate;
mod remove;
mod tree;
mod util;

pub use copy::{copy_file_atomic, write_atomic, CopyOptions};
pub use helpers::{describe_io_error, io_error_with_help_io};
pub use relocate::{move_dir, move_file};
pub use remove::{remove_dir_if_exists, remove_file_if_exists};
pub use tree::copy_tree;
pub use util::same_location;

pub(crate) use util::parent_dir;
