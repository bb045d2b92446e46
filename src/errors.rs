//! Typed error definitions for sidematter.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::describe_io_error;
use crate::sidematter::MetadataFormat;

/// Crate-wide result alias.
pub type Result<T, E = SidematterError> = std::result::Result<T, E>;

/// Coarse failure classes callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A required path is missing (destination parent, unreadable metadata).
    NotFound,
    /// Metadata exists but does not conform to its declared format.
    Decode,
    /// An underlying file/directory primitive failed.
    Io,
    /// The primary path cannot take part in the naming convention.
    DegenerateName,
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::NotFound => "not_found",
            ErrorClass::Decode => "decode",
            ErrorClass::Io => "io",
            ErrorClass::DegenerateName => "degenerate_name",
        }
    }
}

#[derive(Debug, Error)]
pub enum SidematterError {
    #[error("Destination parent directory does not exist: {0}")]
    ParentMissing(PathBuf),

    #[error("Cannot read {format} metadata '{path}': {source}")]
    MetaUnreadable {
        path: PathBuf,
        format: MetadataFormat,
        #[source]
        source: io::Error,
    },

    #[error("Invalid {format} metadata in '{path}': {message}")]
    Decode {
        path: PathBuf,
        format: MetadataFormat,
        message: String,
    },

    #[error("{}", describe_io_error(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),

    #[error("Primary path '{path}' ends with reserved sidecar suffix '{suffix}'")]
    ReservedSuffix { path: PathBuf, suffix: &'static str },

    #[error("Invalid asset name '{0}': must be a relative path without '..'")]
    InvalidAssetName(PathBuf),
}

impl SidematterError {
    /// Returns a closure suitable for `.map_err(...)` that wraps an io::Error
    /// with the failed operation and the path it touched.
    pub fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| SidematterError::Io { op, path, source }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            SidematterError::ParentMissing(_) | SidematterError::MetaUnreadable { .. } => {
                ErrorClass::NotFound
            }
            SidematterError::Decode { .. } => ErrorClass::Decode,
            SidematterError::Io { .. } => ErrorClass::Io,
            SidematterError::NoFileName(_)
            | SidematterError::ReservedSuffix { .. }
            | SidematterError::InvalidAssetName(_) => ErrorClass::DegenerateName,
        }
    }

    /// Stable numeric code for logs and exit statuses.
    pub fn code(&self) -> i32 {
        match self {
            SidematterError::ParentMissing(_) => 2,
            SidematterError::MetaUnreadable { .. } => 3,
            SidematterError::Decode { .. } => 4,
            SidematterError::Io { .. } => 5,
            SidematterError::NoFileName(_) => 6,
            SidematterError::ReservedSuffix { .. } => 7,
            SidematterError::InvalidAssetName(_) => 8,
        }
    }

    /// The io::ErrorKind behind this error, when there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SidematterError::ParentMissing(_) => Some(io::ErrorKind::NotFound),
            SidematterError::MetaUnreadable { source, .. } | SidematterError::Io { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
            || self.io_kind() == Some(io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_missing_is_not_found_class() {
        let e = SidematterError::ParentMissing(PathBuf::from("/nope"));
        assert_eq!(e.class(), ErrorClass::NotFound);
        assert!(e.is_not_found());
        assert_eq!(e.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn io_wrapper_keeps_kind_and_path() {
        let wrap = SidematterError::io("copy metadata", "/tmp/x.meta.json");
        let e = wrap(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(e.class(), ErrorClass::Io);
        assert_eq!(e.io_kind(), Some(io::ErrorKind::PermissionDenied));
        let msg = e.to_string();
        assert!(msg.contains("copy metadata"), "msg was: {msg}");
        assert!(msg.contains("/tmp/x.meta.json"), "msg was: {msg}");
    }

    #[test]
    fn codes_are_distinct() {
        let errs = [
            SidematterError::ParentMissing(PathBuf::new()),
            SidematterError::NoFileName(PathBuf::new()),
            SidematterError::InvalidAssetName(PathBuf::new()),
            SidematterError::ReservedSuffix { path: PathBuf::new(), suffix: ".assets" },
        ];
        let mut codes: Vec<i32> = errs.iter().map(|e| e.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }
}
