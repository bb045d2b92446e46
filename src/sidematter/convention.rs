//! Naming convention: where a primary file's sidecars live.
//!
//! For `dir/name.ext` the candidates are `dir/name.meta.yaml`,
//! `dir/name.meta.json` and `dir/name.assets/`. Everything here is pure;
//! nothing touches the filesystem.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SidematterError};

use super::format::MetadataFormat;

pub const META_YAML_SUFFIX: &str = ".meta.yaml";
pub const META_JSON_SUFFIX: &str = ".meta.json";
pub const ASSETS_SUFFIX: &str = ".assets";

/// Suffixes a primary file name may not end with.
pub const RESERVED_SUFFIXES: [&str; 3] = [META_YAML_SUFFIX, META_JSON_SUFFIX, ASSETS_SUFFIX];

/// Candidate sidecar locations for one primary path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarPaths {
    pub meta_yaml: PathBuf,
    pub meta_json: PathBuf,
    pub assets_dir: PathBuf,
}

impl SidecarPaths {
    pub fn meta(&self, format: MetadataFormat) -> &Path {
        match format {
            MetadataFormat::Yaml => &self.meta_yaml,
            MetadataFormat::Json => &self.meta_json,
        }
    }
}

/// Compute the candidate sidecar paths for `primary`. Total: a path without a
/// file name yields candidates built from an empty stem (callers that care
/// run `check_primary_name` first).
pub fn candidates(primary: &Path) -> SidecarPaths {
    let dir = primary.parent().unwrap_or_else(|| Path::new(""));
    let stem = primary.file_stem().unwrap_or_default();
    SidecarPaths {
        meta_yaml: sibling(dir, stem, META_YAML_SUFFIX),
        meta_json: sibling(dir, stem, META_JSON_SUFFIX),
        assets_dir: sibling(dir, stem, ASSETS_SUFFIX),
    }
}

fn sibling(dir: &Path, stem: &OsStr, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem);
    name.push(suffix);
    dir.join(name)
}

/// Reject primaries that cannot take part in the convention: paths with no
/// file name, and names that already look like a sidecar.
pub fn check_primary_name(primary: &Path) -> Result<()> {
    let name = primary
        .file_name()
        .ok_or_else(|| SidematterError::NoFileName(primary.to_path_buf()))?;
    let name = name.to_string_lossy();
    if let Some(suffix) = RESERVED_SUFFIXES.into_iter().find(|s| name.ends_with(s)) {
        return Err(SidematterError::ReservedSuffix {
            path: primary.to_path_buf(),
            suffix,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorClass;

    #[test]
    fn candidates_use_stem_and_parent() {
        let c = candidates(Path::new("notes/doc.md"));
        assert_eq!(c.meta_yaml, PathBuf::from("notes/doc.meta.yaml"));
        assert_eq!(c.meta_json, PathBuf::from("notes/doc.meta.json"));
        assert_eq!(c.assets_dir, PathBuf::from("notes/doc.assets"));
        assert_eq!(c.meta(MetadataFormat::Json), Path::new("notes/doc.meta.json"));
    }

    #[test]
    fn only_final_extension_is_dropped() {
        let c = candidates(Path::new("/data/archive.tar.gz"));
        assert_eq!(c.meta_yaml, PathBuf::from("/data/archive.tar.meta.yaml"));
    }

    #[test]
    fn bare_file_name_stays_relative() {
        let c = candidates(Path::new("README"));
        assert_eq!(c.assets_dir, PathBuf::from("README.assets"));
    }

    #[test]
    fn reserved_suffixes_are_rejected() {
        for name in ["doc.meta.yaml", "doc.meta.json", "doc.assets", ".assets"] {
            let err = check_primary_name(Path::new(name)).unwrap_err();
            assert_eq!(err.class(), ErrorClass::DegenerateName, "{name}");
        }
        check_primary_name(Path::new("doc.assets.md")).unwrap();
        check_primary_name(Path::new("dir/doc.md")).unwrap();
    }

    #[test]
    fn missing_file_name_is_rejected() {
        assert!(matches!(
            check_primary_name(Path::new("/")),
            Err(SidematterError::NoFileName(_))
        ));
        assert!(check_primary_name(Path::new("a/..")).is_err());
    }
}
