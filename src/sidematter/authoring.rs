//! Writing sidecars: metadata documents and asset files.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::{Result, SidematterError};
use crate::fs_ops::{self, CopyOptions};

use super::convention::{candidates, check_primary_name};
use super::format::{Mapping, MetadataFormat};
use super::resolution::Resolution;
use super::resolve::resolve;

/// Read and decode the metadata of `primary`, if any.
pub fn read_meta(primary: impl AsRef<Path>) -> Result<Option<Mapping>> {
    Ok(resolve(primary, true)?.parsed_meta().cloned())
}

/// Atomically write `meta` as the metadata document of `primary`.
///
/// The other encoding's file is removed afterwards so a bundle never carries
/// two metadata documents. Returns the written path.
pub fn write_meta(
    primary: impl AsRef<Path>,
    meta: &Mapping,
    format: MetadataFormat,
) -> Result<PathBuf> {
    let primary = primary.as_ref();
    check_primary_name(primary)?;
    let cands = candidates(primary);
    let path = cands.meta(format).to_path_buf();

    let text = format
        .encode(meta)
        .map_err(|message| SidematterError::Decode {
            path: path.clone(),
            format,
            message,
        })?;
    fs_ops::write_atomic(&path, text.as_bytes(), true)
        .map_err(SidematterError::io("write metadata", &path))?;

    let stale = cands.meta(format.other());
    if fs_ops::remove_file_if_exists(stale).map_err(SidematterError::io("remove stale metadata", stale))? {
        debug!(path = %stale.display(), "removed metadata in the other format");
    }

    info!(path = %path.display(), %format, keys = meta.len(), "wrote metadata");
    Ok(path)
}

/// Copy `file` into the assets directory of `primary` as `name`.
///
/// `name` may contain subdirectories but must stay inside the assets
/// directory. Returns the asset's new path.
pub fn add_asset(
    primary: impl AsRef<Path>,
    file: impl AsRef<Path>,
    name: impl AsRef<Path>,
) -> Result<PathBuf> {
    let primary = primary.as_ref();
    let name = name.as_ref();
    check_primary_name(primary)?;

    let is_plain = name.components().next().is_some()
        && name.components().all(|c| matches!(c, Component::Normal(_)));
    if !is_plain {
        return Err(SidematterError::InvalidAssetName(name.to_path_buf()));
    }

    let dest = candidates(primary).assets_dir.join(name);
    let opts = CopyOptions {
        make_parents: true,
        preserve_metadata: false,
    };
    fs_ops::copy_file_atomic(file.as_ref(), &dest, opts)
        .map_err(SidematterError::io("add asset", &dest))?;
    debug!(asset = %dest.display(), "added asset");
    Ok(dest)
}

/// Files under the assets directory, relative to it and sorted. Empty when
/// the bundle has no assets.
pub fn list_assets(resolution: &Resolution) -> Result<Vec<PathBuf>> {
    let Some(root) = resolution.assets_dir() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| SidematterError::Io {
            op: "list assets",
            path: root.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file()
            && let Ok(rel) = entry.path().strip_prefix(root)
        {
            out.push(rel.to_path_buf());
        }
    }
    Ok(out)
}
