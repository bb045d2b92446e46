//! Probe the filesystem for a primary file's sidecars.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{Result, SidematterError};

use super::convention::{candidates, check_primary_name};
use super::format::MetaPrecedence;
use super::resolution::Resolution;

/// Resolves primary paths into `Resolution` snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    pub precedence: MetaPrecedence,
}

impl Resolver {
    pub fn new(precedence: MetaPrecedence) -> Self {
        Self { precedence }
    }

    /// Find the metadata file and assets directory for `primary`.
    ///
    /// Only sidecars are inspected; the primary itself need not exist.
    /// With `parse_meta`, the selected metadata file is read and decoded by
    /// its own format (never the other one).
    pub fn resolve(&self, primary: impl AsRef<Path>, parse_meta: bool) -> Result<Resolution> {
        let primary = primary.as_ref();
        check_primary_name(primary)?;
        let cands = candidates(primary);

        let meta = self
            .precedence
            .order()
            .into_iter()
            .map(|format| (cands.meta(format), format))
            .find(|(path, _)| path.is_file())
            .map(|(path, format)| (path.to_path_buf(), format));

        let parsed_meta = match (&meta, parse_meta) {
            (Some((path, format)), true) => {
                let bytes = fs::read(path).map_err(|source| SidematterError::MetaUnreadable {
                    path: path.clone(),
                    format: *format,
                    source,
                })?;
                let map = format
                    .decode(&bytes)
                    .map_err(|message| SidematterError::Decode {
                        path: path.clone(),
                        format: *format,
                        message,
                    })?;
                Some(map)
            }
            _ => None,
        };

        let assets_dir = cands.assets_dir.is_dir().then_some(cands.assets_dir);

        debug!(
            primary = %primary.display(),
            meta = ?meta.as_ref().map(|(p, _)| p.display().to_string()),
            assets = ?assets_dir.as_ref().map(|p| p.display().to_string()),
            "resolved sidematter"
        );

        Ok(Resolution::new(
            primary.to_path_buf(),
            meta,
            parsed_meta,
            assets_dir,
        ))
    }
}

/// Resolve with the default resolver (YAML wins over JSON).
pub fn resolve(primary: impl AsRef<Path>, parse_meta: bool) -> Result<Resolution> {
    Resolver::default().resolve(primary, parse_meta)
}
