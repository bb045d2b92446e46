//! Immutable snapshot of a primary file and the sidecars found for it.

use std::path::{Path, PathBuf};

use super::format::{Mapping, MetadataFormat};

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    primary: PathBuf,
    meta: Option<(PathBuf, MetadataFormat)>,
    parsed_meta: Option<Mapping>,
    assets_dir: Option<PathBuf>,
}

impl Resolution {
    pub(crate) fn new(
        primary: PathBuf,
        meta: Option<(PathBuf, MetadataFormat)>,
        parsed_meta: Option<Mapping>,
        assets_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            primary,
            meta,
            parsed_meta,
            assets_dir,
        }
    }

    /// The primary path, exactly as given.
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn meta_path(&self) -> Option<&Path> {
        self.meta.as_ref().map(|(p, _)| p.as_path())
    }

    pub fn meta_format(&self) -> Option<MetadataFormat> {
        self.meta.as_ref().map(|(_, f)| *f)
    }

    /// Decoded metadata; only present when parsing was requested.
    pub fn parsed_meta(&self) -> Option<&Mapping> {
        self.parsed_meta.as_ref()
    }

    pub fn assets_dir(&self) -> Option<&Path> {
        self.assets_dir.as_deref()
    }

    /// Every present path in fixed order: primary, metadata, assets.
    pub fn path_list(&self) -> Vec<&Path> {
        std::iter::once(self.primary())
            .chain(self.meta_path())
            .chain(self.assets_dir())
            .collect()
    }

    pub fn has_sidecars(&self) -> bool {
        self.meta.is_some() || self.assets_dir.is_some()
    }

    pub(crate) fn meta_parts(&self) -> Option<&(PathBuf, MetadataFormat)> {
        self.meta.as_ref()
    }

    pub(crate) fn without_meta(mut self) -> Self {
        self.meta = None;
        self.parsed_meta = None;
        self
    }

    pub(crate) fn without_assets(mut self) -> Self {
        self.assets_dir = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_list_order_and_length() {
        let r = Resolution::new(
            PathBuf::from("d/a.md"),
            Some((PathBuf::from("d/a.meta.json"), MetadataFormat::Json)),
            None,
            Some(PathBuf::from("d/a.assets")),
        );
        assert_eq!(
            r.path_list(),
            vec![Path::new("d/a.md"), Path::new("d/a.meta.json"), Path::new("d/a.assets")]
        );

        let r = r.without_meta();
        assert_eq!(r.path_list().len(), 2);
        assert!(r.meta_format().is_none());

        let r = r.without_assets();
        assert_eq!(r.path_list(), vec![Path::new("d/a.md")]);
        assert!(!r.has_sidecars());
    }
}
