//! Derive a destination bundle layout from a resolved source.

use std::path::Path;

use super::convention::candidates;
use super::resolution::Resolution;

impl Resolution {
    /// The same bundle shape, re-rooted at `new_primary`.
    ///
    /// Sidecar paths are recomputed from `new_primary`; which sidecars are
    /// present comes from `self`, never from probing the destination.
    pub fn renamed_as(&self, new_primary: impl AsRef<Path>) -> Resolution {
        let new_primary = new_primary.as_ref();
        let cands = candidates(new_primary);

        let meta = self
            .meta_parts()
            .map(|(_, format)| (cands.meta(*format).to_path_buf(), *format));
        let assets_dir = self.assets_dir().map(|_| cands.assets_dir);

        Resolution::new(
            new_primary.to_path_buf(),
            meta,
            self.parsed_meta().cloned(),
            assets_dir,
        )
    }
}
