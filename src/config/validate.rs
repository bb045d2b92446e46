//! Config validation logic.

use anyhow::{bail, Result};
use tracing::debug;

use super::paths::path_has_symlink_ancestor;
use super::types::Config;

impl Config {
    /// Check settings that can only be judged against the file system.
    pub fn validate(&self) -> Result<()> {
        if let Some(log) = &self.log_file {
            if log.is_dir() {
                bail!("log_file '{}' is a directory", log.display());
            }
            if path_has_symlink_ancestor(log)? {
                bail!(
                    "Refusing to log to '{}': an ancestor directory is a symlink",
                    log.display()
                );
            }
        }
        debug!(
            precedence = %self.precedence,
            removal = self.removal.as_str(),
            make_parents = self.make_parents,
            "config validated"
        );
        Ok(())
    }
}
