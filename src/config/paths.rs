//! Default path helpers and symlink checks.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SIDEMATTER_CONFIG";

/// The config file to use: `$SIDEMATTER_CONFIG` when set and non-empty,
/// else the OS config dir (`.../sidematter/config.xml`).
pub fn config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    if let Some(base) = config_dir() {
        return Some(base.join("sidematter").join("config.xml"));
    }
    env::var_os("HOME").map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("sidematter")
            .join("config.xml")
    })
}

/// Suggested log file location (OS data dir). Nothing is created.
pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|base| base.join("sidematter").join("sidematter.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if !anc.as_os_str().is_empty() && anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_directories_are_not_symlinks() {
        let td = tempdir().unwrap();
        let p = td.path().join("a/b/config.xml");
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        assert!(!path_has_symlink_ancestor(&p).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_ancestor_is_detected() {
        let td = tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir_all(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("config.xml")).unwrap());
    }
}
