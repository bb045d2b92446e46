//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Unknown elements and invalid values are hard errors so misconfigurations
//! surface early instead of being silently ignored.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};

use crate::bundle::RemovalPolicy;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};
use crate::sidematter::MetaPrecedence;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default)]
    precedence: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    make_parents: Option<bool>,
    #[serde(default)]
    removal: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_metadata: Option<bool>,
}

// quick_xml hands over element text verbatim; accept surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!("invalid boolean: '{s}'"))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config; absent fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(s) = non_empty(parsed.precedence.as_deref()) {
        cfg.precedence = s.parse::<MetaPrecedence>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.removal.as_deref()) {
        cfg.removal = RemovalPolicy::parse(s)
            .ok_or_else(|| anyhow!("invalid removal policy: '{s}' (expected best_effort or strict)"))?;
    }
    if let Some(b) = parsed.make_parents {
        cfg.make_parents = b;
    }
    if let Some(b) = parsed.preserve_metadata {
        cfg.preserve_metadata = b;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = if contents.trim().is_empty() {
        XmlConfig::default()
    } else {
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?
    };
    xml_to_config(parsed).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Load the active config. A missing file yields defaults.
/// Returns the config and the file it came from, if any.
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    let Some(path) = config_path() else {
        debug!("no config location available; using defaults");
        return Ok((Config::default(), None));
    };
    if !path.exists() {
        debug!(path = %path.display(), "config file not found; using defaults");
        return Ok((Config::default(), None));
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok((cfg, Some(path)))
}

/// Create a commented template config at `path` (mode 0600 on Unix).
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/sidematter.log".into());

    let content = format!(
        "<!--\n  sidematter configuration (XML)\n\n  log_level          -> quiet | normal | info | debug\n  log_file           -> optional log file, e.g. {suggested_log}\n  precedence         -> yaml | json (metadata format that wins when both exist)\n  make_parents       -> true | false (create destination directories on cp/mv)\n  removal            -> best_effort | strict (how rm treats asset removal failures)\n  preserve_metadata  -> true | false (copy permissions + timestamps)\n\n  CLI flags override these values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <precedence>yaml</precedence>\n  <make_parents>true</make_parents>\n  <removal>best_effort</removal>\n  <preserve_metadata>false</preserve_metadata>\n</config>\n"
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_round_trips_to_defaults() {
        let td = tempdir().unwrap();
        let path = td.path().join("sidematter/config.xml");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(create_template_config(&path).is_err());
    }

    #[test]
    fn values_are_trimmed() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config>\n  <precedence> json </precedence>\n  <make_parents> false </make_parents>\n  <removal>strict</removal>\n</config>",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.precedence, MetaPrecedence::JsonFirst);
        assert!(!cfg.make_parents);
        assert_eq!(cfg.removal, RemovalPolicy::Strict);
    }
}
