//! Metadata encodings and the precedence between them.
//!
//! Decoding dispatches on the closed `MetadataFormat` enum; both decoders
//! produce the same `Mapping` (a JSON object) so callers never care which
//! encoding was on disk.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::convention::{META_JSON_SUFFIX, META_YAML_SUFFIX};

/// Decoded metadata: string keys to arbitrary values.
pub type Mapping = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataFormat {
    Yaml,
    Json,
}

impl MetadataFormat {
    /// File-name suffix appended to the primary stem.
    pub fn suffix(self) -> &'static str {
        match self {
            MetadataFormat::Yaml => META_YAML_SUFFIX,
            MetadataFormat::Json => META_JSON_SUFFIX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataFormat::Yaml => "yaml",
            MetadataFormat::Json => "json",
        }
    }

    /// Case-insensitive; accepts `yml` as an alias for YAML.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(MetadataFormat::Yaml),
            "json" => Some(MetadataFormat::Json),
            _ => None,
        }
    }

    /// The format that is not `self`.
    pub fn other(self) -> Self {
        match self {
            MetadataFormat::Yaml => MetadataFormat::Json,
            MetadataFormat::Json => MetadataFormat::Yaml,
        }
    }

    /// Decode a metadata document. The top level must be a mapping; an empty
    /// YAML document counts as an empty mapping.
    pub fn decode(self, bytes: &[u8]) -> Result<Mapping, String> {
        let value = match self {
            MetadataFormat::Yaml => {
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Mapping::new());
                }
                let yaml: serde_yaml::Value =
                    serde_yaml::from_slice(bytes).map_err(|e| e.to_string())?;
                if yaml.is_null() {
                    return Ok(Mapping::new());
                }
                serde_json::to_value(yaml).map_err(|e| e.to_string())?
            }
            MetadataFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string())?,
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(format!(
                "top-level value must be a mapping, found {}",
                value_kind(&other)
            )),
        }
    }

    /// Encode a mapping as a complete document (trailing newline included).
    pub fn encode(self, map: &Mapping) -> Result<String, String> {
        match self {
            MetadataFormat::Yaml => serde_yaml::to_string(map).map_err(|e| e.to_string()),
            MetadataFormat::Json => serde_json::to_string_pretty(map)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetadataFormat::Yaml => "YAML",
            MetadataFormat::Json => "JSON",
        })
    }
}

impl FromStr for MetadataFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid metadata format: '{s}'"))
    }
}

/// Which metadata file wins when both encodings exist for one primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetaPrecedence {
    #[default]
    YamlFirst,
    JsonFirst,
}

impl MetaPrecedence {
    /// Formats in the order they are probed.
    pub fn order(self) -> [MetadataFormat; 2] {
        match self {
            MetaPrecedence::YamlFirst => [MetadataFormat::Yaml, MetadataFormat::Json],
            MetaPrecedence::JsonFirst => [MetadataFormat::Json, MetadataFormat::Yaml],
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        MetadataFormat::parse(s).map(|f| match f {
            MetadataFormat::Yaml => MetaPrecedence::YamlFirst,
            MetadataFormat::Json => MetaPrecedence::JsonFirst,
        })
    }
}

impl fmt::Display for MetaPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.order()[0].as_str())
    }
}

impl FromStr for MetaPrecedence {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid precedence: '{s}' (expected yaml or json)"))
    }
}
