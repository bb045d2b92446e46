//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::bundle::{RemovalPolicy, TransferOptions};
use crate::sidematter::{MetaPrecedence, Resolver};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the command-line front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Which metadata format wins when both exist
    pub precedence: MetaPrecedence,
    /// Create missing destination directories on cp/mv
    pub make_parents: bool,
    /// How rm treats asset removal failures
    pub removal: RemovalPolicy,
    /// Preserve permissions and timestamps on copy
    pub preserve_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            precedence: MetaPrecedence::default(),
            make_parents: true,
            removal: RemovalPolicy::default(),
            preserve_metadata: false,
        }
    }
}

impl Config {
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.precedence)
    }

    /// Transfer options seeded from config; per-component toggles start enabled.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            make_parents: self.make_parents,
            preserve_metadata: self.preserve_metadata,
            ..TransferOptions::default()
        }
    }
}
