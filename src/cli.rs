//! CLI definition and parsing.
//!
//! Notes:
//! - Global flags may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug and wins over it.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::bundle::TransferOptions;
use crate::config::types::{Config, LogLevel};
use crate::sidematter::MetaPrecedence;

/// Work with files that keep their metadata and assets beside them.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Resolve, copy, move and remove sidematter bundles")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL", help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Metadata format that wins when both exist.
    #[arg(long, global = true, value_name = "yaml|json")]
    pub precedence: Option<MetaPrecedence>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the paths that make up a bundle.
    Resolve {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// Decode the metadata and print it as JSON.
        #[arg(long)]
        parse: bool,
    },
    /// Copy a bundle.
    #[command(name = "cp")]
    Copy(TransferArgs),
    /// Move a bundle.
    #[command(name = "mv")]
    Move(TransferArgs),
    /// Remove one or more bundles.
    #[command(name = "rm")]
    Remove {
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        paths: Vec<PathBuf>,
        /// Fail when the assets directory cannot be removed.
        #[arg(long)]
        strict: bool,
        /// Show what would be removed without touching anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the config file location, or create a template there.
    Config {
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct TransferArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    pub src: PathBuf,
    #[arg(value_hint = ValueHint::FilePath)]
    pub dest: PathBuf,
    /// Fail instead of creating missing destination directories.
    #[arg(long)]
    pub no_parents: bool,
    #[arg(long)]
    pub no_primary: bool,
    #[arg(long)]
    pub no_metadata: bool,
    #[arg(long)]
    pub no_assets: bool,
    /// Preserve permissions and timestamps on copy.
    #[arg(long)]
    pub preserve_metadata: bool,
    /// Show the planned steps without touching anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl TransferArgs {
    /// Transfer options: config values first, then these flags.
    pub fn options(&self, cfg: &Config) -> TransferOptions {
        let mut opts = cfg.transfer_options();
        if self.no_parents {
            opts.make_parents = false;
        }
        if self.preserve_metadata {
            opts.preserve_metadata = true;
        }
        opts.primary = !self.no_primary;
        opts.metadata = !self.no_metadata;
        opts.assets = !self.no_assets;
        opts
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Some(p) = self.precedence {
            cfg.precedence = p;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
