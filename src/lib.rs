//! Core library for `sidematter`.
//!
//! A primary file `dir/name.ext` may carry sidecars next to it:
//! `dir/name.meta.yaml` or `dir/name.meta.json` for structured metadata, and
//! `dir/name.assets/` for arbitrary asset files. This crate resolves those
//! sidecars, re-derives them for a new primary path, and copies, moves or
//! removes a primary together with its sidecars.
//!
//! ```no_run
//! use sidematter::prelude::*;
//!
//! # fn main() -> sidematter::Result<()> {
//! let res = resolve("notes/doc.md", true)?;
//! for path in res.path_list() {
//!     println!("{}", path.display());
//! }
//! let copy = copy_bundle("notes/doc.md", "archive/copy.md", &TransferOptions::default())?;
//! assert_eq!(copy.path_list().len(), res.path_list().len());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod sidematter;

pub use bundle::{
    copy_bundle, move_bundle, plan_transfer, remove_bundle, BundleIo, BundleOps, Component,
    LocalFs, RemovalPolicy, TransferOptions, TransferPlan, TransferStep,
};
pub use config::{
    config_path, create_template_config, default_log_path, load_config, path_has_symlink_ancestor,
    Config, LogLevel, CONFIG_ENV,
};
pub use errors::{ErrorClass, Result, SidematterError};
pub use sidematter::{
    add_asset, candidates, check_primary_name, list_assets, read_meta, resolve, write_meta,
    Mapping, MetaPrecedence, MetadataFormat, Resolution, Resolver, SidecarPaths,
};

/// Common imports for library users.
pub mod prelude {
    pub use crate::bundle::{
        copy_bundle, move_bundle, remove_bundle, RemovalPolicy, TransferOptions,
    };
    pub use crate::errors::{Result, SidematterError};
    pub use crate::sidematter::{resolve, MetaPrecedence, MetadataFormat, Resolution, Resolver};
}
