//! The sidematter naming convention and resolution engine.
//!
//! - `convention`: pure mapping from a primary path to candidate sidecar paths.
//! - `resolve`: probe which candidates exist and apply format precedence.
//! - `rename`: re-root a resolved bundle at a new primary path.
//! - `authoring`: write metadata and assets for a primary.

mod authoring;
pub mod convention;
mod format;
mod rename;
mod resolution;
mod resolve;

pub use authoring::{add_asset, list_assets, read_meta, write_meta};
pub use convention::{candidates, check_primary_name, SidecarPaths};
pub use format::{Mapping, MetaPrecedence, MetadataFormat};
pub use resolution::Resolution;
pub use resolve::{resolve, Resolver};
