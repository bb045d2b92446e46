//! Whole-bundle operations: copy, move and remove a primary file together
//! with its metadata and assets.
//!
//! Components run in a fixed order (metadata, assets, primary). Operations
//! are not transactional: an error stops the remaining steps and leaves what
//! was already transferred in place.

mod io;
mod plan;

pub use io::{BundleIo, LocalFs};
pub use plan::{Component, RemovalPolicy, TransferOptions, TransferPlan, TransferStep};

use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{Result, SidematterError};
use crate::fs_ops::parent_dir;
use crate::sidematter::{check_primary_name, Resolution, Resolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Copy,
    Move,
}

impl Mode {
    fn verb(self) -> &'static str {
        match self {
            Mode::Copy => "copied",
            Mode::Move => "moved",
        }
    }
}

/// Bundle operations over a chosen I/O backend and resolver.
#[derive(Debug, Clone, Default)]
pub struct BundleOps<I = LocalFs> {
    io: I,
    resolver: Resolver,
}

impl<I: BundleIo> BundleOps<I> {
    pub fn new(io: I, resolver: Resolver) -> Self {
        Self { io, resolver }
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    /// Resolve `src` and work out the steps of a transfer to `dest`.
    pub fn plan_transfer(
        &self,
        src: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        opts: &TransferOptions,
    ) -> Result<TransferPlan> {
        let (src, dest) = (src.as_ref(), dest.as_ref());
        check_primary_name(src)?;
        check_primary_name(dest)?;

        let source = self.resolver.resolve(src, false)?;
        let plan = TransferPlan::build(source, dest.to_path_buf(), opts);
        debug!(
            src = %src.display(),
            dest = %dest.display(),
            steps = plan.steps.len(),
            "planned bundle transfer"
        );
        Ok(plan)
    }

    /// Copy the bundle at `src` to `dest`. Returns the destination bundle.
    pub fn copy_bundle(
        &self,
        src: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        opts: &TransferOptions,
    ) -> Result<Resolution> {
        let plan = self.plan_transfer(src, dest, opts)?;
        self.execute(plan, Mode::Copy, opts)
    }

    /// Move the bundle at `src` to `dest`. Returns the destination bundle.
    pub fn move_bundle(
        &self,
        src: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        opts: &TransferOptions,
    ) -> Result<Resolution> {
        let plan = self.plan_transfer(src, dest, opts)?;
        self.prepare_parent(plan.destination.primary(), opts.make_parents)?;
        self.execute(plan, Mode::Move, opts)
    }

    /// What `remove_bundle` would delete, without deleting anything.
    pub fn plan_removal(&self, path: impl AsRef<Path>) -> Result<Resolution> {
        self.resolver.resolve(path, false)
    }

    /// Delete the bundle at `path`. Missing pieces are not an error.
    /// Returns what was resolved before deletion.
    pub fn remove_bundle(&self, path: impl AsRef<Path>, policy: RemovalPolicy) -> Result<Resolution> {
        let path = path.as_ref();
        let res = self.resolver.resolve(path, false)?;
        let mut removed = 0usize;

        if let Some(meta) = res.meta_path()
            && self
                .io
                .remove_file(meta)
                .map_err(SidematterError::io("remove metadata", meta))?
        {
            removed += 1;
            debug!(path = %meta.display(), "removed metadata");
        }

        if let Some(assets) = res.assets_dir() {
            match self.io.remove_dir(assets) {
                Ok(true) => {
                    removed += 1;
                    debug!(path = %assets.display(), "removed assets");
                }
                Ok(false) => {}
                Err(e) if policy == RemovalPolicy::BestEffort => {
                    warn!(path = %assets.display(), error = %e, "failed to remove assets; continuing");
                }
                Err(e) => return Err(SidematterError::io("remove assets", assets)(e)),
            }
        }

        if self
            .io
            .remove_file(path)
            .map_err(SidematterError::io("remove primary", path))?
        {
            removed += 1;
            debug!(path = %path.display(), "removed primary");
        }

        info!(path = %path.display(), removed, "removed bundle");
        Ok(res)
    }

    fn execute(&self, plan: TransferPlan, mode: Mode, opts: &TransferOptions) -> Result<Resolution> {
        for step in &plan.steps {
            if self.io.same_entry(&step.from, &step.to) {
                debug!(component = %step.component, path = %step.from.display(), "already in place");
                continue;
            }
            if mode == Mode::Copy {
                self.prepare_parent(&step.to, opts.make_parents)?;
            }
            self.transfer(step, mode, opts.preserve_metadata)?;
            info!(
                component = %step.component,
                from = %step.from.display(),
                to = %step.to.display(),
                "{}",
                mode.verb()
            );
        }
        Ok(plan.destination)
    }

    fn transfer(&self, step: &TransferStep, mode: Mode, preserve: bool) -> Result<()> {
        let (from, to) = (step.from.as_path(), step.to.as_path());
        let dir = step.component == Component::Assets;
        let (op, res) = match (mode, dir) {
            (Mode::Copy, false) => ("copy file", self.io.copy_file(from, to, preserve)),
            (Mode::Copy, true) => ("copy directory", self.io.copy_dir(from, to, preserve)),
            (Mode::Move, false) => ("move file", self.io.move_file(from, to)),
            (Mode::Move, true) => ("move directory", self.io.move_dir(from, to)),
        };
        res.map_err(SidematterError::io(op, from))
    }

    fn prepare_parent(&self, path: &Path, make_parents: bool) -> Result<()> {
        let parent = parent_dir(path);
        if self.io.dir_exists(parent) {
            return Ok(());
        }
        if !make_parents {
            return Err(SidematterError::ParentMissing(parent.to_path_buf()));
        }
        self.io
            .create_dir_all(parent)
            .map_err(SidematterError::io("create directory", parent))?;
        debug!(dir = %parent.display(), "created destination directory");
        Ok(())
    }
}

/// `BundleOps::plan_transfer` with the local file system and default resolver.
pub fn plan_transfer(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    opts: &TransferOptions,
) -> Result<TransferPlan> {
    BundleOps::<LocalFs>::default().plan_transfer(src, dest, opts)
}

/// Copy a bundle on the local file system.
pub fn copy_bundle(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    opts: &TransferOptions,
) -> Result<Resolution> {
    BundleOps::<LocalFs>::default().copy_bundle(src, dest, opts)
}

/// Move a bundle on the local file system.
pub fn move_bundle(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    opts: &TransferOptions,
) -> Result<Resolution> {
    BundleOps::<LocalFs>::default().move_bundle(src, dest, opts)
}

/// Remove a bundle from the local file system.
pub fn remove_bundle(path: impl AsRef<Path>, policy: RemovalPolicy) -> Result<Resolution> {
    BundleOps::<LocalFs>::default().remove_bundle(path, policy)
}
