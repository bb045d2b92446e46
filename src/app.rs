//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches the subcommand.

use anyhow::{Context, Result};
use sidematter::cli::{Args, Command, TransferArgs};
use sidematter::output as out;
use sidematter::{
    config_path, create_template_config, load_config, BundleOps, Config, LocalFs, RemovalPolicy,
    SidematterError, CONFIG_ENV,
};
use std::path::Path;
use tracing::{debug, error, info};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config handling happens before logging init, like a plain query.
    if let Command::Config { init } = args.command {
        return config_command(init);
    }

    let (mut cfg, cfg_source) = load_config().map_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
        e
    })?;
    args.apply_overrides(&mut cfg);
    cfg.validate()?;

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(
        config = ?cfg_source.as_ref().map(|p| p.display().to_string()),
        "Starting sidematter: {:?}",
        args.command
    );

    let result = dispatch(&args.command, &cfg);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Flush the file appender before exit.
    drop(guard);
    result
}

fn dispatch(command: &Command, cfg: &Config) -> Result<()> {
    let ops = BundleOps::new(LocalFs, cfg.resolver());
    match command {
        Command::Resolve { path, parse } => {
            let res = cfg.resolver().resolve(path, *parse)?;
            out::print_paths(&res);
            if let Some(meta) = res.parsed_meta() {
                out::print_user(&serde_json::to_string_pretty(meta)?);
            }
            Ok(())
        }
        Command::Copy(t) => transfer(&ops, t, cfg, false),
        Command::Move(t) => transfer(&ops, t, cfg, true),
        Command::Remove {
            paths,
            strict,
            dry_run,
        } => {
            let policy = if *strict { RemovalPolicy::Strict } else { cfg.removal };
            for path in paths {
                remove(&ops, path, policy, *dry_run)?;
            }
            Ok(())
        }
        Command::Config { init } => config_command(*init),
    }
}

fn transfer(ops: &BundleOps<LocalFs>, t: &TransferArgs, cfg: &Config, is_move: bool) -> Result<()> {
    let opts = t.options(cfg);
    let (verb, done) = if is_move { ("move", "Move") } else { ("copy", "Copy") };

    if t.dry_run {
        let plan = ops.plan_transfer(&t.src, &t.dest, &opts)?;
        out::print_plan(&format!("would {verb}"), &plan);
        return Ok(());
    }

    let dest = if is_move {
        ops.move_bundle(&t.src, &t.dest, &opts)
    } else {
        ops.copy_bundle(&t.src, &t.dest, &opts)
    }
    .with_context(|| format!("{verb} '{}' -> '{}'", t.src.display(), t.dest.display()))?;

    out::print_paths(&dest);
    info!(source = %t.src.display(), dest = %t.dest.display(), parts = dest.path_list().len(), "{done} completed");
    Ok(())
}

fn remove(ops: &BundleOps<LocalFs>, path: &Path, policy: RemovalPolicy, dry_run: bool) -> Result<()> {
    let primary_exists = path.exists();
    let res = if dry_run {
        ops.plan_removal(path)?
    } else {
        ops.remove_bundle(path, policy)
            .with_context(|| format!("remove '{}'", path.display()))?
    };

    if let Some(meta) = res.meta_path() {
        out::print_removal(dry_run, meta);
    }
    if let Some(assets) = res.assets_dir() {
        out::print_removal(dry_run, assets);
    }
    if primary_exists {
        out::print_removal(dry_run, path);
    }
    Ok(())
}

fn config_command(init: bool) -> Result<()> {
    let Some(path) = config_path() else {
        out::print_error("Could not determine a config location; set SIDEMATTER_CONFIG");
        anyhow::bail!("no config location");
    };

    if init {
        create_template_config(&path)?;
        out::print_success(&format!("Wrote template config to {}", path.display()));
        return Ok(());
    }

    out::print_user(&path.display().to_string());
    if std::env::var_os(CONFIG_ENV).is_some() {
        out::print_info(&format!("Location set by {CONFIG_ENV}"));
    }
    if !path.exists() {
        out::print_info("No config file there yet; defaults apply. Run `sidematter config --init` to create one.");
    }
    Ok(())
}

/// Log a failure with stable code/kind fields when it is a typed error.
fn log_failure(e: &anyhow::Error) {
    let Some(se) = e.downcast_ref::<SidematterError>() else {
        error!(error = %format!("{e:#}"), "Command failed");
        return;
    };
    let code = se.code();
    let kind = se.class().as_str();
    match se {
        SidematterError::ParentMissing(dir) => {
            error!(code, kind, dir = %dir.display(), "Destination parent directory is missing")
        }
        SidematterError::MetaUnreadable { path, format, .. } => {
            error!(code, kind, path = %path.display(), %format, "Metadata could not be read")
        }
        SidematterError::Decode { path, format, message } => {
            error!(code, kind, path = %path.display(), %format, %message, "Metadata is malformed")
        }
        SidematterError::Io { op, path, source } => {
            error!(code, kind, op = *op, path = %path.display(), io_kind = ?source.kind(), "I/O failed")
        }
        SidematterError::NoFileName(path) => {
            error!(code, kind, path = %path.display(), "Path has no file name")
        }
        SidematterError::ReservedSuffix { path, suffix } => {
            error!(code, kind, path = %path.display(), suffix = *suffix, "Path ends with a sidecar suffix")
        }
        SidematterError::InvalidAssetName(name) => {
            error!(code, kind, name = %name.display(), "Invalid asset name")
        }
    }
}
