//! User-facing terminal output.
//! Colors are enabled only when the target stream is a TTY; logs go through
//! `tracing` instead and never share stdout with these lines.

use owo_colors::OwoColorize;
use std::path::Path;

use crate::bundle::TransferPlan;
use crate::sidematter::Resolution;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// Plain line without prefix, for output scripts consume.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// One path per line in `path_list` order.
pub fn print_paths(res: &Resolution) {
    for p in res.path_list() {
        print_user(&p.display().to_string());
    }
}

/// `verb from -> to` per step; the verb is dimmed on a TTY.
pub fn print_plan(verb: &str, plan: &TransferPlan) {
    if plan.is_empty() {
        print_info("nothing to do");
        return;
    }
    for step in &plan.steps {
        let line = format!("{} -> {}", step.from.display(), step.to.display());
        if stdout_tty() {
            println!("{} {} {}", verb.dimmed(), step.component.bold(), line);
        } else {
            println!("{verb} {} {line}", step.component);
        }
    }
}

pub fn print_removal(dry_run: bool, path: &Path) {
    let verb = if dry_run { "would remove" } else { "removed" };
    if stdout_tty() {
        println!("{} {}", verb.dimmed(), path.display());
    } else {
        println!("{verb} {}", path.display());
    }
}
