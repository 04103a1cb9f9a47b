//! Application orchestrator.
//! Loads and merges config, initializes logging, installs the Ctrl-C handler and runs
//! the edit session.

use anyhow::{Context, Result, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use edmv::cli::Args;
use edmv::config::CONFIG_ENV;
use edmv::output as out;
use edmv::{CommandEditor, EdmvError, Session, create_template_config, default_config_path, load_config, shutdown};

use crate::logging::init_tracing;

pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        return print_config();
    }
    if args.init_config {
        return init_config();
    }

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("failed to initialize logging: {e}"));
    })?;

    // Dropping the guard flushes the file layer.
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("interrupt received; stopping after the current operation");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!(?args, "starting edmv");

    let result = (|| -> Result<()> {
        if !cfg.root.is_dir() {
            bail!("working directory '{}' is not a directory", cfg.root.display());
        }
        let editor = CommandEditor::from_config(&cfg)?;
        info!(root = %cfg.root.display(), editor = editor.program(), dry_run = cfg.dry_run, "session starting");

        let mut session = Session::new(cfg, editor);
        let reports = session.run()?;
        let applied: usize = reports.iter().map(|r| r.batch.applied()).sum();
        let failed: usize = reports.iter().map(|r| r.batch.failures().count()).sum();
        info!(cycles = reports.len(), applied, failed, "session finished");
        Ok(())
    })();

    if let Err(e) = &result {
        match e.downcast_ref::<EdmvError>() {
            Some(err) => error!(code = err.code(), error = %err, "session aborted"),
            None => error!(error = %format!("{e:#}"), "session aborted"),
        }
    }

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn print_config() -> Result<()> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("using {CONFIG_ENV} (explicit): {explicit}"));
        return Ok(());
    }
    match default_config_path() {
        Some(p) => {
            out::print_user(p.display());
            if !p.exists() {
                out::print_info("no config file there yet; create one with --init-config");
            }
        }
        None => out::print_error("could not determine a config directory for this user"),
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let path = default_config_path().context("could not determine a config directory for this user")?;
    create_template_config(&path)?;
    out::print_success(&format!("wrote a config template to {}", path.display()));
    Ok(())
}
