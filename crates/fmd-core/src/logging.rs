//! Diagnostics for the dataset tools.
//!
//! Every run of `fmd`, `validate_dataset` or `make_checksums` appends to one
//! per-user log, `~/.local/state/fmd/fmd.log`. Reports and verdicts are
//! printed by the CLI and never go through here.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,fmd_core=debug,fmd_cli=debug";

fn filter_from(spec: Option<&str>) -> EnvFilter {
    spec.and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

/// `~/.local/state/fmd/fmd.log`, shared by all three executables.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fmd")?;
    Ok(xdg_dirs.get_state_home().join("fmd").join("fmd.log"))
}

/// Append `tool`'s diagnostics to the shared log file and return its path.
/// Errors leave no subscriber installed; see [`init_logging_stderr`].
pub fn init_logging(tool: &str) -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    let cwd = std::env::current_dir().unwrap_or_default();
    tracing::info!(tool, cwd = %cwd.display(), "run started");
    Ok(path)
}

/// Diagnostics to stderr, for when the log file cannot be opened.
pub fn init_logging_stderr() {
    // Tests may have installed a subscriber already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
