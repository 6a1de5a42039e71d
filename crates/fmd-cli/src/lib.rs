//! Command-line front end shared by the `fmd`, `validate_dataset` and
//! `make_checksums` executables.

pub mod cli;

use anyhow::Result;
use fmd_core::logging;
use std::process::ExitCode;

/// Initialize logging, run `run`, and turn an error into exit status 1.
pub fn run_main(name: &str, run: impl FnOnce() -> Result<ExitCode>) -> ExitCode {
    if let Err(err) = logging::init_logging(name) {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable ({err:#}); logging to stderr");
    }

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{name} error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
