//! `validate_dataset` / `fmd validate` – run the validator and print the report.

use anyhow::Result;
use fmd_core::config::FmdConfig;
use fmd_core::validate;

use crate::cli::{Outcome, ValidateArgs};

/// Exit 0 when every check passes, 1 otherwise.
pub fn run_validate(cfg: &FmdConfig, args: &ValidateArgs) -> Result<Outcome> {
    let path = args.data.as_ref().unwrap_or(&cfg.dataset_path);
    let report = validate::validate_path(path, &cfg.validation)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    if report.passed() {
        Ok(Outcome::Passed)
    } else {
        eprintln!(
            "{}: validation failed with {} issue(s)",
            path.display(),
            report.violation_count()
        );
        Ok(Outcome::Failed)
    }
}
