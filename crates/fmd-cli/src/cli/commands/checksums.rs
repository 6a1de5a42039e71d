//! `make_checksums` / `fmd checksums` – write or verify the checksum store.

use anyhow::Result;
use fmd_core::checksum::{self, ChecksumError};
use fmd_core::config::FmdConfig;
use std::path::Path;

use crate::cli::{ChecksumArgs, Outcome};

/// Run against the current directory; store keys are relative to it.
pub fn run_checksums(cfg: &FmdConfig, args: &ChecksumArgs) -> Result<Outcome> {
    let root = std::env::current_dir()?;
    run_checksums_in(&root, cfg, args)
}

/// Run with store keys relative to `root`. Relative paths resolve against `root`.
pub fn run_checksums_in(root: &Path, cfg: &FmdConfig, args: &ChecksumArgs) -> Result<Outcome> {
    let data_dir = args.data_dir.as_ref().unwrap_or(&cfg.data_dir);
    let store = root.join(args.store.as_ref().unwrap_or(&cfg.checksum_file));
    let files = checksum::tracked_files(root, data_dir, &store)?;

    let outcome = if args.check {
        checksum::check(&store, &files).map(|n| {
            println!("{} matches current data files ({n} checked)", store.display());
        })
    } else {
        checksum::generate(&store, &files).map(|s| {
            println!(
                "Wrote {} with {} entries ({} hashed, {} changed)",
                store.display(),
                s.total,
                s.hashed,
                s.changed
            );
        })
    };

    match outcome {
        Ok(()) => Ok(Outcome::Passed),
        Err(ChecksumError::Other(err)) => Err(err),
        Err(ChecksumError::NoTrackedFiles) => {
            eprintln!("No data files found under {}", root.join(data_dir).display());
            Ok(Outcome::Failed)
        }
        Err(err) => {
            eprintln!("{}: {err}", err.name());
            eprintln!("{} does not match current data files.", store.display());
            eprintln!("Re-generate with: make_checksums");
            Ok(Outcome::Failed)
        }
    }
}
