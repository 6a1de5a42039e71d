//! CLI for the dataset tools.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use fmd_core::config::{self, FmdConfig};
use std::path::PathBuf;
use std::process::ExitCode;

pub use commands::{run_checksums, run_checksums_in, run_completions, run_validate};

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Options shared by every entry point.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: ./fmd.toml, then ~/.config/fmd/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<FmdConfig> {
        let cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ValidateArgs {
    /// Dataset CSV to validate (overrides config).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ChecksumArgs {
    /// Verify the checksum store instead of writing it.
    #[arg(long)]
    pub check: bool,
    /// Directory whose files are tracked (overrides config).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Checksum store file (overrides config).
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

/// Top-level CLI for the football match dataset tools.
#[derive(Debug, Parser)]
#[command(name = "fmd")]
#[command(about = "Validate and checksum the football match results dataset", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check schema, types, match_id uniqueness, derived fields and team/score sanity.
    Validate(ValidateArgs),

    /// Write the checksum store, or verify it with --check.
    Checksums(ChecksumArgs),

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        Cli::parse().run()
    }
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        match self.command {
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Validate(args) => {
                run_validate(&self.global.load_config()?, &args).map(ExitCode::from)
            }
            CliCommand::Checksums(args) => {
                run_checksums(&self.global.load_config()?, &args).map(ExitCode::from)
            }
        }
    }
}

/// `validate_dataset`: the validator as its own executable.
#[derive(Debug, Parser)]
#[command(name = "validate_dataset")]
#[command(about = "Validate the football match results dataset", long_about = None)]
pub struct ValidateDatasetCli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(flatten)]
    pub args: ValidateArgs,
}

impl ValidateDatasetCli {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Self::parse();
        run_validate(&cli.global.load_config()?, &cli.args).map(ExitCode::from)
    }
}

/// `make_checksums`: write or verify the checksum store.
#[derive(Debug, Parser)]
#[command(name = "make_checksums")]
#[command(about = "Write checksums.sha256 for the data files, or verify it with --check", long_about = None)]
pub struct MakeChecksumsCli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(flatten)]
    pub args: ChecksumArgs,
}

impl MakeChecksumsCli {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Self::parse();
        run_checksums(&cli.global.load_config()?, &cli.args).map(ExitCode::from)
    }
}

#[cfg(test)]
mod tests;
