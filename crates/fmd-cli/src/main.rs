use fmd_cli::cli::CliCommand;
use std::process::ExitCode;

fn main() -> ExitCode {
    fmd_cli::run_main("fmd", CliCommand::run_from_args)
}
