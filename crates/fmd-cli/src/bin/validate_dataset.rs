use fmd_cli::cli::ValidateDatasetCli;
use std::process::ExitCode;

fn main() -> ExitCode {
    fmd_cli::run_main("validate_dataset", ValidateDatasetCli::run_from_args)
}
