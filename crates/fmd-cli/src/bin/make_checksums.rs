use fmd_cli::cli::MakeChecksumsCli;
use std::process::ExitCode;

fn main() -> ExitCode {
    fmd_cli::run_main("make_checksums", MakeChecksumsCli::run_from_args)
}
