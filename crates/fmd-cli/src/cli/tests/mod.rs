use super::*;
use clap::CommandFactory;


fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
    ValidateDatasetCli::command().debug_assert();
    MakeChecksumsCli::command().debug_assert();
}

#[test]
fn cli_parse_validate_defaults() {
    match parse(&["fmd", "validate"]).command {
        CliCommand::Validate(args) => {
            assert!(args.data.is_none());
            assert!(!args.json);
        }
        _ => panic!("expected Validate"),
    }
}

#[test]
fn cli_parse_validate_data_and_json() {
    match parse(&["fmd", "validate", "--data", "release/m.csv", "--json"]).command {
        CliCommand::Validate(args) => {
            assert_eq!(args.data, Some(PathBuf::from("release/m.csv")));
            assert!(args.json);
        }
        _ => panic!("expected Validate"),
    }
}

#[test]
fn cli_parse_checksums_generate() {
    match parse(&["fmd", "checksums"]).command {
        CliCommand::Checksums(args) => {
            assert!(!args.check);
            assert!(args.store.is_none());
            assert!(args.data_dir.is_none());
        }
        _ => panic!("expected Checksums"),
    }
}

#[test]
fn cli_parse_checksums_check_with_paths() {
    match parse(&[
        "fmd",
        "checksums",
        "--check",
        "--store",
        "sums.sha256",
        "--data-dir",
        "release",
    ])
    .command
    {
        CliCommand::Checksums(args) => {
            assert!(args.check);
            assert_eq!(args.store, Some(PathBuf::from("sums.sha256")));
            assert_eq!(args.data_dir, Some(PathBuf::from("release")));
        }
        _ => panic!("expected Checksums"),
    }
}

#[test]
fn cli_parse_global_config_either_side() {
    let before = parse(&["fmd", "--config", "a.toml", "validate"]);
    assert_eq!(before.global.config, Some(PathBuf::from("a.toml")));
    let after = parse(&["fmd", "checksums", "--config", "b.toml"]);
    assert_eq!(after.global.config, Some(PathBuf::from("b.toml")));
}

#[test]
fn cli_parse_completions() {
    match parse(&["fmd", "completions", "bash"]).command {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["fmd", "serve"]).is_err());
}

#[test]
fn standalone_validate_dataset() {
    let cli = ValidateDatasetCli::try_parse_from(["validate_dataset"]).unwrap();
    assert!(cli.args.data.is_none());
    let cli = ValidateDatasetCli::try_parse_from(["validate_dataset", "--json"]).unwrap();
    assert!(cli.args.json);
}

#[test]
fn standalone_make_checksums() {
    let cli = MakeChecksumsCli::try_parse_from(["make_checksums"]).unwrap();
    assert!(!cli.args.check);
    let cli = MakeChecksumsCli::try_parse_from(["make_checksums", "--check"]).unwrap();
    assert!(cli.args.check);
}

#[test]
fn outcome_to_exit_code() {
    assert_eq!(
        format!("{:?}", ExitCode::from(Outcome::Passed)),
        format!("{:?}", ExitCode::SUCCESS)
    );
    assert_eq!(
        format!("{:?}", ExitCode::from(Outcome::Failed)),
        format!("{:?}", ExitCode::FAILURE)
    );
}
