use cipherforge::config::{SearchParams, SeedPolicy};
use cipherforge::error::CipherForgeError;
use cipherforge::scorer::NgramOrder;
use clap::{CommandFactory, FromArgMatches, Parser};
use rstest::rstest;
use std::fs::File;
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    params: SearchParams,
}

fn parse(args: &[&str]) -> (SearchParams, clap::ArgMatches) {
    let mut argv = vec!["test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.params, matches)
}

#[test]
fn json_file_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    let mut f = File::create(&path).unwrap();
    writeln!(f, r#"{{ "ngram": "3", "temp_max": 250.0, "seed_policy": "random" }}"#).unwrap();

    let params = SearchParams::load_from_file(&path).unwrap();
    assert_eq!(params.ngram, NgramOrder::Trigram);
    assert_eq!(params.temp_max, 250.0);
    assert_eq!(params.seed_policy, SeedPolicy::Random);
    assert_eq!(params.temp_min, SearchParams::default().temp_min);
    assert_eq!(params.chains, 1);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        SearchParams::load_from_file(&path),
        Err(CipherForgeError::Json(_))
    ));
}

#[test]
fn cli_overrides_only_what_was_typed() {
    let (cli, matches) = parse(&["--tau", "0.001", "--ngram", "1", "--chains", "4"]);

    let mut from_file = SearchParams {
        temp_max: 500.0,
        tau: 0.5,
        ..SearchParams::default()
    };
    from_file.merge_from_cli(&cli, &matches);

    assert_eq!(from_file.tau, 0.001);
    assert_eq!(from_file.ngram, NgramOrder::Unigram);
    assert_eq!(from_file.chains, 4);
    // untouched: file value survives even though the CLI has a default
    assert_eq!(from_file.temp_max, 500.0);
}

#[test]
fn cli_defaults_match_struct_defaults() {
    let (cli, _) = parse(&[]);
    let d = SearchParams::default();
    assert_eq!(cli.ngram, d.ngram);
    assert_eq!(cli.temp_max, d.temp_max);
    assert_eq!(cli.temp_min, d.temp_min);
    assert_eq!(cli.tau, d.tau);
    assert_eq!(cli.seed_policy, d.seed_policy);
    assert_eq!(cli.report_stride, d.report_stride);
    assert_eq!(cli.max_iterations, None);
}

#[test]
fn seed_policy_parses_kebab_case() {
    let (cli, _) = parse(&["--seed-policy", "random", "--ngram", "trigram"]);
    assert_eq!(cli.seed_policy, SeedPolicy::Random);
    assert_eq!(cli.ngram, NgramOrder::Trigram);
}

#[rstest]
#[case(0.0, 1.0, 1e-3, 100, 1)]
#[case(-5.0, 1.0, 1e-3, 100, 1)]
#[case(10.0, 0.0, 1e-3, 100, 1)]
#[case(10.0, 10.0, 1e-3, 100, 1)]
#[case(10.0, 20.0, 1e-3, 100, 1)]
#[case(10.0, 1.0, 0.0, 100, 1)]
#[case(10.0, 1.0, -1.0, 100, 1)]
#[case(10.0, 1.0, f64::NAN, 100, 1)]
#[case(10.0, 1.0, 1e-3, 0, 1)]
#[case(10.0, 1.0, 1e-3, 100, 0)]
fn invalid_parameters_fail_validation(
    #[case] temp_max: f64,
    #[case] temp_min: f64,
    #[case] tau: f64,
    #[case] report_stride: u64,
    #[case] chains: usize,
) {
    let params = SearchParams {
        temp_max,
        temp_min,
        tau,
        report_stride,
        chains,
        ..SearchParams::default()
    };
    assert!(matches!(
        params.validate(),
        Err(CipherForgeError::InvalidConfiguration(_))
    ));
}
