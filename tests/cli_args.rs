//! CLI argument parsing tests.
//!
//! These tests pin down the command-line interface: positional target
//! arguments, column flags, and the value-encoding flags.

use bugsnag_export::cli::{split_list, Cli};
use clap::Parser;

#[test]
fn test_cli_parses_positional_target() {
    let cli = Cli::parse_from(["bugsnag-export", "acme", "acme-web", "err-1"]);

    assert_eq!(cli.organisation, "acme");
    assert_eq!(cli.project, "acme-web");
    assert_eq!(cli.error_ids, "err-1");
    assert!(!cli.raw);
}

#[test]
fn test_cli_requires_all_positionals() {
    assert!(Cli::try_parse_from(["bugsnag-export"]).is_err());
    assert!(Cli::try_parse_from(["bugsnag-export", "acme"]).is_err());
    assert!(Cli::try_parse_from(["bugsnag-export", "acme", "acme-web"]).is_err());
}

#[test]
fn test_cli_allows_empty_organisation() {
    // An empty organisation defers to the first one on the account
    let cli = Cli::parse_from(["bugsnag-export", "", "acme-web", "err-1"]);
    assert_eq!(cli.organisation, "");
}

#[test]
fn test_cli_collects_repeated_columns() {
    let cli = Cli::parse_from([
        "bugsnag-export",
        "acme",
        "acme-web",
        "err-1",
        "-c",
        "metaData.user.id",
        "--column",
        "metaData.subscription.plan:plan",
    ]);

    assert_eq!(
        cli.columns,
        vec!["metaData.user.id", "metaData.subscription.plan:plan"]
    );
}

#[test]
fn test_cli_event_count_default_and_override() {
    let cli = Cli::parse_from(["bugsnag-export", "acme", "acme-web", "err-1"]);
    assert_eq!(cli.event_count, 100);

    let cli = Cli::parse_from(["bugsnag-export", "acme", "acme-web", "err-1", "-e", "25"]);
    assert_eq!(cli.event_count, 25);
}

#[test]
fn test_cli_api_key_flag() {
    let cli = Cli::parse_from([
        "bugsnag-export",
        "acme",
        "acme-web",
        "err-1",
        "-k",
        "my-key",
    ]);
    assert_eq!(cli.api_key.as_deref(), Some("my-key"));
}

#[test]
fn test_cli_raw_flag() {
    let cli = Cli::parse_from(["bugsnag-export", "acme", "acme-web", "err-1", "-r"]);
    assert!(cli.raw);
}

#[test]
fn test_cli_encoding_flags() {
    let cli = Cli::parse_from([
        "bugsnag-export",
        "acme",
        "acme-web",
        "err-1",
        "--true-value",
        "yes",
        "--false-value",
        "no",
        "--null-value",
        "NIL",
        "--not-set-value",
        "N/A",
    ]);

    let encodings = cli.encodings();
    assert_eq!(encodings.true_value, "yes");
    assert_eq!(encodings.false_value, "no");
    assert_eq!(encodings.null_value, "NIL");
    assert_eq!(encodings.not_set, "N/A");
}

#[test]
fn test_cli_error_ids_split_like_the_binary_does() {
    // The binary feeds the positional through split_list before resolving
    let cli = Cli::parse_from(["bugsnag-export", "acme", "acme-web", "err-1,err-2,err-1"]);

    let error_ids = split_list([cli.error_ids.as_str()]);
    assert_eq!(error_ids, vec!["err-1", "err-2"]);
}

#[test]
fn test_cli_column_values_split_and_flatten() {
    let cli = Cli::parse_from([
        "bugsnag-export",
        "acme",
        "acme-web",
        "err-1",
        "-c",
        "a,b",
        "-c",
        "c",
    ]);

    let columns = split_list(cli.columns.iter().map(String::as_str));
    assert_eq!(columns, vec!["a", "b", "c"]);
}
