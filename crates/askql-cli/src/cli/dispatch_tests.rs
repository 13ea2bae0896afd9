use std::path::PathBuf;

use super::*;
use crate::cli::commands::{compile_command, parse_command};

#[test]
fn parse_with_inline_query() {
    let m = parse_command()
        .try_get_matches_from(["parse", "-q", "[[Category:City]]", "--metrics"])
        .unwrap();
    let params = ParseParams::from_matches(&m);

    assert_eq!(params.query_text.as_deref(), Some("[[Category:City]]"));
    assert_eq!(params.query_path, None);
    assert!(params.metrics);
    assert!(!params.json);
    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(params.verbose, 0);
}

#[test]
fn parse_rejects_path_and_inline_query() {
    let result = parse_command().try_get_matches_from(["parse", "query.ask", "-q", "[[A]]"]);
    assert!(result.is_err());
}

#[test]
fn compile_collects_repeated_sort_keys() {
    let m = compile_command()
        .try_get_matches_from([
            "compile",
            "query.ask",
            "--store",
            "wiki.json",
            "--sort",
            "Population",
            "--sort",
            "Located in",
        ])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.query_path, Some(PathBuf::from("query.ask")));
    assert_eq!(params.store, Some(PathBuf::from("wiki.json")));
    assert_eq!(params.sort, vec!["Population", "Located in"]);
    assert_eq!(params.config, None);
}

#[test]
fn compile_flags() {
    let m = compile_command()
        .try_get_matches_from([
            "compile",
            "-q",
            "[[A]]",
            "--config",
            "askql.json",
            "--json",
            "--orphans",
            "--strict",
            "--color",
            "never",
            "-vv",
        ])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.config, Some(PathBuf::from("askql.json")));
    assert!(params.json && params.orphans && params.strict);
    assert!(params.sort.is_empty());
    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(params.verbose, 2);
    assert!(!params.color.should_colorize());
}

#[test]
fn compile_rejects_unknown_color() {
    let result =
        compile_command().try_get_matches_from(["compile", "-q", "[[A]]", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(build_cli().try_get_matches_from(["askql"]).is_err());
}

#[test]
fn compile_help() {
    let help = compile_command().render_help().to_string();
    assert!(help.contains("--sort <PROPERTY>"));
    assert!(help.contains("--store <FILE>"));
    assert!(help.contains("EXAMPLES:"));
}
