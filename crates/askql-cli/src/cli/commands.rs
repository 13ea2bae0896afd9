//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("askql")
        .about("Compile ask queries into relational join segments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(parse_command())
        .subcommand(compile_command())
}

/// Show the description tree of a query.
pub fn parse_command() -> Command {
    Command::new("parse")
        .about("Show the description tree of a query")
        .override_usage(
            "\
  askql parse <QUERY>
  askql parse -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  askql parse -q '[[Category:City]]'
  askql parse -q '[[Population::>1000]]' --store wiki.json --metrics
  askql parse query.ask --json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(store_arg())
        .arg(metrics_arg())
        .arg(json_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Compile a query against a store fixture.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a query into query segments")
        .override_usage(
            "\
  askql compile <QUERY> --store <FILE>
  askql compile -q <TEXT> --store <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  askql compile -q '[[Category:City]]' --store wiki.json
  askql compile query.ask --store wiki.json --sort Population
  askql compile -q '[[Concept:Big cities]]' --store wiki.json --config askql.json --json
  ASKQL_LOG=askql_compiler=trace askql compile query.ask --store wiki.json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(store_arg())
        .arg(config_arg())
        .arg(sort_arg())
        .arg(json_arg())
        .arg(orphans_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
