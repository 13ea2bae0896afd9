//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file (positional). `-` reads stdin.
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .help("File holding the ask query (`-` for stdin)")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Store fixture (--store).
pub fn store_arg() -> Arg {
    Arg::new("store")
        .long("store")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON store fixture with pages, properties and concepts")
}

/// Compiler configuration (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON compiler configuration")
}

/// Sort keys (--sort, repeatable).
pub fn sort_arg() -> Arg {
    Arg::new("sort")
        .long("sort")
        .value_name("PROPERTY")
        .action(ArgAction::Append)
        .help("Property the results are sorted by (repeatable)")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of the text dump")
}

/// Show description metrics (--metrics).
pub fn metrics_arg() -> Arg {
    Arg::new("metrics")
        .long("metrics")
        .action(ArgAction::SetTrue)
        .help("Append size, depth and feature metrics")
}

/// Show unreachable segments (--orphans).
pub fn orphans_arg() -> Arg {
    Arg::new("orphans")
        .long("orphans")
        .action(ArgAction::SetTrue)
        .help("Also print registered segments the root does not reach")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log compiler decisions (-vv for trace)")
}
