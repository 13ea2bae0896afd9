//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::compile::CompileArgs;
use crate::commands::parse::ParseArgs;

pub struct ParseParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub store: Option<PathBuf>,
    pub metrics: bool,
    pub json: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            store: m.get_one::<PathBuf>("store").cloned(),
            metrics: m.get_flag("metrics"),
            json: m.get_flag("json"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            store: p.store,
            metrics: p.metrics,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompileParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sort: Vec<String>,
    pub json: bool,
    pub orphans: bool,
    pub strict: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            store: m.get_one::<PathBuf>("store").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            sort: m
                .get_many::<String>("sort")
                .map(|keys| keys.cloned().collect())
                .unwrap_or_default(),
            json: m.get_flag("json"),
            orphans: m.get_flag("orphans"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            store: p.store,
            config: p.config,
            sort: p.sort,
            json: p.json,
            orphans: p.orphans,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
