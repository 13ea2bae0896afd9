mod cli;
mod commands;

use cli::{CompileParams, ParseParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("parse", m)) => {
            let params = ParseParams::from_matches(m);
            commands::logging::init(params.verbose);
            commands::parse::run(params.into());
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::logging::init(params.verbose);
            commands::compile::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
