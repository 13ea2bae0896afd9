use std::path::PathBuf;

use askql_compiler::{Collaborators, QueryBuilder};
use askql_syntax::AskParser;

use super::loader::{load_config, load_query, load_store};

pub struct CompileArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sort: Vec<String>,
    pub json: bool,
    pub orphans: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let loaded = load_query(args.query_path.as_deref(), args.query_text.as_deref())
        .and_then(|query| {
            let store = load_store(args.store.as_deref())?;
            let config = load_config(args.config.as_deref())?;
            Ok((query, store, config))
        });
    let (query, store, config) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let parser = AskParser::new(&store);
    let description = match parser.parse_query(&query.text) {
        Ok(description) => description,
        Err(err) => {
            let rendered = err
                .printer(&query.text)
                .path(&query.label)
                .colored(args.color)
                .render();
            eprintln!("{rendered}");
            std::process::exit(1);
        }
    };

    let env = Collaborators::from_store(&store).parser(&parser);
    let compiled = match QueryBuilder::new(env, &config)
        .sort_keys(&args.sort)
        .compile(&description)
    {
        Ok(compiled) => compiled,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let diagnostics = compiled.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render());
    }

    if args.json {
        match compiled.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        print!(
            "{}",
            compiled
                .printer()
                .with_orphans(args.orphans)
                .with_sort_fields(true)
                .dump()
        );
    }

    let failed = diagnostics.has_errors() || (args.strict && diagnostics.has_warnings());
    if failed {
        std::process::exit(1);
    }
}
