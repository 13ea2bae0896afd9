use std::path::PathBuf;

use askql_syntax::AskParser;

use super::loader::{load_query, load_store};

pub struct ParseArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub store: Option<PathBuf>,
    pub metrics: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let (query, store) = match load_query(args.query_path.as_deref(), args.query_text.as_deref())
        .and_then(|query| Ok((query, load_store(args.store.as_deref())?)))
    {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let description = match AskParser::new(&store).parse_query(&query.text) {
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

    if args.json {
        match serde_json::to_string_pretty(&description) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", description.printer().with_metrics(args.metrics).dump());
}
