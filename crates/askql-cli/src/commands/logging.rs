use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "ASKQL_LOG";

/// Install the stderr subscriber. `ASKQL_LOG` overrides the level picked by
/// `-v` flags.
pub fn init(verbose: u8) {
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .with_env_filter(env_filter(verbose))
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {err}");
    }
}

pub fn default_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy()
}
