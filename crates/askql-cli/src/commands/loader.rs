//! Reading queries, store fixtures and compiler configuration from disk.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use askql_compiler::CompilerConfig;
use askql_core::{MemoryStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("query is required: use a positional argument or -q/--query")]
    MissingQuery,

    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Query text and the label error snippets are rendered with.
#[derive(Debug)]
pub struct QuerySource {
    pub text: String,
    pub label: String,
}

pub fn load_query(
    query_path: Option<&Path>,
    query_text: Option<&str>,
) -> Result<QuerySource, LoadError> {
    let source = match (query_text, query_path) {
        (Some(text), _) => QuerySource {
            text: text.to_string(),
            label: "<query>".to_string(),
        },
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(LoadError::Stdin)?;
            QuerySource {
                text,
                label: "<stdin>".to_string(),
            }
        }
        (None, Some(path)) => QuerySource {
            text: read(path)?,
            label: path.display().to_string(),
        },
        (None, None) => return Err(LoadError::MissingQuery),
    };

    if source.text.trim().is_empty() {
        return Err(LoadError::EmptyQuery);
    }
    Ok(source)
}

/// The fixture at `path`, or an empty store.
pub fn load_store(path: Option<&Path>) -> Result<MemoryStore, LoadError> {
    match path {
        Some(path) => Ok(MemoryStore::load(path)?),
        None => Ok(MemoryStore::new()),
    }
}

/// The configuration at `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<CompilerConfig, LoadError> {
    let Some(path) = path else {
        return Ok(CompilerConfig::default());
    };
    let json = read(path)?;
    CompilerConfig::from_json(&json).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
