use std::io::Write;
use std::path::Path;

use askql_compiler::{CompilerConfig, ConceptCaching};
use askql_core::PageRef;
use askql_core::store::IdentityResolver;

use super::loader::{LoadError, load_config, load_query, load_store};

fn temp_json(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn inline_query_wins_over_path() {
    let source = load_query(Some(Path::new("ignored.ask")), Some("[[Category:City]]")).unwrap();
    assert_eq!(source.text, "[[Category:City]]");
    assert_eq!(source.label, "<query>");
}

#[test]
fn query_from_file() {
    let file = temp_json("[[Category:City]]\n");
    let source = load_query(Some(file.path()), None).unwrap();
    assert_eq!(source.text, "[[Category:City]]\n");
    assert_eq!(source.label, file.path().display().to_string());
}

#[test]
fn missing_and_blank_queries() {
    assert!(matches!(load_query(None, None), Err(LoadError::MissingQuery)));
    assert!(matches!(load_query(None, Some("  ")), Err(LoadError::EmptyQuery)));

    let err = load_query(Some(Path::new("/nonexistent/query.ask")), None).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '/nonexistent/query.ask'"));
}

#[test]
fn store_fixture() {
    let file = temp_json(r#"{ "pages": { "Category:City": 5, "Berlin": 7 } }"#);
    let store = load_store(Some(file.path())).unwrap();
    assert_eq!(store.resolve_page(&PageRef::category("City")), 5);
    assert_eq!(store.resolve_page(&PageRef::main("Berlin")), 7);

    let empty = load_store(None).unwrap();
    assert_eq!(empty.resolve_page(&PageRef::main("Berlin")), 0);
}

#[test]
fn invalid_store_fixture() {
    let file = temp_json(r#"{ "pagez": {} }"#);
    assert!(matches!(load_store(Some(file.path())), Err(LoadError::Store(_))));
}

#[test]
fn config_file() {
    let file = temp_json(r#"{ "subcategory_depth": 3, "concept_caching": "none" }"#);
    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(
        config,
        CompilerConfig::new()
            .subcategory_depth(3)
            .concept_caching(ConceptCaching::None)
    );

    assert_eq!(load_config(None).unwrap(), CompilerConfig::default());
}

#[test]
fn invalid_config_names_the_file() {
    let file = temp_json(r#"{ "depth": 3 }"#);
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, LoadError::Config { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
