use askql_core::MemoryStore;

use crate::AskParser;

#[test]
fn render_unclosed_condition() {
    let source = "[[Category:City";
    let err = AskParser::new(&MemoryStore::new())
        .parse_query(source)
        .unwrap_err();

    insta::assert_snapshot!(err.printer(source).render(), @r"
    error: missing closing `]]`
      |
    1 | [[Category:City
      | ^^
    ");
}

#[test]
fn render_points_at_literal() {
    let source = "[[Category:A]] junk";
    let err = AskParser::new(&MemoryStore::new())
        .parse_query(source)
        .unwrap_err();

    insta::assert_snapshot!(err.printer(source).render(), @r"
    error: unexpected `junk`
      |
    1 | [[Category:A]] junk
      |                ^^^^
    ");
}
