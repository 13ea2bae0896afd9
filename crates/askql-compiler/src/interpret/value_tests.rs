use askql_core::{Comparator, DataItem, Description, PageRef};

use crate::test_utils::{FulltextStub, compile, dump, store};
use crate::{
    Collaborators, CompiledQuery, CompilerConfig, DiagnosticKind, JoinField, QueryBuilder,
    SegmentKind,
};

fn page_value(comparator: Comparator, title: &str) -> Description {
    Description::value(None, comparator, DataItem::Page(PageRef::main(title)))
}

fn compile_fulltext(d: &Description) -> CompiledQuery {
    let store = store();
    let config = CompilerConfig::default();
    let provider = FulltextStub { min_length: 3 };
    let env = Collaborators::from_store(&store).match_conditions(&provider);

    QueryBuilder::new(env, &config)
        .compile(d)
        .expect("description compiles")
}

#[test]
fn equality_resolves_to_id() {
    let res = compile(&Description::page("Berlin"));

    let root = res.root_segment().expect("value is registered");
    assert_eq!(root.kind, SegmentKind::TrueValue);
    assert!(root.join_table.is_none());
    assert_eq!(root.join_field, JoinField::Ids(vec![7]));
    assert_eq!(res.len(), 1);
}

#[test]
fn unknown_page_matches_nothing() {
    let res = compile(&Description::page("Atlantis"));

    insta::assert_snapshot!(dump(&res), @"t0 true-value ids [0]");
}

#[test]
fn like_filters_sort_key() {
    let res = compile(&page_value(Comparator::Like, "Ber*"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_object_ids join t0.smw_id where t0.smw_sortkey LIKE 'Ber%'");
}

#[test]
fn operand_is_quoted() {
    let res = compile(&page_value(Comparator::NotLike, "O'Neil*"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_object_ids join t0.smw_id where t0.smw_sortkey NOT LIKE 'O''Neil%'");
}

#[test]
fn ordering_comparator() {
    let res = compile(&page_value(Comparator::Lt, "M"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_object_ids join t0.smw_id where t0.smw_sortkey<'M'");
}

#[test]
fn non_page_literal_needs_property() {
    let res = compile(&Description::value(
        None,
        Comparator::Gt,
        DataItem::Number(18.0),
    ));

    assert!(res.is_unrestricted());
    assert_eq!(res.diagnostics().count_of(DiagnosticKind::NonPageValue), 1);
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @r#"error[smw-query-value-not-page]: value condition "[[:>>18]]" needs a property"#
    );
}

#[test]
fn wide_search_ignores_token_length() {
    let res = compile_fulltext(&page_value(Comparator::PrimLike, "ab"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_ft_search join t0.s_id where MATCH(t0.o_text) AGAINST ('ab' IN BOOLEAN MODE)");
}

#[test]
fn short_token_falls_back_to_like() {
    let res = compile_fulltext(&page_value(Comparator::Like, "ab*"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_object_ids join t0.smw_id where t0.smw_sortkey LIKE 'ab%'");
}

#[test]
fn long_token_uses_match_condition() {
    let res = compile_fulltext(&page_value(Comparator::Like, "Berl*"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_ft_search join t0.s_id where MATCH(t0.o_text) AGAINST ('Berl' IN BOOLEAN MODE)");
}

#[test]
fn equality_never_uses_match_condition() {
    let res = compile_fulltext(&Description::page("Berlin"));

    assert_eq!(
        res.root_segment().map(|s| s.kind),
        Some(SegmentKind::TrueValue)
    );
}
