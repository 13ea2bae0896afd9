use askql_core::store::ConceptRow;
use askql_core::{Description, MemoryStore};
use chrono::Duration;

use crate::test_utils::{StubParser, concept_row, dump, now, store};
use crate::{
    Collaborators, CompiledQuery, CompilerConfig, ConceptCaching, DiagnosticKind, QueryBuilder,
};

const CITIES: &str = "[[Category:City]]";

fn parser() -> StubParser {
    StubParser::default()
        .with(CITIES, Description::class(["City"]))
        .with("[[Concept:Loop]]", Description::concept("Loop"))
        .with("[[Concept:A]]", Description::concept("A"))
        .with("[[Concept:B]]", Description::concept("B"))
        .with("[[+]]", Description::thing())
}

fn compile_with_concepts(
    store: &MemoryStore,
    config: &CompilerConfig,
    d: &Description,
) -> CompiledQuery {
    let parser = parser();
    let env = Collaborators::from_store(store).parser(&parser);

    QueryBuilder::new(env, config)
        .clock(now())
        .compile(d)
        .expect("description compiles")
}

fn cached(row: ConceptRow, age: Duration) -> ConceptRow {
    ConceptRow {
        cache_date: Some(now() - age),
        ..row
    }
}

fn compile_concept(store: &MemoryStore, title: &str) -> CompiledQuery {
    compile_with_concepts(store, &CompilerConfig::default(), &Description::concept(title))
}

#[test]
fn fresh_cache_is_used() {
    let store = store().with_concept(
        "Cities",
        cached(concept_row(30, CITIES), Duration::minutes(10)),
    );

    let res = compile_concept(&store, "Cities");

    insta::assert_snapshot!(dump(&res), @"t0 table smw_concept_cache join t0.s_id where t0.o_id=30");
}

#[test]
fn stale_computable_concept_is_recompiled() {
    let store = store().with_concept("Cities", cached(concept_row(30, CITIES), Duration::days(2)));

    let res = compile_concept(&store, "Cities");

    insta::assert_snapshot!(dump(&res), @r"
    t1 table smw_fpt_inst join t1.s_id
      t2 class-hierarchy ids [11] depth 10 on t1.o_id
    ");
    assert!(res.diagnostics().is_empty());
}

#[test]
fn stale_oversized_concept_prefers_cache() {
    let row = ConceptRow {
        size: 50,
        ..cached(concept_row(30, CITIES), Duration::days(2))
    };
    let store = store().with_concept("Cities", row);

    let res = compile_concept(&store, "Cities");

    assert_eq!(
        res.root_segment().and_then(|s| s.join_table.as_deref()),
        Some("smw_concept_cache")
    );
}

#[test]
fn disallowed_features_prefer_cache() {
    let store = store().with_concept("Cities", cached(concept_row(30, CITIES), Duration::days(2)));
    let config = CompilerConfig::default().concept_features(askql_core::QueryFeatures::PROPERTY);

    let res = compile_with_concepts(&store, &config, &Description::concept("Cities"));

    assert_eq!(
        res.root_segment().and_then(|s| s.join_table.as_deref()),
        Some("smw_concept_cache")
    );
}

#[test]
fn caching_all_never_recompiles_cached() {
    let store = store().with_concept("Cities", cached(concept_row(30, CITIES), Duration::days(2)));
    let config = CompilerConfig::default().concept_caching(ConceptCaching::All);

    let res = compile_with_concepts(&store, &config, &Description::concept("Cities"));

    insta::assert_snapshot!(dump(&res), @"t0 table smw_concept_cache join t0.s_id where t0.o_id=30");
}

#[test]
fn caching_none_recompiles_stale() {
    let row = ConceptRow {
        size: 500,
        ..cached(concept_row(30, CITIES), Duration::days(2))
    };
    let store = store().with_concept("Cities", row);
    let config = CompilerConfig::default().concept_caching(ConceptCaching::None);

    let res = compile_with_concepts(&store, &config, &Description::concept("Cities"));

    assert_eq!(
        res.root_segment().and_then(|s| s.join_table.as_deref()),
        Some("smw_fpt_inst")
    );
}

#[test]
fn missing_concept_is_silent() {
    let res = compile_concept(&store(), "Ghost");

    assert!(res.is_unrestricted());
    assert!(res.diagnostics().is_empty());
}

#[test]
fn concept_without_definition() {
    let row = ConceptRow {
        text: None,
        ..concept_row(30, "")
    };
    let store = store().with_concept("Hollow", row);

    let res = compile_concept(&store, "Hollow");

    assert!(res.is_unrestricted());
    assert!(res.diagnostics().is_empty());
}

#[test]
fn direct_self_reference() {
    let store = store().with_concept("Loop", concept_row(40, "[[Concept:Loop]]"));

    let res = compile_concept(&store, "Loop");

    assert!(res.is_unrestricted());
    assert_eq!(res.diagnostics().len(), 1);
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @r#"error[smw-query-condition-circular]: a possible circular condition was detected in "[[Concept:Loop]]""#
    );
}

#[test]
fn indirect_cycle_is_caught_by_guard() {
    let store = store()
        .with_concept("A", concept_row(41, "[[Concept:B]]"))
        .with_concept("B", concept_row(42, "[[Concept:A]]"));

    let res = compile_concept(&store, "A");

    assert!(res.is_unrestricted());
    let diagnostics = res.diagnostics();
    assert_eq!(diagnostics.count_of(DiagnosticKind::CircularCondition), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::EmptySubquery), 2);
}

#[test]
fn repeated_reference_is_not_a_cycle() {
    let store = store().with_concept("Cities", concept_row(30, CITIES));
    let d = Description::and(vec![
        Description::concept("Cities"),
        Description::concept("Cities"),
    ]);

    let res = compile_with_concepts(&store, &CompilerConfig::default(), &d);

    insta::assert_snapshot!(dump(&res), @r"
    t0 conjunction
      t2 table smw_fpt_inst join t2.s_id
        t3 class-hierarchy ids [11] depth 10 on t2.o_id
      t5 table smw_fpt_inst join t5.s_id
        t6 class-hierarchy ids [11] depth 10 on t5.o_id
    ");
    assert!(res.diagnostics().is_empty());
}

#[test]
fn unparsable_definition() {
    let store = store().with_concept("Broken", concept_row(43, "[[broken"));

    let res = compile_concept(&store, "Broken");

    assert!(res.is_unrestricted());
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @r#"error[smw-query-concept-invalid]: concept "Concept:Broken" could not be parsed: unexpected query "[[broken""#
    );
}

#[test]
fn nesting_limit() {
    let store = store()
        .with_concept("Outer", concept_row(44, "[[Concept:B]]"))
        .with_concept("B", concept_row(42, CITIES));
    let config = CompilerConfig::default().max_concept_nesting(1);

    let res = compile_with_concepts(&store, &config, &Description::concept("Outer"));

    assert!(res.is_unrestricted());
    let diagnostics = res.diagnostics();
    assert_eq!(diagnostics.count_of(DiagnosticKind::ConceptNestingTooDeep), 1);
    assert_eq!(diagnostics.count_of(DiagnosticKind::EmptySubquery), 1);
}

#[test]
fn unrestricted_definition_is_an_empty_subquery() {
    let store = store().with_concept("Everything", concept_row(45, "[[+]]"));

    let res = compile_concept(&store, "Everything");

    assert!(res.is_unrestricted());
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @"error[smw_emptysubquery]: some subquery has no valid condition"
    );
}

#[test]
fn uncached_oversized_concept_is_not_recompiled() {
    let row = ConceptRow {
        size: 50,
        ..concept_row(30, CITIES)
    };
    let store = store().with_concept("Cities", row);

    let res = compile_concept(&store, "Cities");

    assert!(res.is_unrestricted());
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @r#"error[smw_concept_cache_miss]: concept "Concept:Cities" has no cached result and may not be computed on demand"#
    );
}

#[test]
fn caching_all_never_recompiles_uncached() {
    let store = store().with_concept("Cities", concept_row(30, CITIES));
    let config = CompilerConfig::default().concept_caching(ConceptCaching::All);

    let res = compile_with_concepts(&store, &config, &Description::concept("Cities"));

    assert!(res.is_unrestricted());
    assert_eq!(res.diagnostics().len(), 1);
    assert_eq!(res.diagnostics().count_of(DiagnosticKind::ConceptNotCached), 1);
}

#[test]
fn unbounded_cache_lifetime_keeps_cache_fresh() {
    let store = store().with_concept("Cities", cached(concept_row(30, CITIES), Duration::days(400)));

    for minutes in [i64::MAX, i64::MIN] {
        let config = CompilerConfig::default().concept_cache_lifetime_minutes(minutes);
        let res = compile_with_concepts(&store, &config, &Description::concept("Cities"));

        assert_eq!(
            res.root_segment().and_then(|s| s.join_table.as_deref()),
            Some("smw_concept_cache")
        );
    }
}

#[test]
fn large_concept_id_is_quoted_unsigned() {
    let store = store().with_concept(
        "Cities",
        cached(concept_row(u64::MAX, CITIES), Duration::minutes(10)),
    );

    let res = compile_concept(&store, "Cities");

    insta::assert_snapshot!(
        dump(&res),
        @"t0 table smw_concept_cache join t0.s_id where t0.o_id=18446744073709551615"
    );
}
