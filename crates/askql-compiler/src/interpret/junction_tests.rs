use askql_core::{Description, namespace};

use crate::test_utils::{compile, dump};
use crate::{Component, DiagnosticKind};

#[test]
fn empty_conjunction_is_dropped() {
    let res = compile(&Description::and(vec![]));

    assert!(res.is_unrestricted());
    assert!(res.is_empty());
    assert_eq!(res.diagnostics().count_of(DiagnosticKind::EmptyJunction), 1);
    assert!(!res.diagnostics().has_errors());
}

#[test]
fn empty_disjunction_is_dropped() {
    let res = compile(&Description::or(vec![]));

    assert!(res.is_unrestricted());
    insta::assert_snapshot!(
        res.diagnostics().render(),
        @"warning[smw-query-empty-junction]: an empty disjunction carries no restriction"
    );
}

#[test]
fn conjunction_of_thing_is_dropped() {
    let res = compile(&Description::and(vec![Description::thing()]));

    assert!(res.is_unrestricted());
    assert!(res.diagnostics().is_empty());
}

#[test]
fn unrestricted_children_are_skipped() {
    let d = Description::or(vec![
        Description::class(["City"]),
        Description::thing(),
        Description::namespace(namespace::HELP),
    ]);

    insta::assert_snapshot!(dump(&compile(&d)), @r"
    t0 disjunction
      t1 table smw_fpt_inst join t1.s_id
        t2 class-hierarchy ids [11] depth 10 on t1.o_id
      t4 table smw_object_ids join t4.smw_id where t4.smw_namespace=12
    ");
}

#[test]
fn nested_junctions() {
    let d = Description::and(vec![
        Description::page("Berlin"),
        Description::or(vec![Description::page("Germany"), Description::and(vec![])]),
    ]);

    let res = compile(&d);

    insta::assert_snapshot!(dump(&res), @r"
    t0 conjunction
      t1 true-value ids [7]
      t2 disjunction
        t3 true-value ids [8]
    ");
    let root = res.root_segment().expect("conjunction survives");
    assert!(root.components.values().all(|c| *c == Component::Member));
}
