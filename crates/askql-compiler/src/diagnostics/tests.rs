use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_params() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::CircularCondition)
        .param("[[Concept:Adults]]")
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(
        diagnostics.render(),
        @r#"error[smw-query-condition-circular]: a possible circular condition was detected in "[[Concept:Adults]]""#
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyJunction)
        .param("conjunction")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownCategories)
        .param("[[Category:Nowhere]]")
        .severity(Severity::Error)
        .emit();

    assert!(diagnostics.has_errors());
}

#[test]
fn template_parameters_in_order() {
    let msg = DiagnosticKind::ConceptNestingTooDeep
        .message(&["Concept:Deep".to_string(), "16".to_string()]);

    assert_eq!(
        msg,
        "concept \"Concept:Deep\" exceeds the maximum concept nesting of 16"
    );
}

#[test]
fn unique_drops_repeats() {
    let mut diagnostics = Diagnostics::new();
    for _ in 0..3 {
        diagnostics.report(DiagnosticKind::EmptySubquery).emit();
    }
    diagnostics
        .report(DiagnosticKind::NoPropertyTable)
        .param("Note")
        .emit();

    assert_eq!(diagnostics.len(), 4);
    assert_eq!(diagnostics.count_of(DiagnosticKind::EmptySubquery), 3);
    insta::assert_snapshot!(diagnostics.render(), @r#"
    error[smw_emptysubquery]: some subquery has no valid condition
    warning[smw-query-property-unstored]: property "Note" has no storage table
    "#);
}

#[test]
fn extend_keeps_order() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::EmptySubquery).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::NonPageValue).param("18").emit();

    a.extend(b);

    let keys: Vec<_> = a.iter().map(|m| m.key()).collect();
    assert_eq!(keys, ["smw_emptysubquery", "smw-query-value-not-page"]);
}
