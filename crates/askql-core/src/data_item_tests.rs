use crate::data_item::format_number;
use crate::namespace;
use crate::{Comparator, DataItem, PageRef, PropertyRef, QueryFeatures};

#[test]
fn parse_prefixed_known_namespace() {
    let page = PageRef::parse_prefixed("Category:Capital cities");

    assert_eq!(page.namespace, namespace::CATEGORY);
    assert_eq!(page.title, "Capital_cities");
    assert_eq!(page.prefixed_text(), "Category:Capital cities");
}

#[test]
fn parse_prefixed_unknown_prefix_stays_in_title() {
    let page = PageRef::parse_prefixed("Foo:Bar");

    assert_eq!(page.namespace, namespace::MAIN);
    assert_eq!(page.title, "Foo:Bar");
}

#[test]
fn parse_prefixed_leading_colon_and_subobject() {
    let page = PageRef::parse_prefixed(":Concept:Adults#_QUERY1");

    assert_eq!(page.namespace, namespace::CONCEPT);
    assert_eq!(page.title, "Adults");
    assert_eq!(page.subobject, "_QUERY1");
    assert_eq!(page.to_string(), "Concept:Adults#_QUERY1");
}

#[test]
fn namespace_lookup_is_case_insensitive() {
    assert_eq!(namespace::by_name("category"), Some(namespace::CATEGORY));
    assert_eq!(namespace::by_name("Media_Wiki"), None);
    assert_eq!(namespace::by_name("MediaWiki"), Some(namespace::MEDIAWIKI));
    assert_eq!(namespace::name_of(namespace::HELP), Some("Help"));
}

#[test]
fn property_direction() {
    let prop = PropertyRef::new("Has capital").inverted();

    assert_eq!(prop.key, "Has_capital");
    assert!(prop.inverse);
    assert_eq!(prop.to_string(), "-Has capital");
    assert!(!prop.forward().inverse);
    assert!(PropertyRef::instance_of().is_predefined());
}

#[test]
fn sort_keys() {
    assert_eq!(DataItem::Number(18.0).sort_key(), "18");
    assert_eq!(DataItem::Number(2.5).sort_key(), "2.5");
    assert_eq!(DataItem::Page(PageRef::main("New_York")).sort_key(), "New York");
    assert_eq!(DataItem::Boolean(true).sort_key(), "true");
    assert_eq!(format_number(-3.0), "-3");
}

#[test]
fn comparator_symbols() {
    let rendered: Vec<&str> = Comparator::ALL.iter().map(|c| c.symbol()).collect();

    assert_eq!(
        rendered,
        ["", "<<", ">>", "<", ">", "!", "~", "!~", "~~", "!~~"]
    );
    assert!(Comparator::PrimNotLike.is_like());
    assert!(Comparator::PrimNotLike.is_primitive());
    assert!(!Comparator::Like.is_primitive());
    assert_eq!(Comparator::NotLike.to_string(), "NOT_LIKE");
}

#[test]
fn feature_sets() {
    let declared = QueryFeatures::PROPERTY | QueryFeatures::CATEGORY;

    assert!(declared.is_subset_of(QueryFeatures::ALL));
    assert!(!declared.is_subset_of(QueryFeatures::PROPERTY));
    assert!(QueryFeatures::NONE.is_subset_of(QueryFeatures::NONE));
    assert_eq!(declared.to_string(), "property|category");
    assert_eq!(QueryFeatures::NONE.to_string(), "none");
}
