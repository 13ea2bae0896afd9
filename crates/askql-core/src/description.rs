//! The query description algebra.
//!
//! A `Description` is an immutable tree produced by a query-string parser
//! (or built directly). It is the input of the segment compiler.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::data_item::{Comparator, DataItem, PageRef, PropertyRef};
use crate::features::QueryFeatures;
use crate::namespace::{self, NamespaceId};

/// A query condition.
///
/// New variants may be added; consumers outside this crate must handle
/// unknown variants (the compiler treats them as "no restriction").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Description {
    /// Matches every page.
    Thing,
    Class(ClassDescription),
    Namespace(NamespaceDescription),
    Value(ValueDescription),
    SomeProperty(SomePropertyDescription),
    Concept(ConceptDescription),
    Conjunction(Junction),
    Disjunction(Junction),
}

/// Pages in any of the given categories (or their subcategories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescription {
    pub categories: IndexSet<PageRef>,
    /// Closure depth limit; `None` uses the configured subcategory depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_depth: Option<u32>,
}

impl ClassDescription {
    pub fn new(categories: impl IntoIterator<Item = PageRef>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            hierarchy_depth: None,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.hierarchy_depth = Some(depth);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDescription {
    pub namespace: NamespaceId,
}

/// Nominal restriction against a single literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDescription {
    /// Property the value belongs to, when it sits inside a property
    /// restriction. Top-level values have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyRef>,
    #[serde(default)]
    pub comparator: Comparator,
    pub literal: DataItem,
}

impl ValueDescription {
    pub fn new(property: Option<PropertyRef>, comparator: Comparator, literal: DataItem) -> Self {
        Self {
            property,
            comparator,
            literal,
        }
    }
}

/// "Property P has a value satisfying `inner`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomePropertyDescription {
    pub property: PropertyRef,
    pub inner: Box<Description>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptDescription {
    pub concept: PageRef,
}

/// Ordered children of a conjunction or disjunction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub children: Vec<Description>,
}

impl Description {
    pub fn thing() -> Self {
        Self::Thing
    }

    /// Categories given by title (without namespace prefix).
    pub fn class<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Class(ClassDescription::new(
            categories.into_iter().map(PageRef::category),
        ))
    }

    pub fn namespace(namespace: NamespaceId) -> Self {
        Self::Namespace(NamespaceDescription { namespace })
    }

    /// Top-level page value `[[Title]]`.
    pub fn page(prefixed_title: &str) -> Self {
        Self::value(
            None,
            Comparator::Eq,
            DataItem::Page(PageRef::parse_prefixed(prefixed_title)),
        )
    }

    pub fn value(property: Option<PropertyRef>, comparator: Comparator, literal: DataItem) -> Self {
        Self::Value(ValueDescription::new(property, comparator, literal))
    }

    pub fn some_property(property: PropertyRef, inner: Description) -> Self {
        Self::SomeProperty(SomePropertyDescription {
            property,
            inner: Box::new(inner),
        })
    }

    pub fn concept(title: &str) -> Self {
        Self::Concept(ConceptDescription {
            concept: PageRef::concept(title),
        })
    }

    pub fn and(children: Vec<Description>) -> Self {
        Self::Conjunction(Junction { children })
    }

    pub fn or(children: Vec<Description>) -> Self {
        Self::Disjunction(Junction { children })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Thing => "thing",
            Self::Class(_) => "class",
            Self::Namespace(_) => "namespace",
            Self::Value(_) => "value",
            Self::SomeProperty(_) => "some_property",
            Self::Concept(_) => "concept",
            Self::Conjunction(_) => "conjunction",
            Self::Disjunction(_) => "disjunction",
        }
    }

    /// Children of a conjunction or disjunction; empty for other variants.
    pub fn children(&self) -> &[Description] {
        match self {
            Self::Conjunction(j) | Self::Disjunction(j) => &j.children,
            _ => &[],
        }
    }

    /// Number of elementary conditions.
    pub fn size(&self) -> u32 {
        match self {
            Self::Thing => 0,
            Self::Class(c) => c.categories.len() as u32,
            Self::Namespace(_) | Self::Value(_) | Self::Concept(_) => 1,
            Self::SomeProperty(p) => 1 + p.inner.size(),
            Self::Conjunction(j) | Self::Disjunction(j) => j.children.iter().map(Self::size).sum(),
        }
    }

    /// Property nesting depth.
    pub fn depth(&self) -> u32 {
        match self {
            Self::SomeProperty(p) => 1 + p.inner.depth(),
            Self::Conjunction(j) | Self::Disjunction(j) => {
                j.children.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn query_features(&self) -> QueryFeatures {
        match self {
            Self::Thing | Self::Value(_) => QueryFeatures::NONE,
            Self::Class(_) => QueryFeatures::CATEGORY,
            Self::Namespace(_) => QueryFeatures::NAMESPACE,
            Self::Concept(_) => QueryFeatures::CONCEPT,
            Self::SomeProperty(p) => QueryFeatures::PROPERTY | p.inner.query_features(),
            Self::Conjunction(j) => j
                .children
                .iter()
                .fold(QueryFeatures::CONJUNCTION, |acc, c| acc | c.query_features()),
            Self::Disjunction(j) => j
                .children
                .iter()
                .fold(QueryFeatures::DISJUNCTION, |acc, c| acc | c.query_features()),
        }
    }

    /// Render in ask syntax.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, false);
        out
    }

    fn render(&self, out: &mut String, as_value: bool) {
        match self {
            Self::Thing => out.push_str(if as_value { "+" } else { "[[+]]" }),
            Self::Value(v) => {
                if as_value {
                    out.push_str(v.comparator.symbol());
                    out.push_str(&v.literal.wiki_value());
                } else {
                    out.push_str("[[:");
                    out.push_str(v.comparator.symbol());
                    out.push_str(&v.literal.wiki_value());
                    out.push_str("]]");
                }
            }
            Self::Disjunction(j) if as_value && j.children.iter().all(is_plain_value) => {
                for (i, child) in j.children.iter().enumerate() {
                    if i > 0 {
                        out.push_str("||");
                    }
                    child.render(out, true);
                }
            }
            _ if as_value => {
                out.push_str("<q>");
                self.render(out, false);
                out.push_str("</q>");
            }
            Self::Class(c) => {
                out.push_str("[[Category:");
                for (i, category) in c.categories.iter().enumerate() {
                    if i > 0 {
                        out.push_str("||");
                    }
                    out.push_str(&category.text());
                }
                if let Some(depth) = c.hierarchy_depth {
                    out.push_str(&format!("|+depth={depth}"));
                }
                out.push_str("]]");
            }
            Self::Namespace(n) => {
                out.push_str("[[");
                match namespace::name_of(n.namespace) {
                    Some(name) => out.push_str(name),
                    None => out.push_str(&n.namespace.to_string()),
                }
                out.push_str(":+]]");
            }
            Self::Concept(c) => {
                out.push_str("[[Concept:");
                out.push_str(&c.concept.text());
                out.push_str("]]");
            }
            Self::SomeProperty(p) => {
                out.push_str("[[");
                out.push_str(&p.property.to_string());
                out.push_str("::");
                p.inner.render(out, true);
                out.push_str("]]");
            }
            Self::Conjunction(j) => {
                for child in &j.children {
                    if matches!(child, Self::Disjunction(_)) {
                        out.push_str("<q>");
                        child.render(out, false);
                        out.push_str("</q>");
                    } else {
                        child.render(out, false);
                    }
                }
            }
            Self::Disjunction(j) => {
                for (i, child) in j.children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" OR ");
                    }
                    child.render(out, false);
                }
            }
        }
    }
}

fn is_plain_value(description: &Description) -> bool {
    matches!(description, Description::Value(_) | Description::Thing)
}
