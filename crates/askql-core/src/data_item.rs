//! Literal values, page and property references, and comparators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::namespace::{self, NamespaceId};

/// Reference to a wiki page: categories, concepts and plain page values
/// are all pages in some namespace.
///
/// Titles are kept in database-key form (underscores instead of spaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageRef {
    pub title: String,
    #[serde(default)]
    pub namespace: NamespaceId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interwiki: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subobject: String,
}

impl PageRef {
    pub fn new(title: impl AsRef<str>, namespace: NamespaceId) -> Self {
        Self {
            title: to_db_key(title.as_ref()),
            namespace,
            interwiki: String::new(),
            subobject: String::new(),
        }
    }

    pub fn main(title: impl AsRef<str>) -> Self {
        Self::new(title, namespace::MAIN)
    }

    pub fn category(title: impl AsRef<str>) -> Self {
        Self::new(title, namespace::CATEGORY)
    }

    pub fn concept(title: impl AsRef<str>) -> Self {
        Self::new(title, namespace::CONCEPT)
    }

    pub fn with_subobject(mut self, subobject: impl Into<String>) -> Self {
        self.subobject = subobject.into();
        self
    }

    /// Parse `Namespace:Title#subobject` text.
    ///
    /// A leading `:` is ignored. Prefixes that are not a known namespace
    /// stay part of the title, so `Foo:Bar` is the main-namespace page
    /// `Foo:Bar`.
    pub fn parse_prefixed(text: &str) -> Self {
        let text = text.trim();
        let text = text.strip_prefix(':').unwrap_or(text);

        let (text, subobject) = match text.split_once('#') {
            Some((page, sub)) => (page, sub.trim()),
            None => (text, ""),
        };

        let (ns, title) = match text.split_once(':') {
            Some((prefix, rest)) => match namespace::by_name(prefix) {
                Some(ns) if ns != namespace::MAIN => (ns, rest),
                _ => (namespace::MAIN, text),
            },
            None => (namespace::MAIN, text),
        };

        Self::new(title, ns).with_subobject(subobject)
    }

    pub fn db_key(&self) -> &str {
        &self.title
    }

    /// Title as displayed (spaces instead of underscores).
    pub fn text(&self) -> String {
        self.title.replace('_', " ")
    }

    /// `Namespace:Title` form; main-namespace pages carry no prefix.
    pub fn prefixed_text(&self) -> String {
        let mut out = match namespace::name_of(self.namespace) {
            Some("") => String::new(),
            Some(name) => format!("{name}:"),
            None => format!("{}:", self.namespace),
        };
        out.push_str(&self.text());
        if !self.subobject.is_empty() {
            out.push('#');
            out.push_str(&self.subobject);
        }
        out
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefixed_text())
    }
}

/// Reference to a property, possibly used in inverse direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyRef {
    pub key: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inverse: bool,
}

impl PropertyRef {
    /// Key of the predefined "is instance of category" property.
    pub const INSTANCE_OF: &'static str = "_INST";

    pub fn new(key: impl AsRef<str>) -> Self {
        Self {
            key: to_db_key(key.as_ref()),
            inverse: false,
        }
    }

    pub fn instance_of() -> Self {
        Self::new(Self::INSTANCE_OF)
    }

    /// The same property used in inverse direction.
    pub fn inverted(mut self) -> Self {
        self.inverse = !self.inverse;
        self
    }

    /// The property without its direction marker.
    pub fn forward(&self) -> Self {
        Self {
            key: self.key.clone(),
            inverse: false,
        }
    }

    /// Predefined properties have keys starting with `_`.
    pub fn is_predefined(&self) -> bool {
        self.key.starts_with('_')
    }

    pub fn label(&self) -> String {
        self.key.replace('_', " ")
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverse {
            f.write_str("-")?;
        }
        f.write_str(&self.label())
    }
}

/// Storage type of a data item. Every property has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataItemType {
    Page,
    Number,
    Text,
    Uri,
    Boolean,
}

impl DataItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Number => "number",
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DataItem {
    Page(PageRef),
    Number(f64),
    Text(String),
    Uri(String),
    Boolean(bool),
}

impl DataItem {
    pub fn di_type(&self) -> DataItemType {
        match self {
            Self::Page(_) => DataItemType::Page,
            Self::Number(_) => DataItemType::Number,
            Self::Text(_) => DataItemType::Text,
            Self::Uri(_) => DataItemType::Uri,
            Self::Boolean(_) => DataItemType::Boolean,
        }
    }

    pub fn as_page(&self) -> Option<&PageRef> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// String form used for sorting and for string comparisons.
    pub fn sort_key(&self) -> String {
        match self {
            Self::Page(page) => page.text(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) | Self::Uri(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
        }
    }

    /// Text as written in a query string.
    pub fn wiki_value(&self) -> String {
        match self {
            Self::Page(page) => page.prefixed_text(),
            other => other.sort_key(),
        }
    }
}

/// Format a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Abstract comparison operator of a value restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparator {
    #[default]
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
    Like,
    NotLike,
    /// LIKE against the literal itself, without wildcard translation.
    PrimLike,
    PrimNotLike,
}

impl Comparator {
    pub const ALL: [Comparator; 10] = [
        Self::Eq,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::Ne,
        Self::Like,
        Self::NotLike,
        Self::PrimLike,
        Self::PrimNotLike,
    ];

    /// Prefix written before a value in ask syntax.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "",
            Self::Lt => "<<",
            Self::Gt => ">>",
            Self::Le => "<",
            Self::Ge => ">",
            Self::Ne => "!",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::PrimLike => "~~",
            Self::PrimNotLike => "!~~",
        }
    }

    pub fn is_like(self) -> bool {
        matches!(
            self,
            Self::Like | Self::NotLike | Self::PrimLike | Self::PrimNotLike
        )
    }

    pub fn is_primitive(self) -> bool {
        matches!(self, Self::PrimLike | Self::PrimNotLike)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::Ne => "NE",
            Self::Like => "LIKE",
            Self::NotLike => "NOT_LIKE",
            Self::PrimLike => "PRIM_LIKE",
            Self::PrimNotLike => "PRIM_NOT_LIKE",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_db_key(text: &str) -> String {
    text.trim().replace(' ', "_")
}
