//! Query segments: the nodes of the compiled join graph.

use std::fmt;

use askql_core::EntityId;
use indexmap::IndexMap;
use serde::Serialize;

/// Pass-local segment number. Allocation order equals pre-order of the
/// description tree.
pub type SegmentId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    /// Imposes no restriction. Never registered.
    NoQuery,
    /// Join against a relation, optionally filtered.
    Table,
    /// Resolved to a fixed id set, or to "all pages" when the set is empty.
    TrueValue,
    /// Transitive closure over the category hierarchy.
    ClassHierarchy,
    /// Transitive closure over the property hierarchy.
    PropertyHierarchy,
    Conjunction,
    Disjunction,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoQuery => "no-query",
            Self::Table => "table",
            Self::TrueValue => "true-value",
            Self::ClassHierarchy => "class-hierarchy",
            Self::PropertyHierarchy => "property-hierarchy",
            Self::Conjunction => "conjunction",
            Self::Disjunction => "disjunction",
        }
    }

    pub fn is_hierarchy(self) -> bool {
        matches!(self, Self::ClassHierarchy | Self::PropertyHierarchy)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a segment joins on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum JoinField {
    #[default]
    None,
    /// Qualified column, e.g. `t3.s_id`.
    Column(String),
    /// Literal id set (value shortcuts and hierarchy roots).
    Ids(Vec<EntityId>),
}

impl JoinField {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// How a child segment is attached to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "on", rename_all = "snake_case")]
pub enum Component {
    /// Member of a conjunction/disjunction.
    Member,
    /// Joined on the given expression of the parent.
    Join(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySegment {
    pub id: SegmentId,
    pub alias: String,
    pub kind: SegmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,
    #[serde(skip_serializing_if = "JoinField::is_none")]
    pub join_field: JoinField,
    /// Extra join text appended after the segment's own join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_fragment: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub components: IndexMap<SegmentId, Component>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub sort_fields: IndexMap<String, String>,
    /// Closure depth for hierarchy segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl QuerySegment {
    pub(crate) fn new(id: SegmentId, kind: SegmentKind) -> Self {
        Self {
            id,
            alias: format!("t{id}"),
            kind,
            join_table: None,
            join_field: JoinField::None,
            from: None,
            where_fragment: None,
            components: IndexMap::new(),
            sort_fields: IndexMap::new(),
            depth: None,
        }
    }

    /// `{alias}.{column}`
    pub fn column(&self, column: &str) -> String {
        format!("{}.{column}", self.alias)
    }

    pub(crate) fn where_len(&self) -> usize {
        self.where_fragment.as_ref().map_or(0, String::len)
    }

    /// Append `condition`, glued with `glue` unless it opens the filter or
    /// directly follows an open parenthesis.
    pub(crate) fn push_condition(&mut self, glue: &str, condition: &str) {
        let fragment = self.where_fragment.get_or_insert_with(String::new);
        if !fragment.is_empty() && !fragment.ends_with('(') {
            fragment.push_str(glue);
        }
        fragment.push_str(condition);
    }

    /// Close a group opened at byte `start`. A group that received no
    /// condition is removed again, glue included.
    pub(crate) fn close_group(&mut self, start: usize) {
        let Some(fragment) = self.where_fragment.as_mut() else {
            return;
        };
        if fragment.ends_with('(') {
            fragment.truncate(start);
        } else {
            fragment.push(')');
        }
        if fragment.is_empty() {
            self.where_fragment = None;
        }
    }
}
