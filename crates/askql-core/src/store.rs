//! Capabilities the compiler consumes from the backing store.
//!
//! The compiler never talks to a database itself. Identity lookups,
//! table layout, datatypes, cached concepts, query-string parsing,
//! full-text match conditions and literal quoting are all supplied by
//! the host through these traits.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data_item::{DataItem, DataItemType, PageRef, PropertyRef, format_number};
use crate::description::{Description, ValueDescription};
use crate::features::QueryFeatures;

/// Row id in the identity relation. `0` means "unknown".
pub type EntityId = u64;

pub const UNKNOWN_ID: EntityId = 0;

/// Well-known relation names.
pub mod tables {
    /// Identity/catalog relation: one row per page, property and subobject.
    pub const OBJECT_IDS: &str = "smw_object_ids";
    /// Materialized concept members.
    pub const CONCEPT_CACHE: &str = "smw_concept_cache";
}

pub trait IdentityResolver {
    /// Id of a page, or [`UNKNOWN_ID`].
    fn resolve_page(&self, page: &PageRef) -> EntityId;

    /// Id of a property (direction is ignored), or [`UNKNOWN_ID`].
    fn resolve_property(&self, property: &PropertyRef) -> EntityId;
}

/// Physical relation holding the values of one or more properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    pub name: String,
    /// Dedicated to a single property; no `p_id` column.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default = "default_true")]
    pub uses_subject_id: bool,
}

impl PropertyTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed: false,
            uses_subject_id: true,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn without_subject_id(mut self) -> Self {
        self.uses_subject_id = false;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn supports_subject_id(&self) -> bool {
        self.uses_subject_id
    }
}

fn default_true() -> bool {
    true
}

pub trait PropertyTableLocator {
    fn find_table(&self, property: &PropertyRef) -> Option<PropertyTable>;
}

/// A value ready to be embedded into filter text through a [`Quoter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Int(i64),
    /// Entity ids, which may exceed `i64::MAX`.
    Id(EntityId),
    Float(f64),
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Id(n) => write!(f, "{n}"),
            Self::Float(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Column-level access for one datatype.
pub trait FieldHandler {
    /// Column the datatype is indexed and compared on.
    fn index_field(&self) -> &str;

    /// Column/value pairs identifying `literal` in the property table.
    fn where_conditions(&self, literal: &DataItem) -> IndexMap<String, SqlValue>;
}

/// Field handler storing every datatype in a single index column.
#[derive(Debug, Clone)]
pub struct StandardFieldHandler {
    ty: DataItemType,
    index_field: Cow<'static, str>,
}

impl StandardFieldHandler {
    pub const PAGE: Self = Self::new(DataItemType::Page, "o_id");
    pub const NUMBER: Self = Self::new(DataItemType::Number, "o_sortkey");
    pub const TEXT: Self = Self::new(DataItemType::Text, "o_hash");
    pub const URI: Self = Self::new(DataItemType::Uri, "o_serialized");
    pub const BOOLEAN: Self = Self::new(DataItemType::Boolean, "o_value");

    pub const fn new(ty: DataItemType, index_field: &'static str) -> Self {
        Self {
            ty,
            index_field: Cow::Borrowed(index_field),
        }
    }

    pub fn with_index_field(ty: DataItemType, index_field: impl Into<String>) -> Self {
        Self {
            ty,
            index_field: Cow::Owned(index_field.into()),
        }
    }

    pub fn standard(ty: DataItemType) -> Self {
        match ty {
            DataItemType::Page => Self::PAGE,
            DataItemType::Number => Self::NUMBER,
            DataItemType::Text => Self::TEXT,
            DataItemType::Uri => Self::URI,
            DataItemType::Boolean => Self::BOOLEAN,
        }
    }

    pub fn data_item_type(&self) -> DataItemType {
        self.ty
    }
}

impl FieldHandler for StandardFieldHandler {
    fn index_field(&self) -> &str {
        &self.index_field
    }

    fn where_conditions(&self, literal: &DataItem) -> IndexMap<String, SqlValue> {
        let value = match literal {
            DataItem::Page(page) => SqlValue::Text(page.db_key().to_string()),
            DataItem::Number(n) => SqlValue::Float(*n),
            DataItem::Text(s) | DataItem::Uri(s) => SqlValue::Text(s.clone()),
            DataItem::Boolean(b) => SqlValue::Int(i64::from(*b)),
        };
        IndexMap::from([(self.index_field.to_string(), value)])
    }
}

pub trait DatatypeRegistry {
    fn datatype_of(&self, property: &PropertyRef) -> DataItemType;

    fn field_handler(&self, ty: DataItemType) -> &dyn FieldHandler;
}

/// Persisted concept definition and cache bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRow {
    pub id: EntityId,
    /// Serialized query string of the concept definition.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub features: QueryFeatures,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub cache_date: Option<DateTime<Utc>>,
}

pub trait ConceptStore {
    fn fetch_concept_row(&self, id: EntityId) -> Option<ConceptRow>;
}

/// Concept store without any concepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConcepts;

impl ConceptStore for NoConcepts {
    fn fetch_concept_row(&self, _id: EntityId) -> Option<ConceptRow> {
        None
    }
}

/// Failure reported by a [`QueryParser`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct QueryParseError {
    pub message: String,
    /// Byte offset into the query text, when known.
    pub offset: Option<usize>,
}

impl QueryParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Turns a serialized query string back into a description.
pub trait QueryParser {
    fn parse(&self, text: &str) -> Result<Description, QueryParseError>;
}

/// Parser that rejects every input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQueryParser;

impl QueryParser for NoQueryParser {
    fn parse(&self, _text: &str) -> Result<Description, QueryParseError> {
        Err(QueryParseError::new("no query parser configured"))
    }
}

/// Filter produced by the full-text subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCondition {
    pub join_table: String,
    pub join_field: String,
    pub where_fragment: String,
}

pub trait MatchConditionProvider {
    fn is_enabled(&self) -> bool;

    fn meets_minimum_token_length(&self, text: &str) -> bool;

    fn can_apply(&self, description: &ValueDescription) -> bool;

    /// Build the filter for `description` using `alias` for the joined table.
    fn build_fragment(&self, description: &ValueDescription, alias: &str) -> MatchCondition;
}

/// Full-text matching switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMatchConditions;

impl MatchConditionProvider for NoMatchConditions {
    fn is_enabled(&self) -> bool {
        false
    }

    fn meets_minimum_token_length(&self, _text: &str) -> bool {
        false
    }

    fn can_apply(&self, _description: &ValueDescription) -> bool {
        false
    }

    fn build_fragment(&self, _description: &ValueDescription, _alias: &str) -> MatchCondition {
        unreachable!("disabled match-condition provider was asked for a fragment")
    }
}

/// Embeds literals into filter text.
pub trait Quoter {
    fn quote(&self, value: &SqlValue) -> String;
}

/// Standard SQL quoting: numbers bare, strings in single quotes with
/// embedded quotes doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiQuoter;

impl Quoter for AnsiQuoter {
    fn quote(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Int(_) | SqlValue::Id(_) | SqlValue::Float(_) => value.to_string(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}
