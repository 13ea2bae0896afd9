//! In-memory store backing tests and the CLI.
//!
//! A fixture lists pages, properties and concept rows; the store answers
//! every collaborator trait the compiler needs from it.
//!
//! ```json
//! {
//!   "pages": { "Category:City": 5, "Berlin": 7 },
//!   "properties": {
//!     "Population": { "id": 20, "type": "number", "table": { "name": "smw_di_number" } }
//!   },
//!   "concepts": {
//!     "Big cities": { "id": 30, "text": "[[Category:City]][[Population::>1000000]]" }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data_item::{DataItemType, PageRef, PropertyRef};
use crate::store::{
    ConceptRow, ConceptStore, DatatypeRegistry, EntityId, FieldHandler, IdentityResolver,
    PropertyTable, PropertyTableLocator, StandardFieldHandler, UNKNOWN_ID,
};

/// Errors raised while loading a store fixture.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store fixture `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store fixture: {0}")]
    Json(#[from] serde_json::Error),
}

/// Declared layout of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub id: EntityId,
    #[serde(rename = "type", default = "default_type")]
    pub ty: DataItemType,
    #[serde(default)]
    pub table: Option<PropertyTable>,
}

impl PropertySpec {
    pub fn new(id: EntityId, ty: DataItemType) -> Self {
        Self { id, ty, table: None }
    }

    pub fn table(mut self, table: PropertyTable) -> Self {
        self.table = Some(table);
        self
    }
}

fn default_type() -> DataItemType {
    DataItemType::Page
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Fixture {
    #[serde(default)]
    pages: IndexMap<String, EntityId>,
    #[serde(default)]
    properties: IndexMap<String, PropertySpec>,
    #[serde(default)]
    concepts: IndexMap<String, ConceptRow>,
    #[serde(default)]
    index_fields: IndexMap<DataItemType, String>,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    pages: HashMap<PageRef, EntityId>,
    properties: HashMap<String, PropertySpec>,
    concepts: HashMap<EntityId, ConceptRow>,
    handlers: HashMap<DataItemType, StandardFieldHandler>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Id of the predefined instance-of property.
    pub const INSTANCE_OF_ID: EntityId = 1;
    /// Relation holding category membership.
    pub const INSTANCE_TABLE: &'static str = "smw_fpt_inst";

    /// Empty store knowing only the instance-of property.
    pub fn new() -> Self {
        let handlers = [
            DataItemType::Page,
            DataItemType::Number,
            DataItemType::Text,
            DataItemType::Uri,
            DataItemType::Boolean,
        ]
        .into_iter()
        .map(|ty| (ty, StandardFieldHandler::standard(ty)))
        .collect();

        Self {
            pages: HashMap::new(),
            properties: HashMap::new(),
            concepts: HashMap::new(),
            handlers,
        }
        .with_property(
            PropertyRef::INSTANCE_OF,
            PropertySpec::new(Self::INSTANCE_OF_ID, DataItemType::Page)
                .table(PropertyTable::new(Self::INSTANCE_TABLE).fixed()),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let mut store = Self::new();

        for (title, id) in fixture.pages {
            store = store.with_page(PageRef::parse_prefixed(&title), id);
        }
        for (key, spec) in fixture.properties {
            store = store.with_property(&key, spec);
        }
        for (title, row) in fixture.concepts {
            store = store.with_concept(&title, row);
        }
        for (ty, column) in fixture.index_fields {
            store = store.with_index_field(ty, column);
        }

        Ok(store)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_page(mut self, page: PageRef, id: EntityId) -> Self {
        self.pages.insert(page, id);
        self
    }

    pub fn with_category(self, title: &str, id: EntityId) -> Self {
        self.with_page(PageRef::category(title), id)
    }

    pub fn with_property(mut self, key: &str, spec: PropertySpec) -> Self {
        self.properties.insert(PropertyRef::new(key).key, spec);
        self
    }

    /// Register a concept row. The concept page itself resolves to the
    /// row id. Titles may carry the `Concept:` prefix or not.
    pub fn with_concept(mut self, title: &str, row: ConceptRow) -> Self {
        let title = title.strip_prefix("Concept:").unwrap_or(title);
        self.pages.insert(PageRef::concept(title), row.id);
        self.concepts.insert(row.id, row);
        self
    }

    /// Override the index column of a datatype.
    pub fn with_index_field(mut self, ty: DataItemType, column: impl Into<String>) -> Self {
        self.handlers
            .insert(ty, StandardFieldHandler::with_index_field(ty, column));
        self
    }

    pub fn property(&self, property: &PropertyRef) -> Option<&PropertySpec> {
        self.properties.get(&property.key)
    }
}

impl IdentityResolver for MemoryStore {
    fn resolve_page(&self, page: &PageRef) -> EntityId {
        self.pages.get(page).copied().unwrap_or(UNKNOWN_ID)
    }

    fn resolve_property(&self, property: &PropertyRef) -> EntityId {
        self.property(property).map_or(UNKNOWN_ID, |spec| spec.id)
    }
}

impl PropertyTableLocator for MemoryStore {
    fn find_table(&self, property: &PropertyRef) -> Option<PropertyTable> {
        self.property(property).and_then(|spec| spec.table.clone())
    }
}

impl DatatypeRegistry for MemoryStore {
    fn datatype_of(&self, property: &PropertyRef) -> DataItemType {
        self.property(property)
            .map_or(DataItemType::Page, |spec| spec.ty)
    }

    fn field_handler(&self, ty: DataItemType) -> &dyn FieldHandler {
        &self.handlers[&ty]
    }
}

impl ConceptStore for MemoryStore {
    fn fetch_concept_row(&self, id: EntityId) -> Option<ConceptRow> {
        self.concepts.get(&id).cloned()
    }
}
