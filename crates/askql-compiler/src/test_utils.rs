use askql_core::store::{
    ConceptRow, MatchCondition, MatchConditionProvider, PropertyTable, QueryParseError,
    QueryParser,
};
use askql_core::{
    DataItem, DataItemType, Description, MemoryStore, PageRef, PropertySpec, QueryFeatures,
    ValueDescription,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::{Collaborators, CompiledQuery, CompilerConfig, QueryBuilder};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Categories, pages and one property of every datatype.
pub(crate) fn store() -> MemoryStore {
    MemoryStore::new()
        .with_category("Cat1", 5)
        .with_category("Cat2", 9)
        .with_category("City", 11)
        .with_category("Country", 12)
        .with_page(PageRef::main("Berlin"), 7)
        .with_page(PageRef::main("Germany"), 8)
        .with_property(
            "hasAge",
            PropertySpec::new(20, DataItemType::Number).table(PropertyTable::new("smw_di_number")),
        )
        .with_property(
            "Capital",
            PropertySpec::new(21, DataItemType::Page).table(PropertyTable::new("smw_di_wikipage")),
        )
        .with_property(
            "Population",
            PropertySpec::new(22, DataItemType::Number).table(PropertyTable::new("smw_di_number")),
        )
        .with_property(
            "Located in",
            PropertySpec::new(23, DataItemType::Page)
                .table(PropertyTable::new("smw_fpt_located_in").fixed()),
        )
        .with_property(
            "Homepage",
            PropertySpec::new(24, DataItemType::Uri).table(PropertyTable::new("smw_di_uri")),
        )
        .with_property(
            "Name",
            PropertySpec::new(25, DataItemType::Text).table(PropertyTable::new("smw_di_blob")),
        )
        .with_property(
            "Legacy",
            PropertySpec::new(26, DataItemType::Number)
                .table(PropertyTable::new("smw_di_legacy").without_subject_id()),
        )
        .with_property("Note", PropertySpec::new(27, DataItemType::Text))
        .with_index_field(DataItemType::Number, "value")
        .with_index_field(DataItemType::Text, "o_blob")
}

pub(crate) fn concept_row(id: u64, text: &str) -> ConceptRow {
    ConceptRow {
        id,
        text: Some(text.to_string()),
        features: QueryFeatures::CATEGORY,
        size: 1,
        depth: 0,
        cache_date: None,
    }
}

pub(crate) fn compile(description: &Description) -> CompiledQuery {
    compile_with(&store(), &CompilerConfig::default(), description)
}

pub(crate) fn compile_with(
    store: &MemoryStore,
    config: &CompilerConfig,
    description: &Description,
) -> CompiledQuery {
    QueryBuilder::new(Collaborators::from_store(store), config)
        .clock(now())
        .compile(description)
        .expect("description compiles")
}

pub(crate) fn dump(query: &CompiledQuery) -> String {
    query.printer().dump()
}

/// Parses exactly the texts it was given.
#[derive(Default)]
pub(crate) struct StubParser {
    known: Vec<(&'static str, Description)>,
}

impl StubParser {
    pub(crate) fn with(mut self, text: &'static str, description: Description) -> Self {
        self.known.push((text, description));
        self
    }
}

impl QueryParser for StubParser {
    fn parse(&self, text: &str) -> Result<Description, QueryParseError> {
        self.known
            .iter()
            .find(|(known, _)| *known == text)
            .map(|(_, d)| d.clone())
            .ok_or_else(|| QueryParseError::new(format!("unexpected query {text:?}")).at(0))
    }
}

/// Full-text provider accepting text and page literals.
pub(crate) struct FulltextStub {
    pub(crate) min_length: usize,
}

impl MatchConditionProvider for FulltextStub {
    fn is_enabled(&self) -> bool {
        true
    }

    fn meets_minimum_token_length(&self, text: &str) -> bool {
        let token = text.trim_matches(|c| c == '*' || c == '~');
        token.chars().count() >= self.min_length
    }

    fn can_apply(&self, description: &ValueDescription) -> bool {
        matches!(description.literal, DataItem::Text(_) | DataItem::Page(_))
    }

    fn build_fragment(&self, description: &ValueDescription, alias: &str) -> MatchCondition {
        let term = description.literal.sort_key();
        MatchCondition {
            join_table: "smw_ft_search".to_string(),
            join_field: format!("{alias}.s_id"),
            where_fragment: format!(
                "MATCH({alias}.o_text) AGAINST ('{}' IN BOOLEAN MODE)",
                term.trim_matches('*')
            ),
        }
    }
}
