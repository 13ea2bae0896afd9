//! Pass-scoped compilation state.
//!
//! A `QueryBuilder` owns everything one compilation mutates: the segment
//! counter, the segment registry, the requested sort keys, the concept
//! guard and the diagnostics. `compile` consumes it, so a builder can never
//! be reused for a second query.

use askql_core::store::{
    AnsiQuoter, ConceptStore, DatatypeRegistry, IdentityResolver, MatchConditionProvider,
    NoConcepts, NoMatchConditions, NoQueryParser, PropertyTableLocator, QueryParser, Quoter,
    SqlValue,
};
use askql_core::{Description, PropertyRef};
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};

use crate::Result;
use crate::comparator::ComparatorMapper;
use crate::compiled::CompiledQuery;
use crate::config::CompilerConfig;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};
use crate::guard::CircularReferenceGuard;
use crate::segment::{QuerySegment, SegmentId, SegmentKind};

/// The store capabilities one pass reads from.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub(crate) ids: &'a dyn IdentityResolver,
    pub(crate) tables: &'a dyn PropertyTableLocator,
    pub(crate) datatypes: &'a dyn DatatypeRegistry,
    pub(crate) concepts: &'a dyn ConceptStore,
    pub(crate) parser: &'a dyn QueryParser,
    pub(crate) match_conditions: &'a dyn MatchConditionProvider,
    pub(crate) quoter: &'a dyn Quoter,
}

impl<'a> Collaborators<'a> {
    /// Required capabilities only. Concepts resolve to nothing, concept
    /// text cannot be parsed, full-text matching is off and literals are
    /// quoted ANSI style until replaced.
    pub fn new(
        ids: &'a dyn IdentityResolver,
        tables: &'a dyn PropertyTableLocator,
        datatypes: &'a dyn DatatypeRegistry,
    ) -> Self {
        Self {
            ids,
            tables,
            datatypes,
            concepts: &NoConcepts,
            parser: &NoQueryParser,
            match_conditions: &NoMatchConditions,
            quoter: &AnsiQuoter,
        }
    }

    /// All store-backed capabilities from one object.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: IdentityResolver + PropertyTableLocator + DatatypeRegistry + ConceptStore,
    {
        Self::new(store, store, store).concepts(store)
    }

    pub fn concepts(mut self, concepts: &'a dyn ConceptStore) -> Self {
        self.concepts = concepts;
        self
    }

    pub fn parser(mut self, parser: &'a dyn QueryParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn match_conditions(mut self, provider: &'a dyn MatchConditionProvider) -> Self {
        self.match_conditions = provider;
        self
    }

    pub fn quoter(mut self, quoter: &'a dyn Quoter) -> Self {
        self.quoter = quoter;
        self
    }
}

pub struct QueryBuilder<'a> {
    pub(crate) env: Collaborators<'a>,
    pub(crate) config: &'a CompilerConfig,
    pub(crate) comparators: ComparatorMapper,
    pub(crate) now: DateTime<Utc>,
    pub(crate) guard: CircularReferenceGuard,
    next_id: SegmentId,
    segments: IndexMap<SegmentId, QuerySegment>,
    sort_keys: IndexSet<String>,
    diagnostics: Diagnostics,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(env: Collaborators<'a>, config: &'a CompilerConfig) -> Self {
        Self {
            env,
            config,
            comparators: ComparatorMapper::default(),
            now: Utc::now(),
            guard: CircularReferenceGuard::default(),
            next_id: 0,
            segments: IndexMap::new(),
            sort_keys: IndexSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Property keys the caller sorts by. Page and scalar property
    /// restrictions on these keys bind a sort column.
    pub fn sort_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sort_keys = keys
            .into_iter()
            .map(|k| PropertyRef::new(k.as_ref().trim()).key)
            .collect();
        self
    }

    /// Reference time for concept cache freshness.
    pub fn clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn comparators(mut self, mapper: ComparatorMapper) -> Self {
        self.comparators = mapper;
        self
    }

    /// Compile `description` into a join graph.
    ///
    /// Semantic problems degrade the affected segment and are reported in
    /// the result's diagnostics; only contract violations are errors.
    pub fn compile(mut self, description: &Description) -> Result<CompiledQuery> {
        let _span = tracing::debug_span!("compile", query = %description.to_query_string())
            .entered();

        let root = self.segment_from(description)?;
        self.segments.sort_keys();

        let mut sort_fields = IndexMap::new();
        for segment in self.segments.values() {
            for (key, column) in &segment.sort_fields {
                sort_fields
                    .entry(key.clone())
                    .or_insert_with(|| column.clone());
            }
        }

        tracing::debug!(
            segments = self.segments.len(),
            diagnostics = self.diagnostics.len(),
            "compilation finished"
        );

        Ok(CompiledQuery::new(
            root,
            self.segments,
            sort_fields,
            self.diagnostics,
        ))
    }

    /// Interpret `description` and register the result.
    ///
    /// Returns `None` when the description imposes no restriction.
    pub(crate) fn segment_from(&mut self, description: &Description) -> Result<Option<SegmentId>> {
        tracing::trace!(kind = description.kind_name(), "interpreting");
        let segment = self.interpret(description)?;
        Ok(self.register(segment))
    }

    fn register(&mut self, segment: QuerySegment) -> Option<SegmentId> {
        if segment.kind == SegmentKind::NoQuery {
            tracing::trace!(segment = %segment.alias, "dropped unrestricted segment");
            return None;
        }
        let id = segment.id;
        tracing::debug!(segment = %segment.alias, kind = %segment.kind, "registered");
        self.segments.insert(id, segment);
        Some(id)
    }

    /// Allocate a fresh segment with the next id.
    pub(crate) fn new_segment(&mut self, kind: SegmentKind) -> QuerySegment {
        let id = self.next_id;
        self.next_id += 1;
        QuerySegment::new(id, kind)
    }

    /// Register a helper segment (hierarchy closures) directly.
    pub(crate) fn add_segment(&mut self, segment: QuerySegment) {
        tracing::debug!(segment = %segment.alias, kind = %segment.kind, "registered");
        self.segments.insert(segment.id, segment);
    }

    /// Remove a registered segment so the caller can return it as its own.
    pub(crate) fn take_segment(&mut self, id: SegmentId) -> Option<QuerySegment> {
        self.segments.shift_remove(&id)
    }

    pub(crate) fn is_sort_key(&self, key: &str) -> bool {
        self.sort_keys.contains(key)
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(kind)
    }

    pub(crate) fn quote(&self, value: &SqlValue) -> String {
        self.env.quoter.quote(value)
    }
}
