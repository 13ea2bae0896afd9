//! Concept expansion: read the materialized cache or recompile the stored
//! definition.

use askql_core::store::{ConceptRow, EntityId, SqlValue, tables};
use askql_core::{ConceptDescription, Description, PageRef};
use chrono::{DateTime, TimeDelta, Utc};

use crate::Result;
use crate::builder::QueryBuilder;
use crate::config::ConceptCaching;
use crate::diagnostics::DiagnosticKind;
use crate::segment::{JoinField, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    pub(super) fn interpret_concept(&mut self, d: &ConceptDescription) -> Result<QuerySegment> {
        let segment = self.new_segment(SegmentKind::NoQuery);
        let id = self.env.ids.resolve_page(&d.concept);
        let key = format!("concept-{id}");

        if self.guard.is_marked(&key) {
            self.report(DiagnosticKind::CircularCondition)
                .param(Description::Concept(d.clone()).to_query_string())
                .emit();
            return Ok(segment);
        }

        let limit = self.config.max_concept_nesting;
        if self.guard.depth() >= limit {
            self.report(DiagnosticKind::ConceptNestingTooDeep)
                .param(d.concept.prefixed_text())
                .param(limit.to_string())
                .emit();
            return Ok(segment);
        }

        self.with_mark(key, |this| this.expand_concept(d, id, segment))
    }

    fn expand_concept(
        &mut self,
        d: &ConceptDescription,
        id: EntityId,
        mut segment: QuerySegment,
    ) -> Result<QuerySegment> {
        let Some(row) = self.env.concepts.fetch_concept_row(id) else {
            tracing::debug!(concept = %d.concept, "no stored concept");
            return Ok(segment);
        };

        let computable = self.is_computable(&row);
        if let Some(cache_date) = row.cache_date {
            let fresh = self.cache_cutoff().is_none_or(|cutoff| cache_date > cutoff);
            if fresh || !computable {
                tracing::debug!(concept = %d.concept, fresh, computable, "reading concept cache");
                segment.kind = SegmentKind::Table;
                segment.join_table = Some(tables::CONCEPT_CACHE.to_string());
                segment.join_field = JoinField::Column(segment.column("s_id"));
                let id = self.quote(&SqlValue::Id(id));
                segment.where_fragment = Some(format!("{}={id}", segment.column("o_id")));
                return Ok(segment);
            }
        }

        if !computable {
            self.report(DiagnosticKind::ConceptNotCached)
                .param(d.concept.prefixed_text())
                .emit();
            return Ok(segment);
        }

        let Some(text) = row.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            tracing::debug!(concept = %d.concept, "concept has no definition");
            return Ok(segment);
        };

        let description = match self.env.parser.parse(text) {
            Ok(description) => description,
            Err(err) => {
                self.report(DiagnosticKind::ConceptParseFailed)
                    .param(d.concept.prefixed_text())
                    .param(err.message)
                    .emit();
                return Ok(segment);
            }
        };

        if cites_concept(&description, &d.concept) {
            self.report(DiagnosticKind::CircularCondition)
                .param(Description::Concept(d.clone()).to_query_string())
                .emit();
            return Ok(segment);
        }

        tracing::debug!(concept = %d.concept, "recompiling concept");
        match self.segment_from(&description)? {
            Some(inner) => Ok(self.take_segment(inner).unwrap_or(segment)),
            None => {
                self.report(DiagnosticKind::EmptySubquery).emit();
                Ok(segment)
            }
        }
    }

    /// Caches written before this instant are stale. `None` when the
    /// lifetime reaches past the representable range.
    fn cache_cutoff(&self) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::try_minutes(self.config.concept_cache_lifetime_minutes)?;
        self.now.checked_sub_signed(lifetime)
    }

    fn is_computable(&self, row: &ConceptRow) -> bool {
        let config = self.config;
        match config.concept_caching {
            ConceptCaching::None => true,
            ConceptCaching::Hard => {
                row.features.is_subset_of(config.concept_features)
                    && row.size <= config.concept_max_size
                    && row.depth <= config.concept_max_depth
            }
            ConceptCaching::All => false,
        }
    }
}

/// Whether `description` names `concept` directly, looking through
/// boolean combinations only.
fn cites_concept(description: &Description, concept: &PageRef) -> bool {
    match description {
        Description::Concept(c) => c.concept == *concept,
        Description::Conjunction(j) | Description::Disjunction(j) => {
            j.children.iter().any(|child| cites_concept(child, concept))
        }
        _ => false,
    }
}
