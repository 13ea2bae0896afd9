use askql_core::store::{SqlValue, tables};
use askql_core::{Comparator, DataItem, DataItemType, Description, ValueDescription};

use crate::Result;
use crate::builder::QueryBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::segment::{JoinField, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    /// Top-level page value.
    pub(super) fn interpret_value(&mut self, d: &ValueDescription) -> Result<QuerySegment> {
        let mut segment = self.new_segment(SegmentKind::TrueValue);

        let DataItem::Page(page) = &d.literal else {
            self.report(DiagnosticKind::NonPageValue)
                .param(Description::Value(d.clone()).to_query_string())
                .emit();
            segment.kind = SegmentKind::NoQuery;
            return Ok(segment);
        };

        if d.comparator == Comparator::Eq {
            let id = self.env.ids.resolve_page(page);
            segment.join_field = JoinField::Ids(vec![id]);
            return Ok(segment);
        }

        segment.kind = SegmentKind::Table;

        if self.accepts_match_condition(d) {
            let condition = self.env.match_conditions.build_fragment(d, &segment.alias);
            segment.join_table = Some(condition.join_table);
            segment.join_field = JoinField::Column(condition.join_field);
            segment.where_fragment = Some(condition.where_fragment);
            return Ok(segment);
        }

        let mut operand = d.literal.sort_key();
        let operator = self
            .comparators
            .map_comparator(d.comparator, DataItemType::Page, &mut operand)?;

        segment.join_table = Some(tables::OBJECT_IDS.to_string());
        segment.join_field = JoinField::Column(segment.column("smw_id"));
        segment.where_fragment = Some(format!(
            "{}{operator}{}",
            segment.column("smw_sortkey"),
            self.quote(&SqlValue::Text(operand))
        ));
        Ok(segment)
    }

    /// Whether a like-family restriction goes to the full-text provider
    /// instead of a LIKE filter.
    pub(super) fn accepts_match_condition(&self, d: &ValueDescription) -> bool {
        let provider = self.env.match_conditions;
        if !d.comparator.is_like() || !provider.is_enabled() {
            return false;
        }
        // `[[~~text]]`: wide proximity search, no token policy applies.
        if d.property.is_none() && d.comparator.is_primitive() {
            return true;
        }
        provider.meets_minimum_token_length(&d.literal.sort_key()) && provider.can_apply(d)
    }
}
