use askql_core::Junction;

use crate::Result;
use crate::builder::QueryBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::segment::{Component, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    /// Boolean segment over the children that restrict anything.
    pub(super) fn interpret_junction(
        &mut self,
        junction: &Junction,
        kind: SegmentKind,
    ) -> Result<QuerySegment> {
        let mut segment = self.new_segment(kind);

        if junction.children.is_empty() {
            self.report(DiagnosticKind::EmptyJunction)
                .param(kind.as_str())
                .emit();
        }

        for child in &junction.children {
            if let Some(id) = self.segment_from(child)? {
                segment.components.insert(id, Component::Member);
            }
        }

        if segment.components.is_empty() {
            segment.kind = SegmentKind::NoQuery;
        }
        Ok(segment)
    }
}
