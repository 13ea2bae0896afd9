use askql_core::{ClassDescription, Description, PropertyRef, UNKNOWN_ID};

use crate::builder::QueryBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::segment::{Component, JoinField, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    /// Instance-of join with a class-hierarchy child over the resolved
    /// categories.
    pub(super) fn interpret_class(&mut self, d: &ClassDescription) -> QuerySegment {
        let mut segment = self.new_segment(SegmentKind::Table);
        let ids: Vec<_> = d
            .categories
            .iter()
            .map(|category| self.env.ids.resolve_page(category))
            .filter(|&id| id != UNKNOWN_ID)
            .collect();

        if ids.is_empty() {
            self.report(DiagnosticKind::UnknownCategories)
                .param(Description::Class(d.clone()).to_query_string())
                .emit();
            segment.kind = SegmentKind::TrueValue;
            return segment;
        }

        let Some(table) = self.env.tables.find_table(&PropertyRef::instance_of()) else {
            self.report(DiagnosticKind::NoPropertyTable)
                .param(PropertyRef::INSTANCE_OF)
                .emit();
            segment.kind = SegmentKind::NoQuery;
            return segment;
        };

        let mut hierarchy = self.new_segment(SegmentKind::ClassHierarchy);
        let limit = self.config.subcategory_depth;
        hierarchy.depth = Some(d.hierarchy_depth.map_or(limit, |depth| depth.min(limit)));
        hierarchy.join_field = JoinField::Ids(ids);

        segment.join_table = Some(table.name);
        segment.join_field = JoinField::Column(segment.column("s_id"));
        let on = segment.column("o_id");
        segment.components.insert(hierarchy.id, Component::Join(on));

        self.add_segment(hierarchy);
        segment
    }
}
