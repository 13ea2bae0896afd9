use askql_core::store::{FieldHandler, tables};
use askql_core::{DataItemType, SomePropertyDescription};

use super::scalar::BoolOp;
use crate::Result;
use crate::builder::QueryBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::segment::{Component, JoinField, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    /// Join against the property's table, restricted by the inner
    /// description.
    pub(super) fn interpret_some_property(
        &mut self,
        d: &SomePropertyDescription,
    ) -> Result<QuerySegment> {
        let env = self.env;
        let property = &d.property;
        let mut segment = self.new_segment(SegmentKind::Table);

        let Some(table) = env.tables.find_table(property) else {
            self.report(DiagnosticKind::NoPropertyTable)
                .param(property.label())
                .emit();
            segment.kind = SegmentKind::NoQuery;
            return Ok(segment);
        };
        if !table.supports_subject_id() {
            self.report(DiagnosticKind::PropertyWithoutSubject)
                .param(property.label())
                .emit();
            segment.kind = SegmentKind::NoQuery;
            return Ok(segment);
        }

        let ty = env.datatypes.datatype_of(property);
        if property.inverse && ty != DataItemType::Page {
            self.report(DiagnosticKind::InverseNonPageProperty)
                .param(property.label())
                .emit();
            segment.kind = SegmentKind::NoQuery;
            return Ok(segment);
        }

        segment.join_table = Some(table.name.clone());

        // Shared tables hold many properties; restrict to this one and its
        // sub-properties.
        if !table.is_fixed() {
            let mut hierarchy = self.new_segment(SegmentKind::PropertyHierarchy);
            hierarchy.join_field = JoinField::Ids(vec![env.ids.resolve_property(property)]);
            hierarchy.depth = Some(self.config.subproperty_depth);
            let on = segment.column("p_id");
            segment.components.insert(hierarchy.id, Component::Join(on));
            self.add_segment(hierarchy);
        }

        let handler = env.datatypes.field_handler(ty);
        if ty == DataItemType::Page {
            self.compile_page_property(&mut segment, d, handler)?;
        } else {
            segment.join_field = JoinField::Column(segment.column("s_id"));
            self.compile_scalar(&mut segment, &d.inner, handler, ty, BoolOp::And)?;
            if self.is_sort_key(&property.key) {
                let column = segment.column(handler.index_field());
                segment.sort_fields.insert(property.key.clone(), column);
            }
        }

        Ok(segment)
    }

    fn compile_page_property(
        &mut self,
        segment: &mut QuerySegment,
        d: &SomePropertyDescription,
        handler: &dyn FieldHandler,
    ) -> Result<()> {
        let object = handler.index_field();
        let (near, far) = if d.property.inverse {
            (object, "s_id")
        } else {
            ("s_id", object)
        };
        segment.join_field = JoinField::Column(segment.column(near));
        let far = segment.column(far);

        if let Some(child) = self.segment_from(&d.inner)? {
            segment.components.insert(child, Component::Join(far.clone()));
        }

        if self.is_sort_key(&d.property.key) {
            let ids = format!("ids{}", segment.alias);
            segment.from = Some(format!(
                " INNER JOIN {} AS {ids} ON {ids}.smw_id={far}",
                tables::OBJECT_IDS
            ));
            segment
                .sort_fields
                .insert(d.property.key.clone(), format!("{ids}.smw_sortkey"));
        }
        Ok(())
    }
}
