use askql_core::NamespaceDescription;
use askql_core::store::{SqlValue, tables};

use crate::builder::QueryBuilder;
use crate::segment::{JoinField, QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    pub(super) fn interpret_namespace(&mut self, d: &NamespaceDescription) -> QuerySegment {
        let mut segment = self.new_segment(SegmentKind::Table);
        segment.join_table = Some(tables::OBJECT_IDS.to_string());
        segment.join_field = JoinField::Column(segment.column("smw_id"));

        let ns = self.quote(&SqlValue::Int(i64::from(d.namespace)));
        segment.where_fragment = Some(format!("{}={ns}", segment.column("smw_namespace")));
        segment
    }
}
