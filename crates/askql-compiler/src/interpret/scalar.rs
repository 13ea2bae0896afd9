//! Scalar property restrictions compiled into the property table's own
//! filter.

use askql_core::store::{FieldHandler, SqlValue};
use askql_core::{DataItemType, Description, ValueDescription};

use crate::builder::QueryBuilder;
use crate::segment::{JoinField, QuerySegment};
use crate::{CompileError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    fn glue(self) -> &'static str {
        match self {
            BoolOp::And => " AND ",
            BoolOp::Or => " OR ",
        }
    }
}

impl QueryBuilder<'_> {
    /// Append the conditions of `d` to `segment`'s filter, joined to what
    /// is already there by `op`.
    pub(super) fn compile_scalar(
        &mut self,
        segment: &mut QuerySegment,
        d: &Description,
        handler: &dyn FieldHandler,
        ty: DataItemType,
        op: BoolOp,
    ) -> Result<()> {
        match d {
            Description::Value(v) => self.compile_scalar_value(segment, v, handler, ty, op),
            Description::Conjunction(j) => {
                self.compile_scalar_group(segment, &j.children, handler, ty, op, BoolOp::And)
            }
            Description::Disjunction(j) => {
                self.compile_scalar_group(segment, &j.children, handler, ty, op, BoolOp::Or)
            }
            Description::Thing => Ok(()),
            other => Err(CompileError::UnsupportedScalarDescription(other.kind_name())),
        }
    }

    fn compile_scalar_group(
        &mut self,
        segment: &mut QuerySegment,
        children: &[Description],
        handler: &dyn FieldHandler,
        ty: DataItemType,
        outer: BoolOp,
        inner: BoolOp,
    ) -> Result<()> {
        // A lone child needs no grouping and attaches with the outer glue.
        if children.len() < 2 || inner == outer {
            let op = if children.len() < 2 { outer } else { inner };
            for child in children {
                self.compile_scalar(segment, child, handler, ty, op)?;
            }
            return Ok(());
        }

        let start = segment.where_len();
        segment.push_condition(outer.glue(), "(");
        for child in children {
            self.compile_scalar(segment, child, handler, ty, inner)?;
        }
        segment.close_group(start);
        Ok(())
    }

    fn compile_scalar_value(
        &mut self,
        segment: &mut QuerySegment,
        v: &ValueDescription,
        handler: &dyn FieldHandler,
        ty: DataItemType,
        op: BoolOp,
    ) -> Result<()> {
        if self.accepts_match_condition(v) {
            let condition = self.env.match_conditions.build_fragment(v, &segment.alias);
            segment.join_table = Some(condition.join_table);
            segment.join_field = JoinField::Column(condition.join_field);
            segment.components.clear();
            segment.push_condition(op.glue(), &condition.where_fragment);
            return Ok(());
        }

        let index_field = handler.index_field();
        let value = handler
            .where_conditions(&v.literal)
            .shift_remove(index_field)
            .unwrap_or_else(|| SqlValue::Text(v.literal.sort_key()));

        let (operator, value) = match value {
            SqlValue::Text(mut text) => {
                let operator = self.comparators.map_comparator(v.comparator, ty, &mut text)?;
                (operator, SqlValue::Text(text))
            }
            // Patterns are text even against numeric columns.
            other if v.comparator.is_like() => {
                let mut text = other.to_string();
                let operator = self.comparators.map_comparator(v.comparator, ty, &mut text)?;
                (operator, SqlValue::Text(text))
            }
            other => {
                let operator = self
                    .comparators
                    .map_comparator(v.comparator, ty, &mut String::new())?;
                (operator, other)
            }
        };

        let condition = format!(
            "{}{operator}{}",
            segment.column(index_field),
            self.quote(&value)
        );
        segment.push_condition(op.glue(), &condition);
        Ok(())
    }
}
