//! One interpreter per description variant.
//!
//! Each interpreter returns a fresh segment and calls back into the
//! builder for children. A `NoQuery` result means "no restriction"; the
//! builder drops it instead of registering it.

mod class;
mod concept;
mod junction;
mod namespace;
mod scalar;
mod some_property;
mod value;

#[cfg(test)]
mod concept_tests;
#[cfg(test)]
mod junction_tests;
#[cfg(test)]
mod value_tests;

use askql_core::Description;

use crate::Result;
use crate::builder::QueryBuilder;
use crate::segment::{QuerySegment, SegmentKind};

impl QueryBuilder<'_> {
    pub(crate) fn interpret(&mut self, description: &Description) -> Result<QuerySegment> {
        match description {
            Description::Thing => Ok(self.interpret_thing()),
            Description::Class(d) => Ok(self.interpret_class(d)),
            Description::Namespace(d) => Ok(self.interpret_namespace(d)),
            Description::Value(d) => self.interpret_value(d),
            Description::SomeProperty(d) => self.interpret_some_property(d),
            Description::Concept(d) => self.interpret_concept(d),
            Description::Conjunction(j) => self.interpret_junction(j, SegmentKind::Conjunction),
            Description::Disjunction(j) => self.interpret_junction(j, SegmentKind::Disjunction),
            // Variants added later impose no restriction until supported.
            _ => Ok(self.interpret_thing()),
        }
    }

    fn interpret_thing(&mut self) -> QuerySegment {
        self.new_segment(SegmentKind::NoQuery)
    }
}
