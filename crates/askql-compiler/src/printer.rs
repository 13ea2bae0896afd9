//! Text dump of a compiled join graph.

use std::fmt::Write;

use indexmap::IndexSet;

use crate::compiled::CompiledQuery;
use crate::segment::{Component, JoinField, QuerySegment, SegmentId};

pub struct SegmentPrinter<'q> {
    query: &'q CompiledQuery,
    orphans: bool,
    sort_fields: bool,
}

impl<'q> SegmentPrinter<'q> {
    pub fn new(query: &'q CompiledQuery) -> Self {
        Self {
            query,
            orphans: false,
            sort_fields: false,
        }
    }

    /// Also list registered segments the root does not reach.
    pub fn with_orphans(mut self, value: bool) -> Self {
        self.orphans = value;
        self
    }

    /// Append the query-level sort bindings.
    pub fn with_sort_fields(mut self, value: bool) -> Self {
        self.sort_fields = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut visited = IndexSet::new();
        match self.query.root() {
            Some(root) => self.format_segment(root, None, 0, &mut visited, w)?,
            None => writeln!(w, "(unrestricted)")?,
        }

        if self.orphans {
            let orphans: Vec<SegmentId> = self
                .query
                .segments()
                .map(|s| s.id)
                .filter(|id| !visited.contains(id))
                .collect();
            if !orphans.is_empty() {
                writeln!(w, "unreachable:")?;
                for id in orphans {
                    if !visited.contains(&id) {
                        self.format_segment(id, None, 1, &mut visited, w)?;
                    }
                }
            }
        }

        if self.sort_fields && !self.query.sort_fields().is_empty() {
            writeln!(w, "sort:")?;
            for (key, column) in self.query.sort_fields() {
                writeln!(w, "  {key} -> {column}")?;
            }
        }
        Ok(())
    }

    fn format_segment(
        &self,
        id: SegmentId,
        attached: Option<&Component>,
        indent: usize,
        visited: &mut IndexSet<SegmentId>,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        if !visited.insert(id) {
            return writeln!(w, "{prefix}t{id} (seen)");
        }
        let Some(segment) = self.query.segment(id) else {
            return writeln!(w, "{prefix}t{id} (missing)");
        };

        write!(w, "{prefix}")?;
        write_head(segment, w)?;
        if let Some(Component::Join(on)) = attached {
            write!(w, " on {on}")?;
        }
        writeln!(w)?;

        for (child, component) in &segment.components {
            self.format_segment(*child, Some(component), indent + 1, visited, w)?;
        }
        Ok(())
    }
}

fn write_head(segment: &QuerySegment, w: &mut impl Write) -> std::fmt::Result {
    write!(w, "{} {}", segment.alias, segment.kind)?;
    if let Some(table) = &segment.join_table {
        write!(w, " {table}")?;
    }
    match &segment.join_field {
        JoinField::None => {}
        JoinField::Column(column) => write!(w, " join {column}")?,
        JoinField::Ids(ids) => write!(w, " ids {ids:?}")?,
    }
    if let Some(depth) = segment.depth {
        write!(w, " depth {depth}")?;
    }
    if let Some(fragment) = &segment.where_fragment {
        write!(w, " where {fragment}")?;
    }
    if let Some(from) = &segment.from {
        write!(w, " from [{}]", from.trim())?;
    }
    for (key, column) in &segment.sort_fields {
        write!(w, " sort {key}={column}")?;
    }
    Ok(())
}
