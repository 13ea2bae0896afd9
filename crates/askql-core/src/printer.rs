use std::fmt::Write;

use crate::description::Description;

/// Indented tree dump of a description.
pub struct DescriptionPrinter<'d> {
    description: &'d Description,
    metrics: bool,
}

impl<'d> DescriptionPrinter<'d> {
    pub fn new(description: &'d Description) -> Self {
        Self {
            description,
            metrics: false,
        }
    }

    /// Append size, depth and feature lines after the tree.
    pub fn with_metrics(mut self, value: bool) -> Self {
        self.metrics = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        format_node(self.description, 0, w)?;
        if self.metrics {
            let d = self.description;
            writeln!(w, "size: {}", d.size())?;
            writeln!(w, "depth: {}", d.depth())?;
            writeln!(w, "features: {}", d.query_features())?;
        }
        Ok(())
    }
}

fn format_node(d: &Description, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    write!(w, "{:indent$}", "", indent = indent * 2)?;
    match d {
        Description::Thing => writeln!(w, "thing"),
        Description::Class(c) => {
            let names: Vec<String> = c.categories.iter().map(|p| p.prefixed_text()).collect();
            write!(w, "class [{}]", names.join(", "))?;
            if let Some(depth) = c.hierarchy_depth {
                write!(w, " depth {depth}")?;
            }
            writeln!(w)
        }
        Description::Namespace(n) => writeln!(w, "namespace {}", n.namespace),
        Description::Value(v) => writeln!(
            w,
            "value {} {} {:?}",
            v.comparator,
            v.literal.di_type(),
            v.literal.wiki_value()
        ),
        Description::SomeProperty(p) => {
            writeln!(w, "some_property {}", p.property)?;
            format_node(&p.inner, indent + 1, w)
        }
        Description::Concept(c) => writeln!(w, "concept {}", c.concept.prefixed_text()),
        Description::Conjunction(j) | Description::Disjunction(j) => {
            writeln!(w, "{}", d.kind_name())?;
            for child in &j.children {
                format_node(child, indent + 1, w)?;
            }
            Ok(())
        }
    }
}

impl Description {
    pub fn printer(&self) -> DescriptionPrinter<'_> {
        DescriptionPrinter::new(self)
    }
}
