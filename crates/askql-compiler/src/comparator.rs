//! Abstract comparators to backend operator tokens.

use askql_core::{Comparator, DataItemType};
use indexmap::IndexMap;

use crate::{CompileError, Result};

/// Table-driven comparator mapping.
///
/// The default table covers every [`Comparator`]; hosts with a narrower
/// backend remove entries, and a comparator missing from the table is a
/// hard error at compile time.
#[derive(Debug, Clone)]
pub struct ComparatorMapper {
    operators: IndexMap<Comparator, &'static str>,
}

impl Default for ComparatorMapper {
    fn default() -> Self {
        let operators = Comparator::ALL
            .iter()
            .map(|&c| (c, default_operator(c)))
            .collect();
        Self { operators }
    }
}

fn default_operator(comparator: Comparator) -> &'static str {
    match comparator {
        Comparator::Eq => "=",
        Comparator::Lt => "<",
        Comparator::Gt => ">",
        Comparator::Le => "<=",
        Comparator::Ge => ">=",
        Comparator::Ne => "!=",
        Comparator::Like | Comparator::PrimLike => " LIKE ",
        Comparator::NotLike | Comparator::PrimNotLike => " NOT LIKE ",
    }
}

impl ComparatorMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper without any operator.
    pub fn empty() -> Self {
        Self {
            operators: IndexMap::new(),
        }
    }

    pub fn with_operator(mut self, comparator: Comparator, operator: &'static str) -> Self {
        self.operators.insert(comparator, operator);
        self
    }

    pub fn without(mut self, comparator: Comparator) -> Self {
        self.operators.shift_remove(&comparator);
        self
    }

    pub fn supports(&self, comparator: Comparator) -> bool {
        self.operators.contains_key(&comparator)
    }

    /// Operator token for `comparator`, rewriting `operand` in place for
    /// the escaping LIKE variants.
    pub fn map_comparator(
        &self,
        comparator: Comparator,
        ty: DataItemType,
        operand: &mut String,
    ) -> Result<&'static str> {
        let operator = self
            .operators
            .get(&comparator)
            .copied()
            .ok_or(CompileError::UnsupportedComparator(comparator))?;

        if matches!(comparator, Comparator::Like | Comparator::NotLike) {
            if ty == DataItemType::Uri {
                *operand = normalize_uri_pattern(operand);
            }
            *operand = like_pattern(operand);
        }

        Ok(operator)
    }
}

fn normalize_uri_pattern(operand: &str) -> String {
    operand
        .replace("http://", "")
        .replace("https://", "")
        .replace("%2A", "*")
}

/// Escape LIKE metacharacters and translate `*`/`?` into `%`/`_`.
pub fn like_pattern(operand: &str) -> String {
    let mut out = String::with_capacity(operand.len() + 4);
    for c in operand.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            '*' => out.push('%'),
            '?' => out.push('_'),
            c => out.push(c),
        }
    }
    out
}
