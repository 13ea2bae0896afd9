use crate::builder::QueryBuilder;

/// Marks of the concepts currently being expanded, outermost first.
#[derive(Debug, Default)]
pub(crate) struct CircularReferenceGuard {
    marks: Vec<String>,
}

impl CircularReferenceGuard {
    pub(crate) fn is_marked(&self, key: &str) -> bool {
        self.marks.iter().any(|m| m == key)
    }

    pub(crate) fn depth(&self) -> usize {
        self.marks.len()
    }
}

impl QueryBuilder<'_> {
    /// Run `f` with `key` marked. The mark is released when `f` returns,
    /// whether it succeeded or not.
    pub(crate) fn with_mark<T>(&mut self, key: String, f: impl FnOnce(&mut Self) -> T) -> T {
        tracing::trace!(mark = %key, depth = self.guard.depth(), "enter");
        self.guard.marks.push(key);
        let result = f(self);
        self.guard.marks.pop();
        result
    }
}
