use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::printer::SegmentPrinter;
use crate::segment::{QuerySegment, SegmentId};

/// Result of one compilation pass.
///
/// `root` is `None` when the whole description imposes no restriction.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledQuery {
    root: Option<SegmentId>,
    segments: IndexMap<SegmentId, QuerySegment>,
    sort_fields: IndexMap<String, String>,
    diagnostics: Diagnostics,
}

impl CompiledQuery {
    pub(crate) fn new(
        root: Option<SegmentId>,
        segments: IndexMap<SegmentId, QuerySegment>,
        sort_fields: IndexMap<String, String>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            root,
            segments,
            sort_fields,
            diagnostics,
        }
    }

    pub fn root(&self) -> Option<SegmentId> {
        self.root
    }

    pub fn root_segment(&self) -> Option<&QuerySegment> {
        self.root.and_then(|id| self.segments.get(&id))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.root.is_none()
    }

    pub fn segment(&self, id: SegmentId) -> Option<&QuerySegment> {
        self.segments.get(&id)
    }

    /// Registered segments in id order.
    pub fn segments(&self) -> impl Iterator<Item = &QuerySegment> {
        self.segments.values()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sort key to the column expression that provides it.
    pub fn sort_fields(&self) -> &IndexMap<String, String> {
        &self.sort_fields
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Ids reachable from the root through components, in pre-order.
    pub fn reachable(&self) -> IndexSet<SegmentId> {
        let mut seen = IndexSet::new();
        let mut stack: Vec<SegmentId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(segment) = self.segments.get(&id) {
                stack.extend(segment.components.keys().rev());
            }
        }
        seen
    }

    pub fn printer(&self) -> SegmentPrinter<'_> {
        SegmentPrinter::new(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
