use std::fmt;

use serde::Serialize;

/// Soft compilation problems, grouped by where they arise.
///
/// None of these abort compilation: the affected condition degrades and
/// the rest of the query compiles unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    // Concept expansion
    CircularCondition,
    ConceptNestingTooDeep,
    ConceptParseFailed,
    ConceptNotCached,
    EmptySubquery,

    // Conditions that cannot be evaluated
    NonPageValue,
    NoPropertyTable,
    PropertyWithoutSubject,
    InverseNonPageProperty,

    // Conditions that evaluate to nothing (or to everything)
    UnknownCategories,
    EmptyJunction,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnknownCategories | Self::EmptyJunction | Self::NoPropertyTable => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Stable message key for localization by the host.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::CircularCondition => "smw-query-condition-circular",
            Self::ConceptNestingTooDeep => "smw-query-concept-nesting",
            Self::ConceptParseFailed => "smw-query-concept-invalid",
            Self::ConceptNotCached => "smw_concept_cache_miss",
            Self::EmptySubquery => "smw_emptysubquery",
            Self::NonPageValue => "smw-query-value-not-page",
            Self::NoPropertyTable => "smw-query-property-unstored",
            Self::PropertyWithoutSubject => "smw-query-property-no-subject",
            Self::InverseNonPageProperty => "smw-query-inverse-nonpage",
            Self::UnknownCategories => "smw-query-category-unknown",
            Self::EmptyJunction => "smw-query-empty-junction",
        }
    }

    /// English template; `$1`, `$2`, ... are replaced by parameters.
    fn template(&self) -> &'static str {
        match self {
            Self::CircularCondition => "a possible circular condition was detected in \"$1\"",
            Self::ConceptNestingTooDeep => {
                "concept \"$1\" exceeds the maximum concept nesting of $2"
            }
            Self::ConceptParseFailed => "concept \"$1\" could not be parsed: $2",
            Self::ConceptNotCached => {
                "concept \"$1\" has no cached result and may not be computed on demand"
            }
            Self::EmptySubquery => "some subquery has no valid condition",
            Self::NonPageValue => "value condition \"$1\" needs a property",
            Self::NoPropertyTable => "property \"$1\" has no storage table",
            Self::PropertyWithoutSubject => "property \"$1\" is not stored by subject",
            Self::InverseNonPageProperty => {
                "inverse property \"$1\" does not point to pages"
            }
            Self::UnknownCategories => "none of the categories in \"$1\" exist",
            Self::EmptyJunction => "an empty $1 carries no restriction",
        }
    }

    /// Render the template with the given parameters.
    pub fn message(&self, params: &[String]) -> String {
        let mut out = self.template().to_string();
        // Highest index first so `$1` does not clobber `$10`.
        for (i, param) in params.iter().enumerate().rev() {
            out = out.replace(&format!("${}", i + 1), param);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One reported problem: message key plus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub params: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            params: Vec::new(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.kind.message_key()
    }

    pub fn message(&self) -> String {
        self.kind.message(&self.params)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.key(), self.message())
    }
}
