mod message;

#[cfg(test)]
mod tests;

use serde::Serialize;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};

/// Soft errors collected during one compilation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Start a diagnostic of the given kind with the kind's default severity.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.messages.iter().filter(|d| d.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Messages in report order with exact repeats removed.
    ///
    /// The same concept can be reached from several places in one query,
    /// and each site reports the same problem.
    pub fn unique(&self) -> Vec<&DiagnosticMessage> {
        let mut seen = Vec::with_capacity(self.messages.len());
        for msg in &self.messages {
            if !seen.contains(&msg) {
                seen.push(msg);
            }
        }
        seen
    }

    /// One line per unique message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for msg in self.unique() {
            out.push_str(&msg.to_string());
            out.push('\n');
        }
        out
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Append a template parameter (`$1`, `$2`, ... in order).
    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.message.params.push(value.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn emit(self) {
        tracing::debug!(
            key = self.message.key(),
            severity = %self.message.severity,
            "{}",
            self.message.message()
        );
        self.diagnostics.messages.push(self.message);
    }
}
