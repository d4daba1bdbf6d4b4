//! Fluent construction of [`Diagnostic`] values.

use super::{Diagnostic, Handler, Level};
use crate::span::Span;

/// Builds a [`Diagnostic`] one call at a time, then either hands it back or
/// emits it straight into a [`Handler`].
///
/// ```
/// use msc_util::{DiagnosticBuilder, Handler};
///
/// let handler = Handler::new();
/// DiagnosticBuilder::error("unexpected character 'x'")
///     .note("lexer resumed after this character")
///     .emit(&handler);
/// assert!(handler.has_errors());
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Option<Span>,
    notes: Vec<String>,
    helps: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), span: None, notes: Vec::new(), helps: Vec::new() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic { level: self.level, message: self.message, span: self.span, notes: self.notes, helps: self.helps }
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_carries_span_and_notes() {
        let span = Span::new(0, 3, 1, 1);
        let d = DiagnosticBuilder::error("bad").span(span).note("n1").help("h1").build();
        assert_eq!(d.notes, vec!["n1".to_string()]);
        assert_eq!(d.helps, vec!["h1".to_string()]);
        assert!(d.span.is_some());
    }
}
