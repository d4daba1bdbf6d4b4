//! Diagnostics collection.
//!
//! Every stage of the pipeline (lexer, parser, semantic analyzer) is handed
//! a `&Handler` and reports through it rather than returning
//! `Result<_, Vec<String>>` directly. This lets a driver that runs several
//! stages in sequence accumulate all of their diagnostics into one ordered,
//! append-only list.

mod builder;

pub use builder::DiagnosticBuilder;

use std::cell::RefCell;

use crate::span::Span;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Note,
    Help,
    Warning,
    Error,
}

impl Level {
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        write!(f, "{s}")
    }
}

/// One reported problem.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Option<Span>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    /// Renders the message the way §4.4 of the front-end's messages are
    /// specified: `"Line L, Column C: <text>"` when a span is present,
    /// otherwise the raw text.
    pub fn rendered(&self) -> String {
        match &self.span {
            Some(span) => format!("Line {}, Column {}: {}", span.line, span.column, self.message),
            None => self.message.clone(),
        }
    }
}

/// Collects diagnostics emitted across one or more pipeline stages.
///
/// Uses interior mutability so stages can hold a shared `&Handler` (not
/// `&mut Handler`) while still recording diagnostics — the same shape the
/// rest of this pipeline's stages use to avoid threading `&mut` references
/// everywhere a diagnostic might be emitted.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self { diagnostics: RefCell::new(Vec::new()) }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level.is_error()).count()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
