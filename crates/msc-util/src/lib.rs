//! msc-util - shared foundation types for the MiniScript pipeline.
//!
//! Every other crate in this workspace depends on this one for:
//! - [`Span`] / [`FileId`]: source locations attached to tokens and AST nodes.
//! - [`Symbol`]: interned identifiers and string-literal contents.
//! - [`Handler`] / [`Diagnostic`] / [`DiagnosticBuilder`]: the shared
//!   diagnostic sink every stage reports through.
//! - [`PipelineError`]: the internal error enum `msc-driver` uses to signal
//!   that a stage's diagnostics became non-empty and later stages must not run.

mod diagnostic;
mod error;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{PipelineError, PipelineResult};
pub use span::{FileId, Span};
pub use symbol::Symbol;
