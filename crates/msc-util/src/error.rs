//! Internal error types.
//!
//! These represent programmer-facing failures (a stage was asked to run
//! after an earlier one failed, a lookup was misused) as distinct from
//! user-facing source diagnostics, which always flow through [`crate::Handler`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("lexical analysis failed with {0} error(s)")]
    LexFailed(usize),

    #[error("parsing failed with {0} error(s)")]
    ParseFailed(usize),

    #[error("semantic analysis failed with {0} error(s)")]
    SemaFailed(usize),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
