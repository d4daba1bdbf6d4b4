//! msc-driver - pipeline orchestration.
//!
//! Wires the five front-end stages together behind one call, [`compile`].
//! This crate owns no CLI, no file I/O, and no codegen — per this project's
//! scope, those are external collaborators. What a CLI driver would call
//! into is exactly the [`compile`] entry point below.

use msc_lex::{Lexer, Token};
use msc_par::{Parser, Program};
use msc_sem::SemanticAnalyzer;
use msc_tac::{Instruction, TacGenerator};
use msc_util::{Diagnostic, Handler, PipelineError, PipelineResult};

/// Everything produced by a successful (or partially successful, for
/// diagnostics-inspection purposes) run of the pipeline.
pub struct PipelineOutput {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub tac: Vec<Instruction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the lexer, parser, semantic analyzer, and TAC generator over
/// `source`, in that order, halting after the first stage that reports an
/// error (§7). All four stages share one [`Handler`], so
/// `PipelineOutput::diagnostics` (and the `Err` variant's diagnostics) is
/// the complete, ordered list across whichever stages ran.
pub fn compile(source: &str) -> PipelineResult<PipelineOutput> {
    let handler = Handler::new();

    tracing::debug!(bytes = source.len(), "starting compilation");

    let tokens = Lexer::new(source, &handler).tokenize();
    if handler.has_errors() {
        return Err(PipelineError::LexFailed(handler.error_count()));
    }

    let ast = Parser::new(tokens.clone(), &handler).parse();
    if handler.has_errors() {
        return Err(PipelineError::ParseFailed(handler.error_count()));
    }

    let ok = SemanticAnalyzer::new(&handler).analyze(&ast);
    if !ok {
        return Err(PipelineError::SemaFailed(handler.error_count()));
    }

    let tac = TacGenerator::new().generate(&ast);

    Ok(PipelineOutput { tokens, ast, tac, diagnostics: handler.diagnostics() })
}
