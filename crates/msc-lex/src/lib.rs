//! msc-lex - MiniScript lexer.
//!
//! Turns source text into the token stream described by §3/§4.1: whitespace
//! and `//` comments are skipped, two-character operators are preferred over
//! their single-character prefixes, and unterminated strings halt scanning
//! after one error.

mod cursor;
mod lexer;
mod token;

pub mod prelude {
    pub use crate::lexer::Lexer;
    pub use crate::token::{Literal, Token, TokenKind};
}

pub use prelude::*;
