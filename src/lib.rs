//! Regex-driven tokenizer for CSV-like byte input.
//!
//! The lexer recognizes four token shapes (plain fields, quoted fields, field separators and
//! line separators) by matching a single alternation, compiled once from an ordered table of
//! fragments, anchored at the current cursor.
pub mod common;
pub mod syn;

pub use crate::{
    common::span::{Pos, Span},
    syn::{
        error::{LexerError, PatternError},
        lexer::{
            regex::{CompiledPattern, Lexer, PatternTable, PatternTableBuilder},
            Result, Tokenizer,
        },
        token::{Token, TokenKind},
    },
};

/// Lexes all of `input` with the built-in CSV pattern table.
///
/// Either every token is returned, or the first error is.
pub fn tokenize<T: AsRef<[u8]> + ?Sized>(input: &T) -> Result<'_, Vec<Token<'_>>> {
    Lexer::new(input).lex_all()
}
