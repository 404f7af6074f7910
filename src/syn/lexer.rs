pub mod regex;

use crate::{
    common::span::*,
    syn::{error::*, token::*},
};
use tracing::debug;

pub type Result<'input, T> = std::result::Result<T, LexerError<'input>>;

pub trait Tokenizer<'input> {
    /// Current cursor position.
    fn pos(&self) -> Pos;

    /// Matches one token at the cursor.
    ///
    /// `Ok(None)` signals end of input. An error leaves the cursor where it was, so calling
    /// this again fails the same way.
    fn step(&mut self) -> Result<'input, Option<Token<'input>>>;

    fn is_eof(&self) -> bool;

    /// Steps until end of input. The first error is returned and every token gathered before
    /// it is dropped.
    fn lex_all(&mut self) -> Result<'input, Vec<Token<'input>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.step()? {
            tokens.push(token);
        }
        debug!(count = tokens.len(), end = %self.pos(), "lexed all tokens");
        Ok(tokens)
    }
}
