use std::{
    fmt::{self, Display, Formatter},
    str,
};
use crate::{
    common::span::*,
};

/// The four token shapes of CSV-like input.
///
/// Discriminants are stable; the built-in pattern table lists its fragments in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    PlainField = 0,
    QuotedField = 1,
    FieldSeparator = 2,
    LineSeparator = 3,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::PlainField,
        TokenKind::QuotedField,
        TokenKind::FieldSeparator,
        TokenKind::LineSeparator,
    ];

    pub fn index(self) -> usize { self as usize }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::PlainField => "plain field",
            TokenKind::QuotedField => "quoted field",
            TokenKind::FieldSeparator => "field separator",
            TokenKind::LineSeparator => "line separator",
        }
    }

    pub fn is_field(self) -> bool {
        match self {
            TokenKind::PlainField | TokenKind::QuotedField => true,
            TokenKind::FieldSeparator | TokenKind::LineSeparator => false,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

/// A matched token. The value borrows the lexer's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'input> {
    kind: TokenKind,
    value: &'input [u8],
    span: Span,
}

impl<'input> Token<'input> {
    pub fn new(kind: TokenKind, value: &'input [u8], span: Span) -> Self {
        Token { kind, value, span, }
    }

    pub fn kind(&self) -> TokenKind { self.kind }

    pub fn value(&self) -> &'input [u8] { self.value }

    pub fn span(&self) -> Span { self.span }

    /// The value as a string, if it is valid UTF-8.
    pub fn text(&self) -> Option<&'input str> {
        str::from_utf8(self.value).ok()
    }

    pub fn is_field(&self) -> bool { self.kind.is_field() }
}
