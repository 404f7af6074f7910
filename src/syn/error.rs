use crate::common::span::Pos;
use snafu::Snafu;
use std::fmt::Write;

const PREVIEW_LEN: usize = 16;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum LexerError<'input> {
    #[snafu(display("no token matches input at {}: {}", pos, preview(remaining)))]
    UnmatchedInput {
        pos: Pos,
        remaining: &'input [u8],
    },
}

impl<'input> LexerError<'input> {
    pub fn pos(&self) -> Pos {
        match self {
            LexerError::UnmatchedInput { pos, .. } => *pos,
        }
    }

    pub fn offset(&self) -> usize {
        self.pos().source
    }

    /// The unmatched tail of the input, starting at the failing offset.
    pub fn remaining(&self) -> &'input [u8] {
        match self {
            LexerError::UnmatchedInput { remaining, .. } => remaining,
        }
    }
}

/// Escaped, truncated rendering of the offending bytes.
fn preview(bytes: &[u8]) -> String {
    let mut out = String::from("\"");
    for &b in bytes.iter().take(PREVIEW_LEN) {
        for c in std::ascii::escape_default(b) {
            out.push(c as char);
        }
    }
    out.push('"');
    if bytes.len() > PREVIEW_LEN {
        // infallible for String
        let _ = write!(out, " (+{} bytes)", bytes.len() - PREVIEW_LEN);
    }
    out
}

#[derive(Debug, Snafu)]
pub enum PatternError {
    #[snafu(display("pattern table has no fragments"))]
    EmptyTable {},

    #[snafu(display("fragment {} `{}` is not a valid pattern: {}", index, fragment, source))]
    InvalidFragment {
        index: usize,
        fragment: String,
        source: regex_syntax::Error,
    },

    #[snafu(display("fragment {} `{}` contains a capturing group", index, fragment))]
    CapturingGroup {
        index: usize,
        fragment: String,
    },

    #[snafu(display("fragment {} `{}` can match the empty string", index, fragment))]
    EmptyMatch {
        index: usize,
        fragment: String,
    },

    #[snafu(display("combined pattern failed to compile: {}", source))]
    Compile {
        source: regex::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_preview() {
        let err = LexerError::UnmatchedInput {
            pos: Pos { source: 3, line: 1 },
            remaining: b"\"abc\n",
        };
        assert_eq!(
            err.to_string(),
            r#"no token matches input at line 2, byte 3: "\"abc\n""#
        );
        assert_eq!(err.offset(), 3);
        assert_eq!(err.remaining(), b"\"abc\n");
    }

    #[test]
    fn test_display_truncates() {
        let remaining = [b'"'; 20];
        let err = LexerError::UnmatchedInput {
            pos: Pos::default(),
            remaining: &remaining,
        };
        assert!(err.to_string().ends_with(" (+4 bytes)"));
    }
}
