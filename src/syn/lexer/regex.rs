//! Regex-based lexer.
//!
//! Every fragment of a [`PatternTable`] is wrapped in its own capturing group and the groups are
//! joined into one alternation. The regex engine picks alternatives leftmost-first, so table
//! order is both the match priority and the group-to-kind mapping.
use crate::{
    common::span::*,
    syn::{
        error::*,
        lexer::{Result, Tokenizer},
        token::{Token, TokenKind},
    },
};
use regex::bytes::{CaptureLocations, Regex};
use regex_syntax::{
    hir::{GroupKind, Hir, HirKind},
    ParserBuilder,
};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Flags shared by the combined pattern and fragment validation: match raw bytes, and let `.`
/// match line breaks.
const FLAGS: &str = "(?s-u)";

/// Built-in CSV fragments, in priority order.
const CSV_RULES: [(&str, TokenKind); 4] = [
    (r#"[^",\r\n]+"#, TokenKind::PlainField),
    (r#""[^"\\]*(?:\\.[^"\\]*)*""#, TokenKind::QuotedField),
    (r#","#, TokenKind::FieldSeparator),
    (r#"\r\n?|\n"#, TokenKind::LineSeparator),
];

/// An ordered list of `(fragment, kind)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    rules: Vec<(String, TokenKind)>,
}

impl Default for PatternTable {
    fn default() -> Self {
        PatternTable::csv()
    }
}

impl PatternTable {
    /// The built-in table: plain field, quoted field, field separator, line separator.
    pub fn csv() -> Self {
        CSV_RULES
            .iter()
            .fold(PatternTable::builder(), |builder, (fragment, kind)| {
                builder.rule(*fragment, *kind)
            })
            .finish()
    }

    pub fn builder() -> PatternTableBuilder {
        PatternTableBuilder::default()
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.rules.iter().map(|(fragment, kind)| (fragment.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates every fragment and compiles the combined alternation.
    pub fn compile(&self) -> std::result::Result<CompiledPattern, PatternError> {
        if self.is_empty() {
            return Err(PatternError::EmptyTable {});
        }
        let mut builder = ParserBuilder::new();
        builder
            .unicode(false)
            .allow_invalid_utf8(true)
            .dot_matches_new_line(true);
        for (index, (fragment, _)) in self.rules.iter().enumerate() {
            // a parser can only be used once
            let hir = match builder.build().parse(fragment) {
                Ok(hir) => hir,
                Err(_) if capture_groups(fragment) > 0 => {
                    return Err(PatternError::CapturingGroup {
                        index,
                        fragment: fragment.clone(),
                    });
                }
                Err(source) => {
                    return Err(PatternError::InvalidFragment {
                        index,
                        fragment: fragment.clone(),
                        source,
                    });
                }
            };
            if has_capture(&hir) {
                return Err(PatternError::CapturingGroup {
                    index,
                    fragment: fragment.clone(),
                });
            }
            if hir.is_match_empty() {
                return Err(PatternError::EmptyMatch {
                    index,
                    fragment: fragment.clone(),
                });
            }
        }

        let groups = self
            .rules
            .iter()
            .map(|(fragment, _)| format!("({})", fragment))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!("{}^(?:{})", FLAGS, groups))
            .map_err(|source| PatternError::Compile { source })?;
        if regex.captures_len() != self.len() + 1 {
            let index = self
                .rules
                .iter()
                .position(|(fragment, _)| capture_groups(fragment) > 0)
                .unwrap_or_default();
            return Err(PatternError::CapturingGroup {
                index,
                fragment: self.rules[index].0.clone(),
            });
        }
        debug!(pattern = regex.as_str(), rules = self.len(), "compiled pattern table");
        Ok(CompiledPattern {
            regex,
            kinds: self.rules.iter().map(|(_, kind)| *kind).collect(),
        })
    }
}

/// Capturing groups in `fragment` as the regex engine itself counts them. Covers syntax the
/// fragment parser does not know, such as `(?<name>...)`.
fn capture_groups(fragment: &str) -> usize {
    Regex::new(&format!("{}{}", FLAGS, fragment))
        .map(|regex| regex.captures_len() - 1)
        .unwrap_or(0)
}

fn has_capture(hir: &Hir) -> bool {
    match hir.kind() {
        HirKind::Group(group) => match group.kind {
            GroupKind::NonCapturing => has_capture(&group.hir),
            GroupKind::CaptureIndex(_) | GroupKind::CaptureName { .. } => true,
        },
        HirKind::Repetition(rep) => has_capture(&rep.hir),
        HirKind::Concat(hirs) | HirKind::Alternation(hirs) => hirs.iter().any(has_capture),
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct PatternTableBuilder {
    rules: Vec<(String, TokenKind)>,
}

impl PatternTableBuilder {
    /// Appends a fragment. Earlier fragments win over later ones at the same position.
    pub fn rule(mut self, fragment: impl ToString, kind: TokenKind) -> Self {
        self.rules.push((fragment.to_string(), kind));
        self
    }

    /// Consumes this builder and creates a table from it.
    pub fn finish(self) -> PatternTable {
        PatternTable { rules: self.rules }
    }
}

/// A compiled pattern table.
///
/// Matching never mutates the pattern, so one instance may be shared between threads and
/// between any number of lexers.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    kinds: Vec<TokenKind>,
}

impl CompiledPattern {
    pub fn csv() -> Self {
        PatternTable::csv()
            .compile()
            .expect("built-in pattern table is invalid")
    }

    /// The combined alternation.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Token kinds in alternative order.
    pub fn kinds(&self) -> &[TokenKind] {
        &self.kinds
    }

    pub fn capture_locations(&self) -> CaptureLocations {
        self.regex.capture_locations()
    }

    /// Matches one token at the start of `subject`, returning its kind and length.
    pub fn find(&self, subject: &[u8]) -> Option<(TokenKind, usize)> {
        self.find_with(&mut self.capture_locations(), subject)
    }

    /// Like `find`, reusing caller-owned capture locations.
    pub fn find_with(
        &self,
        locations: &mut CaptureLocations,
        subject: &[u8],
    ) -> Option<(TokenKind, usize)> {
        let m = self.regex.captures_read(locations, subject)?;
        debug_assert_eq!(m.start(), 0, "match was not at the start of the subject");
        // group 0 is the whole match; group i is alternative i - 1
        let kind = (1..locations.len())
            .find(|&group| {
                locations
                    .get(group)
                    .map_or(false, |(start, end)| end > start)
            })
            .map(|group| self.kinds[group - 1])?;
        Some((kind, m.end()))
    }
}

#[derive(Debug)]
pub struct Lexer<'input> {
    pattern: CompiledPattern,
    locations: CaptureLocations,
    input: &'input [u8],
    pos: Pos,
    failed: bool,
}

impl<'input> Lexer<'input> {
    /// Creates a lexer over `input` using the built-in CSV table.
    pub fn new<T: AsRef<[u8]> + ?Sized>(input: &'input T) -> Self {
        Lexer::with_pattern(CompiledPattern::csv(), input)
    }

    pub fn with_pattern<T: AsRef<[u8]> + ?Sized>(
        pattern: CompiledPattern,
        input: &'input T,
    ) -> Self {
        Lexer {
            locations: pattern.capture_locations(),
            pattern,
            input: input.as_ref(),
            pos: Default::default(),
            failed: false,
        }
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn input(&self) -> &'input [u8] {
        self.input
    }

    pub fn offset(&self) -> usize {
        self.pos.source
    }

    /// Input not yet consumed.
    pub fn remaining(&self) -> &'input [u8] {
        &self.input[self.pos.source..]
    }
}

impl<'input> Tokenizer<'input> for Lexer<'input> {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn step(&mut self) -> Result<'input, Option<Token<'input>>> {
        if self.is_eof() {
            return Ok(None);
        }

        let subject = self.remaining();
        let (kind, len) = match self.pattern.find_with(&mut self.locations, subject) {
            Some(found) => found,
            None => {
                debug!(pos = %self.pos, "no rule matches input");
                return Err(LexerError::UnmatchedInput {
                    pos: self.pos,
                    remaining: subject,
                });
            }
        };

        let value = &subject[..len];
        let start = self.pos;
        self.pos.adv_over(value);
        let token = Token::new(kind, value, Span::new(start, self.pos));
        trace!(%kind, start = start.source, len, "token");
        Ok(Some(token))
    }

    fn is_eof(&self) -> bool {
        self.pos.source >= self.input.len()
    }
}

/// Yields tokens until end of input, or until the first error, after which it is exhausted.
impl<'input> Iterator for Lexer<'input> {
    type Item = Result<'input, Token<'input>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}
