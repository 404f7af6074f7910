use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    ops::Range,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Pos {
    /// Byte offset into the input.
    pub source: usize,
    /// Zero-based line number.
    pub line: usize,
}

impl Pos {
    pub fn adv_by(&mut self, count: usize) {
        self.source += count;
    }

    pub fn line(&mut self) {
        self.line += 1;
    }

    /// Advances past `bytes`, counting every CRLF, lone CR or LF in them as one line break.
    pub fn adv_over(&mut self, bytes: &[u8]) {
        let mut iter = bytes.iter().peekable();
        while let Some(b) = iter.next() {
            match b {
                b'\r' => {
                    if iter.peek() == Some(&&b'\n') {
                        iter.next();
                    }
                    self.line();
                }
                b'\n' => self.line(),
                _ => {}
            }
        }
        self.adv_by(bytes.len());
    }
}

impl Display for Pos {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "line {}, byte {}", self.line + 1, self.source)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source.cmp(&other.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Span { start, end, }
    }

    pub fn len(&self) -> usize {
        self.end.source - self.start.source
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of this span in the input.
    pub fn range(&self) -> Range<usize> {
        self.start.source..self.end.source
    }
}
