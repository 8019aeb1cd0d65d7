//! The Character Reader: a positional cursor over a normalized input string.
//!
//! Owns the input text (after normalizing line endings once at construction)
//! and exposes the small set of primitive operations every higher layer is
//! built from: single-char reads, bounded reads, predicate reads, a
//! fails-loudly `read_to`, and the atomic, rollback-free `read_match` that
//! the token stream drives against the static token table.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ReaderError;

/// 1-based row/column position of the *next* character to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A half-open range between two positions, attached to tokens, AST nodes
/// and errors alike instead of passing four bare integers around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// How a token descriptor recognizes text at the reader's current position.
///
/// Tagged-variant rather than a trait object: the table is built once at
/// startup and the match dispatch is a single `match` per candidate, with no
/// virtual call overhead and no need to box anything.
pub enum Matcher {
    /// Matches only when the reader has nothing left to read; consumes
    /// nothing.
    Eof,
    /// Exact text, case-sensitively. Word-like literals (starting with a
    /// letter, `@` or `_`) only match when not immediately followed by
    /// another identifier character, so e.g. `@top-left` never shadows
    /// `@top-left-corner`.
    Literal(&'static str),
    /// Same as `Literal` but case-insensitive, for CSS's case-insensitive
    /// keywords (`@media`, `!important`, `:not(`, ...).
    CiLiteral(&'static str),
    /// A pre-compiled pattern, tried anchored at the current position.
    Regex(&'static Lazy<Regex>),
    /// An arbitrary recognizer, for shapes regex can't express cleanly
    /// (numbers with a known-unit suffix and a word boundary check).
    /// Returns the number of bytes matched.
    Custom(fn(&str) -> Option<usize>),
}

/// Owns the normalized input and a byte cursor into it, tracking row/column
/// as it advances.
pub struct CharReader {
    input: String,
    cursor: usize,
    row: usize,
    col: usize,
}

impl CharReader {
    pub fn new(input: &str) -> Self {
        Self {
            input: normalize_line_endings(input),
            cursor: 0,
            row: 1,
            col: 1,
        }
    }

    pub fn get_row(&self) -> usize {
        self.row
    }

    pub fn get_col(&self) -> usize {
        self.col
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn eof(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// The unread tail of the input.
    pub fn remaining(&self) -> &str {
        &self.input[self.cursor..]
    }

    /// Reads and consumes a single character, or `None` at end of input.
    pub fn read(&mut self) -> Option<char> {
        let c = self.remaining().chars().next()?;
        self.advance_char(c);
        Some(c)
    }

    fn advance_char(&mut self, c: char) {
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }

    /// Reads up to `n` characters, stopping early at end of input.
    pub fn read_count(&mut self, n: usize) -> String {
        let mut out = String::new();
        for _ in 0..n {
            match self.read() {
                Some(c) => out.push(c),
                None => break,
            }
        }
        out
    }

    /// Reads characters while `predicate` holds, consuming none of the
    /// first character that fails it.
    pub fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.remaining().chars().next() {
            if !predicate(c) {
                break;
            }
            out.push(c);
            self.advance_char(c);
        }
        out
    }

    /// Reads and consumes characters up to and including the first
    /// occurrence of `pattern`, returning everything consumed. Fails if
    /// end of input is reached first.
    pub fn read_to(&mut self, pattern: &str) -> Result<String, ReaderError> {
        let start = self.position();
        let mut out = String::new();
        if pattern.is_empty() {
            return Ok(out);
        }
        loop {
            if out.ends_with(pattern) {
                return Ok(out);
            }
            match self.read() {
                Some(c) => out.push(c),
                None => {
                    return Err(ReaderError::new(
                        format!("unexpected end of input while looking for '{pattern}'"),
                        start,
                    ))
                }
            }
        }
    }

    fn consume(&mut self, byte_len: usize) -> String {
        let text = self.input[self.cursor..self.cursor + byte_len].to_string();
        for c in text.chars() {
            self.advance_char(c);
        }
        text
    }

    /// Tries `matcher` at the current position. On success, consumes the
    /// matched text and returns it; on failure, the reader is left
    /// untouched (the trial is atomic).
    pub fn read_match(&mut self, matcher: &Matcher) -> Option<String> {
        let remaining = self.remaining();
        match matcher {
            Matcher::Eof => {
                if self.eof() {
                    Some(String::new())
                } else {
                    None
                }
            }
            Matcher::Literal(lit) => match_word_aware(remaining, lit, false).map(|len| self.consume(len)),
            Matcher::CiLiteral(lit) => match_word_aware(remaining, lit, true).map(|len| self.consume(len)),
            Matcher::Regex(re) => {
                let m = re.find(remaining)?;
                if m.start() != 0 {
                    return None;
                }
                let len = m.end();
                Some(self.consume(len))
            }
            Matcher::Custom(f) => f(remaining).map(|len| self.consume(len)),
        }
    }
}

fn normalize_line_endings(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn match_word_aware(remaining: &str, literal: &str, ci: bool) -> Option<usize> {
    if remaining.len() < literal.len() {
        return None;
    }
    let candidate = &remaining[..literal.len()];
    let ok = if ci {
        candidate.eq_ignore_ascii_case(literal)
    } else {
        candidate == literal
    };
    if !ok {
        return None;
    }
    let first = literal.chars().next()?;
    if first.is_ascii_alphabetic() || first == '@' || first == '_' {
        if remaining[literal.len()..].chars().next().map_or(false, is_ident_continue) {
            return None;
        }
    }
    Some(literal.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_crlf_and_cr() {
        let reader = CharReader::new("a\r\nb\rc");
        assert_eq!(reader.remaining(), "a\nb\nc");
    }

    #[test]
    fn tracks_row_and_col() {
        let mut reader = CharReader::new("ab\ncd");
        assert_eq!(reader.position(), Position::new(1, 1));
        reader.read();
        reader.read();
        assert_eq!(reader.position(), Position::new(1, 3));
        reader.read();
        assert_eq!(reader.position(), Position::new(2, 1));
    }

    #[test]
    fn read_to_finds_pattern() {
        let mut reader = CharReader::new("abc*/def");
        let consumed = reader.read_to("*/").unwrap();
        assert_eq!(consumed, "abc*/");
        assert_eq!(reader.remaining(), "def");
    }

    #[test]
    fn read_to_fails_at_eof() {
        let mut reader = CharReader::new("abc");
        assert!(reader.read_to("*/").is_err());
    }

    #[test]
    fn read_match_literal_is_atomic_on_failure() {
        let mut reader = CharReader::new("foo");
        let matched = reader.read_match(&Matcher::Literal("bar"));
        assert!(matched.is_none());
        assert_eq!(reader.remaining(), "foo");
    }

    #[test]
    fn read_match_word_aware_literal_respects_boundary() {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new("never-used").unwrap());
        let _ = &RE;
        let mut reader = CharReader::new("@top-left-corner");
        let matched = reader.read_match(&Matcher::CiLiteral("@top-left"));
        assert!(matched.is_none());
        assert_eq!(reader.remaining(), "@top-left-corner");
    }

    #[test]
    fn eof_matcher_only_matches_at_end() {
        let mut reader = CharReader::new("");
        assert_eq!(reader.read_match(&Matcher::Eof), Some(String::new()));
        let mut reader = CharReader::new("x");
        assert_eq!(reader.read_match(&Matcher::Eof), None);
    }
}
