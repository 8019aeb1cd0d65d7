//! Error types for the reader, lexer and grammar engine.
//!
//! Two kinds only, per the parser's error model: a [`SyntaxError`] for any
//! grammar rule violation, and a [`ReaderError`] for the one way the
//! character reader itself can fail (an unterminated `read_to` search).
//! `ReaderError` converts into `SyntaxError` at the boundary where the
//! grammar observes it, so callers only ever have to handle one error type.

use std::error::Error;
use std::fmt;

use crate::reader::Position;

/// A grammar rule violation, carrying the offending token's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Renders this error as the one-line message plus a source line with
    /// a caret under the offending column, for CLI-friendly diagnostics.
    pub fn render(&self, source: &str) -> String {
        render_with_caret(&self.message, self.position, source)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl Error for SyntaxError {}

/// Raised by [`crate::reader::CharReader::read_to`] when its pattern never
/// appears before end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderError {
    pub message: String,
    pub position: Position,
}

impl ReaderError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Renders this error as the one-line message plus a source line with
    /// a caret under the offending column, for CLI-friendly diagnostics.
    pub fn render(&self, source: &str) -> String {
        render_with_caret(&self.message, self.position, source)
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl Error for ReaderError {}

impl From<ReaderError> for SyntaxError {
    fn from(err: ReaderError) -> Self {
        SyntaxError::new(err.message, err.position)
    }
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Builds a `message\n<line number> | <source line>\n          | <caret>`
/// block pointing at `position` within `source`. Falls back to the plain
/// "message at row:col" form if the row is out of range.
fn render_with_caret(message: &str, position: Position, source: &str) -> String {
    let Some(line) = source.lines().nth(position.row - 1) else {
        return format!("{message} at {position}");
    };
    let gutter = format!("{} | ", position.row);
    let mut out = format!("{message} at {position}\n{gutter}{line}\n");
    out.push_str(&" ".repeat(gutter.len()));
    out.push_str(&" ".repeat(position.col.saturating_sub(1)));
    out.push('^');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_points_a_caret_at_the_offending_column() {
        let err = SyntaxError::new("expected a property value", Position::new(1, 12));
        let rendered = err.render("a { color: ; }");
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[1], "1 | a { color: ; }");
        assert!(lines[2].ends_with('^'));
        assert_eq!(lines[2].len() - 1, lines[1].find(';').unwrap());
    }

    #[test]
    fn render_falls_back_when_the_row_is_out_of_range() {
        let err = SyntaxError::new("unexpected end of input", Position::new(5, 1));
        assert_eq!(err.render("a"), "unexpected end of input at 5:1");
    }
}
