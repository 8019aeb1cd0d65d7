//! The Token Stream: bounded lookahead/lookback over tokens produced
//! on demand from a [`CharReader`], with hidden-token elision built in so
//! the grammar engine never sees a `COMMENT`.

use std::collections::VecDeque;

use log::trace;

use crate::error::SyntaxError;
use crate::reader::{CharReader, Span};

use super::table::TOKEN_TABLE;
use super::token::{Token, TokenKind};

/// Upper bound on both lookahead and lookback depth.
pub const MAX_LOOKAHEAD: usize = 15;

/// A bounded-lookahead, ungettable stream of tokens. Internally a ring
/// buffer of at most [`MAX_LOOKAHEAD`] tokens: tokens already produced stay
/// available for `unget`/negative `LA` until the buffer is full, at which
/// point the oldest is dropped.
pub struct TokenStream {
    reader: CharReader,
    lt: VecDeque<Token>,
    /// Index into `lt` of the next slot `get()` will hand out. Equal to
    /// `lt.len()` whenever we're at the forward edge (no pending unget);
    /// less than that after one or more `unget()` calls, until `get()`
    /// replays the buffered tokens back to the edge.
    lt_index: usize,
    current: Option<Token>,
}

impl TokenStream {
    pub fn new(input: &str) -> Self {
        Self {
            reader: CharReader::new(input),
            lt: VecDeque::new(),
            lt_index: 0,
            current: None,
        }
    }

    fn tokenize_one(&mut self) -> Token {
        loop {
            let start = self.reader.position();

            let mut matched: Option<(TokenKind, String, bool)> = None;
            for descriptor in TOKEN_TABLE.iter() {
                if let Some(text) = self.reader.read_match(&descriptor.matcher) {
                    let text = if matches!(descriptor.matcher, crate::reader::Matcher::Eof) {
                        " ".to_string()
                    } else {
                        text
                    };
                    matched = Some((descriptor.kind, text, descriptor.hide));
                    break;
                }
            }

            let (kind, text, hide) = match matched {
                Some(triple) => triple,
                None => {
                    if self.reader.eof() {
                        (TokenKind::Eof, " ".to_string(), false)
                    } else {
                        let c = self.reader.read().expect("checked not eof");
                        (TokenKind::Unrecognized, c.to_string(), false)
                    }
                }
            };

            let end = self.reader.position();
            let token = Token {
                kind,
                text,
                span: Span::new(start, end),
            };

            if hide {
                trace!("lexer: hid {} token {:?}", token.kind, token.text);
                continue;
            }

            trace!(
                "lexer: produced {} token {:?} at {}",
                token.kind,
                token.text,
                token.span.start
            );
            return token;
        }
    }

    fn current_kind(&self) -> TokenKind {
        self.current.as_ref().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    /// Consumes and returns the kind of the next token, either replaying one
    /// already buffered from a prior `unget`, or tokenizing fresh input.
    pub fn get(&mut self) -> TokenKind {
        if self.lt_index < self.lt.len() {
            let token = self.lt[self.lt_index].clone();
            self.lt_index += 1;
            self.current = Some(token.clone());
            return token.kind;
        }

        let token = self.tokenize_one();
        self.lt.push_back(token.clone());
        if self.lt.len() > MAX_LOOKAHEAD {
            self.lt.pop_front();
        }
        self.lt_index = self.lt.len();
        self.current = Some(token.clone());
        token.kind
    }

    /// Pushes the most recently gotten token back onto the stream. Fails
    /// if there is no buffered token behind the current position (i.e. the
    /// lookback history has been exhausted or never existed).
    pub fn unget(&mut self) -> Result<(), SyntaxError> {
        if self.lt_index == 0 {
            return Err(SyntaxError::new(
                "cannot unget: no buffered token",
                self.reader.position(),
            ));
        }
        self.lt_index -= 1;
        self.current = self
            .lt_index
            .checked_sub(1)
            .and_then(|i| self.lt.get(i))
            .cloned();
        Ok(())
    }

    /// Convenience for `LA(1)`.
    pub fn peek(&mut self) -> Result<TokenKind, SyntaxError> {
        self.la(1)
    }

    /// Looks `k` tokens ahead (`k > 0`), at the current token (`k == 0`), or
    /// `k` tokens behind (`k < 0`), without consuming anything.
    pub fn la(&mut self, k: isize) -> Result<TokenKind, SyntaxError> {
        if k == 0 {
            return Ok(self.current_kind());
        }
        if k > 0 {
            if k as usize > MAX_LOOKAHEAD {
                return Err(SyntaxError::new(
                    format!("lookahead depth {k} exceeds maximum of {MAX_LOOKAHEAD}"),
                    self.reader.position(),
                ));
            }
            let mut last = self.current_kind();
            for _ in 0..k {
                last = self.get();
            }
            for _ in 0..k {
                self.unget()?;
            }
            return Ok(last);
        }
        let idx = self.lt_index as isize - 1 + k;
        if idx < 0 || idx as usize >= self.lt.len() {
            return Err(SyntaxError::new(
                format!("lookbehind depth {} exceeds buffered history", -k),
                self.reader.position(),
            ));
        }
        Ok(self.lt[idx as usize].kind)
    }

    /// Same as [`Self::la`] but returns the full [`Token`].
    pub fn lt_token(&mut self, k: isize) -> Result<Token, SyntaxError> {
        if k == 0 {
            return self
                .current
                .clone()
                .ok_or_else(|| SyntaxError::new("no current token", self.reader.position()));
        }
        if k > 0 {
            if k as usize > MAX_LOOKAHEAD {
                return Err(SyntaxError::new(
                    format!("lookahead depth {k} exceeds maximum of {MAX_LOOKAHEAD}"),
                    self.reader.position(),
                ));
            }
            for _ in 0..k {
                self.get();
            }
            let token = self.current.clone();
            for _ in 0..k {
                self.unget()?;
            }
            return token.ok_or_else(|| SyntaxError::new("no current token", self.reader.position()));
        }
        let idx = self.lt_index as isize - 1 + k;
        if idx < 0 || idx as usize >= self.lt.len() {
            return Err(SyntaxError::new(
                format!("lookbehind depth {} exceeds buffered history", -k),
                self.reader.position(),
            ));
        }
        Ok(self.lt[idx as usize].clone())
    }

    /// The token last returned by `get`, if any.
    pub fn token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn token_name(kind: TokenKind) -> &'static str {
        kind.name()
    }

    /// Consumes the next token if its kind is in `kinds`, otherwise ungets
    /// it. Returns whether it matched.
    pub fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        let kind = self.get();
        if kinds.contains(&kind) {
            true
        } else {
            let _ = self.unget();
            false
        }
    }

    /// Like [`Self::match_token`] but fails with a [`SyntaxError`] instead
    /// of returning `false`.
    pub fn must_match(&mut self, kinds: &[TokenKind]) -> Result<Token, SyntaxError> {
        let kind = self.get();
        if kinds.contains(&kind) {
            return Ok(self.current.clone().expect("current set after get"));
        }
        let found = self.current.clone();
        let _ = self.unget();
        let (pos, found_kind) = found
            .map(|t| (t.span.start, t.kind))
            .unwrap_or((self.reader.position(), kind));
        let expected = kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(" or ");
        Err(SyntaxError::new(format!("expected {expected}, found {found_kind}"), pos))
    }

    /// Panic-mode recovery: consumes tokens until one in `sync_set` (or
    /// `EOF`) is seen, and returns that kind. The sync token itself is
    /// consumed.
    pub fn advance(&mut self, sync_set: &[TokenKind]) -> TokenKind {
        loop {
            let kind = self.get();
            if kind == TokenKind::Eof || sync_set.contains(&kind) {
                return kind;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_then_unget_restores_position() {
        let mut stream = TokenStream::new("a b");
        assert_eq!(stream.get(), TokenKind::Ident);
        stream.unget().unwrap();
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::S);
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::Eof);
    }

    #[test]
    fn unget_with_empty_history_fails() {
        let mut stream = TokenStream::new("a");
        assert!(stream.unget().is_err());
    }

    #[test]
    fn la_does_not_consume() {
        let mut stream = TokenStream::new("a b");
        assert_eq!(stream.la(1).unwrap(), TokenKind::Ident);
        assert_eq!(stream.la(2).unwrap(), TokenKind::S);
        assert_eq!(stream.la(3).unwrap(), TokenKind::Ident);
        // still untouched: a fresh get() sees the same first token
        assert_eq!(stream.get(), TokenKind::Ident);
    }

    #[test]
    fn la_beyond_max_lookahead_fails() {
        let mut stream = TokenStream::new("a");
        assert!(stream.la(MAX_LOOKAHEAD as isize + 1).is_err());
    }

    #[test]
    fn negative_la_reads_lookback_buffer() {
        let mut stream = TokenStream::new("a b");
        stream.get();
        stream.get();
        assert_eq!(stream.la(0).unwrap(), TokenKind::S);
        assert_eq!(stream.la(-1).unwrap(), TokenKind::Ident);
        assert!(stream.la(-2).is_err());
    }

    #[test]
    fn comments_are_hidden_but_whitespace_is_not() {
        let mut stream = TokenStream::new("a/* hi */ b");
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::S);
        assert_eq!(stream.get(), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::Eof);
    }

    #[test]
    fn advance_consumes_through_the_sync_token() {
        let mut stream = TokenStream::new("garbage ) more");
        let kind = stream.advance(&[TokenKind::RParen]);
        assert_eq!(kind, TokenKind::RParen);
        assert_eq!(stream.get(), TokenKind::S);
        assert_eq!(stream.get(), TokenKind::Ident);
    }

    #[test]
    fn must_match_ungets_on_miss() {
        let mut stream = TokenStream::new("a");
        let err = stream.must_match(&[TokenKind::Hash]);
        assert!(err.is_err());
        // token is still there for the next attempt
        assert_eq!(stream.get(), TokenKind::Ident);
    }
}
