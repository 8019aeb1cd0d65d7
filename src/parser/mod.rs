//! The CSS Grammar Engine: a hand-written recursive-descent parser driving
//! a [`TokenStream`], firing events as it recognizes constructs rather than
//! building a retained tree.
//!
//! Two panic-mode recovery boundaries exist, matching the two places a
//! malformed construct can be safely resynchronized without losing the
//! whole stylesheet: a bad selector discards the entire ruleset and
//! resyncs on `RBRACE`; a bad declaration discards just that declaration
//! and resyncs on `SEMICOLON` or `RBRACE`. `ParserOptions::strict` disables
//! both and propagates the first error instead.

pub mod ast;

use log::{debug, warn};

use crate::error::{ParseResult, SyntaxError};
use crate::events::{Event, EventSink};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::options::ParserOptions;
use crate::reader::{Position, Span};

use ast::{
    AttributeOperator, AttributeSelector, AttributeValue, Combinator, ElementName, FunctionCall, Hack,
    IeFunctionCall, MarginBox, MediaExpression, MediaQualifier, MediaQuery, NamespacePrefix, NegationArg,
    Pseudo, PseudoKind, PseudoMarker, PropertyName, PropertyValue, Selector, Sign, SimpleSelectorModifier,
    SimpleSelectorSequence, Term, TermKind, TypeSelector, ValueOperator, ValuePart,
};

/// Entry point into the grammar engine. Cheap to construct and reusable
/// across many independent parses: each `parse_*` call builds its own
/// fresh `TokenStream`/`CharReader` pair, so no state leaks between calls
/// on the same `Parser`.
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn parse_stylesheet(&self, input: &str, sink: &mut impl EventSink) -> ParseResult<()> {
        debug!("parsing stylesheet ({} bytes)", input.len());
        let mut stream = TokenStream::new(input);
        self.stylesheet(&mut stream, sink)
    }

    /// Alias for [`Self::parse_stylesheet`]; a `Parser` holds only its
    /// options, so the same value can drive any number of independent
    /// parses without reallocating configuration.
    pub fn parse(&self, input: &str, sink: &mut impl EventSink) -> ParseResult<()> {
        self.parse_stylesheet(input, sink)
    }

    pub fn parse_media_query(&self, input: &str) -> ParseResult<MediaQuery> {
        debug!("parsing media query: {input:?}");
        let mut stream = TokenStream::new(input);
        self.skip_s(&mut stream);
        let query = self.media_query(&mut stream)?;
        self.skip_s(&mut stream);
        self.expect_eof(&mut stream, "media query")?;
        Ok(query)
    }

    pub fn parse_property_value(&self, input: &str) -> ParseResult<PropertyValue> {
        debug!("parsing property value: {input:?}");
        let mut stream = TokenStream::new(input);
        self.skip_s(&mut stream);
        let value = self.expr(&mut stream)?;
        self.skip_s(&mut stream);
        self.expect_eof(&mut stream, "property value")?;
        Ok(value)
    }

    pub fn parse_rule(&self, input: &str, sink: &mut impl EventSink) -> ParseResult<()> {
        debug!("parsing single rule: {input:?}");
        let mut stream = TokenStream::new(input);
        self.skip_s(&mut stream);
        self.ruleset(&mut stream, sink)?;
        self.skip_s(&mut stream);
        self.expect_eof(&mut stream, "ruleset")?;
        Ok(())
    }

    pub fn parse_selector(&self, input: &str) -> ParseResult<Selector> {
        debug!("parsing selector: {input:?}");
        let mut stream = TokenStream::new(input);
        self.skip_s(&mut stream);
        let selector = self.selector(&mut stream)?;
        self.skip_s(&mut stream);
        self.expect_eof(&mut stream, "selector")?;
        Ok(selector)
    }

    fn expect_eof(&self, stream: &mut TokenStream, item: &str) -> ParseResult<()> {
        let kind = stream.get();
        if kind == TokenKind::Eof {
            return Ok(());
        }
        let pos = stream
            .token()
            .map(|t| t.span.start)
            .unwrap_or_else(|| Position::new(1, 1));
        Err(SyntaxError::new(format!("unexpected trailing input after {item}"), pos))
    }

    fn skip_s(&self, stream: &mut TokenStream) -> bool {
        let mut any = false;
        while stream.la(1).unwrap_or(TokenKind::Eof) == TokenKind::S {
            stream.get();
            any = true;
        }
        any
    }

    fn skip_s_cdo_cdc(&self, stream: &mut TokenStream) {
        loop {
            match stream.la(1).unwrap_or(TokenKind::Eof) {
                TokenKind::S | TokenKind::Cdo | TokenKind::Cdc => {
                    stream.get();
                }
                _ => break,
            }
        }
    }

    fn emit_error(&self, sink: &mut dyn EventSink, err: &SyntaxError) {
        warn!("{err}");
        sink.on_event(Event::Error {
            error: "SyntaxError".to_string(),
            message: err.message.clone(),
            line: err.position.row,
            col: err.position.col,
        });
    }

    // ---- stylesheet ----------------------------------------------------

    fn stylesheet(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        sink.on_event(Event::StartStylesheet);

        self.skip_s_cdo_cdc(stream);

        if stream.la(1)? == TokenKind::CharsetSym {
            self.charset(stream, sink)?;
            self.skip_s_cdo_cdc(stream);
        }

        while stream.la(1)? == TokenKind::ImportSym {
            self.import(stream, sink)?;
            self.skip_s_cdo_cdc(stream);
        }

        while stream.la(1)? == TokenKind::NamespaceSym {
            self.namespace(stream, sink)?;
            self.skip_s_cdo_cdc(stream);
        }

        loop {
            self.skip_s_cdo_cdc(stream);
            match stream.la(1)? {
                TokenKind::Eof => break,
                TokenKind::MediaSym => self.media(stream, sink)?,
                TokenKind::PageSym => self.page(stream, sink)?,
                TokenKind::FontFaceSym => self.font_face(stream, sink)?,
                _ => {
                    if let Err(err) = self.ruleset(stream, sink) {
                        self.emit_error(sink, &err);
                        stream.advance(&[TokenKind::RBrace]);
                    }
                }
            }
        }

        sink.on_event(Event::EndStylesheet);
        Ok(())
    }

    fn charset(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::CharsetSym])?;
        self.skip_s(stream);
        let string_tok = stream.must_match(&[TokenKind::String])?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::Semicolon])?;
        sink.on_event(Event::Charset {
            charset: unquote(&string_tok.text),
        });
        Ok(())
    }

    fn import(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::ImportSym])?;
        self.skip_s(stream);
        let uri_tok = stream.must_match(&[TokenKind::String, TokenKind::Uri])?;
        let uri = uri_text(&uri_tok);
        self.skip_s(stream);
        let media = self.media_query_list(stream)?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::Semicolon])?;
        sink.on_event(Event::Import { uri, media });
        Ok(())
    }

    fn namespace(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::NamespaceSym])?;
        self.skip_s(stream);
        let mut prefix = None;
        if stream.la(1)? == TokenKind::Ident {
            let tok = stream.must_match(&[TokenKind::Ident])?;
            prefix = Some(tok.text);
            self.skip_s(stream);
        }
        let uri_tok = stream.must_match(&[TokenKind::String, TokenKind::Uri])?;
        let uri = uri_text(&uri_tok);
        self.skip_s(stream);
        stream.must_match(&[TokenKind::Semicolon])?;
        sink.on_event(Event::Namespace { prefix, uri });
        Ok(())
    }

    fn media(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::MediaSym])?;
        self.skip_s(stream);
        let media = self.media_query_list(stream)?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::LBrace])?;
        sink.on_event(Event::StartMedia { media: media.clone() });
        loop {
            self.skip_s_cdo_cdc(stream);
            if matches!(stream.la(1)?, TokenKind::RBrace | TokenKind::Eof) {
                break;
            }
            if let Err(err) = self.ruleset(stream, sink) {
                self.emit_error(sink, &err);
                stream.advance(&[TokenKind::RBrace]);
            }
        }
        stream.must_match(&[TokenKind::RBrace])?;
        sink.on_event(Event::EndMedia { media });
        Ok(())
    }

    fn media_query_list(&self, stream: &mut TokenStream) -> ParseResult<Vec<MediaQuery>> {
        let mut queries = Vec::new();
        self.skip_s(stream);
        if !matches!(stream.la(1)?, TokenKind::Ident | TokenKind::LParen) {
            return Ok(queries);
        }
        queries.push(self.media_query(stream)?);
        loop {
            self.skip_s(stream);
            if stream.la(1)? == TokenKind::Comma {
                stream.get();
                self.skip_s(stream);
                queries.push(self.media_query(stream)?);
            } else {
                break;
            }
        }
        Ok(queries)
    }

    fn media_query(&self, stream: &mut TokenStream) -> ParseResult<MediaQuery> {
        let start = stream.lt_token(1)?.span.start;
        let mut qualifier = None;
        let mut media_type = None;

        if stream.la(1)? == TokenKind::Ident {
            let lower = stream.lt_token(1)?.text.to_ascii_lowercase();
            if lower == "only" || lower == "not" {
                qualifier = Some(if lower == "only" { MediaQualifier::Only } else { MediaQualifier::Not });
                stream.get();
                self.skip_s(stream);
            }
        }

        if stream.la(1)? == TokenKind::Ident {
            let tok = stream.must_match(&[TokenKind::Ident])?;
            media_type = Some(tok.text);
            self.skip_s(stream);
        } else if qualifier.is_some() {
            return Err(SyntaxError::new(
                "expected a media type after 'only'/'not'",
                stream.lt_token(1)?.span.start,
            ));
        }

        let mut expressions = Vec::new();
        if media_type.is_none() {
            expressions.push(self.media_expression(stream)?);
        }
        loop {
            self.skip_s(stream);
            if stream.la(1)? == TokenKind::Ident && stream.lt_token(1)?.text.eq_ignore_ascii_case("and") {
                stream.get();
                self.skip_s(stream);
                expressions.push(self.media_expression(stream)?);
            } else {
                break;
            }
        }

        let end = stream.token().map(|t| t.span.end).unwrap_or(start);
        Ok(MediaQuery {
            qualifier,
            media_type,
            expressions,
            span: Span::new(start, end),
        })
    }

    fn media_expression(&self, stream: &mut TokenStream) -> ParseResult<MediaExpression> {
        let open = stream.must_match(&[TokenKind::LParen])?;
        self.skip_s(stream);
        let feature_tok = stream.must_match(&[TokenKind::Ident])?;
        self.skip_s(stream);
        let mut value = None;
        if stream.la(1)? == TokenKind::Colon {
            stream.get();
            self.skip_s(stream);
            value = Some(self.expr(stream)?);
            self.skip_s(stream);
        }
        let close = stream.must_match(&[TokenKind::RParen])?;
        Ok(MediaExpression {
            feature: feature_tok.text,
            value,
            span: Span::new(open.span.start, close.span.end),
        })
    }

    fn page(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::PageSym])?;
        self.skip_s(stream);
        let mut id = None;
        if stream.la(1)? == TokenKind::Ident {
            let tok = stream.must_match(&[TokenKind::Ident])?;
            if tok.text.eq_ignore_ascii_case("auto") {
                return Err(SyntaxError::new("'auto' is not a valid page selector", tok.span.start));
            }
            id = Some(tok.text);
            self.skip_s(stream);
        }
        let mut pseudo = None;
        if stream.la(1)? == TokenKind::Colon {
            stream.get();
            self.skip_s(stream);
            let tok = stream.must_match(&[TokenKind::Ident])?;
            pseudo = Some(tok.text);
            self.skip_s(stream);
        }
        stream.must_match(&[TokenKind::LBrace])?;
        sink.on_event(Event::StartPage {
            id: id.clone(),
            pseudo: pseudo.clone(),
        });
        self.skip_s(stream);
        loop {
            match stream.la(1)? {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    stream.get();
                    self.skip_s(stream);
                }
                kind if margin_box_from_kind(kind).is_some() => {
                    self.page_margin_box(stream, sink)?;
                    self.skip_s(stream);
                }
                _ => {
                    self.read_one_declaration(stream, sink)?;
                    self.skip_s(stream);
                }
            }
        }
        stream.must_match(&[TokenKind::RBrace])?;
        sink.on_event(Event::EndPage { id, pseudo });
        Ok(())
    }

    fn page_margin_box(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        let kind = stream.get();
        let margin = margin_box_from_kind(kind).expect("caller already checked this is a margin box");
        self.skip_s(stream);
        stream.must_match(&[TokenKind::LBrace])?;
        sink.on_event(Event::StartPageMargin { margin });
        self.read_declarations(stream, sink)?;
        stream.must_match(&[TokenKind::RBrace])?;
        sink.on_event(Event::EndPageMargin { margin });
        Ok(())
    }

    fn font_face(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        stream.must_match(&[TokenKind::FontFaceSym])?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::LBrace])?;
        sink.on_event(Event::StartFontFace);
        self.read_declarations(stream, sink)?;
        stream.must_match(&[TokenKind::RBrace])?;
        sink.on_event(Event::EndFontFace);
        Ok(())
    }

    fn ruleset(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        let selectors = self.selectors_group(stream)?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::LBrace])?;
        sink.on_event(Event::StartRule {
            selectors: selectors.clone(),
        });
        self.read_declarations(stream, sink)?;
        stream.must_match(&[TokenKind::RBrace])?;
        sink.on_event(Event::EndRule { selectors });
        Ok(())
    }

    /// Reads `declaration? (';' declaration?)*` up to (not including) the
    /// closing `}`. A malformed declaration is discarded and the stream
    /// resynced at the next `;` or `}`, unless running in strict mode.
    fn read_declarations(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        self.skip_s(stream);
        loop {
            match stream.la(1)? {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    stream.get();
                    self.skip_s(stream);
                    continue;
                }
                _ => {
                    self.read_one_declaration(stream, sink)?;
                    self.skip_s(stream);
                }
            }
        }
        Ok(())
    }

    /// A single `declaration` attempt within a declarations block, with the
    /// declaration-boundary recovery policy applied around it. Returns
    /// `Err` only in strict mode.
    fn read_one_declaration(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        match self.declaration(stream, sink) {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.options.strict {
                    return Err(err);
                }
                self.emit_error(sink, &err);
                if stream.advance(&[TokenKind::Semicolon, TokenKind::RBrace]) == TokenKind::RBrace {
                    stream.unget()?;
                }
                Ok(())
            }
        }
    }

    fn declaration(&self, stream: &mut TokenStream, sink: &mut dyn EventSink) -> ParseResult<()> {
        let property = self.property_name(stream)?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::Colon])?;
        self.skip_s(stream);
        let value = self.expr(stream)?;
        if value.parts.is_empty() {
            return Err(SyntaxError::new("expected a property value", stream.lt_token(1)?.span.start));
        }
        self.skip_s(stream);
        let important = self.maybe_important(stream)?;
        sink.on_event(Event::Property {
            property,
            value,
            important,
        });
        Ok(())
    }

    fn property_name(&self, stream: &mut TokenStream) -> ParseResult<PropertyName> {
        let start = stream.lt_token(1)?.span.start;
        if self.options.star_hack && stream.la(1)? == TokenKind::Star {
            stream.get();
            let ident = stream.must_match(&[TokenKind::Ident])?;
            return Ok(PropertyName {
                name: ident.text,
                hack: Some(Hack::Star),
                span: Span::new(start, ident.span.end),
            });
        }
        let ident = stream.must_match(&[TokenKind::Ident])?;
        if self.options.underscore_hack && ident.text.starts_with('_') {
            return Ok(PropertyName {
                name: ident.text[1..].to_string(),
                hack: Some(Hack::Underscore),
                span: ident.span,
            });
        }
        Ok(PropertyName {
            name: ident.text,
            hack: None,
            span: ident.span,
        })
    }

    fn maybe_important(&self, stream: &mut TokenStream) -> ParseResult<bool> {
        if stream.la(1)? == TokenKind::ImportantSym {
            stream.get();
            self.skip_s(stream);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ---- expr / term -----------------------------------------------------

    fn expr(&self, stream: &mut TokenStream) -> ParseResult<PropertyValue> {
        let start = stream.lt_token(1)?.span.start;
        let mut parts = Vec::new();

        let Some(first) = self.try_term(stream)? else {
            return Ok(PropertyValue {
                parts,
                span: Span::new(start, start),
            });
        };
        parts.push(ValuePart::Term(first));

        loop {
            self.skip_s(stream);
            match stream.la(1)? {
                TokenKind::Slash => {
                    stream.get();
                    parts.push(ValuePart::Operator(ValueOperator::Slash));
                    self.skip_s(stream);
                }
                TokenKind::Comma => {
                    stream.get();
                    parts.push(ValuePart::Operator(ValueOperator::Comma));
                    self.skip_s(stream);
                }
                _ => {}
            }
            match self.try_term(stream)? {
                Some(term) => parts.push(ValuePart::Term(term)),
                None => break,
            }
        }

        let end = stream.token().map(|t| t.span.end).unwrap_or(start);
        Ok(PropertyValue {
            parts,
            span: Span::new(start, end),
        })
    }

    /// Attempts one `term`. Returns `Ok(None)` if nothing term-shaped is
    /// next (the normal way `expr`'s loop ends), `Err` if a unary sign was
    /// seen but nothing valid followed it.
    fn try_term(&self, stream: &mut TokenStream) -> ParseResult<Option<Term>> {
        let start = stream.lt_token(1)?.span.start;

        let mut sign = None;
        if matches!(stream.la(1)?, TokenKind::Plus | TokenKind::Minus) {
            sign = Some(if stream.la(1)? == TokenKind::Plus {
                Sign::Plus
            } else {
                Sign::Minus
            });
        }
        let probe = if sign.is_some() { stream.la(2)? } else { stream.la(1)? };

        let term = match probe {
            TokenKind::Number
            | TokenKind::Percentage
            | TokenKind::Length
            | TokenKind::Ems
            | TokenKind::Exs
            | TokenKind::Angle
            | TokenKind::Time
            | TokenKind::Freq
            | TokenKind::Resolution
            | TokenKind::Dimension => {
                if sign.is_some() {
                    stream.get();
                }
                let tok = stream.must_match(&[
                    TokenKind::Number,
                    TokenKind::Percentage,
                    TokenKind::Length,
                    TokenKind::Ems,
                    TokenKind::Exs,
                    TokenKind::Angle,
                    TokenKind::Time,
                    TokenKind::Freq,
                    TokenKind::Resolution,
                    TokenKind::Dimension,
                ])?;
                Some(numeric_term(sign, tok))
            }
            TokenKind::String if sign.is_none() => {
                let tok = stream.must_match(&[TokenKind::String])?;
                Some(Term {
                    sign: None,
                    kind: TermKind::Str(unquote(&tok.text)),
                    span: tok.span,
                })
            }
            TokenKind::Uri if sign.is_none() => {
                let tok = stream.must_match(&[TokenKind::Uri])?;
                Some(Term {
                    sign: None,
                    kind: TermKind::Uri(uri_text(&tok)),
                    span: tok.span,
                })
            }
            TokenKind::UnicodeRange if sign.is_none() => {
                let tok = stream.must_match(&[TokenKind::UnicodeRange])?;
                Some(Term {
                    sign: None,
                    kind: TermKind::UnicodeRange(tok.text.clone()),
                    span: tok.span,
                })
            }
            TokenKind::Hash if sign.is_none() => {
                let tok = stream.must_match(&[TokenKind::Hash])?;
                Some(self.hexcolor_term(tok)?)
            }
            TokenKind::Function if sign.is_none() => Some(self.function_term(stream)?),
            TokenKind::IeFunction if sign.is_none() && self.options.ie_filters => {
                Some(self.ie_function_term(stream)?)
            }
            TokenKind::Ident if sign.is_none() => {
                let tok = stream.must_match(&[TokenKind::Ident])?;
                Some(Term {
                    sign: None,
                    kind: TermKind::Ident(tok.text.clone()),
                    span: tok.span,
                })
            }
            _ => None,
        };

        match term {
            Some(term) => Ok(Some(term)),
            None if sign.is_some() => Err(SyntaxError::new("expected a value after unary sign", start)),
            None => Ok(None),
        }
    }

    fn hexcolor_term(&self, tok: Token) -> ParseResult<Term> {
        let digits = &tok.text[1..];
        let valid = (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(SyntaxError::new(
                format!("invalid hex color '{}': must be 3 or 6 hex digits", tok.text),
                tok.span.start,
            ));
        }
        Ok(Term {
            sign: None,
            kind: TermKind::Hexcolor(tok.text.clone()),
            span: tok.span,
        })
    }

    fn function_term(&self, stream: &mut TokenStream) -> ParseResult<Term> {
        let open = stream.must_match(&[TokenKind::Function])?;
        let name = open.text.trim_end_matches('(').to_string();
        self.skip_s(stream);
        let args = self.expr(stream)?;
        self.skip_s(stream);
        let close = stream.must_match(&[TokenKind::RParen])?;
        Ok(Term {
            sign: None,
            kind: TermKind::Function(FunctionCall { name, args }),
            span: Span::new(open.span.start, close.span.end),
        })
    }

    fn ie_function_term(&self, stream: &mut TokenStream) -> ParseResult<Term> {
        let open = stream.must_match(&[TokenKind::IeFunction])?;
        let name = open.text.trim_end_matches('(').to_string();
        self.skip_s(stream);
        let mut args = Vec::new();
        if stream.la(1)? != TokenKind::RParen {
            args.push(self.ie_function_arg(stream)?);
            loop {
                self.skip_s(stream);
                if stream.la(1)? == TokenKind::Comma {
                    stream.get();
                    self.skip_s(stream);
                    args.push(self.ie_function_arg(stream)?);
                } else {
                    break;
                }
            }
        }
        self.skip_s(stream);
        let close = stream.must_match(&[TokenKind::RParen])?;
        Ok(Term {
            sign: None,
            kind: TermKind::IeFunction(IeFunctionCall { name, args }),
            span: Span::new(open.span.start, close.span.end),
        })
    }

    fn ie_function_arg(&self, stream: &mut TokenStream) -> ParseResult<(String, Term)> {
        let ident = stream.must_match(&[TokenKind::Ident])?;
        self.skip_s(stream);
        stream.must_match(&[TokenKind::Equals])?;
        self.skip_s(stream);
        let term = self
            .try_term(stream)?
            .ok_or_else(|| SyntaxError::new("expected a value", stream.lt_token(1)?.span.start))?;
        Ok((ident.text, term))
    }

    // ---- selectors -------------------------------------------------------

    fn selectors_group(&self, stream: &mut TokenStream) -> ParseResult<Vec<Selector>> {
        self.skip_s(stream);
        let mut selectors = Vec::new();
        if let Some(sel) = self.try_selector(stream)? {
            selectors.push(sel);
            loop {
                self.skip_s(stream);
                if stream.la(1)? == TokenKind::Comma {
                    stream.get();
                    self.skip_s(stream);
                    match self.try_selector(stream)? {
                        Some(sel) => selectors.push(sel),
                        None => {
                            return Err(SyntaxError::new(
                                "expected a selector after ','",
                                stream.lt_token(1)?.span.start,
                            ))
                        }
                    }
                } else {
                    break;
                }
            }
        }
        Ok(selectors)
    }

    fn selector(&self, stream: &mut TokenStream) -> ParseResult<Selector> {
        self.try_selector(stream)?
            .ok_or_else(|| SyntaxError::new("expected a selector", stream.lt_token(1).map(|t| t.span.start).unwrap_or(Position::new(1, 1))))
    }

    fn try_selector(&self, stream: &mut TokenStream) -> ParseResult<Option<Selector>> {
        let start = stream.lt_token(1)?.span.start;
        let Some(first) = self.try_simple_selector_sequence(stream)? else {
            return Ok(None);
        };
        let mut rest = Vec::new();
        loop {
            let had_ws = self.skip_s(stream);
            let explicit = match stream.la(1)? {
                TokenKind::Greater => Some(Combinator::Child),
                TokenKind::Plus => Some(Combinator::Adjacent),
                TokenKind::Tilde => Some(Combinator::Sibling),
                _ => None,
            };
            if let Some(combinator) = explicit {
                stream.get();
                self.skip_s(stream);
                match self.try_simple_selector_sequence(stream)? {
                    Some(seq) => rest.push((combinator, seq)),
                    None => {
                        return Err(SyntaxError::new(
                            "expected a selector after combinator",
                            stream.lt_token(1)?.span.start,
                        ))
                    }
                }
            } else if had_ws {
                match self.try_simple_selector_sequence(stream)? {
                    Some(seq) => rest.push((Combinator::Descendant, seq)),
                    None => break,
                }
            } else {
                break;
            }
        }
        let end = stream.token().map(|t| t.span.end).unwrap_or(start);
        Ok(Some(Selector {
            first,
            rest,
            span: Span::new(start, end),
        }))
    }

    fn try_simple_selector_sequence(
        &self,
        stream: &mut TokenStream,
    ) -> ParseResult<Option<SimpleSelectorSequence>> {
        let start = stream.lt_token(1)?.span.start;
        let type_selector = self.try_type_selector_or_universal(stream)?;
        let mut modifiers = Vec::new();
        loop {
            match stream.la(1)? {
                TokenKind::Hash => {
                    let tok = stream.must_match(&[TokenKind::Hash])?;
                    modifiers.push(SimpleSelectorModifier::Id(tok.text[1..].to_string()));
                }
                TokenKind::Dot => {
                    stream.get();
                    let tok = stream.must_match(&[TokenKind::Ident])?;
                    modifiers.push(SimpleSelectorModifier::Class(tok.text));
                }
                TokenKind::LBracket => {
                    modifiers.push(SimpleSelectorModifier::Attribute(self.attribute(stream)?));
                }
                TokenKind::Colon => {
                    modifiers.push(SimpleSelectorModifier::Pseudo(self.pseudo(stream)?));
                }
                TokenKind::Not => {
                    modifiers.push(SimpleSelectorModifier::Negation(self.negation(stream)?));
                }
                _ => break,
            }
        }
        if type_selector.is_none() && modifiers.is_empty() {
            return Ok(None);
        }
        let end = stream.token().map(|t| t.span.end).unwrap_or(start);
        Ok(Some(SimpleSelectorSequence {
            type_selector,
            modifiers,
            span: Span::new(start, end),
        }))
    }

    /// Reads an optional `namespace_prefix? (IDENT | '*')`. Namespace
    /// prefixes require up to two tokens of lookahead to disambiguate from
    /// a bare name/universal selector (`ns|div` vs. just `div`), so on a
    /// false start this rolls back via `unget` rather than committing
    /// early.
    fn try_type_selector_or_universal(&self, stream: &mut TokenStream) -> ParseResult<Option<TypeSelector>> {
        let start = stream.lt_token(1)?.span.start;
        let kind1 = stream.la(1)?;
        if !matches!(kind1, TokenKind::Ident | TokenKind::Star | TokenKind::Pipe) {
            return Ok(None);
        }

        if kind1 == TokenKind::Pipe {
            stream.get();
            return match stream.la(1)? {
                TokenKind::Ident => {
                    let tok = stream.must_match(&[TokenKind::Ident])?;
                    Ok(Some(TypeSelector {
                        namespace: Some(NamespacePrefix::Empty),
                        name: ElementName::Name(tok.text),
                        span: Span::new(start, tok.span.end),
                    }))
                }
                TokenKind::Star => {
                    let tok = stream.must_match(&[TokenKind::Star])?;
                    Ok(Some(TypeSelector {
                        namespace: Some(NamespacePrefix::Empty),
                        name: ElementName::Universal,
                        span: Span::new(start, tok.span.end),
                    }))
                }
                _ => {
                    stream.unget()?;
                    Ok(None)
                }
            };
        }

        let first_tok = stream.must_match(&[kind1])?;
        if stream.la(1)? == TokenKind::Pipe {
            stream.get();
            if matches!(stream.la(1)?, TokenKind::Ident | TokenKind::Star) {
                let prefix = if first_tok.kind == TokenKind::Star {
                    NamespacePrefix::Wildcard
                } else {
                    NamespacePrefix::Named(first_tok.text.clone())
                };
                let name_kind = stream.get();
                let name_tok = stream.token().cloned().expect("token set after get");
                let name = if name_kind == TokenKind::Star {
                    ElementName::Universal
                } else {
                    ElementName::Name(name_tok.text)
                };
                return Ok(Some(TypeSelector {
                    namespace: Some(prefix),
                    name,
                    span: Span::new(start, name_tok.span.end),
                }));
            }
            // No name followed the '|': roll back both it and the tentative
            // prefix token, then re-read the bare name/universal fresh.
            stream.unget()?;
            stream.unget()?;
            let kind = stream.la(1)?;
            let tok = stream.must_match(&[kind])?;
            let name = if tok.kind == TokenKind::Star {
                ElementName::Universal
            } else {
                ElementName::Name(tok.text)
            };
            return Ok(Some(TypeSelector {
                namespace: None,
                name,
                span: tok.span,
            }));
        }

        let name = if first_tok.kind == TokenKind::Star {
            ElementName::Universal
        } else {
            ElementName::Name(first_tok.text)
        };
        Ok(Some(TypeSelector {
            namespace: None,
            name,
            span: first_tok.span,
        }))
    }

    fn attribute(&self, stream: &mut TokenStream) -> ParseResult<AttributeSelector> {
        stream.must_match(&[TokenKind::LBracket])?;
        self.skip_s(stream);

        let mut namespace = None;
        if stream.la(1)? == TokenKind::Pipe {
            stream.get();
            namespace = Some(NamespacePrefix::Empty);
            self.skip_s(stream);
        } else if matches!(stream.la(1)?, TokenKind::Ident | TokenKind::Star) {
            let kind = stream.la(1)?;
            let tok = stream.must_match(&[kind])?;
            if stream.la(1)? == TokenKind::Pipe {
                stream.get();
                namespace = Some(if tok.kind == TokenKind::Star {
                    NamespacePrefix::Wildcard
                } else {
                    NamespacePrefix::Named(tok.text)
                });
                self.skip_s(stream);
            } else {
                stream.unget()?;
            }
        }

        self.skip_s(stream);
        let name_tok = stream.must_match(&[TokenKind::Ident])?;
        self.skip_s(stream);

        let mut operator = None;
        let mut value = None;
        let candidate_op = match stream.la(1)? {
            TokenKind::Equals => Some(AttributeOperator::Equals),
            TokenKind::Includes => Some(AttributeOperator::Includes),
            TokenKind::DashMatch => Some(AttributeOperator::DashMatch),
            TokenKind::PrefixMatch => Some(AttributeOperator::PrefixMatch),
            TokenKind::SuffixMatch => Some(AttributeOperator::SuffixMatch),
            TokenKind::SubstringMatch => Some(AttributeOperator::SubstringMatch),
            _ => None,
        };
        if let Some(op) = candidate_op {
            stream.get();
            operator = Some(op);
            self.skip_s(stream);
            let val_tok = stream.must_match(&[TokenKind::Ident, TokenKind::String])?;
            value = Some(match val_tok.kind {
                TokenKind::String => AttributeValue::Str(unquote(&val_tok.text)),
                _ => AttributeValue::Ident(val_tok.text),
            });
            self.skip_s(stream);
        }

        stream.must_match(&[TokenKind::RBracket])?;
        Ok(AttributeSelector {
            namespace,
            name: name_tok.text,
            operator,
            value,
        })
    }

    fn pseudo(&self, stream: &mut TokenStream) -> ParseResult<Pseudo> {
        let colon1 = stream.must_match(&[TokenKind::Colon])?;
        let marker = if stream.la(1)? == TokenKind::Colon {
            stream.get();
            PseudoMarker::Double
        } else {
            PseudoMarker::Single
        };

        if stream.la(1)? == TokenKind::Function {
            let open = stream.must_match(&[TokenKind::Function])?;
            let name = open.text.trim_end_matches('(').to_string();
            self.skip_s(stream);
            let expr = self.expr(stream)?;
            self.skip_s(stream);
            let close = stream.must_match(&[TokenKind::RParen])?;
            return Ok(Pseudo {
                marker,
                kind: PseudoKind::Function { name, expr },
                span: Span::new(colon1.span.start, close.span.end),
            });
        }

        let ident = stream.must_match(&[TokenKind::Ident])?;
        Ok(Pseudo {
            marker,
            kind: PseudoKind::Ident(ident.text),
            span: Span::new(colon1.span.start, ident.span.end),
        })
    }

    fn negation(&self, stream: &mut TokenStream) -> ParseResult<NegationArg> {
        stream.must_match(&[TokenKind::Not])?;
        self.skip_s(stream);
        let arg = match stream.la(1)? {
            TokenKind::Hash => {
                let tok = stream.must_match(&[TokenKind::Hash])?;
                NegationArg::Hash(tok.text[1..].to_string())
            }
            TokenKind::Dot => {
                stream.get();
                let tok = stream.must_match(&[TokenKind::Ident])?;
                NegationArg::Class(tok.text)
            }
            TokenKind::LBracket => NegationArg::Attribute(self.attribute(stream)?),
            TokenKind::Colon => NegationArg::Pseudo(self.pseudo(stream)?),
            TokenKind::Ident | TokenKind::Star | TokenKind::Pipe => {
                match self.try_type_selector_or_universal(stream)? {
                    Some(TypeSelector {
                        namespace: None,
                        name: ElementName::Universal,
                        ..
                    }) => NegationArg::Universal,
                    Some(ts) => NegationArg::Type(ts),
                    None => {
                        return Err(SyntaxError::new(
                            "expected a negation argument",
                            stream.lt_token(1)?.span.start,
                        ))
                    }
                }
            }
            _ => {
                return Err(SyntaxError::new(
                    "expected a negation argument",
                    stream.lt_token(1)?.span.start,
                ))
            }
        };
        self.skip_s(stream);
        stream.must_match(&[TokenKind::RParen])?;
        Ok(arg)
    }
}

fn unquote(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') && bytes[bytes.len() - 1] == bytes[0] {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}

fn uri_text(tok: &Token) -> String {
    if tok.kind != TokenKind::Uri {
        return unquote(&tok.text);
    }
    let inner = tok.text.trim();
    let inner = inner
        .strip_prefix("url(")
        .or_else(|| inner.strip_prefix("URL("))
        .or_else(|| {
            if inner.len() >= 4 && inner[..4].eq_ignore_ascii_case("url(") {
                Some(&inner[4..])
            } else {
                None
            }
        })
        .unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner).trim();
    unquote(inner)
}

fn numeric_term(sign: Option<Sign>, tok: Token) -> Term {
    use crate::numeric::{parse_f64, split_unit};

    let kind = match tok.kind {
        TokenKind::Number => TermKind::Number(parse_f64(&tok.text)),
        TokenKind::Percentage => TermKind::Percentage(parse_f64(tok.text.trim_end_matches('%'))),
        TokenKind::Ems => TermKind::Ems(split_unit(&tok.text).0),
        TokenKind::Exs => TermKind::Exs(split_unit(&tok.text).0),
        TokenKind::Length => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Length(n, u)
        }
        TokenKind::Angle => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Angle(n, u)
        }
        TokenKind::Time => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Time(n, u)
        }
        TokenKind::Freq => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Freq(n, u)
        }
        TokenKind::Resolution => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Resolution(n, u)
        }
        TokenKind::Dimension => {
            let (n, u) = split_unit(&tok.text);
            TermKind::Dimension(n, u)
        }
        other => unreachable!("numeric_term called with non-numeric token kind {other}"),
    };
    Term {
        sign,
        kind,
        span: tok.span,
    }
}

fn margin_box_from_kind(kind: TokenKind) -> Option<MarginBox> {
    Some(match kind {
        TokenKind::TopLeftCorner => MarginBox::TopLeftCorner,
        TokenKind::TopLeft => MarginBox::TopLeft,
        TokenKind::TopCenter => MarginBox::TopCenter,
        TokenKind::TopRight => MarginBox::TopRight,
        TokenKind::TopRightCorner => MarginBox::TopRightCorner,
        TokenKind::BottomLeftCorner => MarginBox::BottomLeftCorner,
        TokenKind::BottomLeft => MarginBox::BottomLeft,
        TokenKind::BottomCenter => MarginBox::BottomCenter,
        TokenKind::BottomRight => MarginBox::BottomRight,
        TokenKind::BottomRightCorner => MarginBox::BottomRightCorner,
        TokenKind::LeftTop => MarginBox::LeftTop,
        TokenKind::LeftMiddle => MarginBox::LeftMiddle,
        TokenKind::LeftBottom => MarginBox::LeftBottom,
        TokenKind::RightTop => MarginBox::RightTop,
        TokenKind::RightMiddle => MarginBox::RightMiddle,
        TokenKind::RightBottom => MarginBox::RightBottom,
        _ => return None,
    })
}
