//! The static token descriptor table.
//!
//! Built once via `once_cell::sync::Lazy` and shared (`&'static`) across
//! every `TokenStream`, the way the old hand-rolled lexer built its
//! `LEX_MAP` once and reused it for every lex. Descriptors are tried in
//! table order; the first one whose matcher succeeds wins, so more
//! specific/longer entries are listed before the shorter prefixes they
//! could otherwise be mistaken for (`@top-left-corner` before
//! `@top-left`, `~=` before `~`, dimension units before bare `NUMBER`).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::numeric::{number_prefix_len, unit_suffix_len};
use crate::reader::Matcher;

use super::token::TokenKind;

pub(crate) struct TokenDescriptor {
    pub kind: TokenKind,
    pub matcher: Matcher,
    pub hide: bool,
}

fn d(kind: TokenKind, matcher: Matcher, hide: bool) -> TokenDescriptor {
    TokenDescriptor { kind, matcher, hide }
}

static RE_S: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t\n\f]+").unwrap());
static RE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\*([^*]|\*+[^*/])*\*+/").unwrap());
static RE_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"([^"\\\n]|\\.)*"|^'([^'\\\n]|\\.)*'"#).unwrap());
static RE_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^url\(\s*("([^"\\]|\\.)*"|'([^'\\]|\\.)*'|[^)'"\s]*)\s*\)"#).unwrap()
});
static RE_UNICODE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^u\+[0-9a-f?]{1,6}(-[0-9a-f]{1,6})?").unwrap());
static RE_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*").unwrap());
static RE_HASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[A-Za-z0-9_-]+").unwrap());
static RE_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*\(").unwrap());
static RE_IE_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^progid:[A-Za-z][A-Za-z0-9_.]*\(").unwrap());
static RE_IMPORTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^!\s*important\b").unwrap());
static RE_DIMENSION_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*").unwrap());

fn match_ems(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["em"])
}
fn match_exs(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["ex"])
}
fn match_length(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["px", "cm", "mm", "in", "pt", "pc", "q"])
}
fn match_angle(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["deg", "rad", "grad", "turn"])
}
fn match_time(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["ms", "s"])
}
fn match_freq(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["khz", "hz"])
}
fn match_resolution(s: &str) -> Option<usize> {
    unit_suffix_len(s, &["dpcm", "dppx", "dpi"])
}
fn match_percentage(s: &str) -> Option<usize> {
    let num_len = number_prefix_len(s)?;
    if s[num_len..].starts_with('%') {
        Some(num_len + 1)
    } else {
        None
    }
}
fn match_dimension(s: &str) -> Option<usize> {
    let num_len = number_prefix_len(s)?;
    let rest = &s[num_len..];
    let m = RE_DIMENSION_UNIT.find(rest)?;
    if m.start() != 0 {
        return None;
    }
    Some(num_len + m.end())
}
fn match_number(s: &str) -> Option<usize> {
    let num_len = number_prefix_len(s)?;
    match s[num_len..].chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '%' => None,
        _ => Some(num_len),
    }
}

pub(crate) static TOKEN_TABLE: Lazy<Vec<TokenDescriptor>> = Lazy::new(|| {
    vec![
        d(TokenKind::Eof, Matcher::Eof, false),
        d(TokenKind::S, Matcher::Regex(&RE_S), false),
        d(TokenKind::Comment, Matcher::Regex(&RE_COMMENT), true),
        d(TokenKind::Cdo, Matcher::Literal("<!--"), false),
        d(TokenKind::Cdc, Matcher::Literal("-->"), false),
        d(TokenKind::String, Matcher::Regex(&RE_STRING), false),
        d(TokenKind::Uri, Matcher::Regex(&RE_URI), false),
        d(TokenKind::UnicodeRange, Matcher::Regex(&RE_UNICODE_RANGE), false),
        d(TokenKind::Not, Matcher::CiLiteral(":not("), false),
        d(TokenKind::IeFunction, Matcher::Regex(&RE_IE_FUNCTION), false),
        d(TokenKind::CharsetSym, Matcher::CiLiteral("@charset"), false),
        d(TokenKind::MediaSym, Matcher::CiLiteral("@media"), false),
        d(TokenKind::ImportSym, Matcher::CiLiteral("@import"), false),
        d(TokenKind::NamespaceSym, Matcher::CiLiteral("@namespace"), false),
        d(TokenKind::PageSym, Matcher::CiLiteral("@page"), false),
        d(TokenKind::FontFaceSym, Matcher::CiLiteral("@font-face"), false),
        d(TokenKind::TopLeftCorner, Matcher::CiLiteral("@top-left-corner"), false),
        d(TokenKind::TopRightCorner, Matcher::CiLiteral("@top-right-corner"), false),
        d(TokenKind::BottomLeftCorner, Matcher::CiLiteral("@bottom-left-corner"), false),
        d(TokenKind::BottomRightCorner, Matcher::CiLiteral("@bottom-right-corner"), false),
        d(TokenKind::TopLeft, Matcher::CiLiteral("@top-left"), false),
        d(TokenKind::TopCenter, Matcher::CiLiteral("@top-center"), false),
        d(TokenKind::TopRight, Matcher::CiLiteral("@top-right"), false),
        d(TokenKind::BottomLeft, Matcher::CiLiteral("@bottom-left"), false),
        d(TokenKind::BottomCenter, Matcher::CiLiteral("@bottom-center"), false),
        d(TokenKind::BottomRight, Matcher::CiLiteral("@bottom-right"), false),
        d(TokenKind::LeftTop, Matcher::CiLiteral("@left-top"), false),
        d(TokenKind::LeftMiddle, Matcher::CiLiteral("@left-middle"), false),
        d(TokenKind::LeftBottom, Matcher::CiLiteral("@left-bottom"), false),
        d(TokenKind::RightTop, Matcher::CiLiteral("@right-top"), false),
        d(TokenKind::RightMiddle, Matcher::CiLiteral("@right-middle"), false),
        d(TokenKind::RightBottom, Matcher::CiLiteral("@right-bottom"), false),
        d(TokenKind::ImportantSym, Matcher::Regex(&RE_IMPORTANT), false),
        d(TokenKind::Function, Matcher::Regex(&RE_FUNCTION), false),
        d(TokenKind::Ems, Matcher::Custom(match_ems), false),
        d(TokenKind::Exs, Matcher::Custom(match_exs), false),
        d(TokenKind::Length, Matcher::Custom(match_length), false),
        d(TokenKind::Angle, Matcher::Custom(match_angle), false),
        d(TokenKind::Time, Matcher::Custom(match_time), false),
        d(TokenKind::Freq, Matcher::Custom(match_freq), false),
        d(TokenKind::Resolution, Matcher::Custom(match_resolution), false),
        d(TokenKind::Percentage, Matcher::Custom(match_percentage), false),
        d(TokenKind::Dimension, Matcher::Custom(match_dimension), false),
        d(TokenKind::Number, Matcher::Custom(match_number), false),
        d(TokenKind::Hash, Matcher::Regex(&RE_HASH), false),
        d(TokenKind::Ident, Matcher::Regex(&RE_IDENT), false),
        d(TokenKind::PrefixMatch, Matcher::Literal("^="), false),
        d(TokenKind::SuffixMatch, Matcher::Literal("$="), false),
        d(TokenKind::SubstringMatch, Matcher::Literal("*="), false),
        d(TokenKind::Includes, Matcher::Literal("~="), false),
        d(TokenKind::DashMatch, Matcher::Literal("|="), false),
        d(TokenKind::Equals, Matcher::Literal("="), false),
        d(TokenKind::Comma, Matcher::Literal(","), false),
        d(TokenKind::Colon, Matcher::Literal(":"), false),
        d(TokenKind::Semicolon, Matcher::Literal(";"), false),
        d(TokenKind::Dot, Matcher::Literal("."), false),
        d(TokenKind::Star, Matcher::Literal("*"), false),
        d(TokenKind::Plus, Matcher::Literal("+"), false),
        d(TokenKind::Minus, Matcher::Literal("-"), false),
        d(TokenKind::Slash, Matcher::Literal("/"), false),
        d(TokenKind::Pipe, Matcher::Literal("|"), false),
        d(TokenKind::Greater, Matcher::Literal(">"), false),
        d(TokenKind::Tilde, Matcher::Literal("~"), false),
        d(TokenKind::LBrace, Matcher::Literal("{"), false),
        d(TokenKind::RBrace, Matcher::Literal("}"), false),
        d(TokenKind::LBracket, Matcher::Literal("["), false),
        d(TokenKind::RBracket, Matcher::Literal("]"), false),
        d(TokenKind::LParen, Matcher::Literal("("), false),
        d(TokenKind::RParen, Matcher::Literal(")"), false),
    ]
});

static TOKEN_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    TOKEN_TABLE
        .iter()
        .enumerate()
        .map(|(i, descriptor)| (descriptor.kind.name(), i))
        .collect()
});

/// Looks up a descriptor's table index by its name, the one lookup path
/// (no separate, independently-maintained symbol mapping to fall out of
/// sync with the table).
pub(crate) fn index_of(name: &str) -> Option<usize> {
    TOKEN_INDEX.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_is_reserved_as_the_first_entry() {
        assert_eq!(TOKEN_TABLE[0].kind, TokenKind::Eof);
    }

    #[test]
    fn index_of_finds_every_descriptor_at_its_table_position() {
        for (i, descriptor) in TOKEN_TABLE.iter().enumerate() {
            assert_eq!(index_of(descriptor.kind.name()), Some(i));
        }
        assert!(index_of("NOT_A_REAL_TOKEN").is_none());
    }
}
