//! Token kinds and instances.
//!
//! A descriptor's `kind` classifies a token the way a grammar name does
//! (`IDENT`, `HASH`, `LBRACE`, ...); the actual matched text lives
//! separately on the [`Token`] instance, mirroring the split between a
//! token *type* and a token *value* that the rest of the engine assumes.

use serde::{Deserialize, Serialize};

use crate::reader::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Eof,
    S,
    Comment,
    Cdo,
    Cdc,
    Ident,
    Hash,
    String,
    Uri,
    Number,
    Percentage,
    Length,
    Ems,
    Exs,
    Angle,
    Time,
    Freq,
    Resolution,
    Dimension,
    UnicodeRange,
    Function,
    IeFunction,
    Not,
    CharsetSym,
    MediaSym,
    ImportSym,
    NamespaceSym,
    PageSym,
    FontFaceSym,
    TopLeftCorner,
    TopLeft,
    TopCenter,
    TopRight,
    TopRightCorner,
    BottomLeftCorner,
    BottomLeft,
    BottomCenter,
    BottomRight,
    BottomRightCorner,
    LeftTop,
    LeftMiddle,
    LeftBottom,
    RightTop,
    RightMiddle,
    RightBottom,
    ImportantSym,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Star,
    Plus,
    Minus,
    Slash,
    Equals,
    Pipe,
    Greater,
    Tilde,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Includes,
    DashMatch,
    /// A character that matched no descriptor in the table. Distinct from
    /// any numeric "unrecognized token id" so no lookup-by-id can ever
    /// collide with it.
    Unrecognized,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Eof => "EOF",
            S => "S",
            Comment => "COMMENT",
            Cdo => "CDO",
            Cdc => "CDC",
            Ident => "IDENT",
            Hash => "HASH",
            String => "STRING",
            Uri => "URI",
            Number => "NUMBER",
            Percentage => "PERCENTAGE",
            Length => "LENGTH",
            Ems => "EMS",
            Exs => "EXS",
            Angle => "ANGLE",
            Time => "TIME",
            Freq => "FREQ",
            Resolution => "RESOLUTION",
            Dimension => "DIMENSION",
            UnicodeRange => "UNICODE_RANGE",
            Function => "FUNCTION",
            IeFunction => "IE_FUNCTION",
            Not => "NOT",
            CharsetSym => "CHARSET_SYM",
            MediaSym => "MEDIA_SYM",
            ImportSym => "IMPORT_SYM",
            NamespaceSym => "NAMESPACE_SYM",
            PageSym => "PAGE_SYM",
            FontFaceSym => "FONT_FACE_SYM",
            TopLeftCorner => "TOP_LEFT_CORNER_SYM",
            TopLeft => "TOP_LEFT_SYM",
            TopCenter => "TOP_CENTER_SYM",
            TopRight => "TOP_RIGHT_SYM",
            TopRightCorner => "TOP_RIGHT_CORNER_SYM",
            BottomLeftCorner => "BOTTOM_LEFT_CORNER_SYM",
            BottomLeft => "BOTTOM_LEFT_SYM",
            BottomCenter => "BOTTOM_CENTER_SYM",
            BottomRight => "BOTTOM_RIGHT_SYM",
            BottomRightCorner => "BOTTOM_RIGHT_CORNER_SYM",
            LeftTop => "LEFT_TOP_SYM",
            LeftMiddle => "LEFT_MIDDLE_SYM",
            LeftBottom => "LEFT_BOTTOM_SYM",
            RightTop => "RIGHT_TOP_SYM",
            RightMiddle => "RIGHT_MIDDLE_SYM",
            RightBottom => "RIGHT_BOTTOM_SYM",
            ImportantSym => "IMPORTANT_SYM",
            Comma => "COMMA",
            Colon => "COLON",
            Semicolon => "SEMICOLON",
            Dot => "DOT",
            Star => "STAR",
            Plus => "PLUS",
            Minus => "MINUS",
            Slash => "SLASH",
            Equals => "EQUALS",
            Pipe => "PIPE",
            Greater => "GREATER",
            Tilde => "TILDE",
            LBrace => "LBRACE",
            RBrace => "RBRACE",
            LBracket => "LBRACKET",
            RBracket => "RBRACKET",
            LParen => "LPAREN",
            RParen => "RPAREN",
            PrefixMatch => "PREFIXMATCH",
            SuffixMatch => "SUFFIXMATCH",
            SubstringMatch => "SUBSTRINGMATCH",
            Includes => "INCLUDES",
            DashMatch => "DASHMATCH",
            Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}
