//! Value objects produced by the grammar engine.
//!
//! None of these are retained as a tree; the grammar builds one of these,
//! fires the event that carries it, and drops it. They exist purely as
//! structured payloads, which is why they all derive `Serialize`.

use std::fmt;

use serde::Serialize;

use crate::reader::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaQualifier {
    Only,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaQuery {
    pub qualifier: Option<MediaQualifier>,
    pub media_type: Option<String>,
    pub expressions: Vec<MediaExpression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaExpression {
    pub feature: String,
    pub value: Option<PropertyValue>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Combinator {
    /// Whitespace between two sequences.
    Descendant,
    /// `>`
    Child,
    /// `+`
    Adjacent,
    /// `~`
    Sibling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NamespacePrefix {
    Named(String),
    /// `*|name` - any namespace.
    Wildcard,
    /// `|name` - explicitly no namespace.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementName {
    Name(String),
    /// `*`
    Universal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSelector {
    pub namespace: Option<NamespacePrefix>,
    pub name: ElementName,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeOperator {
    Equals,
    Includes,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeValue {
    Ident(String),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSelector {
    pub namespace: Option<NamespacePrefix>,
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<AttributeValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PseudoMarker {
    /// `:name`
    Single,
    /// `::name`
    Double,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PseudoKind {
    Ident(String),
    Function { name: String, expr: PropertyValue },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pseudo {
    pub marker: PseudoMarker,
    pub kind: PseudoKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NegationArg {
    Type(TypeSelector),
    Universal,
    Hash(String),
    Class(String),
    Attribute(AttributeSelector),
    Pseudo(Pseudo),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimpleSelectorModifier {
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    Pseudo(Pseudo),
    Negation(NegationArg),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleSelectorSequence {
    pub type_selector: Option<TypeSelector>,
    pub modifiers: Vec<SimpleSelectorModifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    pub first: SimpleSelectorSequence,
    pub rest: Vec<(Combinator, SimpleSelectorSequence)>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IeFunctionCall {
    pub name: String,
    pub args: Vec<(String, Term)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TermKind {
    Number(f64),
    Percentage(f64),
    Length(f64, String),
    Ems(f64),
    Exs(f64),
    Angle(f64, String),
    Time(f64, String),
    Freq(f64, String),
    Resolution(f64, String),
    Dimension(f64, String),
    Str(String),
    Ident(String),
    Uri(String),
    UnicodeRange(String),
    Hexcolor(String),
    Function(FunctionCall),
    IeFunction(IeFunctionCall),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub sign: Option<Sign>,
    pub kind: TermKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueOperator {
    Slash,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValuePart {
    Term(Term),
    Operator(ValueOperator),
}

/// The flat `term (operator? term)*` sequence, left exactly as the grammar
/// produces it. Consumers that want operator precedence or implicit vs.
/// explicit grouping re-derive it from `parts`; nothing here groups it for
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    pub parts: Vec<ValuePart>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hack {
    Star,
    Underscore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyName {
    pub name: String,
    pub hack: Option<Hack>,
    pub span: Span,
}

/// The sixteen CSS3 paged-media margin boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarginBox {
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
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (combinator, seq) in &self.rest {
            match combinator {
                Combinator::Descendant => write!(f, " {seq}")?,
                Combinator::Child => write!(f, " > {seq}")?,
                Combinator::Adjacent => write!(f, " + {seq}")?,
                Combinator::Sibling => write!(f, " ~ {seq}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SimpleSelectorSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ts) = &self.type_selector {
            write!(f, "{ts}")?;
        }
        for m in &self.modifiers {
            match m {
                SimpleSelectorModifier::Id(id) => write!(f, "#{id}")?,
                SimpleSelectorModifier::Class(c) => write!(f, ".{c}")?,
                SimpleSelectorModifier::Attribute(_) => write!(f, "[...]")?,
                SimpleSelectorModifier::Pseudo(p) => write!(f, "{p}")?,
                SimpleSelectorModifier::Negation(_) => write!(f, ":not(...)")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            match ns {
                NamespacePrefix::Named(n) => write!(f, "{n}|")?,
                NamespacePrefix::Wildcard => write!(f, "*|")?,
                NamespacePrefix::Empty => write!(f, "|")?,
            }
        }
        match &self.name {
            ElementName::Name(n) => write!(f, "{n}"),
            ElementName::Universal => write!(f, "*"),
        }
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.marker {
            PseudoMarker::Single => ":",
            PseudoMarker::Double => "::",
        };
        match &self.kind {
            PseudoKind::Ident(name) => write!(f, "{marker}{name}"),
            PseudoKind::Function { name, .. } => write!(f, "{marker}{name}(...)"),
        }
    }
}
