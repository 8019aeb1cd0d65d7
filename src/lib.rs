//! A streaming, event-driven parser for CSS 2.1, CSS3 selectors, media
//! queries, paged media and a handful of vendor extensions.
//!
//! The pipeline is three stages: a [`reader::CharReader`] over the input
//! text, a [`lexer::TokenStream`] tokenizing on demand with bounded
//! lookahead/lookback, and a [`parser::Parser`] running a hand-written
//! recursive-descent grammar over that stream. Nothing is retained as a
//! tree; the grammar fires [`events::Event`]s at an [`events::EventSink`]
//! as it recognizes constructs, and the caller decides what (if anything)
//! to keep.
//!
//! ```
//! use css_events::{EventLog, Parser, ParserOptions};
//!
//! let mut log = EventLog::new();
//! let parser = Parser::new(ParserOptions::new());
//! parser.parse_stylesheet("a { color: red; }", &mut log).unwrap();
//! assert!(!log.events().is_empty());
//! ```

pub mod error;
pub mod events;
pub mod lexer;
pub mod numeric;
pub mod options;
pub mod parser;
pub mod reader;

pub use error::{ParseResult, ReaderError, SyntaxError};
pub use events::{Event, EventLog, EventSink};
pub use options::ParserOptions;
pub use parser::ast;
pub use parser::Parser;
pub use reader::{Position, Span};

/// Resolves a token kind's grammar-symbol name (`"IDENT"`, `"LBRACE"`, ...)
/// back to its position in the static token table, for callers that want to
/// relate a [`lexer::Token`] to the table entry that produced it.
pub fn token_table_index(name: &str) -> Option<usize> {
    lexer::index_of(name)
}
