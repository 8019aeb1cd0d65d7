//! The external event taxonomy and the sink capability that receives it.
//!
//! Composition over inheritance: rather than a base "event target" class
//! with overridable handler methods, callers implement [`EventSink`] (or use
//! one of the two adapters below) and the grammar engine talks only to the
//! trait.

use serde::Serialize;

use crate::parser::ast::{MarginBox, MediaQuery, PropertyName, PropertyValue, Selector};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    StartStylesheet,
    EndStylesheet,
    Charset {
        charset: String,
    },
    Import {
        uri: String,
        media: Vec<MediaQuery>,
    },
    Namespace {
        prefix: Option<String>,
        uri: String,
    },
    StartMedia {
        media: Vec<MediaQuery>,
    },
    EndMedia {
        media: Vec<MediaQuery>,
    },
    StartPage {
        id: Option<String>,
        pseudo: Option<String>,
    },
    EndPage {
        id: Option<String>,
        pseudo: Option<String>,
    },
    StartPageMargin {
        margin: MarginBox,
    },
    EndPageMargin {
        margin: MarginBox,
    },
    StartFontFace,
    EndFontFace,
    StartRule {
        selectors: Vec<Selector>,
    },
    EndRule {
        selectors: Vec<Selector>,
    },
    Property {
        property: PropertyName,
        value: PropertyValue,
        important: bool,
    },
    Error {
        error: String,
        message: String,
        line: usize,
        col: usize,
    },
}

/// Receives the ordered event stream a parse emits.
pub trait EventSink {
    fn on_event(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn on_event(&mut self, event: Event) {
        self(event)
    }
}

/// Collects every event into a `Vec`, for callers (and tests) that just
/// want the stream as data rather than reacting to it live.
#[derive(Debug, Clone, Default)]
pub struct EventLog(pub Vec<Event>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.0
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: Event) {
        self.0.push(event);
    }
}
