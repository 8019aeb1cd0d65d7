//! Parser configuration: which vendor/legacy extensions to recognize, and
//! whether to recover from errors or propagate them.

/// Toggles for CSS extensions and error-handling behavior. All default to
/// `false`/non-strict, matching the conservative CSS 2.1+CSS3 core the
/// grammar engine recognizes unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Recognize the IE star hack (`*property: value`).
    pub star_hack: bool,
    /// Recognize the IE underscore hack (`_property: value`).
    pub underscore_hack: bool,
    /// Recognize IE's `progid:...(...)` filter functions as term values.
    pub ie_filters: bool,
    /// Propagate the first syntax error instead of recovering at the
    /// nearest ruleset/declaration boundary.
    pub strict: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_star_hack(mut self, value: bool) -> Self {
        self.star_hack = value;
        self
    }

    pub fn with_underscore_hack(mut self, value: bool) -> Self {
        self.underscore_hack = value;
        self
    }

    pub fn with_ie_filters(mut self, value: bool) -> Self {
        self.ie_filters = value;
        self
    }

    pub fn with_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}
