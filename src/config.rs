//! Configuration constants and options for the LaTeX scanner.

/// Maximum depth of nested sub-scans (command arguments inside arguments)
pub const MAX_NESTING_DEPTH: usize = 64;

/// Replacement for the `\,` protected space escape
pub const PROTECTED_SPACE: char = '\u{202F}';

/// Default opening quote for "` and `\textit`
pub const DEFAULT_OPENING_QUOTE: &str = "„";

/// Default closing quote for "' and `\textit`
pub const DEFAULT_CLOSING_QUOTE: &str = "“";

/// Replacement for a bare or malformed `"` quotation mark
pub const STRAIGHT_QUOTE: &str = "\"";

/// Placeholder emitted for `\ref`
pub const REFERENCE_PLACEHOLDER: &str = "1.0.0";

/// Placeholder emitted for `\ac` without a matching `\acro`
pub const ACRONYM_PLACEHOLDER: &str = "Text";

/// Scanner options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Replacement for an opening "` quotation mark
    pub opening_quote: String,
    /// Replacement for a closing "' quotation mark
    pub closing_quote: String,
    /// Maximum depth of nested sub-scans
    pub max_nesting: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            opening_quote: DEFAULT_OPENING_QUOTE.to_string(),
            closing_quote: DEFAULT_CLOSING_QUOTE.to_string(),
            max_nesting: MAX_NESTING_DEPTH,
        }
    }
}

impl Options {
    /// Set the quote pair from a two-character string such as `«»`.
    ///
    /// Strings that are not exactly two characters leave the quotes unchanged.
    pub fn with_quotes(mut self, pair: &str) -> Self {
        let mut chars = pair.chars();
        if let (Some(open), Some(close), None) = (chars.next(), chars.next(), chars.next()) {
            self.opening_quote = open.to_string();
            self.closing_quote = close.to_string();
        }
        self
    }

    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }

    /// Wrap text in the configured quote pair
    pub fn quote(&self, text: &str) -> String {
        format!("{}{}{}", self.opening_quote, text, self.closing_quote)
    }
}
