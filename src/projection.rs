//! Projections of a finished scan: plain text and annotated text.

use std::ops::Range;

use crate::annotated::AnnotatedText;
use crate::error::Error;
use crate::scanner::{ContextMachine, ScanContext, Scanner};

impl<M: ContextMachine> Scanner<M> {
    /// Flatten the spans into plain text, trimmed.
    ///
    /// Plain spans contribute their literal text, other spans their
    /// replacement or nothing. With a `range`, spans whose source range lies
    /// entirely outside it are skipped.
    pub fn to_plain_text(&self, range: Option<Range<usize>>) -> Result<String, Error> {
        let mut text = String::new();
        for span in self.spans()? {
            let part = if span.context().is_plain() {
                span.text
            } else {
                match span.replacement() {
                    Some(replacement) => replacement,
                    None => continue,
                }
            };

            if let Some(range) = &range {
                if span.range.end <= range.start || span.range.start >= range.end {
                    continue;
                }
            }
            text.push_str(part);
        }
        Ok(text.trim().to_string())
    }

    pub fn to_annotated_text(&self) -> Result<AnnotatedText, Error> {
        let mut builder = AnnotatedText::builder();
        for span in self.spans()? {
            if span.context().is_plain() {
                builder.add_text(span.text);
            } else if let Some(replacement) = span.replacement() {
                builder.add_markup_as(span.text, replacement);
            } else {
                builder.add_markup(span.text);
            }
        }
        Ok(builder.build())
    }
}
