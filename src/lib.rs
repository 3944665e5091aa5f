//! detex-map - Strip LaTeX markup to plain text while keeping a map back to
//! the source
//!
//! A single forward scan tags every character of the source with a context
//! (text, space, comment, command, argument, quotation mark, math group).
//! Non-text spans carry the plain text they stand for. From that map the
//! document can be flattened to plain text, turned into annotated text for a
//! grammar checker, and any offset can be reported as `line:col (offset)`.
//!
//! # Example
//!
//! ```
//! use detex_map::LatexDocument;
//!
//! let doc = LatexDocument::parse("Price: \\EUR{5}\n\n% internal\nDone").unwrap();
//! assert_eq!(doc.to_plain_text().unwrap(), "Price: 5 € Done");
//! assert_eq!(doc.index_to_location(8), "1:9 (8)");
//! ```

mod annotated;
mod config;
mod error;
pub mod file_handler;
mod latex;
mod location;
pub mod packages;
mod projection;
mod report;
pub mod scanner;
mod span_index;

pub use annotated::{AnnotatedNode, AnnotatedText, AnnotatedTextBuilder};
pub use config::{
    ACRONYM_PLACEHOLDER, DEFAULT_CLOSING_QUOTE, DEFAULT_OPENING_QUOTE, MAX_NESTING_DEPTH, Options,
    PROTECTED_SPACE, REFERENCE_PLACEHOLDER, STRAIGHT_QUOTE,
};
pub use error::Error;
pub use latex::{Context, LatexDocument, LatexMachine};
pub use location::SourceText;
pub use packages::{LatexPackage, PackageRegistry};
pub use report::{MatchReport, RuleMatch};
pub use scanner::{ContextMachine, ScanContext, ScanState, Scanner};
pub use span_index::{ContextSwitch, SpanIndex};
