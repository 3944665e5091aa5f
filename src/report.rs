//! Checker findings mapped back to the LaTeX source.

use std::fmt;

use crate::annotated::AnnotatedText;
use crate::error::Error;
use crate::latex::LatexDocument;

/// A finding reported by a grammar or spell checker, in plain-text offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub from_pos: usize,
    pub to_pos: usize,
    pub message: String,
    pub suggested_replacements: Vec<String>,
}

/// A [`RuleMatch`] translated to source locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// Plain text of the source spans the match touches
    pub excerpt: String,
    pub from: String,
    pub to: String,
    pub message: String,
    pub suggested_replacements: Vec<String>,
}

impl MatchReport {
    pub fn new(
        doc: &LatexDocument,
        annotated: &AnnotatedText,
        rule_match: &RuleMatch,
    ) -> Result<Self, Error> {
        let from = annotated.original_position(rule_match.from_pos);
        let to = annotated.original_position(rule_match.to_pos).max(from);

        Ok(Self {
            excerpt: doc.to_plain_text_in(from..to.max(from + 1))?,
            from: doc.index_to_location(from),
            to: doc.index_to_location(to),
            message: rule_match.message.trim().to_string(),
            suggested_replacements: rule_match.suggested_replacements.clone(),
        })
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "> {}", self.excerpt)?;
        writeln!(
            f,
            "Potential error at characters {} - {}: {}",
            self.from, self.to, self.message
        )?;
        write!(
            f,
            "Suggested correction(s): [{}]",
            self.suggested_replacements.join(", ")
        )
    }
}
