//! Annotated text: literal text and markup nodes in source order.
//!
//! A grammar checker reads the plain text produced by [`AnnotatedText::plain_text`]
//! and reports positions in it. [`AnnotatedText::original_position`] maps such a
//! position back to a character offset in the source document.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotatedNode {
    /// Checkable text, identical in source and plain text
    Text { source: Range<usize>, text: String },
    /// Markup to skip; `interpret_as` is what the checker sees instead
    Markup {
        source: Range<usize>,
        markup: String,
        interpret_as: Option<String>,
    },
}

impl AnnotatedNode {
    pub fn source(&self) -> &Range<usize> {
        match self {
            AnnotatedNode::Text { source, .. } | AnnotatedNode::Markup { source, .. } => source,
        }
    }

    /// Text contributed to the plain projection
    pub fn plain(&self) -> &str {
        match self {
            AnnotatedNode::Text { text, .. } => text,
            AnnotatedNode::Markup { interpret_as, .. } => interpret_as.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedText {
    nodes: Vec<AnnotatedNode>,
}

impl AnnotatedText {
    pub fn builder() -> AnnotatedTextBuilder {
        AnnotatedTextBuilder::default()
    }

    pub fn nodes(&self) -> &[AnnotatedNode] {
        &self.nodes
    }

    /// Everything the checker sees, untrimmed
    pub fn plain_text(&self) -> String {
        self.nodes.iter().map(AnnotatedNode::plain).collect()
    }

    /// Source length covered by all nodes
    pub fn source_len(&self) -> usize {
        self.nodes.last().map_or(0, |node| node.source().end)
    }

    /// Map a char offset in [`plain_text`](Self::plain_text) to a char offset
    /// in the source.
    ///
    /// Offsets inside literal text map exactly; offsets inside a replacement
    /// map to the start of its markup. Offsets past the end map to the end
    /// of the source.
    pub fn original_position(&self, plain_offset: usize) -> usize {
        let mut plain_start = 0;
        for node in &self.nodes {
            let plain_len = node.plain().chars().count();
            if plain_offset < plain_start + plain_len {
                return match node {
                    AnnotatedNode::Text { source, .. } => {
                        source.start + (plain_offset - plain_start)
                    }
                    AnnotatedNode::Markup { source, .. } => source.start,
                };
            }
            plain_start += plain_len;
        }
        self.source_len()
    }
}

/// Builds an [`AnnotatedText`], tracking source offsets from node lengths
#[derive(Debug, Default)]
pub struct AnnotatedTextBuilder {
    nodes: Vec<AnnotatedNode>,
    offset: usize,
}

impl AnnotatedTextBuilder {
    fn next_range(&mut self, text: &str) -> Range<usize> {
        let start = self.offset;
        self.offset += text.chars().count();
        start..self.offset
    }

    pub fn add_text(&mut self, text: &str) -> &mut Self {
        let source = self.next_range(text);
        self.nodes.push(AnnotatedNode::Text {
            source,
            text: text.to_string(),
        });
        self
    }

    pub fn add_markup(&mut self, markup: &str) -> &mut Self {
        let source = self.next_range(markup);
        self.nodes.push(AnnotatedNode::Markup {
            source,
            markup: markup.to_string(),
            interpret_as: None,
        });
        self
    }

    pub fn add_markup_as(&mut self, markup: &str, interpret_as: &str) -> &mut Self {
        let source = self.next_range(markup);
        self.nodes.push(AnnotatedNode::Markup {
            source,
            markup: markup.to_string(),
            interpret_as: Some(interpret_as.to_string()),
        });
        self
    }

    pub fn build(&mut self) -> AnnotatedText {
        self.offset = 0;
        AnnotatedText {
            nodes: std::mem::take(&mut self.nodes),
        }
    }
}
