//! Character-offset view of the source text.
//!
//! Every offset handled by the scanner is a *character* offset, not a byte
//! offset. [`SourceText`] precomputes the byte position of each character and
//! the character offset where each line starts, so slicing and
//! offset → `line:column` conversion are cheap:
//!
//! ```text
//! Source: "ab\ncd"
//! line_starts = [0, 3]
//! index_to_location(4) -> "2:2 (4)"
//! ```
//!
//! `\n`, `\r\n` and a lone `\r` each count as one line break.

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    /// Byte position of each char, followed by `text.len()`
    offsets: Vec<usize>,
    /// Char offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        let mut offsets = Vec::with_capacity(text.len() + 1);
        let mut line_starts = vec![0];

        let mut chars = text.char_indices().enumerate().peekable();
        while let Some((index, (byte_pos, c))) = chars.next() {
            offsets.push(byte_pos);
            let crlf = c == '\r' && matches!(chars.peek(), Some((_, (_, '\n'))));
            if c == '\n' || (c == '\r' && !crlf) {
                line_starts.push(index + 1);
            }
        }
        offsets.push(text.len());

        Self {
            text: text.to_string(),
            offsets,
            line_starts,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        self.text[self.offsets[index]..].chars().next()
    }

    /// Substring between two char offsets, clamped to the text
    pub fn slice(&self, range: Range<usize>) -> &str {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    /// Number of lines, counting a trailing empty line after a final break
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line and column of a char offset, or `None` past the end
    pub fn position(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.len() {
            return None;
        }
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        Some((line + 1, offset - self.line_starts[line] + 1))
    }

    /// Format an offset as `line:column (offset)`.
    ///
    /// Offsets past the end report the last line with an unknown column.
    pub fn index_to_location(&self, offset: usize) -> String {
        match self.position(offset) {
            Some((line, column)) => format!("{line}:{column} ({offset})"),
            None => format!("{}:? ({offset})", self.line_count()),
        }
    }
}
