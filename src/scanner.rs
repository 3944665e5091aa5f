//! Generic single-pass context scanner.
//!
//! A [`ContextMachine`] decides, one character at a time, which context the
//! text belongs to. The [`Scanner`] owns the input and the [`SpanIndex`], walks
//! every offset exactly once and hands the machine a [`ScanState`] through
//! which it reads the surroundings and rewrites the current or next context.
//! Handlers never move the cursor themselves.
//!
//! Scanning is an explicit second phase: build a scanner with
//! [`Scanner::new`], run [`Scanner::scan`] once, then project the result.

use std::fmt;
use std::ops::Range;

use crate::error::Error;
use crate::location::SourceText;
use crate::span_index::{ContextSwitch, SpanIndex};

/// A context tag
pub trait ScanContext: Copy + Eq + fmt::Debug {
    /// Plain spans project their literal text, all others their replacement
    fn is_plain(self) -> bool;
}

/// Transition rules driven by a [`Scanner`]
pub trait ContextMachine {
    type Context: ScanContext;

    /// Context of the single span covering the input before scanning
    fn start_context(&self) -> Self::Context;

    /// Handle the character at `scan.index()`, which is governed by `context`
    fn on_char(
        &mut self,
        context: Self::Context,
        scan: &mut ScanState<'_, Self::Context>,
    ) -> Result<(), Error>;

    /// Called once after the last character, still positioned on it
    fn on_end(
        &mut self,
        _context: Self::Context,
        _scan: &mut ScanState<'_, Self::Context>,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// The matching bracket for `{ } [ ] < >`
pub fn opposite(bracket: char) -> Result<char, Error> {
    match bracket {
        '{' => Ok('}'),
        '}' => Ok('{'),
        '[' => Ok(']'),
        ']' => Ok('['),
        '<' => Ok('>'),
        '>' => Ok('<'),
        other => Err(Error::NoOppositeBracket(other)),
    }
}

/// Read/write access to the scan at the current offset
pub struct ScanState<'a, C> {
    source: &'a SourceText,
    spans: &'a mut SpanIndex<C>,
    index: usize,
}

impl<C: ScanContext> ScanState<'_, C> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn char(&self) -> char {
        self.source.char_at(self.index).unwrap_or_default()
    }

    pub fn next_char(&self) -> Option<char> {
        self.source.char_at(self.index + 1)
    }

    pub fn previous_char(&self) -> Option<char> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.source.char_at(i))
    }

    pub fn source(&self) -> &SourceText {
        self.source
    }

    pub fn location(&self) -> String {
        self.source.index_to_location(self.index)
    }

    fn governing(&self, index: usize) -> Result<&ContextSwitch<C>, Error> {
        self.spans
            .switch_at(index)
            .ok_or(Error::NoContextFound(index))
    }

    pub fn current_context(&self) -> Result<C, Error> {
        self.governing(self.index).map(ContextSwitch::context)
    }

    /// The current character and everything after it belong to `context`.
    ///
    /// If the current span starts here and the span before it already has
    /// `context`, the current span is folded into that one instead.
    pub fn set_current_context(&mut self, context: C) -> Result<(), Error> {
        self.switch_context(self.index, context)
    }

    pub fn next_context(&self) -> Result<C, Error> {
        self.governing(self.index + 1).map(ContextSwitch::context)
    }

    /// Everything after the current character belongs to `context`.
    /// Does nothing on the last character.
    pub fn set_next_context(&mut self, context: C) -> Result<(), Error> {
        if self.index + 1 >= self.source.len() {
            return Ok(());
        }
        self.switch_context(self.index + 1, context)
    }

    fn switch_context(&mut self, index: usize, context: C) -> Result<(), Error> {
        let governing = self.governing(index)?;
        if governing.context() == context {
            return Ok(());
        }
        if governing.start() == index {
            let previous = self.spans.previous_switch(index).map(ContextSwitch::context);
            if previous == Some(context) {
                self.spans.remove(index);
                return Ok(());
            }
        }
        self.spans.set(index, context);
        Ok(())
    }

    /// Offset where the current span starts
    pub fn current_context_start(&self) -> Result<usize, Error> {
        self.governing(self.index).map(ContextSwitch::start)
    }

    /// Source text of the current span up to, excluding, the current char
    pub fn current_context_text(&self) -> Result<&str, Error> {
        let start = self.current_context_start()?;
        Ok(self.source.slice(start..self.index))
    }

    pub fn current_context_length(&self) -> Result<usize, Error> {
        Ok(self.index - self.current_context_start()?)
    }

    pub fn current_context_replacement(&self) -> Result<Option<&str>, Error> {
        self.governing(self.index).map(ContextSwitch::replacement)
    }

    pub fn set_current_context_replacement(
        &mut self,
        replacement: Option<String>,
    ) -> Result<(), Error> {
        let index = self.index;
        self.spans
            .switch_at_mut(index)
            .ok_or(Error::NoContextFound(index))?
            .set_replacement(replacement);
        Ok(())
    }

    /// Append to the current span's replacement, keeping what a folded-in
    /// earlier span already produced
    pub fn push_current_context_replacement(&mut self, replacement: &str) -> Result<(), Error> {
        let index = self.index;
        self.spans
            .switch_at_mut(index)
            .ok_or(Error::NoContextFound(index))?
            .push_replacement(replacement);
        Ok(())
    }
}

/// A finished span: its switch, source range and literal text
#[derive(Debug, Clone)]
pub struct Span<'a, C> {
    pub switch: &'a ContextSwitch<C>,
    pub range: Range<usize>,
    pub text: &'a str,
}

impl<C: Copy> Span<'_, C> {
    pub fn context(&self) -> C {
        self.switch.context()
    }

    pub fn replacement(&self) -> Option<&str> {
        self.switch.replacement()
    }
}

pub struct Scanner<M: ContextMachine> {
    source: SourceText,
    spans: SpanIndex<M::Context>,
    machine: M,
    attempted: bool,
    scanned: bool,
}

impl<M: ContextMachine> Scanner<M> {
    pub fn new(input: &str, machine: M) -> Self {
        let spans = SpanIndex::new(machine.start_context());
        Self {
            source: SourceText::new(input),
            spans,
            machine,
            attempted: false,
            scanned: false,
        }
    }

    /// Run the single forward pass. Fails on a second call.
    ///
    /// Errors raised by the machine are wrapped with the location of the
    /// character being handled.
    pub fn scan(&mut self) -> Result<(), Error> {
        if self.attempted {
            return Err(Error::AlreadyScanned);
        }
        self.attempted = true;

        let len = self.source.len();
        for index in 0..len {
            let context = self
                .spans
                .get(index)
                .ok_or(Error::NoContextFound(index))
                .map_err(|e| locate(&self.source, index, e))?;
            let mut state = ScanState {
                source: &self.source,
                spans: &mut self.spans,
                index,
            };
            self.machine
                .on_char(context, &mut state)
                .map_err(|e| locate(&self.source, index, e))?;
        }

        if let Some(last) = len.checked_sub(1) {
            let context = self
                .spans
                .get(last)
                .ok_or(Error::NoContextFound(last))
                .map_err(|e| locate(&self.source, last, e))?;
            let mut state = ScanState {
                source: &self.source,
                spans: &mut self.spans,
                index: last,
            };
            self.machine
                .on_end(context, &mut state)
                .map_err(|e| locate(&self.source, last, e))?;
        }

        self.scanned = true;
        Ok(())
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn into_machine(self) -> M {
        self.machine
    }

    pub fn index_to_location(&self, offset: usize) -> String {
        self.source.index_to_location(offset)
    }

    /// Switches of a completed scan in ascending order
    pub fn ordered_switches(&self) -> Result<&[ContextSwitch<M::Context>], Error> {
        if !self.scanned {
            return Err(Error::NotScanned);
        }
        Ok(self.spans.ordered_switches())
    }

    /// Pair every switch with the next one and cut the text between them.
    /// The last switch runs to the end of the input.
    pub fn spans(&self) -> Result<Vec<Span<'_, M::Context>>, Error> {
        let switches = self.ordered_switches()?;
        let mut spans = Vec::with_capacity(switches.len());

        for (pos, switch) in switches.iter().enumerate() {
            let end = match switches.get(pos + 1) {
                Some(next) => {
                    if next.context() == switch.context() {
                        return Err(Error::AdjacentSameTag {
                            context: format!("{:?}", next.context()),
                            index: next.start(),
                        });
                    }
                    next.start()
                }
                None => self.source.len(),
            };
            spans.push(Span {
                switch,
                range: switch.start()..end,
                text: self.source.slice(switch.start()..end),
            });
        }

        Ok(spans)
    }

    /// Call `callback` with each switch and the literal text it governs
    pub fn for_each<F>(&self, mut callback: F) -> Result<(), Error>
    where
        F: FnMut(&ContextSwitch<M::Context>, &str),
    {
        for span in self.spans()? {
            callback(span.switch, span.text);
        }
        Ok(())
    }
}

fn locate(source: &SourceText, index: usize, error: Error) -> Error {
    Error::Located {
        location: source.index_to_location(index),
        source: Box::new(error),
    }
}
