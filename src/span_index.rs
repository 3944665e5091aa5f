//! Ordered index of context switches over an immutable input.
//!
//! A switch at `start` means "from `start` until the next switch, the text
//! belongs to `context`". The index always holds a switch at offset 0, so every
//! offset is governed by exactly one switch: the last one starting at or before
//! it.
//!
//! The scanner only moves forward and almost every read or write lands on the
//! current or the next offset. Instead of searching from the front, lookups
//! walk outward from the switch touched last, which makes the common case O(1)
//! and a long-range lookup O(distance). Inserting right after the cursor is an
//! append in practice, since nothing exists beyond the scan position yet.

use std::cell::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSwitch<C> {
    start: usize,
    context: C,
    replacement: Option<String>,
}

impl<C: Copy> ContextSwitch<C> {
    fn new(start: usize, context: C) -> Self {
        Self {
            start,
            context,
            replacement: None,
        }
    }

    /// First char offset governed by this switch
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn context(&self) -> C {
        self.context
    }

    /// Plain-text substitute for the span, if any
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Empty replacements are stored as `None`.
    pub fn set_replacement(&mut self, replacement: Option<String>) {
        self.replacement = replacement.filter(|r| !r.is_empty());
    }

    /// Append to the current replacement
    pub fn push_replacement(&mut self, replacement: &str) {
        if replacement.is_empty() {
            return;
        }
        match &mut self.replacement {
            Some(existing) => existing.push_str(replacement),
            None => self.replacement = Some(replacement.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpanIndex<C> {
    /// Sorted by `start`, first entry always at 0
    switches: Vec<ContextSwitch<C>>,
    /// Position in `switches` of the switch touched last
    cursor: Cell<usize>,
}

impl<C: Copy + PartialEq> SpanIndex<C> {
    pub fn new(start_context: C) -> Self {
        Self {
            switches: vec![ContextSwitch::new(0, start_context)],
            cursor: Cell::new(0),
        }
    }

    /// Position of the switch governing `index`
    fn locate(&self, index: usize) -> Option<usize> {
        let mut pos = self.cursor.get().min(self.switches.len().checked_sub(1)?);

        if self.switches[pos].start <= index {
            while pos + 1 < self.switches.len() && self.switches[pos + 1].start <= index {
                pos += 1;
            }
        } else {
            while self.switches[pos].start > index {
                pos = pos.checked_sub(1)?;
            }
        }

        self.cursor.set(pos);
        Some(pos)
    }

    /// Install `context` from `index` on.
    ///
    /// An existing switch at exactly `index` is overwritten and loses its
    /// replacement; otherwise a new switch is spliced in.
    pub fn set(&mut self, index: usize, context: C) {
        let Some(pos) = self.locate(index) else {
            return;
        };
        if self.switches[pos].start == index {
            let switch = &mut self.switches[pos];
            switch.context = context;
            switch.replacement = None;
        } else {
            self.switches.insert(pos + 1, ContextSwitch::new(index, context));
            self.cursor.set(pos + 1);
        }
    }

    /// Remove the switch starting exactly at `index`, merging its span into
    /// the previous one. The switch at 0 is never removed.
    pub fn remove(&mut self, index: usize) -> Option<ContextSwitch<C>> {
        if index == 0 {
            return None;
        }
        let pos = self.locate(index)?;
        if self.switches[pos].start != index {
            return None;
        }
        self.cursor.set(pos - 1);
        Some(self.switches.remove(pos))
    }

    /// Context governing `index`
    pub fn get(&self, index: usize) -> Option<C> {
        self.switch_at(index).map(|switch| switch.context)
    }

    pub fn switch_at(&self, index: usize) -> Option<&ContextSwitch<C>> {
        self.locate(index).map(|pos| &self.switches[pos])
    }

    pub fn switch_at_mut(&mut self, index: usize) -> Option<&mut ContextSwitch<C>> {
        let pos = self.locate(index)?;
        Some(&mut self.switches[pos])
    }

    /// Switch governing the offset right before the one governing `index`
    pub fn previous_switch(&self, index: usize) -> Option<&ContextSwitch<C>> {
        let pos = self.locate(index)?;
        pos.checked_sub(1).map(|prev| &self.switches[prev])
    }

    /// All switches in ascending start order
    pub fn ordered_switches(&self) -> &[ContextSwitch<C>] {
        &self.switches
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}
