//! The stack of open block states.

use tracing::trace;

use crate::state::{LineType, ParserState};

/// Open nesting levels, innermost last.
///
/// The bottom entry is plain text at depth 0 and is never popped.
#[derive(Debug, Clone)]
pub(crate) struct StateStack {
    entries: Vec<ParserState>,
}

impl StateStack {
    pub(crate) fn new(sequence_number: u32) -> Self {
        Self {
            entries: vec![ParserState::new(LineType::Text, sequence_number, 0)],
        }
    }

    pub(crate) fn len(&self) -> usize { self.entries.len() }

    pub(crate) fn bottom(&self) -> &ParserState { &self.entries[0] }

    pub(crate) fn top(&self) -> &ParserState {
        self.entries.last().expect("stack is never empty")
    }

    pub(crate) fn top_mut(&mut self) -> &mut ParserState {
        self.entries.last_mut().expect("stack is never empty")
    }

    pub(crate) fn push(&mut self, state: ParserState) {
        trace!(
            line_type = ?state.line_type,
            depth = state.depth,
            seq = state.sequence_number,
            "push"
        );
        self.entries.push(state);
    }

    pub(crate) fn pop(&mut self) {
        debug_assert!(self.entries.len() > 1, "popped the bottom of the stack");
        if self.entries.len() > 1
            && let Some(state) = self.entries.pop()
        {
            trace!(line_type = ?state.line_type, depth = state.depth, "pop");
        }
    }

    /// Pop everything above the bottom entry.
    pub(crate) fn clear(&mut self) {
        while self.entries.len() > 1 {
            self.pop();
        }
    }

    /// The innermost nestable entry, if any list or footnote is open.
    pub(crate) fn innermost_nestable(&self) -> Option<&ParserState> {
        self.entries.iter().rev().find(|s| s.line_type.is_nestable())
    }

    /// Depth at which a non-nestable construct opens.
    pub(crate) fn effective_depth(&self) -> usize { self.top().depth }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(line_type: LineType, depth: usize) -> ParserState {
        ParserState::new(line_type, 1, depth)
    }

    #[test]
    fn starts_with_text_bottom() {
        let stack = StateStack::new(1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.top().line_type, LineType::Text);
        assert!(stack.innermost_nestable().is_none());
    }

    #[test]
    fn clear_keeps_bottom() {
        let mut stack = StateStack::new(1);
        stack.push(list(LineType::OrderedList, 0));
        stack.push(list(LineType::UnorderedList, 1));
        stack.clear();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.bottom().line_type, LineType::Text);
    }

    #[test]
    fn innermost_nestable_skips_code() {
        let mut stack = StateStack::new(1);
        stack.push(list(LineType::UnorderedList, 0));
        stack.push(list(LineType::Code, 0));
        assert_eq!(
            stack.innermost_nestable().map(|s| s.line_type),
            Some(LineType::UnorderedList)
        );
        assert_eq!(stack.effective_depth(), 0);
    }
}
