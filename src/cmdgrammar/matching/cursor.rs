//! Index cursor over an immutable token slice.

use crate::cmdgrammar::token::Token;

/// Saved cursor state, restored with [TokenCursor::rewind].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark {
    next: usize,
    current: Option<usize>,
}

impl CursorMark {
    /// Index of the first token an attempt started from this mark would consume.
    pub fn start(&self) -> usize {
        self.current.unwrap_or(self.next)
    }
}

/// Reads tokens one at a time into a "current" slot. Returning the current token to the
/// input is a decrement, never a copy.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    next: usize,
    current: Option<usize>,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            next: 0,
            current: None,
        }
    }

    /// Move the next token into the current slot. The slot is empty at end of input.
    pub fn advance(&mut self) -> Option<usize> {
        self.current = if self.next < self.tokens.len() {
            self.next += 1;
            Some(self.next - 1)
        } else {
            None
        };
        self.current
    }

    /// Return the current token to the front of the input.
    pub fn unread(&mut self) {
        if let Some(index) = self.current.take() {
            self.next = index;
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_token(&self) -> Option<&'t Token> {
        self.current.map(|index| &self.tokens[index])
    }

    /// Index of the next unread token.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn has_next(&self) -> bool {
        self.next < self.tokens.len()
    }

    /// True once every token has been consumed.
    pub fn at_end(&self) -> bool {
        !self.has_next()
    }

    pub fn remaining(&self) -> &'t [Token] {
        &self.tokens[self.next..]
    }

    pub fn mark(&self) -> CursorMark {
        CursorMark {
            next: self.next,
            current: self.current,
        }
    }

    pub fn rewind(&mut self, mark: CursorMark) {
        self.next = mark.next;
        self.current = mark.current;
    }
}
