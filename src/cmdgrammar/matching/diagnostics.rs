//! Match diagnostics
//!
//! Advisory messages explaining why a line did not match. They are collected on a
//! best-effort basis; the parse verdict is always the boolean result, never the presence
//! or absence of diagnostics.

use crate::cmdgrammar::grammar::{ItemId, RuleItem};
use crate::cmdgrammar::lexing::LexError;
use crate::cmdgrammar::token::{Position, Token};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
    /// The item whose mismatch produced this diagnostic, if any
    pub item: Option<ItemId>,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            message: message.into(),
            item: None,
        }
    }

    /// A required item did not match the token at `position`.
    pub fn expected(position: Position, rule: &str, id: ItemId, item: &RuleItem) -> Self {
        Self {
            item: Some(id),
            ..Self::new(position, format!("rule {} expected {}", rule, item))
        }
    }

    /// The start rule matched but `token` and everything after it was left over.
    pub fn trailing(token: &Token) -> Self {
        Self::new(token.position, format!("unexpected trailing input {}", token.text))
    }

    pub fn lexical(err: &LexError) -> Self {
        Self::new(err.position(), err.to_string())
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}
