//! Common lexer module
//!
//! Error type shared by the scanning and classification stages.

use crate::cmdgrammar::token::Position;
use std::fmt;

/// Errors that abort tokenization of a line.
///
/// Tokenization is all-or-nothing: the first of these discards every token of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// An integer literal that does not fit an `i64`
    InvalidInt { text: String, position: Position },
    /// A float literal that does not decode to a finite `f64`
    InvalidFloat { text: String, position: Position },
    /// A quoted string with a malformed escape sequence
    InvalidString {
        text: String,
        position: Position,
        reason: String,
    },
    /// A `'` with no closing `'` before the end of the line
    UnterminatedExpression { position: Position },
    /// Input the scanner cannot turn into any lexeme, e.g. an unterminated `"`
    UnexpectedInput { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::InvalidInt { position, .. }
            | LexError::InvalidFloat { position, .. }
            | LexError::InvalidString { position, .. }
            | LexError::UnterminatedExpression { position }
            | LexError::UnexpectedInput { position, .. } => *position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidInt { text, position } => {
                write!(f, "Invalid integer literal {} at {}", text, position)
            }
            LexError::InvalidFloat { text, position } => {
                write!(f, "Invalid float literal {} at {}", text, position)
            }
            LexError::InvalidString {
                text,
                position,
                reason,
            } => write!(f, "Invalid string literal {} at {}: {}", text, position, reason),
            LexError::UnterminatedExpression { position } => {
                write!(f, "Unterminated expression starting at {}", position)
            }
            LexError::UnexpectedInput { text, position } => {
                write!(f, "Unexpected input {:?} at {}", text, position)
            }
        }
    }
}

impl std::error::Error for LexError {}
