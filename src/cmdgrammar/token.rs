//! Token types shared by the tokenizer and the matching engine.
//!
//!     The tokenizer works in two layers. The logos lexer produces [RawToken]s, which only
//!     know their lexical class and source text. Post-processing turns those into [Token]s,
//!     which carry a classification the grammar can assert on (`!int`, `!string`, ...) and a
//!     decoded value.
//!
//!     Raw tokens never reach the matcher on their own. The only place they surface is as
//!     the payload of an Expression token, where the captured sequence is kept verbatim for
//!     an evaluator living outside this crate.

use serde::Serialize;
use std::fmt;

/// Source position of a lexeme. Both fields are 1-based; columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexical class of a raw token, as recognized by the logos lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RawKind {
    Identifier,
    Int,
    Float,
    String,
    /// The single quote that opens and closes an expression capture
    Quote,
    /// Any other single character
    Punct,
}

/// A lexeme straight out of the scanner, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawToken {
    pub kind: RawKind,
    pub text: String,
    pub position: Position,
}

/// Classification of a [Token]. This is what `!datatype` assertions compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    Char,
    String,
    Int,
    Float,
    Bool,
    Expression,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Char => "char",
            TokenKind::String => "string",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Bool => "bool",
            TokenKind::Expression => "expression",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// Decoded payload of a [Token]. The variant always agrees with the token's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenValue {
    Identifier(String),
    Char(char),
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// The raw tokens between the expression quotes, quotes excluded
    Expression(Vec<RawToken>),
    None,
}

/// The unit the matching engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: TokenValue,
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        value: TokenValue,
        position: Position,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
            position,
        }
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            TokenValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            TokenValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self.value {
            TokenValue::Char(value) => Some(value),
            _ => None,
        }
    }

    /// The decoded string for String tokens, the original text for identifiers.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            TokenValue::String(value) | TokenValue::Identifier(value) => Some(value),
            _ => None,
        }
    }

    /// The captured raw tokens of an Expression token.
    pub fn expression(&self) -> Option<&[RawToken]> {
        match &self.value {
            TokenValue::Expression(raw) => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) @{}", self.kind, self.text, self.position)
    }
}
