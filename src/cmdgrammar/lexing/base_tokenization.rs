//! Base tokenization using the logos lexer library.
//!
//! This is where a source line becomes a raw token stream. No classification happens here:
//! identifiers are not yet checked for booleans, numbers are not parsed and strings are not
//! unescaped. The one decision made at this level is where the line ends, which is either
//! the end of input or the first unquoted comment marker.

use super::common::LexError;
use crate::cmdgrammar::token::{Position, RawKind, RawToken};
use logos::Logos;

/// Character that starts a comment running to the end of the line.
pub const COMMENT_CHAR: char = '#';

/// Lexemes recognized by the scanner. The punctuation class excludes every character that
/// starts another lexeme, so no two patterns compete for the same input.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum Lexeme {
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Identifier,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[token("'")]
    Quote,

    #[token("#")]
    Comment,

    #[regex(r#"[^\s\p{L}0-9_"'#]"#)]
    Punct,
}

impl Lexeme {
    fn raw_kind(self) -> Option<RawKind> {
        match self {
            Lexeme::Identifier => Some(RawKind::Identifier),
            Lexeme::Int => Some(RawKind::Int),
            Lexeme::Float => Some(RawKind::Float),
            Lexeme::String => Some(RawKind::String),
            Lexeme::Quote => Some(RawKind::Quote),
            Lexeme::Punct => Some(RawKind::Punct),
            Lexeme::Comment => None,
        }
    }
}

/// Scan a line into raw tokens with their source positions.
///
/// Stops at the first comment marker. Input that no lexeme accepts (an unterminated string,
/// a stray control character) fails the whole line.
pub fn scan(source: &str) -> Result<Vec<RawToken>, LexError> {
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let position = position_at(source, span.start);
        let lexeme = match result {
            Ok(lexeme) => lexeme,
            Err(()) => {
                return Err(LexError::UnexpectedInput {
                    text: lexer.slice().to_string(),
                    position,
                })
            }
        };
        let Some(kind) = lexeme.raw_kind() else {
            break;
        };
        tokens.push(RawToken {
            kind,
            text: lexer.slice().to_string(),
            position,
        });
    }

    Ok(tokens)
}

/// Position of the byte offset `offset` within `source`.
pub fn position_at(source: &str, offset: usize) -> Position {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    Position::new(line, column)
}

/// Position just past the last character of `source`, used for end-of-input diagnostics.
pub fn end_position(source: &str) -> Position {
    position_at(source, source.len())
}
