//! Token Classification
//!
//!     Turns the raw lexemes of a line into classified [Token]s. Each raw kind has its own
//!     conversion, and every conversion that decodes something (numbers, strings,
//!     expression captures) can fail. A single failure fails the whole line; there is no
//!     per-token recovery.
//!
//!     Expression captures are the one conversion that consumes more than one raw token:
//!     a `'` swallows everything up to the next `'` and emits it as a single Expression
//!     token whose value is the captured raw sequence.

use super::common::LexError;
use super::unescape::unquote;
use crate::cmdgrammar::token::{RawKind, RawToken, Token, TokenKind, TokenValue};

/// Classify a raw token stream.
pub fn classify(raw_tokens: Vec<RawToken>) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::with_capacity(raw_tokens.len());
    let mut raw = raw_tokens.into_iter();

    while let Some(token) = raw.next() {
        let token = match token.kind {
            RawKind::Identifier => from_identifier(token),
            RawKind::Int => from_int(token)?,
            RawKind::Float => from_float(token)?,
            RawKind::String => from_string(token)?,
            RawKind::Quote => capture_expression(token, &mut raw)?,
            RawKind::Punct => from_punct(token),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn from_identifier(raw: RawToken) -> Token {
    let value = match raw.text.to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    };
    match value {
        Some(flag) => Token::new(TokenKind::Bool, raw.text, TokenValue::Bool(flag), raw.position),
        None => {
            let value = TokenValue::Identifier(raw.text.clone());
            Token::new(TokenKind::Identifier, raw.text, value, raw.position)
        }
    }
}

fn from_int(raw: RawToken) -> Result<Token, LexError> {
    match raw.text.parse::<i64>() {
        Ok(value) => Ok(Token::new(TokenKind::Int, raw.text, TokenValue::Int(value), raw.position)),
        Err(_) => Err(LexError::InvalidInt {
            text: raw.text,
            position: raw.position,
        }),
    }
}

fn from_float(raw: RawToken) -> Result<Token, LexError> {
    match raw.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Token::new(
            TokenKind::Float,
            raw.text,
            TokenValue::Float(value),
            raw.position,
        )),
        _ => Err(LexError::InvalidFloat {
            text: raw.text,
            position: raw.position,
        }),
    }
}

fn from_string(raw: RawToken) -> Result<Token, LexError> {
    match unquote(&raw.text) {
        Ok(value) => Ok(Token::new(
            TokenKind::String,
            raw.text,
            TokenValue::String(value),
            raw.position,
        )),
        Err(reason) => Err(LexError::InvalidString {
            text: raw.text,
            position: raw.position,
            reason,
        }),
    }
}

fn from_punct(raw: RawToken) -> Token {
    let value = raw
        .text
        .chars()
        .next()
        .map_or(TokenValue::None, TokenValue::Char);
    Token::new(TokenKind::Char, raw.text, value, raw.position)
}

/// Consume raw tokens up to the closing quote of the expression opened by `open`.
fn capture_expression(
    open: RawToken,
    raw: &mut impl Iterator<Item = RawToken>,
) -> Result<Token, LexError> {
    let mut text = String::new();
    let mut captured = Vec::new();

    for token in raw {
        if token.kind == RawKind::Quote {
            return Ok(Token::new(
                TokenKind::Expression,
                text,
                TokenValue::Expression(captured),
                open.position,
            ));
        }
        text.push_str(&token.text);
        captured.push(token);
    }

    Err(LexError::UnterminatedExpression {
        position: open.position,
    })
}
