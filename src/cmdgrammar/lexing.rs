//! Tokenizer
//!
//!     This module turns a single input line into the token sequence the matching engine
//!     consumes.
//!
//! The Pipeline
//!
//!     1. Base tokenization using the logos lexer. See [base_tokenization]. Produces raw
//!        lexemes (identifiers, numbers, quoted strings, single quotes, punctuation) with
//!        their positions, and stops at the first unquoted `#`.
//!
//!     2. Classification. See [classification]. Decodes numbers and strings, reclassifies
//!        `true/yes/false/no` as booleans, folds single-quoted spans into Expression tokens
//!        and turns the remaining punctuation into Char tokens.
//!
//!     Both stages are all-or-nothing. The first lexical error discards the line, which is
//!     why [tokenize] returns either the complete token list or a [LexError], never both.

pub mod base_tokenization;
pub mod classification;
pub mod common;
pub mod unescape;

pub use base_tokenization::{end_position, COMMENT_CHAR};
pub use common::LexError;

use crate::cmdgrammar::token::Token;

/// Tokenize one input line.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    let raw = base_tokenization::scan(line)?;
    classification::classify(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdgrammar::token::TokenKind;

    #[test]
    fn test_command_line_token_count() {
        let tokens = tokenize(r#"SET "key" = 4.56 FOR ' var * 3 < 15' "#).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::String,
                TokenKind::Char,
                TokenKind::Float,
                TokenKind::Identifier,
                TokenKind::Expression,
            ]
        );
    }

    #[test]
    fn test_error_discards_all_tokens() {
        let result = tokenize("show feature 1e999 to");
        assert!(result.is_err());
    }

    #[test]
    fn test_comment_only_line() {
        assert_eq!(tokenize("# nothing here").unwrap(), vec![]);
    }
}
