//! Rule items: the atoms a rule is made of.

use super::rule::RuleId;
use crate::cmdgrammar::token::{Token, TokenKind};
use log::warn;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Repetition policy of a rule item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cardinality {
    ExactlyOne,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
}

impl Cardinality {
    /// Read the cardinality suffix of a fragment.
    ///
    /// Returns the cardinality and the fragment with the suffix stripped.
    pub fn split_suffix(fragment: &str) -> (Cardinality, &str) {
        let cardinality = match fragment.chars().last() {
            Some('*') => Cardinality::ZeroOrMore,
            Some('+') => Cardinality::OneOrMore,
            Some('?') => Cardinality::ZeroOrOne,
            _ => return (Cardinality::ExactlyOne, fragment),
        };
        (cardinality, &fragment[..fragment.len() - 1])
    }

    /// Minimum and maximum number of matches; `None` means unbounded.
    pub fn bounds(self) -> (usize, Option<usize>) {
        match self {
            Cardinality::ExactlyOne => (1, Some(1)),
            Cardinality::ZeroOrOne => (0, Some(1)),
            Cardinality::OneOrMore => (1, None),
            Cardinality::ZeroOrMore => (0, None),
        }
    }

    pub fn is_optional(self) -> bool {
        self.bounds().0 == 0
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Cardinality::ExactlyOne => "",
            Cardinality::ZeroOrOne => "?",
            Cardinality::OneOrMore => "+",
            Cardinality::ZeroOrMore => "*",
        }
    }
}

/// Map a `!datatype` name to the token kind it asserts.
pub fn data_type_kind(name: &str) -> Option<TokenKind> {
    match name.to_lowercase().as_str() {
        "expression" => Some(TokenKind::Expression),
        "string" => Some(TokenKind::String),
        "int" => Some(TokenKind::Int),
        "bool" => Some(TokenKind::Bool),
        "float" => Some(TokenKind::Float),
        "char" => Some(TokenKind::Char),
        _ => None,
    }
}

/// A `[...]` regex class, compiled on first use.
#[derive(Debug, Clone)]
pub struct ClassPattern {
    pattern: String,
    compiled: OnceCell<Option<Regex>>,
}

impl ClassPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: OnceCell::new(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Unanchored search of `text`. A pattern that does not compile matches nothing.
    pub fn is_match(&self, text: &str) -> bool {
        let compiled = self.compiled.get_or_init(|| match Regex::new(&self.pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!("Regex class {} does not compile: {}", self.pattern, err);
                None
            }
        });
        compiled.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}

/// What a rule item matches. The set is closed; every dispatch site matches exhaustively.
#[derive(Debug, Clone)]
pub enum ItemExpr {
    /// `'c'`: a Char token with this code point
    Char(char),
    /// `"word"`: an Identifier token with exactly this text
    Identifier(String),
    /// `[...]`: a String token whose lexeme, quotes included, matches the pattern
    Class(ClassPattern),
    /// `!type`: any token of this kind; `None` for unrecognized type names, which never match
    DataType(Option<TokenKind>),
    /// `Name`: a reference to another rule
    Symbol(RuleId),
}

/// Identity of an item within a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId {
    pub rule: RuleId,
    pub index: usize,
}

/// One grammar atom inside a rule.
#[derive(Debug, Clone)]
pub struct RuleItem {
    pub expr: ItemExpr,
    /// Expression text with quotes, `!` and the cardinality suffix stripped
    pub text: String,
    pub cardinality: Cardinality,
}

impl RuleItem {
    /// Test a single token against a terminal item.
    ///
    /// Symbol references are not terminals and never match here; the matcher recurses
    /// into the referenced rule instead.
    pub fn matches_token(&self, token: &Token) -> bool {
        match &self.expr {
            ItemExpr::Char(expected) => {
                token.kind == TokenKind::Char && token.as_char() == Some(*expected)
            }
            ItemExpr::Identifier(expected) => {
                token.kind == TokenKind::Identifier && token.text == *expected
            }
            ItemExpr::Class(class) => {
                token.kind == TokenKind::String && class.is_match(&token.text)
            }
            ItemExpr::DataType(kind) => Some(token.kind) == *kind,
            ItemExpr::Symbol(_) => false,
        }
    }

    pub fn symbol(&self) -> Option<RuleId> {
        match self.expr {
            ItemExpr::Symbol(id) => Some(id),
            _ => None,
        }
    }
}

/// Renders the item back in grammar notation, e.g. `"show"`, `'='`, `!string?`.
impl fmt::Display for RuleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expr {
            ItemExpr::Char(_) => write!(f, "'{}'", self.text)?,
            ItemExpr::Identifier(_) => write!(f, "\"{}\"", self.text)?,
            ItemExpr::DataType(_) => write!(f, "!{}", self.text)?,
            ItemExpr::Class(_) | ItemExpr::Symbol(_) => f.write_str(&self.text)?,
        }
        f.write_str(self.cardinality.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdgrammar::token::{Position, TokenValue};

    fn string_token(value: &str) -> Token {
        Token::new(
            TokenKind::String,
            format!("\"{}\"", value),
            TokenValue::String(value.to_string()),
            Position::new(1, 1),
        )
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(Cardinality::split_suffix("\"show\"+"), (Cardinality::OneOrMore, "\"show\""));
        assert_eq!(Cardinality::split_suffix("Clause?"), (Cardinality::ZeroOrOne, "Clause"));
        assert_eq!(Cardinality::split_suffix("'*'"), (Cardinality::ExactlyOne, "'*'"));
        assert_eq!(Cardinality::split_suffix("'*'*"), (Cardinality::ZeroOrMore, "'*'"));
    }

    #[test]
    fn test_data_type_names() {
        assert_eq!(data_type_kind("STRING"), Some(TokenKind::String));
        assert_eq!(data_type_kind("expression"), Some(TokenKind::Expression));
        assert_eq!(data_type_kind("identifier"), None);
    }

    #[test]
    fn test_class_matches_quoted_lexeme() {
        let item = RuleItem {
            expr: ItemExpr::Class(ClassPattern::new("[^v]")),
            text: "[^v]".to_string(),
            cardinality: Cardinality::ExactlyOne,
        };
        // the quotes are part of the lexeme, so "v" still has a non-v character
        assert!(item.matches_token(&string_token("v")));

        let anchored = RuleItem {
            expr: ItemExpr::Class(ClassPattern::new("^[a-z]+$")),
            text: "^[a-z]+$".to_string(),
            cardinality: Cardinality::ExactlyOne,
        };
        assert!(!anchored.matches_token(&string_token("abc")));
        let identifier = Token::new(
            TokenKind::Identifier,
            "abc",
            TokenValue::Identifier("abc".to_string()),
            Position::new(1, 1),
        );
        assert!(!anchored.matches_token(&identifier));
    }

    #[test]
    fn test_broken_class_never_matches() {
        let class = ClassPattern::new("[a-");
        assert!(!class.is_match("a"));
        assert!(!class.is_match("[a-"));
    }

    #[test]
    fn test_display_round_trips_notation() {
        let item = RuleItem {
            expr: ItemExpr::DataType(Some(TokenKind::String)),
            text: "string".to_string(),
            cardinality: Cardinality::ZeroOrOne,
        };
        assert_eq!(item.to_string(), "!string?");
    }
}
