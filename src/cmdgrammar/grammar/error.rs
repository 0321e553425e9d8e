//! Error types for grammar compilation

use std::fmt;

/// Configuration mistakes in a grammar. These are reported when the grammar is compiled or
/// handed to a parser, never while matching input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule expression with no items
    EmptyRule { rule: String },
    /// A fragment that cannot be read as an item
    MalformedItem {
        rule: String,
        fragment: String,
        reason: String,
    },
    /// A char literal that is not exactly one code point
    InvalidCharLiteral { rule: String, fragment: String },
    /// A symbol reference to a rule that does not exist
    UnknownRule { rule: String, reference: String },
    /// A cycle of rules that can recurse without consuming a token
    LeftRecursion { path: Vec<String> },
    /// No `START` rule to begin matching from
    MissingStart,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::EmptyRule { rule } => write!(f, "Rule {} has no items", rule),
            GrammarError::MalformedItem {
                rule,
                fragment,
                reason,
            } => write!(f, "Rule {}: malformed item {}: {}", rule, fragment, reason),
            GrammarError::InvalidCharLiteral { rule, fragment } => write!(
                f,
                "Rule {}: char literal {} must contain exactly one character",
                rule, fragment
            ),
            GrammarError::UnknownRule { rule, reference } => {
                write!(f, "Rule {} references undefined rule {}", rule, reference)
            }
            GrammarError::LeftRecursion { path } => write!(
                f,
                "Left recursion without consuming input: {}",
                path.join(" -> ")
            ),
            GrammarError::MissingStart => write!(f, "Grammar has no START rule"),
        }
    }
}

impl std::error::Error for GrammarError {}
