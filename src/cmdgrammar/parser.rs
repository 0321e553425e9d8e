//! Command Parser
//!
//!     The host-facing facade. A [CommandParser] owns a shared compiled grammar, the
//!     current input line with its tokens, and the outcome of the last parse:
//!
//!         let grammar = Grammar::compile([("START", r#""show" !string"#)])?;
//!         let mut parser = CommandParser::new(grammar)?;
//!         parser.set_input(r#"show "/tmp/out.csv""#);
//!         if parser.parse() {
//!             let path = parser.result().get("start_string");
//!         }
//!
//!     Setting the input tokenizes it immediately. A line that fails to tokenize is kept
//!     as an error: [CommandParser::tokens] is empty, [CommandParser::tokenizer_error] holds
//!     the cause, and [CommandParser::parse] returns false without running the matcher.
//!
//!     Parsing is repeatable. Every call starts from fresh match state and replaces the
//!     previous diagnostics and result mapping.

use crate::cmdgrammar::grammar::{Grammar, GrammarError};
use crate::cmdgrammar::lexing::{end_position, tokenize, LexError};
use crate::cmdgrammar::matching::{MatchOutcome, Matcher, ParseError};
use crate::cmdgrammar::projection::ParseResult;
use crate::cmdgrammar::token::Token;
use log::debug;
use std::sync::Arc;

pub use crate::cmdgrammar::options::ParserOptions;

#[derive(Debug, Clone)]
pub struct CommandParser {
    grammar: Arc<Grammar>,
    options: ParserOptions,
    line: String,
    tokens: Vec<Token>,
    lex_error: Option<LexError>,
    outcome: MatchOutcome,
    result: ParseResult,
}

impl CommandParser {
    /// Create a parser for `grammar`, which must define `START`.
    pub fn new(grammar: impl Into<Arc<Grammar>>) -> Result<Self, GrammarError> {
        let grammar = Self::checked(grammar.into())?;
        Ok(Self {
            grammar,
            options: ParserOptions::default(),
            line: String::new(),
            tokens: Vec::new(),
            lex_error: None,
            outcome: MatchOutcome::default(),
            result: ParseResult::default(),
        })
    }

    /// Compile `rules` and create a parser for them.
    pub fn from_rules<I, K, V>(rules: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::new(Grammar::compile(rules)?)
    }

    fn checked(grammar: Arc<Grammar>) -> Result<Arc<Grammar>, GrammarError> {
        match grammar.start() {
            Some(_) => Ok(grammar),
            None => Err(GrammarError::MissingStart),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Replace the grammar. The current input is kept; the last outcome is discarded.
    pub fn set_grammar(&mut self, grammar: impl Into<Arc<Grammar>>) -> Result<(), GrammarError> {
        self.grammar = Self::checked(grammar.into())?;
        self.clear_outcome();
        Ok(())
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// Set and tokenize the input line.
    pub fn set_input(&mut self, line: &str) {
        self.line = line.to_string();
        match tokenize(line) {
            Ok(tokens) => {
                self.tokens = tokens;
                self.lex_error = None;
            }
            Err(err) => {
                if self.options.debug() {
                    debug!("Tokenizer error: {}", err);
                }
                self.tokens = Vec::new();
                self.lex_error = Some(err);
            }
        }
        self.clear_outcome();
    }

    pub fn input(&self) -> &str {
        &self.line
    }

    fn clear_outcome(&mut self) {
        self.outcome = MatchOutcome::default();
        self.result = ParseResult::default();
    }

    /// Match the current input against the grammar.
    pub fn parse(&mut self) -> bool {
        let outcome = match &self.lex_error {
            Some(err) => MatchOutcome::rejected(vec![ParseError::lexical(err)]),
            None => {
                if self.options.debug() {
                    if let Some(start) = self.grammar.start() {
                        debug!("{}", self.grammar.rule(start));
                    }
                    debug!("Tokens: {}", self.tokens.len());
                }
                Matcher::new(&self.grammar, &self.tokens, self.options)
                    .with_end(end_position(&self.line))
                    .run()
            }
        };
        self.result = ParseResult::project(&self.grammar, &outcome, &self.tokens);
        self.outcome = outcome;
        self.outcome.matched
    }

    /// Diagnostics of the last parse.
    pub fn errors(&self) -> &[ParseError] {
        &self.outcome.errors
    }

    /// Bindings of the last parse, by result key. Present after failed parses too.
    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    pub fn is_match(&self) -> bool {
        self.outcome.matched
    }

    /// Whether the last parse consumed every token.
    pub fn at_end(&self) -> bool {
        self.outcome.at_end
    }

    pub fn outcome(&self) -> &MatchOutcome {
        &self.outcome
    }

    /// Tokens of the current input; empty when it failed to tokenize.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokenizer_error(&self) -> Option<&LexError> {
        self.lex_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdgrammar::token::TokenKind;

    fn parser(start: &str) -> CommandParser {
        CommandParser::from_rules([("START", start)]).unwrap()
    }

    #[test]
    fn test_missing_start_is_rejected() {
        let err = CommandParser::from_rules([("Other", r#""x""#)]).unwrap_err();
        assert_eq!(err, GrammarError::MissingStart);

        let mut parser = parser(r#""x""#);
        let other = Grammar::compile([("Other", r#""x""#)]).unwrap();
        assert!(parser.set_grammar(other).is_err());
    }

    #[test]
    fn test_parse_binds_result() {
        let mut parser = parser(r#""show" !int"#);
        parser.set_input("show 42");
        assert!(parser.parse());
        assert!(parser.is_match());
        assert!(parser.at_end());
        assert!(parser.errors().is_empty());
        assert_eq!(parser.result().get("start_int").and_then(Token::as_int), Some(42));
    }

    #[test]
    fn test_failed_parse_keeps_partial_bindings() {
        let mut parser = parser(r#""show" !int"#);
        parser.set_input("show x");
        assert!(!parser.parse());
        assert!(parser.result().contains_key("start_show"));
        assert!(!parser.result().contains_key("start_int"));
        assert_eq!(parser.errors().len(), 1);
    }

    #[test]
    fn test_lexical_error_refuses_to_match() {
        let mut parser = parser("!int");
        parser.set_input("99999999999999999999");
        assert!(parser.tokens().is_empty());
        assert!(parser.tokenizer_error().is_some());
        assert!(!parser.parse());
        assert!(parser.result().is_empty());
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(parser.outcome().bindings().count(), 0);
    }

    #[test]
    fn test_set_input_clears_previous_outcome() {
        let mut parser = parser(r#""go""#);
        parser.set_input("go");
        assert!(parser.parse());
        parser.set_input("stop");
        assert!(!parser.is_match());
        assert!(parser.result().is_empty());
        assert_eq!(parser.tokens()[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let mut parser = parser(r#""show"+ !string?"#).with_options(ParserOptions::DEBUG);
        parser.set_input(r#"show show "x""#);
        let first = (parser.parse(), parser.result().clone(), parser.errors().to_vec());
        let second = (parser.parse(), parser.result().clone(), parser.errors().to_vec());
        assert_eq!(first, second);
        assert!(first.0);
    }

    #[test]
    fn test_end_of_line_diagnostic_column() {
        let mut parser = parser(r#""show" !int"#);
        parser.set_input("show   ");
        assert!(!parser.parse());
        assert_eq!(parser.errors()[0].column, 8);
    }
}
