//! Command-line grammar parsing.
//!
//!     A line of user input is tokenized, matched against a small grammar of named rules,
//!     and the tokens that satisfied each rule item are handed back by name:
//!
//!         line -> lexing -> [Token] -> matching (Grammar) -> MatchOutcome -> ParseResult
//!
//!     [grammar] compiles the rule notation, [lexing] produces tokens, [matching] runs the
//!     recursive-descent match, and [projection] flattens bindings into result keys.
//!     [parser::CommandParser] ties these together for a host.

pub mod grammar;
pub mod lexing;
pub mod matching;
pub mod options;
pub mod parser;
pub mod projection;
pub mod token;

pub use grammar::{Grammar, GrammarError};
pub use lexing::{tokenize, LexError};
pub use matching::{match_tokens, MatchOutcome, ParseError};
pub use options::ParserOptions;
pub use parser::CommandParser;
pub use projection::ParseResult;
pub use token::{Position, Token, TokenKind, TokenValue};
