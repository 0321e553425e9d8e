//! Matching Engine
//!
//!     Decides whether a token list is a sentence of a grammar, starting from `START`. The
//!     whole list must be consumed for a match.
//!
//!     A run never touches the grammar. Bindings (which token satisfied which item) and
//!     diagnostics are collected in per-run state and returned as a [MatchOutcome], so
//!     repeated runs over the same tokens give the same answer and concurrent runs over one
//!     shared grammar are independent.
//!
//! Cardinality
//!
//!     Items carry one of four cardinalities. Repetitions are greedy and never backtrack
//!     into a shorter count: `"a"* "a"` cannot match `a a`. A failed optional or repeated
//!     attempt returns its token to the input and discards any diagnostics it produced. A
//!     repetition also stops as soon as an iteration succeeds without consuming input.
//!
//!     The engine submodule holds the recursion; see [engine::Matcher].

pub mod cursor;
pub mod diagnostics;
pub mod engine;
pub mod state;

pub use diagnostics::ParseError;
pub use engine::Matcher;

use crate::cmdgrammar::grammar::{Grammar, ItemId};
use crate::cmdgrammar::options::ParserOptions;
use crate::cmdgrammar::token::Token;
use state::MatchState;

/// Result of one match run.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Whether every token was consumed when the run stopped
    pub at_end: bool,
    pub errors: Vec<ParseError>,
    state: MatchState,
}

impl MatchOutcome {
    /// An outcome for input that never reached the matcher.
    pub fn rejected(errors: Vec<ParseError>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Index of the token bound to `item`, if the item matched during the run.
    pub fn binding(&self, item: ItemId) -> Option<usize> {
        self.state.binding(item)
    }

    /// All bindings, in no particular order.
    pub fn bindings(&self) -> impl Iterator<Item = (ItemId, usize)> + '_ {
        self.state.bindings()
    }

    /// Whether the matcher tested `item` at all during the run.
    pub fn was_evaluated(&self, item: ItemId) -> bool {
        self.state.was_evaluated(item)
    }
}

/// Match `tokens` against `grammar`.
pub fn match_tokens(grammar: &Grammar, tokens: &[Token], options: ParserOptions) -> MatchOutcome {
    Matcher::new(grammar, tokens, options).run()
}
