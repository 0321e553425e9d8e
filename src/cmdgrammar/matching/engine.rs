//! Recursive-descent matcher with bounded backtracking.
//!
//! The matcher walks the grammar from `START`, reading tokens through a [TokenCursor].
//! Backtracking is limited to three places: a Choice restarts every alternative from the
//! position it was entered at, a failed optional or repeated attempt returns its token to
//! the input, and a symbol reference hands the token it just read back to the sub-rule.
//! There is no memoization.
//!
//! Rule nesting is capped at [MAX_DEPTH]. Right-recursive grammars nest once per token, so
//! a long enough line would otherwise exhaust the stack; past the cap the whole run fails.

use super::cursor::TokenCursor;
use super::diagnostics::ParseError;
use super::state::MatchState;
use super::MatchOutcome;
use crate::cmdgrammar::grammar::{Grammar, ItemExpr, ItemId, Rule, RuleId, RuleItem, RuleKind};
use crate::cmdgrammar::options::ParserOptions;
use crate::cmdgrammar::token::{Position, Token};
use log::{debug, trace};

/// Deepest rule nesting a run may reach before it is abandoned.
pub const MAX_DEPTH: usize = 512;

pub struct Matcher<'g, 't> {
    grammar: &'g Grammar,
    cursor: TokenCursor<'t>,
    state: MatchState,
    errors: Vec<ParseError>,
    options: ParserOptions,
    end: Position,
    depth: usize,
    /// Where the nesting cap was hit, if it was
    too_deep: Option<Position>,
}

impl<'g, 't> Matcher<'g, 't> {
    pub fn new(grammar: &'g Grammar, tokens: &'t [Token], options: ParserOptions) -> Self {
        let end = tokens
            .last()
            .map(|t| {
                Position::new(t.position.line, t.position.column + t.text.chars().count())
            })
            .unwrap_or_else(|| Position::new(1, 1));
        Self {
            grammar,
            cursor: TokenCursor::new(tokens),
            state: MatchState::new(),
            errors: Vec::new(),
            options,
            end,
            depth: 0,
            too_deep: None,
        }
    }

    /// Position reported for mismatches at end of input.
    pub fn with_end(mut self, end: Position) -> Self {
        self.end = end;
        self
    }

    /// Match the whole token list against `START`.
    pub fn run(mut self) -> MatchOutcome {
        let Some(start) = self.grammar.start() else {
            let err = ParseError::new(Position::new(1, 1), "grammar has no START rule");
            self.errors.push(err);
            return self.finish(false);
        };

        let mut matched = self.match_rule(start);
        if let Some(position) = self.too_deep {
            self.errors.push(ParseError::new(position, "rule nesting too deep"));
            matched = false;
        } else if matched && !self.cursor.at_end() {
            if let Some(token) = self.cursor.remaining().first() {
                self.errors.push(ParseError::trailing(token));
            }
            matched = false;
        }
        if self.options.debug() {
            let leftover: Vec<&str> =
                self.cursor.remaining().iter().map(|t| t.text.as_str()).collect();
            if !leftover.is_empty() {
                debug!("Leftover tokens: {}", leftover.join(" "));
            }
            debug!("Match {} with {} diagnostics", matched, self.errors.len());
        }
        self.finish(matched)
    }

    fn finish(self, matched: bool) -> MatchOutcome {
        MatchOutcome {
            matched,
            at_end: self.cursor.at_end(),
            errors: self.errors,
            state: self.state,
        }
    }

    fn match_rule(&mut self, id: RuleId) -> bool {
        let grammar = self.grammar;
        let rule = grammar.rule(id);
        if self.too_deep.is_some() {
            return false;
        }
        if self.depth >= MAX_DEPTH {
            let next = self.cursor.remaining().first();
            self.too_deep = Some(next.map_or(self.end, |t| t.position));
            if self.options.debug() {
                debug!("Abandoning run: rule {} nested {} deep", rule.name, self.depth);
            }
            return false;
        }
        if self.options.debug() {
            debug!("{:indent$}Trying {}", "", rule, indent = self.depth * 2);
        }

        self.depth += 1;
        let matched = match rule.kind {
            RuleKind::Sequence => self.match_sequence(rule),
            RuleKind::Choice => self.match_choice(rule),
        };
        self.depth -= 1;

        if self.options.debug() {
            let indent = self.depth * 2;
            debug!("{:indent$}Rule {} matched: {}", "", rule.name, matched);
        }
        matched
    }

    fn match_sequence(&mut self, rule: &'g Rule) -> bool {
        for (id, item) in rule.item_ids().zip(&rule.items) {
            self.cursor.advance();
            if !self.match_item(id, item) {
                return false;
            }
        }
        true
    }

    fn match_choice(&mut self, rule: &'g Rule) -> bool {
        let entry = self.cursor.mark();
        let errors_before = self.errors.len();
        for (id, item) in rule.item_ids().zip(&rule.items) {
            self.cursor.rewind(entry);
            self.cursor.advance();
            if self.match_item(id, item) {
                self.errors.truncate(errors_before);
                return true;
            }
        }
        false
    }

    /// Match one item, honoring its cardinality. The current token is the first one the
    /// item sees.
    fn match_item(&mut self, id: ItemId, item: &'g RuleItem) -> bool {
        let (min, max) = item.cardinality.bounds();
        if (min, max) == (1, Some(1)) {
            let matched = self.test_atom(id, item);
            if !matched {
                self.report(id, item);
            }
            return matched;
        }

        let errors_before = self.errors.len();
        let mut count = 0;
        loop {
            let attempt = self.cursor.mark();
            if self.test_atom(id, item) {
                count += 1;
                let saturated = max.is_some_and(|max| count >= max);
                let consumed = self.cursor.position() > attempt.start();
                if saturated || !consumed || !self.cursor.has_next() {
                    break;
                }
                self.cursor.advance();
            } else if count >= min {
                self.cursor.rewind(attempt);
                self.cursor.unread();
                break;
            } else {
                self.report(id, item);
                return false;
            }
        }

        if self.options.debug() {
            let indent = self.depth * 2;
            trace!("{:indent$}{} matched {} times", "", item, count);
        }
        self.errors.truncate(errors_before);
        true
    }

    /// Test the current token against a single item, binding it on success.
    fn test_atom(&mut self, id: ItemId, item: &'g RuleItem) -> bool {
        self.state.mark_evaluated(id);
        let current = self.cursor.current();

        let matched = match item.expr {
            ItemExpr::Symbol(rule) => {
                self.cursor.unread();
                self.match_rule(rule)
            }
            _ => self
                .cursor
                .current_token()
                .is_some_and(|token| item.matches_token(token)),
        };

        if self.options.debug() {
            let indent = self.depth * 2;
            match self.cursor.current_token().filter(|_| item.symbol().is_none()) {
                Some(token) => {
                    trace!("{:indent$}{} vs {}: {}", "", item, token, matched)
                }
                None => trace!("{:indent$}{}: {}", "", item, matched),
            }
        }

        if matched {
            if let Some(index) = current {
                self.state.bind(id, index);
            }
        }
        matched
    }

    /// Record a required-item mismatch, once per item per run.
    fn report(&mut self, id: ItemId, item: &RuleItem) {
        if item.symbol().is_some() || self.errors.iter().any(|e| e.item == Some(id)) {
            return;
        }
        let position = self.cursor.current_token().map_or(self.end, |t| t.position);
        let rule = &self.grammar.rule(id.rule).name;
        self.errors.push(ParseError::expected(position, rule, id, item));
    }
}
