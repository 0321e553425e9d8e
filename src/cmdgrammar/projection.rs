//! Result Projection
//!
//!     After a match, the per-item bindings are flattened into a [ParseResult]: a mapping
//!     from `rulename_itemtext` (both lowercased) to the token that satisfied the item. This
//!     is what a host reads to extract the arguments of a command:
//!
//!         START -> "show" !string      input: show "/tmp/out.csv"
//!
//!         start_show    -> identifier(show)
//!         start_string  -> string("/tmp/out.csv")
//!
//!     The projection is rebuilt from scratch after every parse, including failed ones, so
//!     it reflects whatever bindings the last attempt made. Keys are derived from text, so
//!     two items with the same rule and text share a key; rules are visited in id order and
//!     items in declaration order, and the last one wins. Hosts that need every binding
//!     should read [MatchOutcome::binding](crate::cmdgrammar::matching::MatchOutcome::binding),
//!     which is keyed by item identity.

use crate::cmdgrammar::grammar::Grammar;
use crate::cmdgrammar::matching::MatchOutcome;
use crate::cmdgrammar::token::Token;
use std::collections::HashMap;

/// Derive the result key for an item of `rule` with expression text `item_text`.
pub fn result_key(rule: &str, item_text: &str) -> String {
    format!("{}_{}", rule, item_text).to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    entries: HashMap<String, Token>,
}

impl ParseResult {
    /// Project the bindings of `outcome`, resolving token indices against `tokens`.
    pub fn project(grammar: &Grammar, outcome: &MatchOutcome, tokens: &[Token]) -> Self {
        let mut entries = HashMap::new();
        for rule in grammar.rules() {
            for (id, item) in rule.item_ids().zip(&rule.items) {
                if let Some(token) = outcome.binding(id).and_then(|index| tokens.get(index)) {
                    entries.insert(result_key(&rule.name, &item.text), token.clone());
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Token)> {
        self.entries.iter()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
