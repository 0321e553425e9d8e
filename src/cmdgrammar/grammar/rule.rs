//! Named rules: a combinator over an ordered list of items.

use super::item::{ItemId, RuleItem};
use serde::Serialize;
use std::fmt;

/// Index of a rule inside its [Grammar](super::Grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    /// Every item must match, in order
    Sequence,
    /// The first item that matches wins
    Choice,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub kind: RuleKind,
    pub items: Vec<RuleItem>,
}

impl Rule {
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.items.len()).map(move |index| ItemId {
            rule: self.id,
            index,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.kind {
            RuleKind::Sequence => " ",
            RuleKind::Choice => " | ",
        };
        let items: Vec<String> = self.items.iter().map(ToString::to_string).collect();
        write!(f, "{} -> {}", self.name, items.join(separator))
    }
}
