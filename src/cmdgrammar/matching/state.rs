//! Per-run match state.
//!
//! Everything a parse run learns about individual items lives here rather than on the
//! grammar, keyed by [ItemId]. A fresh state is created for every run.

use crate::cmdgrammar::grammar::ItemId;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct MatchState {
    bindings: HashMap<ItemId, usize>,
    evaluated: HashSet<ItemId>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `item` to the token at `index`, replacing an earlier binding.
    pub fn bind(&mut self, item: ItemId, index: usize) {
        self.bindings.insert(item, index);
    }

    pub fn binding(&self, item: ItemId) -> Option<usize> {
        self.bindings.get(&item).copied()
    }

    pub fn mark_evaluated(&mut self, item: ItemId) {
        self.evaluated.insert(item);
    }

    pub fn was_evaluated(&self, item: ItemId) -> bool {
        self.evaluated.contains(&item)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (ItemId, usize)> + '_ {
        self.bindings.iter().map(|(item, index)| (*item, *index))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
