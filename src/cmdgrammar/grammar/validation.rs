//! Whole-grammar checks that run once every rule has been compiled.

use super::error::GrammarError;
use super::item::RuleItem;
use super::rule::{Rule, RuleKind};
use crate::cmdgrammar::projection::result_key;
use std::collections::BTreeMap;

/// Rules that can succeed without consuming a token, indexed by rule id.
pub fn nullable_rules(rules: &[Rule]) -> Vec<bool> {
    let mut nullable = vec![false; rules.len()];
    loop {
        let mut changed = false;
        for rule in rules {
            if nullable[rule.id.0] {
                continue;
            }
            let value = match rule.kind {
                RuleKind::Sequence => rule.items.iter().all(|item| item_nullable(item, &nullable)),
                RuleKind::Choice => rule.items.iter().any(|item| item_nullable(item, &nullable)),
            };
            if value {
                nullable[rule.id.0] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

fn item_nullable(item: &RuleItem, nullable: &[bool]) -> bool {
    item.cardinality.is_optional() || item.symbol().is_some_and(|id| nullable[id.0])
}

/// Rules reachable from `rule` before any token has been consumed.
fn leading_references(rule: &Rule, nullable: &[bool]) -> Vec<usize> {
    let mut references = Vec::new();
    for item in &rule.items {
        if let Some(id) = item.symbol() {
            references.push(id.0);
        }
        if rule.kind == RuleKind::Sequence && !item_nullable(item, nullable) {
            break;
        }
    }
    references
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Reject rule cycles that can be entered again without consuming a token.
///
/// The matcher would recurse on such a cycle until the stack runs out.
pub fn check_left_recursion(rules: &[Rule]) -> Result<(), GrammarError> {
    let nullable = nullable_rules(rules);
    let leading: Vec<Vec<usize>> = rules
        .iter()
        .map(|rule| leading_references(rule, &nullable))
        .collect();
    let mut marks = vec![Mark::Unvisited; rules.len()];
    let mut path = Vec::new();

    for id in 0..rules.len() {
        visit(id, rules, &leading, &mut marks, &mut path)?;
    }
    Ok(())
}

fn visit(
    id: usize,
    rules: &[Rule],
    leading: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Result<(), GrammarError> {
    match marks[id] {
        Mark::Done => return Ok(()),
        Mark::Active => {
            let start = path.iter().position(|&entry| entry == id).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|&entry| rules[entry].name.clone())
                .collect();
            cycle.push(rules[id].name.clone());
            return Err(GrammarError::LeftRecursion { path: cycle });
        }
        Mark::Unvisited => {}
    }

    marks[id] = Mark::Active;
    path.push(id);
    for &next in &leading[id] {
        visit(next, rules, leading, marks, path)?;
    }
    path.pop();
    marks[id] = Mark::Done;
    Ok(())
}

/// Result keys produced by more than one item.
pub fn key_collisions(rules: &[Rule]) -> Vec<String> {
    let mut owners: BTreeMap<String, usize> = BTreeMap::new();
    for rule in rules {
        for item in &rule.items {
            *owners.entry(result_key(&rule.name, &item.text)).or_default() += 1;
        }
    }
    owners
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key)
        .collect()
}
