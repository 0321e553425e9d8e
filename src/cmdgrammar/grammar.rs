//! Grammar
//!
//!     The compiled rule database. A grammar is built once from a mapping of rule names to
//!     rule expressions and is immutable afterwards: nothing about a parse run is stored in
//!     it, so one grammar can back any number of parsers, on any number of threads.
//!
//!     Compilation is the only place grammar mistakes are reported. Every expression is
//!     compiled (see [compiler]), every symbol reference is resolved to a [RuleId], and the
//!     rule graph is checked for left recursion (see [validation]). A grammar that compiles
//!     can always be matched without further configuration errors.

pub mod compiler;
pub mod error;
pub mod item;
pub mod rule;
pub mod validation;

pub use error::GrammarError;
pub use item::{Cardinality, ItemExpr, ItemId, RuleItem};
pub use rule::{Rule, RuleId, RuleKind};

use log::warn;
use std::collections::{BTreeMap, HashMap};

/// Name of the rule matching starts from.
pub const START_RULE: &str = "START";

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    index: HashMap<String, RuleId>,
}

impl Grammar {
    /// Compile a grammar from `(rule name, rule expression)` pairs.
    ///
    /// Rule ids follow the sorted order of the names. A name given twice keeps its last
    /// expression.
    pub fn compile<I, K, V>(rules: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let sources: BTreeMap<String, V> = rules
            .into_iter()
            .map(|(name, expression)| (name.into(), expression))
            .collect();
        let index: HashMap<String, RuleId> = sources
            .keys()
            .enumerate()
            .map(|(id, name)| (name.clone(), RuleId(id)))
            .collect();

        let rules = sources
            .iter()
            .enumerate()
            .map(|(id, (name, expression))| {
                compiler::compile_rule(RuleId(id), name, expression.as_ref(), |reference| {
                    index.get(reference).copied()
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        validation::check_left_recursion(&rules)?;
        for key in validation::key_collisions(&rules) {
            warn!("Result key {} is bound by more than one item; the last binding wins", key);
        }

        Ok(Self { rules, index })
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0]
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rule_id(name).map(|id| self.rule(id))
    }

    pub fn item(&self, id: ItemId) -> &RuleItem {
        &self.rules[id.rule.0].items[id.index]
    }

    /// The `START` rule, if the grammar has one.
    pub fn start(&self) -> Option<RuleId> {
        self.rule_id(START_RULE)
    }

    /// Rules in id order, which is the sorted order of their names.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Result keys shared by more than one item. Only the last binding of such a key
    /// survives in a [ParseResult](crate::cmdgrammar::projection::ParseResult).
    pub fn key_collisions(&self) -> Vec<String> {
        validation::key_collisions(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_grammar() -> Vec<(&'static str, &'static str)> {
        vec![
            ("START", r#""show"  FeatureClause     Options  ToClause? "#),
            ("ToClause", r#""to"  !string "#),
            ("FeatureClause", r#""feature"  !string? "#),
            ("Options", "TranClause | DefClause | ValueClause "),
            ("TranClause", r#""translation"  LangList? "#),
            ("LangList", r#""lang"  !string? "#),
            ("ValueClause", r#""unique"?  "values" "#),
            ("DefClause", r#""definition" "#),
        ]
    }

    #[test]
    fn test_compiles_command_grammar() {
        let grammar = Grammar::compile(command_grammar()).unwrap();
        assert_eq!(grammar.len(), 8);
        let start = grammar.get(START_RULE).unwrap();
        assert_eq!(start.kind, RuleKind::Sequence);
        assert_eq!(start.items.len(), 4);
        assert_eq!(start.items[3].symbol(), grammar.rule_id("ToClause"));
        assert_eq!(grammar.get("Options").unwrap().kind, RuleKind::Choice);
        assert_eq!(grammar.start(), grammar.rule_id("START"));
    }

    #[test]
    fn test_display_renders_notation() {
        let grammar = Grammar::compile(command_grammar()).unwrap();
        assert_eq!(
            grammar.get("START").unwrap().to_string(),
            r#"START -> "show" FeatureClause Options ToClause?"#
        );
        assert_eq!(
            grammar.get("Options").unwrap().to_string(),
            "Options -> TranClause | DefClause | ValueClause"
        );
    }

    #[test]
    fn test_unknown_reference_fails_compile() {
        let err = Grammar::compile([("START", "\"show\" Nowhere")]).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownRule { .. }));
    }

    #[test]
    fn test_direct_left_recursion_is_rejected() {
        let err = Grammar::compile([("START", "START \"x\"")]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::LeftRecursion {
                path: vec!["START".to_string(), "START".to_string()],
            }
        );
    }

    #[test]
    fn test_recursion_behind_optional_items_is_rejected() {
        let err =
            Grammar::compile([("A", "\"a\"? B"), ("B", "'x'* A"), ("START", "A")]).unwrap_err();
        assert!(matches!(err, GrammarError::LeftRecursion { .. }));
    }

    #[test]
    fn test_recursion_through_nullable_rule_is_rejected() {
        let grammar = [("Empty", "\"e\"?"), ("START", "Empty START \"x\"")];
        assert!(matches!(
            Grammar::compile(grammar),
            Err(GrammarError::LeftRecursion { .. })
        ));
    }

    #[test]
    fn test_right_recursion_is_allowed() {
        let grammar = Grammar::compile([("START", "\"item\" START?")]).unwrap();
        assert_eq!(grammar.len(), 1);
    }

    #[test]
    fn test_key_collisions() {
        let grammar =
            Grammar::compile([("START", "\"go\" \"go\" Dest"), ("Dest", "!string")]).unwrap();
        assert_eq!(grammar.key_collisions(), vec!["start_go".to_string()]);
    }

    #[test]
    fn test_grammar_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grammar>();
    }
}
