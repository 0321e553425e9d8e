//! Grammar Compiler
//!
//!     Turns one rule-expression string into a [Rule]. The notation is deliberately flat:
//!
//!         Sequence:   "show" FeatureClause Options ToClause?
//!         Choice:     TranClause | DefClause | ValueClause
//!
//!     An expression with a `|` outside of quotes and brackets is a Choice, anything else
//!     is a Sequence. There is no grouping; nesting is expressed by referencing other rules.
//!
//! Items
//!
//!     The first character of a fragment selects the item kind, the last one its
//!     cardinality:
//!
//!         "word"      identifier literal
//!         'c'         char literal (exactly one code point)
//!         [...]       regex class, matched against string tokens
//!         !type       data type assertion (expression, string, int, bool, float, char)
//!         Name        reference to another rule
//!
//!         suffix      * zero or more, + one or more, ? zero or one, none for exactly one

use super::error::GrammarError;
use super::item::{data_type_kind, Cardinality, ClassPattern, ItemExpr, RuleItem};
use super::rule::{Rule, RuleId, RuleKind};
use log::warn;

const CHOICE_DELIMITER: char = '|';

/// Compile a rule expression. `resolve` maps referenced rule names to their ids.
pub fn compile_rule(
    id: RuleId,
    name: &str,
    expression: &str,
    resolve: impl Fn(&str) -> Option<RuleId>,
) -> Result<Rule, GrammarError> {
    let (kind, fragments) = split_rule(expression);
    if fragments.is_empty() {
        return Err(GrammarError::EmptyRule {
            rule: name.to_string(),
        });
    }

    let items = fragments
        .into_iter()
        .map(|fragment| compile_item(name, fragment, &resolve))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Rule {
        id,
        name: name.to_string(),
        kind,
        items,
    })
}

/// Split an expression into trimmed, non-empty fragments and decide the combinator.
pub fn split_rule(expression: &str) -> (RuleKind, Vec<&str>) {
    let alternatives = split_top_level(expression, |c| c == CHOICE_DELIMITER);
    let (kind, pieces) = if alternatives.len() > 1 {
        (RuleKind::Choice, alternatives)
    } else {
        (RuleKind::Sequence, split_top_level(expression, char::is_whitespace))
    };
    let fragments = pieces
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect();
    (kind, fragments)
}

/// Split on delimiter characters that are not inside `"..."`, `'...'` or `[...]`.
fn split_top_level(expression: &str, is_delimiter: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;

    for (offset, c) in expression.char_indices() {
        match quote {
            Some(open) => {
                if c == open {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' if depth == 0 => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                _ if depth == 0 && is_delimiter(c) => {
                    pieces.push(&expression[start..offset]);
                    start = offset + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    pieces.push(&expression[start..]);
    pieces
}

fn compile_item(
    rule: &str,
    fragment: &str,
    resolve: &impl Fn(&str) -> Option<RuleId>,
) -> Result<RuleItem, GrammarError> {
    let malformed = |reason: &str| GrammarError::MalformedItem {
        rule: rule.to_string(),
        fragment: fragment.to_string(),
        reason: reason.to_string(),
    };

    if split_top_level(fragment, char::is_whitespace).len() > 1 {
        return Err(malformed("choice alternatives must be single items"));
    }

    let (cardinality, body) = Cardinality::split_suffix(fragment);
    let Some(first) = body.chars().next() else {
        return Err(malformed("missing expression before the cardinality suffix"));
    };

    let (expr, text) = match first {
        '"' => {
            let text =
                strip_delimiters(body, '"').ok_or_else(|| malformed("unterminated literal"))?;
            if text.is_empty() {
                return Err(malformed("empty identifier literal"));
            }
            (ItemExpr::Identifier(text.to_string()), text.to_string())
        }
        '\'' => {
            let text = strip_delimiters(body, '\'')
                .ok_or_else(|| malformed("unterminated char literal"))?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => (ItemExpr::Char(c), text.to_string()),
                _ => {
                    return Err(GrammarError::InvalidCharLiteral {
                        rule: rule.to_string(),
                        fragment: fragment.to_string(),
                    })
                }
            }
        }
        '[' => (ItemExpr::Class(ClassPattern::new(body)), body.to_string()),
        '!' => {
            let name = &body[1..];
            if name.is_empty() {
                return Err(malformed("missing data type name"));
            }
            let kind = data_type_kind(name);
            if kind.is_none() {
                warn!("Rule {}: unknown data type !{} never matches", rule, name);
            }
            (ItemExpr::DataType(kind), name.to_string())
        }
        _ => {
            let id = resolve(body).ok_or_else(|| GrammarError::UnknownRule {
                rule: rule.to_string(),
                reference: body.to_string(),
            })?;
            (ItemExpr::Symbol(id), body.to_string())
        }
    };

    Ok(RuleItem {
        expr,
        text,
        cardinality,
    })
}

fn strip_delimiters(body: &str, delimiter: char) -> Option<&str> {
    if body.len() < 2 {
        return None;
    }
    body.strip_prefix(delimiter)?.strip_suffix(delimiter)
}
