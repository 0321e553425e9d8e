//! Property-based tests for quantifier semantics and repeatability

use cmdgrammar::cmdgrammar::{tokenize, CommandParser};
use proptest::prelude::*;

fn verdict(start: &str, line: &str) -> bool {
    let mut parser = CommandParser::from_rules([("START", start)]).unwrap();
    parser.set_input(line);
    parser.parse()
}

fn repeated(word: &str, count: usize) -> String {
    vec![word; count].join(" ")
}

/// Words that tokenize to a single identifier and are not boolean keywords
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-m][a-z]{0,6}".prop_filter("boolean keyword", |w| !matches!(w.as_str(), "false" | "no"))
}

proptest! {
    #[test]
    fn test_quantifiers_on_repeated_literal(count in 1usize..8) {
        let line = repeated("show", count);
        prop_assert!(verdict(r#""show"+"#, &line));
        prop_assert!(verdict(r#""show"*"#, &line));
        prop_assert_eq!(verdict(r#""show"?"#, &line), count == 1);
        prop_assert_eq!(verdict(r#""show""#, &line), count == 1);
    }

    #[test]
    fn test_unrelated_tail_is_rejected(count in 0usize..6, tail in word_strategy()) {
        let line = format!("{} {}", repeated("show", count), tail);
        prop_assert!(!verdict(r#""show"*"#, &line));
        prop_assert!(!verdict(r#""show"* !string?"#, &line));
    }

    #[test]
    fn test_repeat_then_literal(count in 1usize..6) {
        let line = format!("{} blar", repeated("show", count));
        prop_assert!(verdict(r#""show"+ "blar""#, &line));
    }

    #[test]
    fn test_one_token_per_word(words in prop::collection::vec(word_strategy(), 0..8)) {
        let tokens = tokenize(&words.join(" ")).unwrap();
        prop_assert_eq!(tokens.len(), words.len());
    }

    #[test]
    fn test_parse_is_repeatable(words in prop::collection::vec(word_strategy(), 0..6)) {
        let mut parser = CommandParser::from_rules([
            ("START", r#""a"* "b"? Rest*"#),
            ("Rest", r#""c" | "d""#),
        ])
        .unwrap();
        parser.set_input(&words.join(" "));
        let first = (parser.parse(), parser.result().clone(), parser.errors().to_vec());
        let second = (parser.parse(), parser.result().clone(), parser.errors().to_vec());
        prop_assert_eq!(first, second);
    }
}
