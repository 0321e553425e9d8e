//! Table-driven matching tests over single-rule grammars
//!
//! Each case compiles a one-rule grammar and checks the verdict for one input line. The
//! whole line has to be consumed for a match.

use cmdgrammar::cmdgrammar::{CommandParser, Grammar, GrammarError};
use rstest::rstest;

fn matches(start: &str, line: &str) -> bool {
    let mut parser = CommandParser::from_rules([("START", start)]).unwrap();
    parser.set_input(line);
    parser.parse()
}

#[rstest]
#[case::plus_many(r#""show"+"#, "show show show", true)]
#[case::plus_trailing(r#""show"+"#, "show show blar", false)]
#[case::star_many(r#""show"*"#, "show show show", true)]
#[case::star_unrelated(r#""show"*"#, "blar", false)]
#[case::star_empty(r#""show"*"#, "", true)]
#[case::exactly_one(r#""show""#, "show", true)]
#[case::exactly_one_twice(r#""show""#, "show show", false)]
#[case::optional_present(r#""show"?"#, "show", true)]
#[case::optional_unrelated(r#""show"?"#, "blar", false)]
#[case::plus_then_literal(r#""show"+ "blar""#, "show show blar", true)]
#[case::optional_middle_present(r#""foo" "bar"? "baz""#, "foo bar baz", true)]
#[case::optional_middle_absent(r#""foo" "bar"? "baz""#, "foo baz", true)]
#[case::string_type(r#""show" !string"#, r#"show "/tmp/test.csv""#, true)]
#[case::string_type_rejects_int(r#""show" !string"#, "show 42", false)]
#[case::int_type(r#""show" !int"#, "show 42", true)]
#[case::float_type(r#""set" !float"#, "set 4.56", true)]
#[case::bool_type(r#""set" !bool"#, "set yes", true)]
#[case::char_literal(r#""x" '=' !int"#, "x = 3", true)]
#[case::char_type(r#"!char"#, ";", true)]
#[case::expression_type(r#""for" !expression"#, "for ' a < 3 '", true)]
#[case::regex_class(r#""load" [0-9]"#, r#"load "v2""#, true)]
#[case::regex_class_mismatch(r#""load" [0-9]"#, r#"load "abc""#, false)]
#[case::regex_class_needs_string(r#""load" [0-9]"#, "load 7", false)]
#[case::regex_class_sees_quotes(r#""load" [^v]"#, r#"load "v""#, true)]
#[case::choice_first(r#""foo" | "bar" | "baz""#, "foo", true)]
#[case::choice_last(r#""foo" | "bar" | "baz""#, "baz", true)]
#[case::choice_none(r#""foo" | "bar" | "baz""#, "show", false)]
#[case::literal_is_case_sensitive(r#""show""#, "SHOW", false)]
#[case::comment_ignored(r#""show""#, "show # the rest", true)]
fn test_single_rule(#[case] start: &str, #[case] line: &str, #[case] expected: bool) {
    assert_eq!(matches(start, line), expected, "{} on {:?}", start, line);
}

#[rstest]
#[case::bad_char_literal(r#"'ab'"#)]
#[case::empty_literal(r#""""#)]
#[case::unknown_rule(r#""show" Missing"#)]
#[case::empty_rule("   ")]
fn test_compile_errors(#[case] start: &str) {
    assert!(Grammar::compile([("START", start)]).is_err());
}

#[test]
fn test_left_recursion_is_rejected() {
    let err = Grammar::compile([
        ("START", r#"List "x""#),
        ("List", r#"Item* START"#),
        ("Item", r#""i""#),
    ])
    .unwrap_err();
    assert!(matches!(err, GrammarError::LeftRecursion { .. }));
}

#[test]
fn test_unknown_data_type_never_matches() {
    assert!(!matches("!widget", "anything"));
}
