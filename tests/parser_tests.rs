// tests/parser_tests.rs
//
// Terminals, combinators, and entry points through the public API.

use morsel::{
    any_whitespace, empty_line, fixed, letter, line, newline, one_of, signed_integer,
    single_digit, unsigned_integer, whitespace, NoMatch, Span,
};

// ---
// Terminals
// ---

#[test]
fn test_fixed_literal_match() {
    let parsed = fixed("turn on").parse_partial(Span::new("turn on 1,2")).unwrap();
    assert_eq!(parsed.value, "turn on");
    assert_eq!(parsed.remaining.as_str(), " 1,2");
}

#[test]
fn test_fixed_mismatch_is_silent() {
    assert_eq!(fixed("turn on").try_parse("turn off"), Err(NoMatch));
}

#[test]
fn test_unsigned_integer_boundaries() {
    assert_eq!(unsigned_integer().parse("007"), 7);
    assert!(unsigned_integer().try_parse("").is_err());
    assert!(unsigned_integer().try_parse("-5").is_err());
}

#[test]
fn test_signed_integer_accepts_signs() {
    assert_eq!(signed_integer().parse("-5"), -5);
    assert_eq!(signed_integer().parse("+5"), 5);
    assert_eq!(signed_integer().parse("5"), 5);
}

#[test]
fn test_single_digit_and_letter() {
    assert_eq!(single_digit().parse("987"), 9);
    assert_eq!(letter().parse("xyz"), 'x');
    assert!(single_digit().try_parse("x").is_err());
    assert!(letter().try_parse("9").is_err());
}

#[test]
fn test_regex_terminal_is_anchored() {
    let word = morsel::regex(r"[a-z]+", |c| c[0].to_string());
    assert_eq!(word.parse("abc123"), "abc");
    // The pattern occurs later in the input, but not at the cursor.
    assert!(word.try_parse("123abc").is_err());
}

#[test]
fn test_line_and_newline() {
    let parsed = line().parse_partial(Span::new("$ cd /\n$ ls")).unwrap();
    assert_eq!(parsed.value, "$ cd /");
    assert_eq!(parsed.remaining.as_str(), "$ ls");

    assert!(newline().try_parse("\n").is_ok());
    assert!(newline().try_parse("\r\n").is_ok());
    assert!(newline().try_parse("abc").is_err());
}

#[test]
fn test_empty_line_counts_terminators_not_bytes() {
    // One CRLF is one terminator, not a \r followed by a \n.
    assert!(empty_line().try_parse("\r\nx").is_err());
    assert!(empty_line().try_parse("\r\n\r\nx").is_ok());
    assert!(empty_line().try_parse("\n\nx").is_ok());
}

#[test]
fn test_whitespace_terminals() {
    assert!(whitespace().try_parse("   ").is_ok());
    assert!(whitespace().try_parse("x").is_err());
    assert!(any_whitespace().try_parse("x").is_ok());
}

// ---
// Combinators
// ---

#[test]
fn test_map_changes_only_the_value() {
    let doubled = unsigned_integer().map(|n| n * 2);
    let parsed = doubled.parse_partial(Span::new("4 left")).unwrap();
    assert_eq!(parsed.value, 8);
    assert_eq!(parsed.remaining.as_str(), " left");
}

#[test]
fn test_bind_sequences_on_the_remainder() {
    let key_value = letter().then_ignore(&fixed("=")).then(&unsigned_integer());
    assert_eq!(key_value.parse("x=5"), ('x', 5));
}

#[test]
fn test_bind_short_circuits() {
    let grammar = fixed("a").bind(|_| fixed("b"), |a, b| format!("{a}{b}"));
    assert!(grammar.try_parse("ac").is_err());
}

#[test]
fn test_alternation_precedence() {
    let grammar = one_of([fixed("a"), fixed("ab")]);
    let parsed = grammar.parse_partial(Span::new("ab")).unwrap();
    assert_eq!(parsed.value, "a");
    assert_eq!(parsed.remaining.as_str(), "b");
}

#[test]
fn test_alternation_backtracks_to_the_same_origin() {
    let grammar = one_of([
        fixed("toggle").to(0u8),
        fixed("turn on").to(1u8),
        fixed("turn off").to(2u8),
    ]);
    assert_eq!(grammar.parse("turn off 1,2"), 2);
}

#[test]
fn test_repeat_totality() {
    let grammar = fixed("x").repeat();
    let parsed = grammar.parse_partial(Span::new("yyy")).unwrap();
    assert!(parsed.value.is_empty());
    assert_eq!(parsed.remaining.as_str(), "yyy");
}

#[test]
fn test_repeat_collects_in_order() {
    let grammar = single_digit().repeat();
    assert_eq!(grammar.parse("314x"), vec![3, 1, 4]);
}

#[test]
fn test_delimited_strictness() {
    let grammar = unsigned_integer().delimited_with(&fixed(","));
    assert_eq!(grammar.parse("1,2"), vec![1, 2]);
    assert!(grammar.try_parse("1,2,").is_err());
}

#[test]
fn test_delimited_empty_list() {
    let grammar = unsigned_integer().delimited_with(&fixed(","));
    let parsed = grammar.parse_partial(Span::new("]")).unwrap();
    assert!(parsed.value.is_empty());
    assert_eq!(parsed.remaining.as_str(), "]");
}

#[test]
fn test_trimmed_strips_both_sides() {
    let grammar = unsigned_integer().trimmed();
    let parsed = grammar.parse_partial(Span::new("\t 12 \n rest")).unwrap();
    assert_eq!(parsed.value, 12);
    assert_eq!(parsed.remaining.as_str(), "rest");
}

#[test]
fn test_then_fixed_pins_a_delimiter() {
    let grammar = unsigned_integer().then_fixed(":");
    assert_eq!(grammar.parse("5: rest"), 5);
    assert!(grammar.try_parse("5 rest").is_err());
}

#[test]
fn test_bracket_keeps_the_inner_value() {
    let grammar = unsigned_integer().bracket("(", ")");
    assert_eq!(grammar.parse("(42)"), 42);
}

#[test]
fn test_filter_constrains_the_value() {
    let small = unsigned_integer().filter(|n| *n < 10);
    assert_eq!(small.parse("9"), 9);
    assert!(small.try_parse("10").is_err());
}

// ---
// Entry points
// ---

#[test]
fn test_try_parse_does_not_require_full_consumption() {
    assert_eq!(unsigned_integer().try_parse("12 and more"), Ok(12));
}

#[test]
#[should_panic]
fn test_parse_panics_on_malformed_input() {
    unsigned_integer().parse("not a number");
}

#[test]
fn test_parse_repeated_restarts_at_each_remainder() {
    let command = one_of([fixed("L").to(-1i32), fixed("R").to(1i32)]);
    let turns: Vec<i32> = command.parse_repeated("LRRL").collect();
    assert_eq!(turns, vec![-1, 1, 1, -1]);
}

#[test]
fn test_parse_repeated_yields_nothing_on_immediate_mismatch() {
    assert_eq!(unsigned_integer().parse_repeated("abc").count(), 0);
}

#[test]
fn test_parse_valid_lines_discards_decoration() {
    let input = "\
# header
1
2

three
3";
    let values: Vec<u32> = unsigned_integer().parse_valid_lines(input).collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_grammar_handles_are_reusable_and_shareable() {
    let grammar = unsigned_integer().delimited_with(&fixed(","));
    let handle = grammar.clone();
    let worker = std::thread::spawn(move || handle.parse("4,5,6"));
    assert_eq!(grammar.parse("1,2,3"), vec![1, 2, 3]);
    assert_eq!(worker.join().unwrap(), vec![4, 5, 6]);
}
