//! Terminal parsers: the leaves every grammar is built from.
//!
//! Structural terminals (`line`, `newline`, whitespace, `empty_line`) are
//! regex-anchored with their patterns compiled once into statics. The integer
//! terminals are hand-rolled ASCII scanners instead: they accumulate into a
//! widened intermediate and narrow at the end, so a transient overflow during
//! accumulation does not abort the scan.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::parser::{Parse, Parser};
use crate::span::{PartialParsed, Span};

struct FixedNode {
    literal: String,
}

impl Parse for FixedNode {
    type Output = String;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, String>> {
        if input.starts_with(&self.literal) {
            Some(PartialParsed::new(
                self.literal.clone(),
                input.advance(self.literal.len()),
            ))
        } else {
            None
        }
    }
}

/// Matches `literal` exactly; the parsed value is the literal text.
pub fn fixed(literal: impl Into<String>) -> Parser<String> {
    Parser::from_node(FixedNode {
        literal: literal.into(),
    })
}

struct RegexNode<T> {
    regex: Regex,
    convert: Box<dyn Fn(&Captures) -> T + Send + Sync>,
}

impl<T> Parse for RegexNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        let captures = self.regex.captures(input.as_str())?;
        let whole = captures.get(0).unwrap(); // group 0 is the whole match
        if whole.start() != 0 {
            // The pattern matched further ahead; an anchored terminal must
            // match at the cursor itself.
            return None;
        }
        let value = (self.convert)(&captures);
        Some(PartialParsed::new(value, input.advance(whole.end())))
    }
}

/// Matches a precompiled regex anchored at the cursor: the match must begin
/// exactly there, never further ahead. Consumes the whole match and hands the
/// captures to `convert`.
pub fn with_regex<T: 'static>(
    regex: Regex,
    convert: impl Fn(&Captures) -> T + Send + Sync + 'static,
) -> Parser<T> {
    Parser::from_node(RegexNode {
        regex,
        convert: Box::new(convert),
    })
}

/// Compiles `pattern` and matches it anchored at the cursor.
///
/// An invalid pattern is a bug in the grammar definition, not bad input, and
/// panics at construction time.
pub fn regex<T: 'static>(
    pattern: &str,
    convert: impl Fn(&Captures) -> T + Send + Sync + 'static,
) -> Parser<T> {
    let compiled = match Regex::new(pattern) {
        Ok(compiled) => compiled,
        Err(err) => panic!("invalid regex pattern {pattern:?}: {err}"),
    };
    with_regex(compiled, convert)
}

struct UnsignedIntegerNode;

impl Parse for UnsignedIntegerNode {
    type Output = u32;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, u32>> {
        let (value, consumed) = scan_digits(input.as_str().as_bytes(), 0)?;
        Some(PartialParsed::new(value as u32, input.advance(consumed)))
    }
}

/// One or more ASCII digits, no sign. Leading zeros are fine: `"007"` is 7.
pub fn unsigned_integer() -> Parser<u32> {
    Parser::from_node(UnsignedIntegerNode)
}

struct SignedIntegerNode;

impl Parse for SignedIntegerNode {
    type Output = i32;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, i32>> {
        let bytes = input.as_str().as_bytes();
        let (negative, start) = match bytes.first() {
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            _ => (false, 0),
        };
        let (magnitude, consumed) = scan_digits(bytes, start)?;
        let value = if negative {
            (magnitude as i64).wrapping_neg()
        } else {
            magnitude as i64
        };
        Some(PartialParsed::new(value as i32, input.advance(consumed)))
    }
}

/// An optional `+`/`-` sign followed by one or more ASCII digits. The sign
/// negates after accumulation.
pub fn signed_integer() -> Parser<i32> {
    Parser::from_node(SignedIntegerNode)
}

/// Scans ASCII digits from `start`, accumulating into a widened intermediate.
/// Fails when zero digits are consumed (a bare sign is not a number).
fn scan_digits(bytes: &[u8], start: usize) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        value = value
            .wrapping_mul(10)
            .wrapping_add(u64::from(bytes[end] - b'0'));
        end += 1;
    }
    if end == start {
        return None;
    }
    Some((value, end))
}

struct SingleDigitNode;

impl Parse for SingleDigitNode {
    type Output = u32;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, u32>> {
        match input.as_str().as_bytes().first() {
            Some(b) if b.is_ascii_digit() => {
                Some(PartialParsed::new(u32::from(b - b'0'), input.advance(1)))
            }
            _ => None,
        }
    }
}

/// Exactly one ASCII digit, as its numeric value.
pub fn single_digit() -> Parser<u32> {
    Parser::from_node(SingleDigitNode)
}

struct LetterNode;

impl Parse for LetterNode {
    type Output = char;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, char>> {
        match input.char_at(0) {
            Some(c) if c.is_alphabetic() => {
                Some(PartialParsed::new(c, input.advance(c.len_utf8())))
            }
            _ => None,
        }
    }
}

/// Exactly one alphabetic character.
pub fn letter() -> Parser<char> {
    Parser::from_node(LetterNode)
}

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| compile_static(r"^[a-zA-Z0-9]+"));
static LINE: Lazy<Regex> = Lazy::new(|| compile_static(r"^([^\r\n]*)(?:\r\n|\n|\r)?"));
static NEWLINE: Lazy<Regex> = Lazy::new(|| compile_static(r"^(?:\r\n|\n|\r)"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile_static(r"^\s+"));
static ANY_WHITESPACE: Lazy<Regex> = Lazy::new(|| compile_static(r"^\s*"));

fn compile_static(pattern: &str) -> Regex {
    Regex::new(pattern).expect("structural pattern is well-formed")
}

/// One or more ASCII alphanumeric characters.
pub fn alphanumeric() -> Parser<String> {
    with_regex(ALPHANUMERIC.clone(), |captures| captures[0].to_string())
}

/// Consumes to the end of the line, terminator included; the value is the
/// line content without the terminator. Succeeds with an empty value at end
/// of input.
pub fn line() -> Parser<String> {
    with_regex(LINE.clone(), |captures| captures[1].to_string())
}

/// One line terminator: `\r\n`, `\n`, or `\r`.
pub fn newline() -> Parser<()> {
    with_regex(NEWLINE.clone(), |_| ())
}

/// One or more whitespace characters.
pub fn whitespace() -> Parser<()> {
    with_regex(WHITESPACE.clone(), |_| ())
}

/// Zero or more whitespace characters; always succeeds.
pub fn any_whitespace() -> Parser<()> {
    with_regex(ANY_WHITESPACE.clone(), |_| ())
}

/// A blank line: two consecutive line terminators.
///
/// Each terminator is matched on its own, so a lone `\r\n` is one terminator
/// and does not count as a blank line. A single regex cannot express this:
/// repeating the terminator alternation would accept `\r\n` by splitting it
/// into `\r` and `\n`.
pub fn empty_line() -> Parser<()> {
    newline().then_ignore(&newline())
}
