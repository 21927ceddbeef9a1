//! The parser contract and the type-erased grammar handle.
//!
//! Every terminal and combinator in this crate is a small node struct
//! implementing [`Parse`]; [`Parser`] wraps such a node in an `Arc` so that
//! grammars compose by cheap handle cloning and a finished grammar can be
//! shared freely across threads. Grammars are immutable once built; parsing
//! threads all of its state through [`Span`] values, so the same handle can be
//! applied to any number of inputs, concurrently, without synchronization.
//!
//! The one sanctioned exception to immutability is the forward cell used by
//! [`recursive`], which is written exactly once during grammar assembly and
//! only read afterwards.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::NoMatch;
use crate::span::{PartialParsed, Span};

mod combinator;
mod grid;
mod recursive;
mod template;
mod terminal;

pub use combinator::one_of;
pub use grid::Grid;
pub use recursive::recursive;
pub use template::{template, Slots};
pub use terminal::{
    alphanumeric, any_whitespace, empty_line, fixed, letter, line, newline, regex, signed_integer,
    single_digit, unsigned_integer, whitespace, with_regex,
};

/// The parsing capability: one attempt against one input window.
///
/// Implementations must be pure (the same span always yields the same
/// outcome) and must never move the cursor backwards: on success,
/// `remaining` is a suffix of `input`.
pub trait Parse {
    type Output;

    /// Attempts a match at the start of `input`. `None` means the grammar
    /// does not apply here; it is routine control flow, not an error.
    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, Self::Output>>;
}

/// A handle to a compiled grammar producing values of type `T`.
///
/// Cloning is cheap (an `Arc` bump) and combinator methods take `&self`, so
/// sub-grammars can be reused freely while assembling larger ones.
pub struct Parser<T: 'static> {
    node: Arc<dyn Parse<Output = T> + Send + Sync>,
}

impl<T> Clone for Parser<T>
where
    T: 'static,
{
    fn clone(&self) -> Self {
        Parser {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: 'static> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\n|\r").expect("line break pattern is well-formed")
});

impl<T: 'static> Parser<T> {
    pub(crate) fn from_node(node: impl Parse<Output = T> + Send + Sync + 'static) -> Self {
        Parser {
            node: Arc::new(node),
        }
    }

    pub(crate) fn from_arc(node: Arc<dyn Parse<Output = T> + Send + Sync>) -> Self {
        Parser { node }
    }

    pub(crate) fn as_arc(&self) -> &Arc<dyn Parse<Output = T> + Send + Sync> {
        &self.node
    }

    /// Attempts a match at the start of `input`, returning the value and the
    /// unconsumed remainder. The full-fidelity, composable entry point.
    pub fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        self.node.parse_partial(input)
    }

    /// Attempts to match `input` from the start. Trailing unconsumed input is
    /// not an error; compose an end-of-input check into the grammar if full
    /// consumption is required.
    pub fn try_parse(&self, input: &str) -> Result<T, NoMatch> {
        match self.parse_partial(Span::new(input)) {
            Some(parsed) => Ok(parsed.value),
            None => Err(NoMatch),
        }
    }

    /// Matches `input` from the start, panicking if the grammar does not
    /// apply. For call sites that assert their input is well-formed; use
    /// [`Parser::try_parse`] everywhere else.
    pub fn parse(&self, input: &str) -> T {
        match self.try_parse(input) {
            Ok(value) => value,
            Err(_) => panic!("grammar did not match input {input:?}"),
        }
    }

    /// Applies the grammar repeatedly, each application starting where the
    /// previous one stopped, until it fails to match. The iterator is lazy
    /// and finite; a match that consumes nothing is yielded once and ends the
    /// iteration.
    pub fn parse_repeated<'a>(&self, input: &'a str) -> ParseRepeated<'a, T> {
        ParseRepeated {
            parser: self.clone(),
            remaining: Span::new(input),
            done: false,
        }
    }

    /// Splits `input` into lines, trims each, and yields the values of the
    /// lines the grammar matches; blank and unparseable lines are silently
    /// discarded.
    pub fn parse_valid_lines<'a>(&self, input: &'a str) -> ValidLines<'a, T> {
        ValidLines {
            parser: self.clone(),
            lines: LINE_BREAK.split(input),
        }
    }
}

/// Iterator returned by [`Parser::parse_repeated`].
pub struct ParseRepeated<'a, T: 'static> {
    parser: Parser<T>,
    remaining: Span<'a>,
    done: bool,
}

impl<T: 'static> Iterator for ParseRepeated<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let parsed = match self.parser.parse_partial(self.remaining) {
            Some(parsed) => parsed,
            None => {
                self.done = true;
                return None;
            }
        };
        if parsed.remaining.len() == self.remaining.len() {
            self.done = true;
        }
        self.remaining = parsed.remaining;
        Some(parsed.value)
    }
}

/// Iterator returned by [`Parser::parse_valid_lines`].
pub struct ValidLines<'a, T: 'static> {
    parser: Parser<T>,
    lines: regex::Split<'static, 'a>,
}

impl<T: 'static> Iterator for ValidLines<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for raw in self.lines.by_ref() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Ok(value) = self.parser.try_parse(trimmed) {
                return Some(value);
            }
        }
        None
    }
}
