//! Combinators: building larger grammars out of smaller ones.
//!
//! Each combinator is a node struct holding the handles of its children (plus
//! boxed closures where a user function is involved). Backtracking needs no
//! machinery: a failed child returns `None`, and because [`Span`] is `Copy`
//! the enclosing combinator still holds the position it started from.

use crate::parser::terminal::fixed;
use crate::parser::{Parse, Parser};
use crate::span::{PartialParsed, Span};

struct MapNode<T: 'static, U> {
    inner: Parser<T>,
    map: Box<dyn Fn(T) -> U + Send + Sync>,
}

impl<T: 'static, U> Parse for MapNode<T, U> {
    type Output = U;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, U>> {
        self.inner
            .parse_partial(input)
            .map(|parsed| parsed.map(&self.map))
    }
}

struct BindNode<T: 'static, U: 'static, C> {
    first: Parser<T>,
    next: Box<dyn Fn(&T) -> Parser<U> + Send + Sync>,
    combine: Box<dyn Fn(T, U) -> C + Send + Sync>,
}

impl<T: 'static, U: 'static, C> Parse for BindNode<T, U, C> {
    type Output = C;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, C>> {
        let first = self.first.parse_partial(input)?;
        let second = (self.next)(&first.value).parse_partial(first.remaining)?;
        Some(PartialParsed::new(
            (self.combine)(first.value, second.value),
            second.remaining,
        ))
    }
}

struct OneOfNode<T: 'static> {
    alternatives: Vec<Parser<T>>,
}

impl<T: 'static> Parse for OneOfNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        self.alternatives
            .iter()
            .find_map(|alternative| alternative.parse_partial(input))
    }
}

/// First-match-wins alternation: tries each alternative against the same
/// starting position and returns the first success.
///
/// Argument order is the precedence declaration. When alternatives share a
/// prefix, put the longest or most specific one first; the library does not
/// detect or reorder overlaps.
pub fn one_of<T: 'static>(alternatives: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
    Parser::from_node(OneOfNode {
        alternatives: alternatives.into_iter().collect(),
    })
}

struct RepeatNode<T: 'static> {
    inner: Parser<T>,
}

impl<T: 'static> Parse for RepeatNode<T> {
    type Output = Vec<T>;

    fn parse_partial<'a>(&self, mut input: Span<'a>) -> Option<PartialParsed<'a, Vec<T>>> {
        let mut values = Vec::new();
        while let Some(parsed) = self.inner.parse_partial(input) {
            let stalled = parsed.remaining.len() == input.len();
            input = parsed.remaining;
            values.push(parsed.value);
            if stalled {
                // An element that consumes nothing would match forever.
                break;
            }
        }
        Some(PartialParsed::new(values, input))
    }
}

struct DelimitedNode<T: 'static, S: 'static> {
    value: Parser<T>,
    separator: Parser<S>,
}

impl<T: 'static, S: 'static> Parse for DelimitedNode<T, S> {
    type Output = Vec<T>;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, Vec<T>>> {
        let first = match self.value.parse_partial(input) {
            Some(first) => first,
            None => return Some(PartialParsed::new(Vec::new(), input)),
        };
        let mut values = vec![first.value];
        let mut rest = first.remaining;
        while let Some(separator) = self.separator.parse_partial(rest) {
            // A separator commits us to another value.
            let next = self.value.parse_partial(separator.remaining)?;
            if next.remaining.len() == rest.len() {
                values.push(next.value);
                rest = next.remaining;
                break;
            }
            values.push(next.value);
            rest = next.remaining;
        }
        Some(PartialParsed::new(values, rest))
    }
}

struct TrimmedNode<T: 'static> {
    inner: Parser<T>,
}

impl<T: 'static> Parse for TrimmedNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        let parsed = self.inner.parse_partial(skip_whitespace(input))?;
        Some(PartialParsed::new(
            parsed.value,
            skip_whitespace(parsed.remaining),
        ))
    }
}

fn skip_whitespace(mut span: Span) -> Span {
    while let Some(c) = span.char_at(0) {
        if !c.is_whitespace() {
            break;
        }
        span = span.advance(c.len_utf8());
    }
    span
}

struct ThenFixedNode<T: 'static> {
    inner: Parser<T>,
    suffix: String,
}

impl<T: 'static> Parse for ThenFixedNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        let parsed = self.inner.parse_partial(input)?;
        if parsed.remaining.starts_with(&self.suffix) {
            Some(parsed.advance(self.suffix.len()))
        } else {
            None
        }
    }
}

struct ToNode<T: 'static, U> {
    inner: Parser<T>,
    value: U,
}

impl<T: 'static, U: Clone> Parse for ToNode<T, U> {
    type Output = U;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, U>> {
        let parsed = self.inner.parse_partial(input)?;
        Some(PartialParsed::new(self.value.clone(), parsed.remaining))
    }
}

struct FilterNode<T: 'static> {
    inner: Parser<T>,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: 'static> Parse for FilterNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        self.inner
            .parse_partial(input)
            .filter(|parsed| (self.predicate)(&parsed.value))
    }
}

impl<T: 'static> Parser<T> {
    /// Transforms the parsed value; consumption and failure pass through
    /// untouched.
    pub fn map<U: 'static>(&self, map: impl Fn(T) -> U + Send + Sync + 'static) -> Parser<U> {
        Parser::from_node(MapNode {
            inner: self.clone(),
            map: Box::new(map),
        })
    }

    /// Monadic sequencing: runs this parser, selects the second parser from
    /// its value, runs that against the remainder, and combines both values.
    /// Failure at either step is overall failure.
    pub fn bind<U: 'static, C: 'static>(
        &self,
        next: impl Fn(&T) -> Parser<U> + Send + Sync + 'static,
        combine: impl Fn(T, U) -> C + Send + Sync + 'static,
    ) -> Parser<C> {
        Parser::from_node(BindNode {
            first: self.clone(),
            next: Box::new(next),
            combine: Box::new(combine),
        })
    }

    /// Sequences two parsers, pairing their values.
    pub fn then<U: 'static>(&self, second: &Parser<U>) -> Parser<(T, U)> {
        let second = second.clone();
        self.bind(move |_| second.clone(), |a, b| (a, b))
    }

    /// Sequences two parsers, keeping only the first value.
    pub fn then_ignore<U: 'static>(&self, second: &Parser<U>) -> Parser<T> {
        let second = second.clone();
        self.bind(move |_| second.clone(), |a, _| a)
    }

    /// Two-way alternation; see [`one_of`] for the precedence rule.
    pub fn or(&self, other: &Parser<T>) -> Parser<T> {
        one_of([self.clone(), other.clone()])
    }

    /// Applies this parser zero or more times, collecting the values. Never
    /// fails: the terminating mismatch is swallowed and zero repetitions is
    /// success with an empty vec.
    pub fn repeat(&self) -> Parser<Vec<T>> {
        Parser::from_node(RepeatNode {
            inner: self.clone(),
        })
    }

    /// A separator-delimited list. Zero values is success with an empty vec,
    /// but once a separator matches, a following value is required: a
    /// trailing separator fails the whole list.
    pub fn delimited_with<S: 'static>(&self, separator: &Parser<S>) -> Parser<Vec<T>> {
        Parser::from_node(DelimitedNode {
            value: self.clone(),
            separator: separator.clone(),
        })
    }

    /// Consumes whitespace around the inner match, character by character.
    pub fn trimmed(&self) -> Parser<T> {
        Parser::from_node(TrimmedNode {
            inner: self.clone(),
        })
    }

    /// Requires `suffix` to immediately follow the inner match; the suffix is
    /// consumed but only the inner value is kept.
    pub fn then_fixed(&self, suffix: impl Into<String>) -> Parser<T> {
        Parser::from_node(ThenFixedNode {
            inner: self.clone(),
            suffix: suffix.into(),
        })
    }

    /// Wraps the inner parser in literal delimiters, yielding only the inner
    /// value.
    pub fn bracket(&self, open: impl Into<String>, close: impl Into<String>) -> Parser<T> {
        let inner = self.then_fixed(close);
        fixed(open).bind(move |_| inner.clone(), |_, value| value)
    }

    /// Replaces the success value with a constant, keeping the inner
    /// parser's consumption and failure behavior.
    pub fn to<U>(&self, value: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        Parser::from_node(ToNode {
            inner: self.clone(),
            value,
        })
    }

    /// Succeeds only when the inner parser succeeds and its value satisfies
    /// `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Parser<T> {
        Parser::from_node(FilterNode {
            inner: self.clone(),
            predicate: Box::new(predicate),
        })
    }
}
