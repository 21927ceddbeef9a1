//! Zero-copy input windows.
//!
//! A [`Span`] is an immutable `(buffer, cursor, length)` view over a shared
//! `&str`. Advancing produces a new value; the underlying buffer is never
//! copied or mutated. [`PartialParsed`] pairs a parsed value with the span of
//! input left over, which is the unit every parser in this crate returns.

use std::fmt;

/// An immutable window into an input string.
///
/// Offsets are byte offsets and always sit on UTF-8 character boundaries when
/// produced by this library. `Span` is `Copy`, so backtracking is free: a
/// caller that still holds the original span can simply reuse it after a
/// failed alternative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    buffer: &'a str,
    cursor: usize,
    length: usize,
}

impl<'a> Span<'a> {
    /// Creates a span covering all of `input`.
    pub fn new(input: &'a str) -> Self {
        Span {
            buffer: input,
            cursor: 0,
            length: input.len(),
        }
    }

    /// Returns a new span with the cursor moved forward by `count` bytes.
    ///
    /// Advancing past the end of the window is a programming error, not a
    /// recoverable parse failure, and panics.
    pub fn advance(&self, count: usize) -> Self {
        assert!(
            count <= self.length,
            "advanced {} bytes past the end of a {}-byte span",
            count - self.length,
            self.length
        );
        Span {
            buffer: self.buffer,
            cursor: self.cursor + count,
            length: self.length - count,
        }
    }

    /// True iff the remaining input begins with `literal`.
    ///
    /// Returns `false` (not an error) when fewer than `literal.len()` bytes
    /// remain.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.as_str().starts_with(literal)
    }

    /// The remaining input as a string slice, zero-copy.
    pub fn as_str(&self) -> &'a str {
        &self.buffer[self.cursor..self.cursor + self.length]
    }

    /// The character starting at byte offset `offset` from the cursor, if the
    /// offset is in bounds and on a character boundary.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.as_str().get(offset..).and_then(|s| s.chars().next())
    }

    /// Iterates the remaining characters.
    pub fn chars(&self) -> std::str::Chars<'a> {
        self.as_str().chars()
    }

    /// Number of bytes remaining.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully parsed value together with the input left unconsumed.
///
/// `remaining` is always a suffix of the span the producing parser was given:
/// the cursor only ever moves forward within one successful parse step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartialParsed<'a, T> {
    pub value: T,
    pub remaining: Span<'a>,
}

impl<'a, T> PartialParsed<'a, T> {
    pub fn new(value: T, remaining: Span<'a>) -> Self {
        PartialParsed { value, remaining }
    }

    /// Transforms the value, leaving the remainder untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PartialParsed<'a, U> {
        PartialParsed {
            value: f(self.value),
            remaining: self.remaining,
        }
    }

    /// Advances the remainder by `count` bytes, keeping the value.
    pub fn advance(self, count: usize) -> Self {
        PartialParsed {
            value: self.value,
            remaining: self.remaining.advance(count),
        }
    }
}
