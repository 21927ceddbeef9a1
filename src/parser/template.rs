//! Format-string grammar construction.
//!
//! [`template`] is the quickest way to express a line grammar: a pattern
//! alternates literal text with `{}` placeholders, and a tuple of sub-parsers
//! fills the placeholders in source order. The parsed value is the tuple of
//! the sub-parser values, typed positionally.
//!
//! ```
//! use morsel::{alphanumeric, template, unsigned_integer};
//!
//! let grammar = template(
//!     "{}-{}",
//!     (unsigned_integer(), unsigned_integer()),
//! );
//! assert_eq!(grammar.parse("2-4"), (2, 4));
//!
//! let assignment = template("{} = {}", (alphanumeric(), unsigned_integer()));
//! assert_eq!(assignment.parse("x1 = 17"), ("x1".to_string(), 17));
//! ```
//!
//! Pattern errors (an unmatched brace, content inside a placeholder, or a
//! placeholder count different from the tuple arity) are bugs in the grammar
//! definition and panic at construction time. `{{` and `}}` escape literal
//! braces.

use crate::parser::{Parse, Parser};
use crate::span::{PartialParsed, Span};

/// A tuple of sub-parsers filling a template's placeholders, in order.
///
/// Implemented for parser tuples of arity 0 through 7; the parsed value is
/// the tuple of the element values. This trait is sealed.
pub trait Slots: sealed::Sealed {
    type Output;

    /// Number of placeholders this tuple fills.
    const ARITY: usize;

    #[doc(hidden)]
    fn parse_slots<'a>(
        &self,
        fragments: &[String],
        input: Span<'a>,
    ) -> Option<PartialParsed<'a, Self::Output>>;
}

mod sealed {
    pub trait Sealed {}
}

fn take_fragment<'a>(fragment: &str, input: Span<'a>) -> Option<Span<'a>> {
    if input.starts_with(fragment) {
        Some(input.advance(fragment.len()))
    } else {
        None
    }
}

macro_rules! impl_slots {
    ($arity:expr; $( $idx:tt : $p:ident $t:ident ),*) => {
        impl<$($t: 'static),*> sealed::Sealed for ($(Parser<$t>,)*) {}

        impl<$($t: 'static),*> Slots for ($(Parser<$t>,)*) {
            type Output = ($($t,)*);
            const ARITY: usize = $arity;

            #[allow(unused_mut)]
            fn parse_slots<'a>(
                &self,
                fragments: &[String],
                input: Span<'a>,
            ) -> Option<PartialParsed<'a, Self::Output>> {
                let mut rest = take_fragment(&fragments[0], input)?;
                $(
                    let $p = self.$idx.parse_partial(rest)?;
                    rest = take_fragment(&fragments[$idx + 1], $p.remaining)?;
                )*
                Some(PartialParsed::new(($($p.value,)*), rest))
            }
        }
    };
}

impl_slots!(0; );
impl_slots!(1; 0: p0 T0);
impl_slots!(2; 0: p0 T0, 1: p1 T1);
impl_slots!(3; 0: p0 T0, 1: p1 T1, 2: p2 T2);
impl_slots!(4; 0: p0 T0, 1: p1 T1, 2: p2 T2, 3: p3 T3);
impl_slots!(5; 0: p0 T0, 1: p1 T1, 2: p2 T2, 3: p3 T3, 4: p4 T4);
impl_slots!(6; 0: p0 T0, 1: p1 T1, 2: p2 T2, 3: p3 T3, 4: p4 T4, 5: p5 T5);
impl_slots!(7; 0: p0 T0, 1: p1 T1, 2: p2 T2, 3: p3 T3, 4: p4 T4, 5: p5 T5, 6: p6 T6);

struct TemplateNode<S> {
    // Always one more fragment than there are slots; fragments and slots
    // alternate, starting and ending with a fragment (possibly empty).
    fragments: Vec<String>,
    slots: S,
}

impl<S: Slots> Parse for TemplateNode<S> {
    type Output = S::Output;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, S::Output>> {
        self.slots.parse_slots(&self.fragments, input)
    }
}

/// Splits a template pattern into its literal fragments, one per placeholder
/// boundary. Panics on malformed patterns.
fn split_pattern(pattern: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                current.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                current.push('}');
            }
            '{' => match chars.next() {
                Some('}') => fragments.push(std::mem::take(&mut current)),
                _ => panic!(
                    "malformed template pattern {pattern:?}: placeholders must be empty `{{}}`"
                ),
            },
            '}' => panic!("malformed template pattern {pattern:?}: unmatched `}}`"),
            _ => current.push(c),
        }
    }
    fragments.push(current);
    fragments
}

/// Compiles a `{}`-placeholder pattern and a tuple of sub-parsers into one
/// grammar.
///
/// At parse time each literal fragment must match exactly and each sub-parser
/// runs in turn, the input threading forward through the whole sequence; the
/// value is the tuple of the sub-parser values. A pattern whose placeholder
/// count differs from the tuple arity panics at construction time.
pub fn template<S>(pattern: &str, slots: S) -> Parser<S::Output>
where
    S: Slots + Send + Sync + 'static,
    S::Output: 'static,
{
    let fragments = split_pattern(pattern);
    let placeholders = fragments.len() - 1;
    if placeholders != S::ARITY {
        panic!(
            "template pattern {pattern:?} has {placeholders} placeholders but {} sub-parsers were supplied",
            S::ARITY
        );
    }
    Parser::from_node(TemplateNode { fragments, slots })
}
