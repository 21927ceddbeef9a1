//! Morsel - A Zero-Copy Parser-Combinator Library
//!
//! Turns free-form text into typed values through composable, backtracking
//! recursive descent. A grammar is assembled once, as a pure value, and then
//! applied to any number of inputs: parsing threads an immutable [`Span`]
//! through the composed graph, advancing the cursor on every successful step
//! and short-circuiting to `None` on the first mismatch. Failure is routine
//! control flow here, never an exception.
//!
//! ```
//! use morsel::{alphanumeric, fixed, one_of, template, unsigned_integer};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Direction {
//!     Gain,
//!     Lose,
//! }
//!
//! let name = alphanumeric();
//! let direction = one_of([
//!     fixed("gain").to(Direction::Gain),
//!     fixed("lose").to(Direction::Lose),
//! ]);
//! let grammar = template(
//!     "{} would {} {} happiness units by sitting next to {}.",
//!     (name.clone(), direction, unsigned_integer(), name),
//! );
//!
//! let (who, direction, amount, neighbor) =
//!     grammar.parse("Alice would gain 54 happiness units by sitting next to Bob.");
//! assert_eq!(who, "Alice");
//! assert_eq!(direction, Direction::Gain);
//! assert_eq!(amount, 54);
//! assert_eq!(neighbor, "Bob");
//! ```

pub mod error;
pub mod parser;
pub mod span;

pub use error::NoMatch;
pub use parser::{
    alphanumeric, any_whitespace, empty_line, fixed, letter, line, newline, one_of, recursive,
    regex, signed_integer, single_digit, template, unsigned_integer, whitespace, with_regex, Grid,
    Parse, Parser, Slots,
};
pub use span::{PartialParsed, Span};
