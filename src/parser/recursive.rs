//! Self-referential grammars.
//!
//! An immutable value graph cannot mention a parser before that parser
//! exists, which rules out writing a nested-list grammar directly. The way
//! out is a forward declaration: a placeholder node whose target cell is
//! filled in exactly once, after the real grammar (built in terms of the
//! placeholder) is complete. The cell is never written again; parsing only
//! reads it.

use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use crate::parser::{Parse, Parser};
use crate::span::{PartialParsed, Span};

struct ForwardNode<T: 'static> {
    // Weak, because the finished grammar necessarily points back at this
    // node; a strong reference would leak the whole cycle.
    target: OnceCell<Weak<dyn Parse<Output = T> + Send + Sync>>,
}

impl<T: 'static> Parse for ForwardNode<T> {
    type Output = T;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, T>> {
        let target = match self.target.get().and_then(Weak::upgrade) {
            Some(target) => target,
            None => panic!("recursive grammar used before its definition was completed"),
        };
        target.parse_partial(input)
    }
}

/// Builds a self-referential grammar.
///
/// `build` receives a placeholder standing for the grammar being defined and
/// returns the completed grammar; the placeholder is then pointed at the
/// result. The completed grammar is kept alive by the returned handle, so
/// parsing through a placeholder whose grammar has been dropped (or was
/// never completed) panics; that is a grammar-definition bug, not an input
/// error.
///
/// ```
/// use morsel::{fixed, one_of, recursive, unsigned_integer};
///
/// #[derive(Debug, PartialEq)]
/// enum Value {
///     Number(u32),
///     List(Vec<Value>),
/// }
///
/// let value = recursive(|value| {
///     one_of([
///         unsigned_integer().map(Value::Number),
///         value
///             .delimited_with(&fixed(","))
///             .bracket("[", "]")
///             .map(Value::List),
///     ])
/// });
/// assert_eq!(
///     value.parse("[1,[2,3],[]]"),
///     Value::List(vec![
///         Value::Number(1),
///         Value::List(vec![Value::Number(2), Value::Number(3)]),
///         Value::List(vec![]),
///     ])
/// );
/// ```
pub fn recursive<T: 'static>(build: impl FnOnce(Parser<T>) -> Parser<T>) -> Parser<T> {
    let forward = Arc::new(ForwardNode {
        target: OnceCell::new(),
    });
    let node: Arc<dyn Parse<Output = T> + Send + Sync> = forward.clone();
    let grammar = build(Parser::from_arc(node));
    if forward.target.set(Arc::downgrade(grammar.as_arc())).is_err() {
        panic!("recursive forward cell was filled twice");
    }
    grammar
}
