//! The single error type of the crate.
//!
//! Grammar mismatch is routine control flow here, not an exception: the
//! composable path reports it as `None` and carries no positions or messages.
//! [`NoMatch`] exists so that the whole-string entry point `try_parse` can
//! return a conventional `Result` that works with `?`.

use thiserror::Error;

/// The input did not match the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input does not match the grammar")]
pub struct NoMatch;
