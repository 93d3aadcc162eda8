//! Snippet parsing: turns the two raw text inputs into a parseable fragment.
//!
//! The method snippet is wrapped in a synthetic enclosing class so a single
//! free-standing method parses on its own; the companion declarations block
//! parses as a self-contained unit. Both fail fast on invalid input.

pub(crate) mod ast;
mod declarations;
mod lexer;

pub(crate) use declarations::{parse_declarations, parse_method_snippet};
