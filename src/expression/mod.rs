//! Coordinate expression language.
//!
//! Deliberately small: numbers, symbols (`name` or `name.member`), `+ - * /`, unary
//! minus, parentheses and a fixed set of built-in functions. Every expression has a
//! canonical text form (its `Display` output) which parses back to the same tree.

pub(crate) mod ast;
pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
