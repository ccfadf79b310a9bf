//! A tree-walking interpreter for the Latch language.
//!
//! Latch is a small, dynamically typed expression language with 64-bit
//! integers, booleans, strings, arrays, hash tables, and first-class
//! functions that close over their defining scope. Source text flows through
//! three stages:
//!
//! ```text
//! source text -> Lexer -> tokens -> Parser -> AST -> eval -> Value
//! ```
//!
//! # Examples
//!
//! See [`crate::interpreter::Interpreter`].
//!
//! # Limitations
//!
//! - No floating-point numbers; arithmetic is 64-bit integer only.
//! - String literals carry no escape sequences; the text between the quotes
//!   is taken verbatim.
//! - Identifiers are ASCII (letters, digits, `_`, `$`).

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]

pub mod interpreter;

pub mod ast;
pub mod builtins;
pub mod env;
pub mod eval;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;
