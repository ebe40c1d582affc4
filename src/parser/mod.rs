//! Parser module for building expression trees.
//!
//! This module contains the parser that transforms a stream of tokens into
//! arena-allocated expression trees. It uses a Pratt parser with operator
//! precedence expressed as binding powers and handles:
//!
//! - Prefix, infix and postfix operators through one recursive function
//! - Grouping, indexing and the right-associative ternary operator
//! - Semicolon-separated sequences of expressions
//! - Error reporting with the position of the offending token
//!
//! Binding powers come from the tables in [`lookups`]; the algorithm lives
//! in [`expr`] and the top-level loop in [`sequence`].

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod sequence;
