//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts expression
//! source text into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using anchored regex patterns
//! - Recognition of integer literals, operators and delimiters
//! - Token position tracking for error reporting
//! - Whitespace skipping and error tokens for unknown characters
//!
//! The parser consumes tokens through [`stream::TokenStream`], which offers
//! `peek`, `next` and `expect`.

pub mod lexer;
pub mod stream;
pub mod tokens;

#[cfg(test)]
mod tests;
