//! Error types and error handling for the parser.
//!
//! This module defines the error types used while tokenizing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for malformed input and allocation failures
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
