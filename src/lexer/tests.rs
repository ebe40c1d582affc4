//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Integer literals
//! - Operators and delimiters
//! - Whitespace handling and positions
//! - Error tokens
//! - The token stream cursor

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::tokenize,
    stream::TokenStream,
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.expr".to_string()))
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 1234567", Some("test.expr".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "1234567");
    assert_eq!(tokens[3].kind, TokenKind::EndOfInput);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / !"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Bang,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] ? : ;"),
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::QuestionMark,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_tokenize_without_whitespace() {
    assert_eq!(
        kinds("-1+2*(3)!"),
        vec![
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::LeftParen,
            TokenKind::Number,
            TokenKind::RightParen,
            TokenKind::Bang,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_tokenize_skips_newlines_and_tabs() {
    assert_eq!(
        kinds("1\n\t+\r\n2"),
        vec![
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::EndOfInput
        ]
    );
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EndOfInput]);
    assert_eq!(kinds("   \n "), vec![TokenKind::EndOfInput]);
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("12 + 3", Some("test.expr".to_string()));

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[2].span.start.0, 5);
    assert_eq!(tokens[3].span.start.0, 6);
    assert_eq!(*tokens[0].span.start.1, "test.expr");
}

#[test]
fn test_tokenize_unrecognised_character() {
    let tokens = tokenize("1 @ 2", None);

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(*tokens[1].span.start.1, "shell");
}

#[test]
fn test_tokenize_multibyte_error_character() {
    let tokens = tokenize("1 é", None);

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "é");
    assert_eq!(tokens[2].kind, TokenKind::EndOfInput);
}

#[test]
fn test_stream_peek_is_idempotent() {
    let stream = TokenStream::new(tokenize("1 + 2", None));

    assert_eq!(stream.peek().kind, TokenKind::Number);
    assert_eq!(stream.peek().kind, TokenKind::Number);
}

#[test]
fn test_stream_next_stops_at_end_of_input() {
    let mut stream = TokenStream::new(tokenize("7", None));

    assert_eq!(stream.next().kind, TokenKind::Number);
    assert_eq!(stream.next().kind, TokenKind::EndOfInput);
    assert_eq!(stream.next().kind, TokenKind::EndOfInput);
    assert_eq!(stream.peek().kind, TokenKind::EndOfInput);
}

#[test]
fn test_stream_expect_mismatch() {
    let mut stream = TokenStream::new(tokenize("1", None));

    let error = stream.expect(TokenKind::RightParen).unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: "`)`".to_string(),
            found: "1".to_string(),
        }
    );
    assert_eq!(stream.peek().kind, TokenKind::Number);
}

#[test]
fn test_stream_expect_on_error_token() {
    let mut stream = TokenStream::new(tokenize("#", None));

    let error = stream.expect(TokenKind::Number).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_stream_appends_missing_end_of_input() {
    let mut stream = TokenStream::new(vec![]);

    assert!(stream.expect(TokenKind::EndOfInput).is_ok());
}
