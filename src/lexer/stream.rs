use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::tokens::{Token, TokenKind};

/// Cursor over a tokenized input.
///
/// The underlying vector always ends with an `EndOfInput` token; once the
/// cursor reaches it, `next` keeps returning it without advancing.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EndOfInput) {
            let span = match tokens.last() {
                Some(last) => Span {
                    start: last.span.end.clone(),
                    end: last.span.end.clone(),
                },
                None => Span {
                    start: Position::null(),
                    end: Position::null(),
                },
            };
            tokens.push(Token {
                kind: TokenKind::EndOfInput,
                value: String::from("EOF"),
                span,
            });
        }

        TokenStream { tokens, pos: 0 }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the next token and moves past it.
    pub fn next(&mut self) -> &Token {
        let current = self.pos;
        if current + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Consumes the next token, failing if it is not of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.peek();
        if token.kind != expected_kind {
            return Err(unexpected_token(token, expected_kind.describe()));
        }

        Ok(self.next().clone())
    }

    /// Start of the next token, for diagnostics.
    pub fn get_position(&self) -> Position {
        self.peek().span.start.clone()
    }
}

/// Builds the error for `token` showing up where `expected` was required.
///
/// Error tokens are reported as unrecognised input rather than as a
/// mismatch.
pub fn unexpected_token(token: &Token, expected: &str) -> Error {
    let kind = match token.kind {
        TokenKind::Error => ErrorImpl::UnrecognisedToken {
            token: token.value.clone(),
        },
        _ => ErrorImpl::UnexpectedToken {
            expected: expected.to_string(),
            found: token.value.clone(),
        },
    };

    Error::new(kind, token.span.start.clone())
}
