//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for single-character tokens

/// Builds a [`Token`](crate::lexer::tokens::Token) from a kind, its text and
/// the span it covers. `Token` must be in scope at the call site.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), lexer.span(2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Handler for a pattern that always matches the fixed text `$value`: pushes
/// one `$kind` token spanning it and moves past it.
///
/// ```ignore
/// RegexPattern::new("^\\?", MK_DEFAULT_HANDLER!(TokenKind::QuestionMark, "?"))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}
