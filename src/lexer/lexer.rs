use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Anchored token patterns, tried in order.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[ \\t\\r\\n]+", skip_handler),
        RegexPattern::new("^[0-9]+", number_handler),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        RegexPattern::new("^!", MK_DEFAULT_HANDLER!(TokenKind::Bang, "!")),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::LeftParen, "(")),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::RightParen, ")")),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::LeftBracket, "[")),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::RightBracket, "]")),
        RegexPattern::new("^\\?", MK_DEFAULT_HANDLER!(TokenKind::QuestionMark, "?")),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span covering the next `len` bytes.
    pub fn span(&self, len: usize) -> Span {
        Span {
            start: self.position_at(self.pos),
            end: self.position_at(self.pos + len),
        }
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = matched.as_str().to_string();
    let span = lexer.span(value.len());

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, value, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    if let Some(matched) = regex.find(lexer.remainder()) {
        lexer.advance_n(matched.end());
    }
}

/// Turns the next character into an error token and steps over it.
fn error_handler(lexer: &mut Lexer) {
    let Some(ch) = lexer.remainder().chars().next() else {
        return;
    };
    let span = lexer.span(ch.len_utf8());

    trace!(character = %ch, offset = lexer.pos, "unrecognised character");
    lexer.advance_n(ch.len_utf8());
    lexer.push(MK_TOKEN!(TokenKind::Error, ch.to_string(), span));
}

/// Splits `source` into tokens.
///
/// Whitespace is dropped, characters no pattern matches become
/// [`TokenKind::Error`] tokens, and the result always ends with a single
/// [`TokenKind::EndOfInput`] token.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source.to_string(), file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => error_handler(&mut lex),
        }
    }

    let span = lex.span(0);
    lex.push(MK_TOKEN!(TokenKind::EndOfInput, String::from("EOF"), span));
    lex.tokens
}
