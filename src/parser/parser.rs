//! Parser session state and entry point.
//!
//! A [`Parser`] couples the token cursor with the arena every node is
//! allocated from. The expression and sequence parsers are free functions
//! over `&mut Parser`.

use tracing::{debug, debug_span};

use crate::{
    arena::arena::Arena,
    ast::ast::{Node, NodeRef},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        stream::TokenStream,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::sequence::parse_sequence;

/// Default nesting limit for recursive expression parsing.
///
/// Right-nested ternaries count one level per arm, so
/// `1 ? 2 : 1 ? 2 : ...` with more than this many arms is rejected under
/// the default config even though it holds no parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Highest nesting limit a config can ask for. Deeper recursion would risk
/// overflowing the main thread's stack.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed chain of nested `parse_expr` calls (operands of
    /// prefix and infix operators, groupings, index and ternary branches).
    /// The parser clamps it to `1..=MAX_DEPTH_LIMIT`.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Builds a config whose limit is clamped to `1..=MAX_DEPTH_LIMIT`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        ParserConfig {
            max_depth: max_depth.clamp(1, MAX_DEPTH_LIMIT),
        }
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Token cursor
    stream: TokenStream,
    /// Arena that owns every node produced during this session
    arena: &'a mut Arena,
    config: ParserConfig,
    /// Current nesting of `parse_expr` calls
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, arena: &'a mut Arena, config: ParserConfig) -> Self {
        Parser {
            stream: TokenStream::new(tokens),
            arena,
            config: ParserConfig::with_max_depth(config.max_depth),
            depth: 0,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        self.stream.peek()
    }

    /// Returns the kind of the next token.
    pub fn peek_kind(&self) -> TokenKind {
        self.stream.peek().kind
    }

    /// Consumes the next token and returns it.
    pub fn next(&mut self) -> Token {
        self.stream.next().clone()
    }

    /// Consumes a token of `expected_kind` or fails without consuming.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.stream.expect(expected_kind)
    }

    /// Returns the position of the next token.
    pub fn get_position(&self) -> Position {
        self.stream.get_position()
    }

    /// Stores `node` in the session arena.
    pub fn alloc(&mut self, node: Node) -> Result<NodeRef, Error> {
        self.arena
            .alloc_node(node)
            .map_err(|error| Error::new(ErrorImpl::Arena(error), self.stream.get_position()))
    }

    /// Records one more level of expression nesting.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.config.max_depth,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Parses a token stream into a sequence of expression trees.
///
/// This is the main entry point for parsing. Every node is allocated in
/// `arena`; the returned references stay valid until the arena is reset or
/// dropped. The first malformed construct aborts the whole parse.
pub fn parse(
    tokens: Vec<Token>,
    arena: &mut Arena,
    config: ParserConfig,
) -> Result<Vec<NodeRef>, Error> {
    let span = debug_span!("parse", tokens = tokens.len());
    let _guard = span.enter();

    let mut parser = Parser::new(tokens, arena, config);
    let result = parse_sequence(&mut parser);

    match &result {
        Ok(body) => debug!(expressions = body.len(), "parse finished"),
        Err(error) => debug!(%error, "parse failed"),
    }

    result
}
