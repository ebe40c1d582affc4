use tracing::trace;

use crate::{ast::ast::NodeRef, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::parse_expr, parser::Parser};

/// Parses `expr ; expr ; ...` up to end of input.
///
/// Every expression must be followed by a `;`. Stray terminators are
/// skipped, so input made only of `;` and whitespace yields no expressions.
pub fn parse_sequence(parser: &mut Parser) -> Result<Vec<NodeRef>, Error> {
    let mut body = vec![];

    loop {
        while parser.peek_kind() == TokenKind::Semicolon {
            parser.next();
        }

        if parser.peek_kind() == TokenKind::EndOfInput {
            break;
        }

        let expr = parse_expr(parser, 0)?;
        trace!(index = body.len(), "parsed top-level expression");
        body.push(expr);

        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(body)
}
