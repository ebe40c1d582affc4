use crate::{
    ast::ast::{BinaryKind, Node, NodeRef, UnaryKind},
    errors::errors::{Error, ErrorImpl},
    lexer::{stream::unexpected_token, tokens::TokenKind},
};

use super::{
    lookups::{infix_binding_power, postfix_binding_power, prefix_binding_power, BindingPower},
    parser::Parser,
};

/// Parses one expression whose operators all bind at least as tightly as
/// `min_bp`.
///
/// A lead term (literal, prefix operator or grouping) is parsed first. The
/// loop then keeps folding postfix and infix operators into the left-hand
/// side until it meets end of input, a token that is no operator here, or
/// an operator whose left power is below `min_bp`. Such tokens are left in
/// the stream for the caller.
pub fn parse_expr(parser: &mut Parser, min_bp: u8) -> Result<NodeRef, Error> {
    parser.descend()?;
    let result = parse_expr_bp(parser, min_bp);
    parser.ascend();

    result
}

fn parse_expr_bp(parser: &mut Parser, min_bp: u8) -> Result<NodeRef, Error> {
    let mut left = parse_lead_expr(parser)?;

    loop {
        let kind = parser.peek_kind();
        if kind == TokenKind::EndOfInput {
            break;
        }

        if let Some(bp) = postfix_binding_power(kind) {
            if bp.left < min_bp {
                break;
            }
            left = parse_postfix_expr(parser, left)?;
            continue;
        }

        match infix_binding_power(kind) {
            Some(bp) if bp.left >= min_bp => {
                left = match kind {
                    TokenKind::QuestionMark => parse_ternary_expr(parser, left, bp)?,
                    _ => parse_binary_expr(parser, left, bp)?,
                };
            }
            _ => break,
        }
    }

    Ok(left)
}

fn parse_lead_expr(parser: &mut Parser) -> Result<NodeRef, Error> {
    match parser.peek_kind() {
        TokenKind::Number => parse_primary_expr(parser),
        TokenKind::Plus | TokenKind::Minus => parse_prefix_expr(parser),
        TokenKind::LeftParen => parse_grouping_expr(parser),
        _ => Err(unexpected_token(
            parser.peek(),
            "literal or prefix operator",
        )),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<NodeRef, Error> {
    let position = parser.get_position();
    let token = parser.expect(TokenKind::Number)?;

    let value = token.value.parse::<i64>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            position,
        )
    })?;

    parser.alloc(Node::Number(value))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<NodeRef, Error> {
    let operator = parser.next();
    let kind = match operator.kind {
        TokenKind::Minus => UnaryKind::Negative,
        _ => UnaryKind::Positive,
    };

    let operand = parse_expr(parser, prefix_binding_power(operator.kind).right)?;

    parser.alloc(Node::UnaryOp { kind, operand })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeRef, Error> {
    parser.expect(TokenKind::LeftParen)?;
    let expr = parse_expr(parser, 0)?;
    parser.expect(TokenKind::RightParen)?;

    Ok(expr)
}

/// `!` wraps the left-hand side in a factorial node, `[` parses an index
/// expression up to the matching `]`.
pub fn parse_postfix_expr(parser: &mut Parser, left: NodeRef) -> Result<NodeRef, Error> {
    let operator = parser.next();

    match operator.kind {
        TokenKind::LeftBracket => {
            let index = parse_expr(parser, 0)?;
            parser.expect(TokenKind::RightBracket)?;

            parser.alloc(Node::BinaryOp {
                kind: BinaryKind::Index,
                left,
                right: index,
            })
        }
        _ => parser.alloc(Node::UnaryOp {
            kind: UnaryKind::Factorial,
            operand: left,
        }),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: NodeRef,
    bp: BindingPower,
) -> Result<NodeRef, Error> {
    let operator = parser.next();
    let kind = match operator.kind {
        TokenKind::Plus => BinaryKind::Add,
        TokenKind::Minus => BinaryKind::Sub,
        TokenKind::Star => BinaryKind::Mul,
        _ => BinaryKind::Div,
    };

    let right = parse_expr(parser, bp.right)?;

    parser.alloc(Node::BinaryOp { kind, left, right })
}

/// `cond ? then : else`, stored as `Ternary(cond, TernaryBranch(then, else))`.
pub fn parse_ternary_expr(
    parser: &mut Parser,
    condition: NodeRef,
    bp: BindingPower,
) -> Result<NodeRef, Error> {
    parser.expect(TokenKind::QuestionMark)?;
    let then_branch = parse_expr(parser, bp.right)?;
    parser.expect(TokenKind::Colon)?;
    let else_branch = parse_expr(parser, bp.right)?;

    let branch = parser.alloc(Node::BinaryOp {
        kind: BinaryKind::TernaryBranch,
        left: then_branch,
        right: else_branch,
    })?;

    parser.alloc(Node::BinaryOp {
        kind: BinaryKind::Ternary,
        left: condition,
        right: branch,
    })
}
