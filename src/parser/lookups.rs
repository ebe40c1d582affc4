//! Binding-power tables.
//!
//! Precedence and associativity live here as data. Each tier maps to a pair
//! of powers `(left, right)`: the parser keeps extending the current
//! left-hand side while the next operator's `left` power is at least the
//! floor it was called with, and parses an operator's right operand with
//! `right` as the new floor. `left < right` makes an operator
//! left-associative, `left > right` right-associative.

use crate::lexer::tokens::TokenKind;

/// Precedence tiers, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Precedence {
    Ternary,
    Additive,
    Multiplicative,
    Postfix,
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

impl Precedence {
    const fn level(self) -> u8 {
        2 * self as u8
    }

    pub const fn left_assoc(self) -> BindingPower {
        BindingPower {
            left: self.level(),
            right: self.level() + 1,
        }
    }

    pub const fn right_assoc(self) -> BindingPower {
        BindingPower {
            left: self.level() + 1,
            right: self.level(),
        }
    }

    const fn prefix(self) -> BindingPower {
        BindingPower {
            left: 0,
            right: self.level(),
        }
    }

    const fn postfix(self) -> BindingPower {
        BindingPower {
            left: self.level(),
            right: 0,
        }
    }
}

/// Powers for `kind` in prefix position. Only `right` is meaningful.
///
/// # Panics
///
/// Panics for anything but `+` and `-`; callers dispatch on the token kind
/// before asking.
pub fn prefix_binding_power(kind: TokenKind) -> BindingPower {
    match kind {
        TokenKind::Plus | TokenKind::Minus => Precedence::Prefix.prefix(),
        _ => panic!("{} is not a prefix operator", kind),
    }
}

/// Powers for `kind` in infix position, `None` if it is not an infix
/// operator.
pub fn infix_binding_power(kind: TokenKind) -> Option<BindingPower> {
    match kind {
        TokenKind::QuestionMark => Some(Precedence::Ternary.right_assoc()),
        TokenKind::Plus | TokenKind::Minus => Some(Precedence::Additive.left_assoc()),
        TokenKind::Star | TokenKind::Slash => Some(Precedence::Multiplicative.left_assoc()),
        _ => None,
    }
}

/// Powers for `kind` in postfix position, `None` if it is not a postfix
/// operator. Only `left` is meaningful.
pub fn postfix_binding_power(kind: TokenKind) -> Option<BindingPower> {
    match kind {
        TokenKind::Bang | TokenKind::LeftBracket => Some(Precedence::Postfix.postfix()),
        _ => None,
    }
}
