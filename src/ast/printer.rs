//! S-expression rendering.
//!
//! `1 + 2 * 3` prints as `(+ 1 (* 2 3))`, `-1` as `(- 1)`, `a[i]` as
//! `([] a i)` and `c ? t : e` as `(? c t e)`. Rendering walks the tree with
//! an explicit stack, so arbitrarily long operator chains print without
//! recursion.

use std::fmt::{self, Display};

use crate::arena::arena::Arena;

use super::ast::{BinaryKind, Node, NodeRef};

enum Step {
    Visit(NodeRef),
    Text(&'static str),
}

/// Display adapter pairing a tree root with the arena that stores it.
pub struct SExpr<'a> {
    arena: &'a Arena,
    root: NodeRef,
}

impl<'a> SExpr<'a> {
    pub fn new(arena: &'a Arena, root: NodeRef) -> Self {
        SExpr { arena, root }
    }
}

impl Display for SExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Step::Visit(self.root)];

        while let Some(step) = stack.pop() {
            let node_ref = match step {
                Step::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Step::Visit(node_ref) => node_ref,
            };

            match self.arena.node(node_ref) {
                Node::Number(value) => write!(f, "{}", value)?,
                Node::UnaryOp { kind, operand } => {
                    write!(f, "({} ", kind)?;
                    stack.push(Step::Text(")"));
                    stack.push(Step::Visit(operand));
                }
                Node::BinaryOp {
                    kind: BinaryKind::Ternary,
                    left,
                    right,
                } => {
                    f.write_str("(? ")?;
                    stack.push(Step::Text(")"));
                    match self.arena.node(right) {
                        Node::BinaryOp {
                            kind: BinaryKind::TernaryBranch,
                            left: then_branch,
                            right: else_branch,
                        } => {
                            stack.push(Step::Visit(else_branch));
                            stack.push(Step::Text(" "));
                            stack.push(Step::Visit(then_branch));
                        }
                        _ => stack.push(Step::Visit(right)),
                    }
                    stack.push(Step::Text(" "));
                    stack.push(Step::Visit(left));
                }
                Node::BinaryOp { kind, left, right } => {
                    write!(f, "({} ", kind)?;
                    stack.push(Step::Text(")"));
                    stack.push(Step::Visit(right));
                    stack.push(Step::Text(" "));
                    stack.push(Step::Visit(left));
                }
            }
        }

        Ok(())
    }
}

/// Renders the tree rooted at `root` as an S-expression.
pub fn to_sexpr(arena: &Arena, root: NodeRef) -> String {
    SExpr::new(arena, root).to_string()
}
