use std::fmt::Display;

use crate::arena::arena::{Allocation, Arena, ArenaError};

/// Size in bytes of one encoded node: a tag word plus two payload words.
pub const NODE_SIZE: usize = 3 * std::mem::size_of::<u64>();

const TAG_NUMBER: u64 = 0;
const TAG_UNARY: u64 = 1;
const TAG_BINARY: u64 = 2;

/// Unary Operator Kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryKind {
    /// Prefix `+`
    Positive,
    /// Prefix `-`
    Negative,
    /// Postfix `!`
    Factorial,
}

impl UnaryKind {
    const ALL: [UnaryKind; 3] = [UnaryKind::Positive, UnaryKind::Negative, UnaryKind::Factorial];

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryKind::Positive => "+",
            UnaryKind::Negative => "-",
            UnaryKind::Factorial => "!",
        }
    }

    fn index(&self) -> u64 {
        *self as u64
    }

    fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl Display for UnaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary Operator Kinds
///
/// `Ternary` joins a condition with a `TernaryBranch`, which in turn holds
/// the then and else expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    Add,
    Sub,
    Mul,
    Div,
    Index,
    Ternary,
    TernaryBranch,
}

impl BinaryKind {
    const ALL: [BinaryKind; 7] = [
        BinaryKind::Add,
        BinaryKind::Sub,
        BinaryKind::Mul,
        BinaryKind::Div,
        BinaryKind::Index,
        BinaryKind::Ternary,
        BinaryKind::TernaryBranch,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryKind::Add => "+",
            BinaryKind::Sub => "-",
            BinaryKind::Mul => "*",
            BinaryKind::Div => "/",
            BinaryKind::Index => "[]",
            BinaryKind::Ternary => "?",
            BinaryKind::TernaryBranch => ":",
        }
    }

    fn index(&self) -> u64 {
        *self as u64
    }

    fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl Display for BinaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Non-owning reference to a node stored in an [`Arena`].
///
/// Only valid while the arena that produced it is alive and has not been
/// reset since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(Allocation);

impl NodeRef {
    pub fn allocation(&self) -> Allocation {
        self.0
    }

    fn pack(&self) -> u64 {
        (u64::from(self.0.region()) << 32) | u64::from(self.0.offset())
    }

    fn unpack(word: u64, generation: u64) -> Self {
        let region = (word >> 32) as u32;
        let offset = (word & u64::from(u32::MAX)) as u32;
        NodeRef(Allocation::from_parts(
            region,
            offset,
            NODE_SIZE as u32,
            generation,
        ))
    }
}

/// Expression tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Number(i64),
    UnaryOp {
        kind: UnaryKind,
        operand: NodeRef,
    },
    BinaryOp {
        kind: BinaryKind,
        left: NodeRef,
        right: NodeRef,
    },
}

impl Node {
    fn children(&self) -> [Option<NodeRef>; 2] {
        match self {
            Node::Number(_) => [None, None],
            Node::UnaryOp { operand, .. } => [Some(*operand), None],
            Node::BinaryOp { left, right, .. } => [Some(*left), Some(*right)],
        }
    }

    /// Word layout: `[tag | kind << 8, payload, payload]`.
    fn encode(&self) -> [u64; 3] {
        match self {
            Node::Number(value) => [TAG_NUMBER, *value as u64, 0],
            Node::UnaryOp { kind, operand } => [TAG_UNARY | (kind.index() << 8), operand.pack(), 0],
            Node::BinaryOp { kind, left, right } => {
                [TAG_BINARY | (kind.index() << 8), left.pack(), right.pack()]
            }
        }
    }

    fn decode(words: &[u64], generation: u64) -> Option<Self> {
        let &[tag, first, second] = words else {
            return None;
        };
        let kind = tag >> 8;

        match tag & 0xff {
            TAG_NUMBER => Some(Node::Number(first as i64)),
            TAG_UNARY => Some(Node::UnaryOp {
                kind: UnaryKind::from_index(kind)?,
                operand: NodeRef::unpack(first, generation),
            }),
            TAG_BINARY => Some(Node::BinaryOp {
                kind: BinaryKind::from_index(kind)?,
                left: NodeRef::unpack(first, generation),
                right: NodeRef::unpack(second, generation),
            }),
            _ => None,
        }
    }
}

impl Arena {
    /// Stores `node` in one fresh allocation of [`NODE_SIZE`] bytes.
    ///
    /// # Panics
    ///
    /// Panics if a child reference is stale.
    pub fn alloc_node(&mut self, node: Node) -> Result<NodeRef, ArenaError> {
        for child in node.children().into_iter().flatten() {
            assert!(
                self.is_live(child.allocation()),
                "node child refers to a stale arena allocation"
            );
        }

        let allocation = self.alloc(NODE_SIZE)?;
        self.words_mut(allocation).copy_from_slice(&node.encode());

        Ok(NodeRef(allocation))
    }

    /// Reads back the node behind `node_ref`.
    ///
    /// # Panics
    ///
    /// Panics if the reference is stale or does not point at a node.
    pub fn node(&self, node_ref: NodeRef) -> Node {
        let allocation = node_ref.allocation();
        match Node::decode(self.words(allocation), allocation.generation()) {
            Some(node) => node,
            None => panic!("arena allocation does not hold an expression node"),
        }
    }
}
