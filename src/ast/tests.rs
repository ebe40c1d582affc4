//! Unit tests for node storage and printing.

use crate::arena::arena::{Arena, ArenaConfig};

use super::{
    ast::{BinaryKind, Node, UnaryKind, NODE_SIZE},
    printer::to_sexpr,
};

#[test]
fn test_number_node_round_trip() {
    let mut arena = Arena::new().unwrap();

    let node = arena.alloc_node(Node::Number(-42)).unwrap();

    assert_eq!(arena.node(node), Node::Number(-42));
}

#[test]
fn test_binary_node_keeps_children() {
    let mut arena = Arena::new().unwrap();
    let left = arena.alloc_node(Node::Number(1)).unwrap();
    let right = arena.alloc_node(Node::Number(2)).unwrap();

    let sum = arena
        .alloc_node(Node::BinaryOp {
            kind: BinaryKind::Add,
            left,
            right,
        })
        .unwrap();

    match arena.node(sum) {
        Node::BinaryOp { kind, left, right } => {
            assert_eq!(kind, BinaryKind::Add);
            assert_eq!(arena.node(left), Node::Number(1));
            assert_eq!(arena.node(right), Node::Number(2));
        }
        other => panic!("expected binary node, found {:?}", other),
    }
}

#[test]
fn test_every_node_is_one_allocation() {
    let mut arena = Arena::new().unwrap();
    let operand = arena.alloc_node(Node::Number(3)).unwrap();
    arena
        .alloc_node(Node::UnaryOp {
            kind: UnaryKind::Factorial,
            operand,
        })
        .unwrap();

    assert_eq!(arena.used(), 2 * NODE_SIZE);
}

#[test]
fn test_children_survive_region_growth() {
    let mut arena =
        Arena::with_config(ArenaConfig::with_region_capacity(NODE_SIZE * 2)).unwrap();
    let mut root = arena.alloc_node(Node::Number(0)).unwrap();
    for value in 1..10 {
        let right = arena.alloc_node(Node::Number(value)).unwrap();
        root = arena
            .alloc_node(Node::BinaryOp {
                kind: BinaryKind::Add,
                left: root,
                right,
            })
            .unwrap();
    }

    assert!(arena.region_count() > 1);
    assert_eq!(
        to_sexpr(&arena, root),
        "(+ (+ (+ (+ (+ (+ (+ (+ (+ 0 1) 2) 3) 4) 5) 6) 7) 8) 9)"
    );
}

#[test]
fn test_print_ternary_unpacks_branch() {
    let mut arena = Arena::new().unwrap();
    let condition = arena.alloc_node(Node::Number(1)).unwrap();
    let then_branch = arena.alloc_node(Node::Number(2)).unwrap();
    let else_branch = arena.alloc_node(Node::Number(3)).unwrap();
    let branch = arena
        .alloc_node(Node::BinaryOp {
            kind: BinaryKind::TernaryBranch,
            left: then_branch,
            right: else_branch,
        })
        .unwrap();
    let ternary = arena
        .alloc_node(Node::BinaryOp {
            kind: BinaryKind::Ternary,
            left: condition,
            right: branch,
        })
        .unwrap();

    assert_eq!(to_sexpr(&arena, ternary), "(? 1 2 3)");
    assert_eq!(to_sexpr(&arena, branch), "(: 2 3)");
}

#[test]
fn test_print_unary_and_index() {
    let mut arena = Arena::new().unwrap();
    let two = arena.alloc_node(Node::Number(2)).unwrap();
    let negative = arena
        .alloc_node(Node::UnaryOp {
            kind: UnaryKind::Negative,
            operand: two,
        })
        .unwrap();
    let zero = arena.alloc_node(Node::Number(0)).unwrap();
    let index = arena
        .alloc_node(Node::BinaryOp {
            kind: BinaryKind::Index,
            left: negative,
            right: zero,
        })
        .unwrap();

    assert_eq!(to_sexpr(&arena, index), "([] (- 2) 0)");
}

#[test]
fn test_print_deep_chain_without_recursion() {
    let mut arena = Arena::new().unwrap();
    let mut root = arena.alloc_node(Node::Number(1)).unwrap();
    for _ in 0..100_000 {
        root = arena
            .alloc_node(Node::UnaryOp {
                kind: UnaryKind::Negative,
                operand: root,
            })
            .unwrap();
    }

    let printed = to_sexpr(&arena, root);

    let expected = format!("{}1{}", "(- ".repeat(100_000), ")".repeat(100_000));
    assert_eq!(printed, expected);
}

#[test]
#[should_panic(expected = "stale")]
fn test_node_after_reset_panics() {
    let mut arena = Arena::new().unwrap();
    let node = arena.alloc_node(Node::Number(1)).unwrap();
    arena.reset();

    arena.node(node);
}
