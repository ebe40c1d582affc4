//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::arena::arena::ArenaError;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.expr".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "`)`".to_string(),
            found: "EOF".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unexpected_token_tip_mentions_both_sides() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "`;`".to_string(),
            found: ")".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_tip().to_string(), "Expected `;`, found `)`");
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 8 }, position(0));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(
        error.get_tip().to_string(),
        "Expressions may nest at most 8 levels deep"
    );
}

#[test]
fn test_arena_error_converts() {
    let kind: ErrorImpl = ArenaError::AllocationTooLarge {
        size: 24,
        capacity: 16,
    }
    .into();
    let error = Error::new(kind, position(3));

    assert_eq!(error.get_error_name(), "ArenaError");
    assert_eq!(
        error.get_tip().to_string(),
        "Increase the region capacity above 16 bytes"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(5),
    );

    assert_eq!(error.to_string(), "unrecognised token: \"#\" at test.expr:5");
}
