//! Tests for `ParseResult` state and conversions.

use crate::JavaParseError;
use crate::JavaParseErrorKind;
use crate::JavaSourceSpan;
use crate::ParseResult;

fn test_error(message: &str) -> JavaParseError {
    JavaParseError::new(message, JavaSourceSpan::default(), JavaParseErrorKind::InvalidSyntax)
}

#[test]
fn ok_result() {
    let result = ParseResult::ok(7);
    assert!(result.is_ok());
    assert!(!result.has_errors());
    assert_eq!(result.valid_ast(), Some(&7));
    assert_eq!(result.into_result().unwrap(), 7);
}

/// A recovered AST is available through `ast()` but not `valid_ast()`.
#[test]
fn recovered_result() {
    let result = ParseResult::recovered(7, vec![test_error("bad member")]);
    assert!(!result.is_ok());
    assert!(result.has_errors());
    assert_eq!(result.valid_ast(), None);
    assert_eq!(result.ast(), Some(&7));
    assert_eq!(result.into_ast(), Some(7));
}

#[test]
fn failed_result() {
    let result: ParseResult<i32> = ParseResult::err(vec![test_error("bad")]);
    assert!(result.ast().is_none());
    let errors = result.into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn format_errors_joins_detailed_messages() {
    let result: ParseResult<()> = ParseResult::err(vec![test_error("first"), test_error("second")]);
    let formatted = result.format_errors(None);
    assert!(formatted.contains("error: first\n"));
    assert!(formatted.contains("error: second\n"));
}
