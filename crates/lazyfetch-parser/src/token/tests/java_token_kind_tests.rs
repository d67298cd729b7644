//! Tests for `JavaTokenKind`.

use crate::token::JavaTokenKind;
use crate::token::Keyword;
use std::borrow::Cow;

#[test]
fn separator_text() {
    assert_eq!(JavaTokenKind::At.text(), "@");
    assert_eq!(JavaTokenKind::DoubleColon.text(), "::");
    assert_eq!(JavaTokenKind::Ellipsis.text(), "...");
    assert_eq!(JavaTokenKind::SquareBracketClose.text(), "]");
}

#[test]
fn value_tokens_print_raw_text() {
    assert_eq!(JavaTokenKind::identifier_borrowed("FetchType").text(), "FetchType");
    assert_eq!(JavaTokenKind::StringLiteral(Cow::Borrowed("\"a\\\"b\"")).text(), "\"a\\\"b\"");
    assert_eq!(JavaTokenKind::Keyword(Keyword::Import).text(), "import");
    assert_eq!(JavaTokenKind::Null.text(), "null");
    assert_eq!(JavaTokenKind::Eof.text(), "");
}

/// Error tokens keep their raw text so the token stream stays lossless,
/// but describe themselves by their message.
#[test]
fn error_token_text_and_description() {
    let kind = JavaTokenKind::Error {
        raw: Cow::Borrowed("\"open"),
        message: "Unterminated string literal".to_string(),
        error_notes: Default::default(),
    };
    assert_eq!(kind.text(), "\"open");
    assert_eq!(kind.describe(), "Unterminated string literal");
}

#[test]
fn closing_delimiters() {
    assert!(JavaTokenKind::ParenClose.is_closing_delimiter());
    assert!(JavaTokenKind::CurlyBraceClose.is_closing_delimiter());
    assert!(JavaTokenKind::SquareBracketClose.is_closing_delimiter());
    assert!(!JavaTokenKind::GreaterThan.is_closing_delimiter());
}

#[test]
fn into_owned_owns_values() {
    let source = String::from("LAZY");
    let kind = JavaTokenKind::identifier_borrowed(&source);
    let owned: JavaTokenKind<'static> = kind.into_owned();
    drop(source);
    assert_eq!(owned.text(), "LAZY");
}
