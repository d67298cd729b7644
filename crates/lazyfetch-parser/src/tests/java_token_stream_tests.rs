//! Tests for `JavaTokenStream`.

use crate::tests::utils::mock_identifier;
use crate::tests::utils::mock_token;
use crate::tests::utils::MockTokenSource;
use crate::token::JavaTokenKind;
use crate::JavaTokenStream;

fn stream_of(names: &[&str]) -> JavaTokenStream<'static, MockTokenSource> {
    let mut tokens: Vec<_> = names.iter().map(|name| mock_identifier(name)).collect();
    tokens.push(mock_token(JavaTokenKind::Eof));
    JavaTokenStream::new(MockTokenSource::new(tokens))
}

#[test]
fn peek_does_not_consume() {
    let mut stream = stream_of(&["Order", "order"]);
    let first = stream.peek().map(|t| t.kind.clone());
    let second = stream.peek().map(|t| t.kind.clone());
    assert_eq!(first, second);
    assert_eq!(stream.consume().map(|t| t.kind), first);
}

#[test]
fn consume_advances() {
    let mut stream = stream_of(&["Order", "order"]);
    assert!(stream.consume().unwrap().is_identifier("Order"));
    assert!(stream.consume().unwrap().is_identifier("order"));
    assert!(stream.is_at_end());
}

#[test]
fn peek_nth_fills_buffer() {
    let mut stream = stream_of(&["a", "b", "c"]);
    assert!(stream.peek_nth(2).unwrap().is_identifier("c"));
    assert_eq!(stream.current_buffer_len(), 3);
    assert!(stream.peek_nth(1).unwrap().is_identifier("b"));
    assert!(matches!(stream.peek_kind_nth(3), Some(JavaTokenKind::Eof)));
    assert!(stream.peek_nth(4).is_none());
}

#[test]
fn exhausted_stream() {
    let mut stream = stream_of(&[]);
    assert!(stream.is_at_end());
    assert!(stream.consume().is_some());
    assert!(stream.consume().is_none());
    assert!(stream.is_at_end());
}
