use crate::token::JavaToken;

/// Marker trait for [`JavaToken`] lexers (iterators that generate
/// [`JavaToken`]).
///
/// Implementors define an [`Iterator`] that produces tokens one at a time.
/// All lookahead, buffering, and peeking is handled by `JavaTokenStream`.
///
/// Lexers are responsible for:
/// - Accumulating trivia (whitespace, comments) and attaching it to the
///   next token
/// - Emitting [`JavaTokenKind::Error`](crate::token::JavaTokenKind::Error)
///   for lexer errors (enables error recovery)
/// - Emitting a final token with
///   [`JavaTokenKind::Eof`](crate::token::JavaTokenKind::Eof) carrying any
///   trailing trivia
pub trait JavaTokenSource<'src>: Iterator<Item = JavaToken<'src>> {}

impl<'src, T> JavaTokenSource<'src> for T where T: Iterator<Item = JavaToken<'src>> {}
