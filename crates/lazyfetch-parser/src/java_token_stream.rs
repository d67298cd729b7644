//! Buffered lookahead over any [`JavaTokenSource`].

use std::collections::VecDeque;

use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::token_source::JavaTokenSource;

/// Streaming view over a [`JavaTokenSource`] with a bounded lookahead
/// buffer.
///
/// Since trivia is already attached to tokens by the lexer, the parser can
/// simply call `peek()` and `consume()` without worrying about trivia.
///
/// Tokens are stored in a [`VecDeque`]: unconsumed tokens are buffered at the
/// back and `consume()` pops from the front.
pub struct JavaTokenStream<'src, TTokenSource: JavaTokenSource<'src>> {
    token_source: TTokenSource,
    buffer: VecDeque<JavaToken<'src>>,
}

impl<'src, TTokenSource: JavaTokenSource<'src>> JavaTokenStream<'src, TTokenSource> {
    /// Advance to the next token and return it as an owned value.
    ///
    /// Returns `None` if the stream is exhausted.
    pub fn consume(&mut self) -> Option<JavaToken<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.pop_front()
    }

    /// Returns the number of tokens currently buffered (unconsumed).
    pub fn current_buffer_len(&self) -> usize {
        self.buffer.len()
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            if let Some(token) = self.token_source.next() {
                self.buffer.push_back(token);
            } else {
                break;
            }
        }
    }

    /// Returns `true` if there are no more tokens, or the next token is
    /// `Eof`.
    pub fn is_at_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, JavaTokenKind::Eof),
        }
    }

    /// Creates a new token stream from a token source.
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
        }
    }

    /// Peek at the next token without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<&JavaToken<'src>> {
        self.peek_nth(0)
    }

    /// Peek at the nth token ahead (0-indexed from the next unconsumed
    /// token). Returns `None` if the stream ends before position `n`.
    pub fn peek_nth(&mut self, n: usize) -> Option<&JavaToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }

    /// Returns the kind of the nth token ahead, if any.
    pub fn peek_kind_nth(&mut self, n: usize) -> Option<&JavaTokenKind<'src>> {
        self.peek_nth(n).map(|t| &t.kind)
    }
}
