//! This module provides the core token types used by the Java lexer and
//! parser.

mod java_token;
mod java_token_kind;
mod java_trivia_token;
mod keyword;

pub use java_token::JavaToken;
pub use java_token::JavaTriviaTokenVec;
pub use java_token_kind::JavaTokenKind;
pub use java_trivia_token::JavaTriviaToken;
pub use keyword::Keyword;

#[cfg(test)]
mod tests;
