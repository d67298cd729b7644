//! A lossless Java parsing library for tools that rewrite source files in
//! place.
//!
//! The parser understands the declaration level of the language (package,
//! imports, type declarations, members, modifiers and annotations). Method
//! bodies, initializers and other expressions are kept as delimited token
//! trees, with any annotations inside them still parsed as annotation nodes.
//!
//! Every token carries the whitespace and comments that precede it, so
//! printing an unmodified tree reproduces its input byte-for-byte.

pub mod ast;
mod byte_span;
mod java_error_note;
mod java_parse_error;
mod java_parse_error_kind;
mod java_parser;
mod java_source_span;
mod java_token_stream;
mod parse_result;
mod source_position;
pub mod token;
pub mod token_source;

pub use byte_span::ByteSpan;
pub use java_error_note::JavaErrorNote;
pub use java_error_note::JavaErrorNoteKind;
pub use java_error_note::JavaErrorNotes;
pub use java_parse_error::JavaParseError;
pub use java_parse_error_kind::JavaParseErrorKind;
pub use java_parser::JavaParser;
pub use java_source_span::JavaSourceSpan;
pub use java_token_stream::JavaTokenStream;
pub use parse_result::ParseResult;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;

#[cfg(test)]
mod tests;
