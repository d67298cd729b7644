//! Token source trait and implementations.

mod java_token_source;
mod str_to_java_token_source;

pub use java_token_source::JavaTokenSource;
pub use str_to_java_token_source::StrJavaTokenSource;
