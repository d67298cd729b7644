/// Categorizes parse errors for programmatic handling.
///
/// The `#[error(...)]` messages are concise. Full human-readable messages
/// are in `JavaParseError::message`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JavaParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// # Example
    /// ```text
    /// import java.util.List
    /// public class Foo {}
    /// ^^^^^^ expected `;`, found `public`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The file ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// The lexer produced an error token (unterminated string, comment or
    /// character literal, or a character that cannot start any token). The
    /// lexer's message and notes are preserved on the parent error.
    #[error("lexer error")]
    LexerError,

    /// A delimiter was opened but the file ended before it was closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: String,
    },

    /// A closing delimiter was found that does not match the most recently
    /// opened one (e.g. `(` closed with `}`).
    #[error("mismatched delimiter")]
    MismatchedDelimiter {
        expected: String,
        found: String,
    },

    /// Nesting exceeded the parser's recursion limit.
    #[error("nesting too deep")]
    NestingTooDeep,

    /// Invalid syntax that doesn't fit other categories. The specific error
    /// is described in `JavaParseError::message`.
    #[error("invalid syntax")]
    InvalidSyntax,
}
