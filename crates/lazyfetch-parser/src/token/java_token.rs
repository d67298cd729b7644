use crate::token::JavaTokenKind;
use crate::token::JavaTriviaToken;
use crate::JavaSourceSpan;
use smallvec::SmallVec;

/// Type alias for trivia storage. Uses SmallVec to avoid heap allocation
/// for the common case of 0-2 trivia items per token.
pub type JavaTriviaTokenVec<'src> = SmallVec<[JavaTriviaToken<'src>; 2]>;

/// A Java token with location (span) information and an ordered list of any
/// preceding trivia (whitespace and comments).
///
/// Trivia is attached to the *following* token, so parsers can simply
/// call `peek()` and `consume()` without worrying about skipping trivia,
/// and printers can reproduce the input by emitting each token's trivia
/// followed by its text.
#[derive(Clone, Debug, PartialEq)]
pub struct JavaToken<'src> {
    pub kind: JavaTokenKind<'src>,
    pub preceding_trivia: JavaTriviaTokenVec<'src>,
    pub span: JavaSourceSpan,
}

impl<'src> JavaToken<'src> {
    /// Convenience constructor for a token with no preceding trivia.
    pub fn new(kind: JavaTokenKind<'src>, span: JavaSourceSpan) -> Self {
        Self {
            kind,
            preceding_trivia: SmallVec::new(),
            span,
        }
    }

    /// Creates a token that was never lexed from a file (default span),
    /// preceded by the given whitespace (which may be empty).
    pub fn synthetic(kind: JavaTokenKind<'src>, leading_whitespace: &str) -> Self {
        let mut token = Self::new(kind, JavaSourceSpan::default());
        if !leading_whitespace.is_empty() {
            token.preceding_trivia.push(JavaTriviaToken::Whitespace {
                value: leading_whitespace.to_string().into(),
                span: JavaSourceSpan::default(),
            });
        }
        token
    }

    /// Returns the source text of the token itself (without trivia).
    pub fn text(&self) -> &str {
        self.kind.text()
    }

    /// Appends this token's trivia and text to `sink`.
    pub fn append_source(&self, sink: &mut String) {
        for trivia in &self.preceding_trivia {
            sink.push_str(trivia.text());
        }
        sink.push_str(self.text());
    }

    /// Returns the concatenated text of this token's preceding trivia.
    pub fn leading_trivia_text(&self) -> String {
        self.preceding_trivia.iter().map(|t| t.text()).collect()
    }

    /// Returns `true` if this token is the identifier `name`.
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(&self.kind, JavaTokenKind::Identifier(n) if n == name)
    }

    /// Detaches this token's values from the source text.
    pub fn into_owned<'any>(self) -> JavaToken<'any> {
        JavaToken {
            kind: self.kind.into_owned(),
            preceding_trivia: self
                .preceding_trivia
                .into_iter()
                .map(JavaTriviaToken::into_owned)
                .collect(),
            span: self.span,
        }
    }
}
