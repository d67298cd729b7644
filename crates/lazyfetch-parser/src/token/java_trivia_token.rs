use crate::JavaSourceSpan;
use std::borrow::Cow;

/// A "trivia token" is a token that doesn't affect parsing but is preserved
/// so the source can be reprinted exactly.
///
/// Trivia is attached to the following token as "preceding trivia". Each
/// variant stores its full source text, delimiters included.
#[derive(Clone, Debug, PartialEq)]
pub enum JavaTriviaToken<'src> {
    /// A run of whitespace (spaces, tabs, line terminators, form feeds).
    Whitespace {
        value: Cow<'src, str>,
        span: JavaSourceSpan,
    },

    /// A `// ...` comment, up to but excluding the line terminator.
    LineComment {
        value: Cow<'src, str>,
        span: JavaSourceSpan,
    },

    /// A `/* ... */` or `/** ... */` comment.
    BlockComment {
        value: Cow<'src, str>,
        span: JavaSourceSpan,
    },
}

impl<'src> JavaTriviaToken<'src> {
    /// Returns the source text of this trivia.
    pub fn text(&self) -> &str {
        match self {
            Self::Whitespace { value, .. }
            | Self::LineComment { value, .. }
            | Self::BlockComment { value, .. } => value,
        }
    }

    pub fn span(&self) -> &JavaSourceSpan {
        match self {
            Self::Whitespace { span, .. }
            | Self::LineComment { span, .. }
            | Self::BlockComment { span, .. } => span,
        }
    }

    /// Returns `true` for comments of either style.
    pub fn is_comment(&self) -> bool {
        !matches!(self, Self::Whitespace { .. })
    }

    pub fn into_owned<'any>(self) -> JavaTriviaToken<'any> {
        match self {
            Self::Whitespace { value, span } => JavaTriviaToken::Whitespace {
                value: Cow::Owned(value.into_owned()),
                span,
            },
            Self::LineComment { value, span } => JavaTriviaToken::LineComment {
                value: Cow::Owned(value.into_owned()),
                span,
            },
            Self::BlockComment { value, span } => JavaTriviaToken::BlockComment {
                value: Cow::Owned(value.into_owned()),
                span,
            },
        }
    }
}
