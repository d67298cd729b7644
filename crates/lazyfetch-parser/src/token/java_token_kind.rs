use crate::token::Keyword;
use crate::JavaErrorNotes;
use std::borrow::Cow;

/// The kind of a Java token.
///
/// Literal values store only their raw source text.
///
/// # Angle Brackets
///
/// `<` and `>` are always lexed as single-character tokens, so `>>`, `>=`
/// and `>>>=` arrive as sequences of adjacent tokens. This keeps generic
/// type arguments (`Map<String, List<Long>>`) trivially balanced for the
/// declaration-level parser; expressions are never evaluated, only
/// reprinted, so the split is invisible in the output.
///
/// # Lifetime Parameter
///
/// The `'src` lifetime enables zero-copy lexing: values borrow from the
/// source text with `Cow::Borrowed`. Synthesized tokens use `Cow::Owned`.
#[derive(Clone, Debug, PartialEq)]
pub enum JavaTokenKind<'src> {
    // =========================================================================
    // Separators
    // =========================================================================
    /// `@`
    At,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `.`
    Dot,
    /// `::`
    DoubleColon,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `?`
    Question,
    /// `;`
    Semicolon,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    /// Any other operator (`+`, `==`, `->`, `&&`, `*`, ...).
    Operator(Cow<'src, str>),

    // =========================================================================
    // Names
    // =========================================================================
    /// An identifier (including contextual keywords such as `record`).
    Identifier(Cow<'src, str>),

    /// A reserved keyword.
    Keyword(Keyword),

    // =========================================================================
    // Literals (raw source text only)
    // =========================================================================
    /// Raw text of an integer literal (`42`, `0xFF`, `1_000L`).
    IntegerLiteral(Cow<'src, str>),

    /// Raw text of a floating-point literal (`1.5`, `2e10`, `3f`).
    FloatingPointLiteral(Cow<'src, str>),

    /// Raw text of a character literal, including quotes.
    CharacterLiteral(Cow<'src, str>),

    /// Raw text of a string literal, including quotes.
    StringLiteral(Cow<'src, str>),

    /// Raw text of a text block, including the `"""` delimiters.
    TextBlock(Cow<'src, str>),

    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,

    // =========================================================================
    // End of input
    // =========================================================================
    /// End of input. The associated `JavaToken` carries any trailing trivia.
    Eof,

    // =========================================================================
    // Lexer error (allows error recovery)
    // =========================================================================
    /// A lexer error. The raw text is kept so the token still prints.
    Error {
        raw: Cow<'src, str>,
        message: String,
        error_notes: JavaErrorNotes,
    },
}

impl<'src> JavaTokenKind<'src> {
    /// Creates an `Identifier` borrowing from the source.
    pub fn identifier_borrowed(s: &'src str) -> Self {
        Self::Identifier(Cow::Borrowed(s))
    }

    /// Creates an `Identifier` from an owned string.
    pub fn identifier_owned(s: String) -> Self {
        Self::Identifier(Cow::Owned(s))
    }

    /// Creates an `Operator` from an owned string.
    pub fn operator_owned(s: String) -> Self {
        Self::Operator(Cow::Owned(s))
    }

    /// Returns the source text of this token.
    pub fn text(&self) -> &str {
        match self {
            Self::At => "@",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::CurlyBraceClose => "}",
            Self::CurlyBraceOpen => "{",
            Self::Dot => ".",
            Self::DoubleColon => "::",
            Self::Ellipsis => "...",
            Self::Equals => "=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::ParenClose => ")",
            Self::ParenOpen => "(",
            Self::Question => "?",
            Self::Semicolon => ";",
            Self::SquareBracketClose => "]",
            Self::SquareBracketOpen => "[",
            Self::Operator(s)
            | Self::Identifier(s)
            | Self::IntegerLiteral(s)
            | Self::FloatingPointLiteral(s)
            | Self::CharacterLiteral(s)
            | Self::StringLiteral(s)
            | Self::TextBlock(s) => s,
            Self::Keyword(kw) => kw.as_str(),
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Eof => "",
            Self::Error { raw, .. } => raw,
        }
    }

    /// Returns a short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Eof => "end of input".to_string(),
            Self::Error { message, .. } => message.clone(),
            other => other.text().to_string(),
        }
    }

    /// Returns `true` if this is the keyword `kw`.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == kw)
    }

    /// Returns `true` if this token can close a delimited group.
    pub fn is_closing_delimiter(&self) -> bool {
        matches!(
            self,
            Self::ParenClose | Self::CurlyBraceClose | Self::SquareBracketClose
        )
    }

    pub fn into_owned<'any>(self) -> JavaTokenKind<'any> {
        fn own<'any>(s: Cow<'_, str>) -> Cow<'any, str> {
            Cow::Owned(s.into_owned())
        }
        match self {
            Self::At => JavaTokenKind::At,
            Self::Colon => JavaTokenKind::Colon,
            Self::Comma => JavaTokenKind::Comma,
            Self::CurlyBraceClose => JavaTokenKind::CurlyBraceClose,
            Self::CurlyBraceOpen => JavaTokenKind::CurlyBraceOpen,
            Self::Dot => JavaTokenKind::Dot,
            Self::DoubleColon => JavaTokenKind::DoubleColon,
            Self::Ellipsis => JavaTokenKind::Ellipsis,
            Self::Equals => JavaTokenKind::Equals,
            Self::GreaterThan => JavaTokenKind::GreaterThan,
            Self::LessThan => JavaTokenKind::LessThan,
            Self::ParenClose => JavaTokenKind::ParenClose,
            Self::ParenOpen => JavaTokenKind::ParenOpen,
            Self::Question => JavaTokenKind::Question,
            Self::Semicolon => JavaTokenKind::Semicolon,
            Self::SquareBracketClose => JavaTokenKind::SquareBracketClose,
            Self::SquareBracketOpen => JavaTokenKind::SquareBracketOpen,
            Self::Operator(s) => JavaTokenKind::Operator(own(s)),
            Self::Identifier(s) => JavaTokenKind::Identifier(own(s)),
            Self::Keyword(kw) => JavaTokenKind::Keyword(kw),
            Self::IntegerLiteral(s) => JavaTokenKind::IntegerLiteral(own(s)),
            Self::FloatingPointLiteral(s) => JavaTokenKind::FloatingPointLiteral(own(s)),
            Self::CharacterLiteral(s) => JavaTokenKind::CharacterLiteral(own(s)),
            Self::StringLiteral(s) => JavaTokenKind::StringLiteral(own(s)),
            Self::TextBlock(s) => JavaTokenKind::TextBlock(own(s)),
            Self::True => JavaTokenKind::True,
            Self::False => JavaTokenKind::False,
            Self::Null => JavaTokenKind::Null,
            Self::Eof => JavaTokenKind::Eof,
            Self::Error { raw, message, error_notes } => JavaTokenKind::Error {
                raw: own(raw),
                message,
                error_notes,
            },
        }
    }
}
