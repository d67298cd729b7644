//! A [`JavaTokenSource`](crate::token_source::JavaTokenSource) that lexes
//! from a `&str` input.
//!
//! # Features
//!
//! - **Zero-copy lexing**: token values and trivia borrow from the source
//!   text
//! - **Lossless**: every byte of the input ends up either in a token or in
//!   the trivia attached to the following token (trailing trivia goes on
//!   the `Eof` token)
//! - **Dual column tracking**: reports both UTF-8 character positions (for
//!   display) and UTF-16 code unit positions (for LSP compatibility)
//! - **Error recovery**: malformed input emits `Error` tokens that still
//!   carry their raw text, allowing the lexer to continue
//!
//! # Usage
//!
//! ```rust
//! use lazyfetch_parser::token_source::StrJavaTokenSource;
//!
//! let lexer = StrJavaTokenSource::new("@ManyToOne Order order;");
//! let texts: Vec<String> = lexer.map(|t| t.text().to_string()).collect();
//! assert_eq!(texts, vec!["@", "ManyToOne", "Order", "order", ";", ""]);
//! ```

use crate::smallvec;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::token::JavaTriviaToken;
use crate::token::JavaTriviaTokenVec;
use crate::token::Keyword;
use crate::JavaErrorNote;
use crate::JavaSourceSpan;
use crate::SourcePosition;
use std::borrow::Cow;
use std::path::Path;

/// Operators that are not also structural separators, longest first.
const OPERATORS: [&str; 24] = [
    "->", "++", "--", "&&", "||", "!=", "+=", "-=", "*=", "/=", "&=", "|=",
    "^=", "%=", "+", "-", "*", "/", "&", "|", "^", "%", "!", "~",
];

/// A [`JavaTokenSource`](crate::token_source::JavaTokenSource) that lexes
/// from a `&str` input.
///
/// See module documentation for details.
pub struct StrJavaTokenSource<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current UTF-8 character column (0-based).
    curr_col_utf8: usize,

    /// Current UTF-16 code unit column (0-based).
    curr_col_utf16: usize,

    /// Whether the previous character was `\r`, so that `\r\n` counts as a
    /// single line terminator.
    last_char_was_cr: bool,

    /// Trivia (whitespace, comments) accumulated before the next token.
    pending_trivia: JavaTriviaTokenVec<'src>,

    /// Whether the EOF token has been emitted.
    finished: bool,

    /// Optional file path, included in every span for error reporting.
    file_path: Option<&'src Path>,
}

impl<'src> StrJavaTokenSource<'src> {
    /// Creates a new token source from a string slice.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col_utf8: 0,
            curr_col_utf16: 0,
            last_char_was_cr: false,
            pending_trivia: smallvec![],
            finished: false,
            file_path: None,
        }
    }

    /// Creates a new token source with an associated file path.
    pub fn with_file_path(source: &'src str, path: &'src Path) -> Self {
        Self {
            file_path: Some(path),
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col_utf8,
            Some(self.curr_col_utf16),
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.peek_char_nth(0)
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character and updates position tracking.
    ///
    /// `\n`, `\r` and `\r\n` each count as one line terminator.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col_utf8 = 0;
                self.curr_col_utf16 = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col_utf8 = 0;
            self.curr_col_utf16 = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col_utf8 += 1;
            self.curr_col_utf16 += ch.len_utf16();
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    /// Consumes characters until the byte offset reaches `end`.
    fn advance_to(&mut self, end: usize) {
        while self.curr_byte_offset < end {
            if self.consume().is_none() {
                break;
            }
        }
    }

    fn make_span(&self, start: SourcePosition) -> JavaSourceSpan {
        let end = self.curr_position();
        if let Some(path) = self.file_path {
            JavaSourceSpan::with_file(start, end, path.to_path_buf())
        } else {
            JavaSourceSpan::new(start, end)
        }
    }

    /// Returns the source text from `start` to the current position.
    fn slice_from(&self, start: &SourcePosition) -> &'src str {
        &self.source[start.byte_offset()..self.curr_byte_offset]
    }

    // =========================================================================
    // Token creation helpers
    // =========================================================================

    /// Creates a token with the accumulated trivia.
    fn make_token(
        &mut self,
        kind: JavaTokenKind<'src>,
        span: JavaSourceSpan,
    ) -> JavaToken<'src> {
        JavaToken {
            kind,
            preceding_trivia: std::mem::take(&mut self.pending_trivia),
            span,
        }
    }

    /// Consumes `char_count` characters and emits a token of `kind`.
    fn lex_fixed(
        &mut self,
        start: SourcePosition,
        char_count: usize,
        kind: JavaTokenKind<'src>,
    ) -> JavaToken<'src> {
        for _ in 0..char_count {
            self.consume();
        }
        let span = self.make_span(start);
        self.make_token(kind, span)
    }

    fn make_error_token(
        &mut self,
        start: SourcePosition,
        message: impl Into<String>,
        error_notes: crate::JavaErrorNotes,
    ) -> JavaToken<'src> {
        let raw = self.slice_from(&start);
        let span = self.make_span(start);
        let kind = JavaTokenKind::Error {
            raw: Cow::Borrowed(raw),
            message: message.into(),
            error_notes,
        };
        self.make_token(kind, span)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    /// Advances to the next token, collecting whitespace and comments as
    /// trivia along the way.
    fn next_token(&mut self) -> JavaToken<'src> {
        loop {
            let start = self.curr_position();

            let Some(ch) = self.peek_char() else {
                let span = self.make_span(start);
                return self.make_token(JavaTokenKind::Eof, span);
            };

            match ch {
                c if is_java_whitespace(c) => {
                    self.lex_whitespace(start);
                    continue;
                }

                '/' if self.peek_char_nth(1) == Some('/') => {
                    self.lex_line_comment(start);
                    continue;
                }

                '/' if self.peek_char_nth(1) == Some('*') => {
                    if let Some(error_token) = self.lex_block_comment(start) {
                        return error_token;
                    }
                    continue;
                }

                '(' => return self.lex_fixed(start, 1, JavaTokenKind::ParenOpen),
                ')' => return self.lex_fixed(start, 1, JavaTokenKind::ParenClose),
                '{' => return self.lex_fixed(start, 1, JavaTokenKind::CurlyBraceOpen),
                '}' => return self.lex_fixed(start, 1, JavaTokenKind::CurlyBraceClose),
                '[' => return self.lex_fixed(start, 1, JavaTokenKind::SquareBracketOpen),
                ']' => return self.lex_fixed(start, 1, JavaTokenKind::SquareBracketClose),
                ';' => return self.lex_fixed(start, 1, JavaTokenKind::Semicolon),
                ',' => return self.lex_fixed(start, 1, JavaTokenKind::Comma),
                '@' => return self.lex_fixed(start, 1, JavaTokenKind::At),
                '?' => return self.lex_fixed(start, 1, JavaTokenKind::Question),
                '<' => return self.lex_fixed(start, 1, JavaTokenKind::LessThan),
                '>' => return self.lex_fixed(start, 1, JavaTokenKind::GreaterThan),

                ':' => {
                    if self.peek_char_nth(1) == Some(':') {
                        return self.lex_fixed(start, 2, JavaTokenKind::DoubleColon);
                    }
                    return self.lex_fixed(start, 1, JavaTokenKind::Colon);
                }

                '=' => {
                    if self.peek_char_nth(1) == Some('=') {
                        self.consume();
                        self.consume();
                        let text = self.slice_from(&start);
                        let span = self.make_span(start);
                        return self.make_token(
                            JavaTokenKind::Operator(Cow::Borrowed(text)),
                            span,
                        );
                    }
                    return self.lex_fixed(start, 1, JavaTokenKind::Equals);
                }

                '.' => {
                    if self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                        return self.lex_number(start);
                    }
                    if self.remaining().starts_with("...") {
                        return self.lex_fixed(start, 3, JavaTokenKind::Ellipsis);
                    }
                    return self.lex_fixed(start, 1, JavaTokenKind::Dot);
                }

                '"' => return self.lex_string(start),
                '\'' => return self.lex_char(start),

                c if c.is_ascii_digit() => return self.lex_number(start),
                c if is_identifier_start(c) => return self.lex_identifier(start),

                _ => {
                    if let Some(op) = OPERATORS
                        .iter()
                        .find(|op| self.remaining().starts_with(**op))
                    {
                        let len = op.chars().count();
                        for _ in 0..len {
                            self.consume();
                        }
                        let text = self.slice_from(&start);
                        let span = self.make_span(start);
                        return self.make_token(
                            JavaTokenKind::Operator(Cow::Borrowed(text)),
                            span,
                        );
                    }
                    return self.lex_invalid_character(start);
                }
            }
        }
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn lex_whitespace(&mut self, start: SourcePosition) {
        while let Some(ch) = self.peek_char() {
            if !is_java_whitespace(ch) {
                break;
            }
            self.consume();
        }
        let value = self.slice_from(&start);
        let span = self.make_span(start);
        self.pending_trivia.push(JavaTriviaToken::Whitespace {
            value: Cow::Borrowed(value),
            span,
        });
    }

    /// Lexes a `//` comment up to (excluding) the line terminator.
    fn lex_line_comment(&mut self, start: SourcePosition) {
        let rest = self.remaining().as_bytes();
        let end = memchr::memchr2(b'\n', b'\r', rest)
            .map(|idx| self.curr_byte_offset + idx)
            .unwrap_or(self.source.len());
        self.advance_to(end);

        let value = self.slice_from(&start);
        let span = self.make_span(start);
        self.pending_trivia.push(JavaTriviaToken::LineComment {
            value: Cow::Borrowed(value),
            span,
        });
    }

    /// Lexes a `/* ... */` comment. Returns an error token if the comment is
    /// never closed.
    fn lex_block_comment(&mut self, start: SourcePosition) -> Option<JavaToken<'src>> {
        let body = &self.remaining().as_bytes()[2..];
        match memchr::memmem::find(body, b"*/") {
            Some(idx) => {
                self.advance_to(self.curr_byte_offset + 2 + idx + 2);
                let value = self.slice_from(&start);
                let span = self.make_span(start);
                self.pending_trivia.push(JavaTriviaToken::BlockComment {
                    value: Cow::Borrowed(value),
                    span,
                });
                None
            },
            None => {
                self.advance_to(self.source.len());
                let opened_at = JavaSourceSpan::new(start.clone(), start.clone());
                Some(self.make_error_token(
                    start,
                    "Unterminated block comment",
                    smallvec![
                        JavaErrorNote::general_with_span("Comment started here", opened_at),
                        JavaErrorNote::help("Add a closing `*/`"),
                    ],
                ))
            },
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Lexes an identifier, keyword, or boolean/null literal.
    fn lex_identifier(&mut self, start: SourcePosition) -> JavaToken<'src> {
        self.consume();
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.consume();
        }

        let name = self.slice_from(&start);
        let span = self.make_span(start);
        let kind = match name {
            "true" => JavaTokenKind::True,
            "false" => JavaTokenKind::False,
            "null" => JavaTokenKind::Null,
            _ => match Keyword::from_text(name) {
                Some(kw) => JavaTokenKind::Keyword(kw),
                None => JavaTokenKind::identifier_borrowed(name),
            },
        };
        self.make_token(kind, span)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Lexes an integer or floating-point literal.
    ///
    /// Handles hex (`0x1F`, `0x1.8p3`), binary (`0b101`), decimal with
    /// underscores, fractions, exponents, and the `L`/`F`/`D` suffixes.
    fn lex_number(&mut self, start: SourcePosition) -> JavaToken<'src> {
        let mut is_float = false;
        let rest = self.remaining();

        if rest.starts_with("0x") || rest.starts_with("0X") {
            self.consume();
            self.consume();
            self.consume_while(|c| c.is_ascii_hexdigit() || c == '_');
            if self.peek_char() == Some('.') {
                is_float = true;
                self.consume();
                self.consume_while(|c| c.is_ascii_hexdigit() || c == '_');
            }
            if matches!(self.peek_char(), Some('p' | 'P')) {
                is_float = true;
                self.consume_exponent();
            }
        } else if rest.starts_with("0b") || rest.starts_with("0B") {
            self.consume();
            self.consume();
            self.consume_while(|c| c == '0' || c == '1' || c == '_');
        } else {
            self.consume_while(|c| c.is_ascii_digit() || c == '_');
            if self.peek_char() == Some('.') {
                let after_dot = self.peek_char_nth(1);
                let is_fraction = match after_dot {
                    Some(c) if c.is_ascii_digit() => true,
                    Some(c) => !is_identifier_start(c) && c != '.',
                    None => true,
                };
                if is_fraction {
                    is_float = true;
                    self.consume();
                    self.consume_while(|c| c.is_ascii_digit() || c == '_');
                }
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                let signed_digit = matches!(self.peek_char_nth(1), Some('+' | '-'))
                    && self.peek_char_nth(2).is_some_and(|c| c.is_ascii_digit());
                let digit = self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit());
                if signed_digit || digit {
                    is_float = true;
                    self.consume_exponent();
                }
            }
        }

        match self.peek_char() {
            Some('l' | 'L') => {
                self.consume();
            },
            Some('f' | 'F' | 'd' | 'D') => {
                is_float = true;
                self.consume();
            },
            _ => (),
        }

        let text = Cow::Borrowed(self.slice_from(&start));
        let span = self.make_span(start);
        let kind = if is_float {
            JavaTokenKind::FloatingPointLiteral(text)
        } else {
            JavaTokenKind::IntegerLiteral(text)
        };
        self.make_token(kind, span)
    }

    /// Consumes an exponent marker, optional sign, and digits.
    fn consume_exponent(&mut self) {
        self.consume();
        if matches!(self.peek_char(), Some('+' | '-')) {
            self.consume();
        }
        self.consume_while(|c| c.is_ascii_digit() || c == '_');
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.consume();
        }
    }

    // =========================================================================
    // Strings and characters
    // =========================================================================

    /// Lexes a string literal or a text block.
    fn lex_string(&mut self, start: SourcePosition) -> JavaToken<'src> {
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_text_block(start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n' | '\r') => {
                    return self.make_error_token(
                        start,
                        "Unterminated string literal",
                        smallvec![JavaErrorNote::help(
                            "Add a closing `\"`, or use a text block (`\"\"\"`) \
                             for multi-line strings"
                        )],
                    );
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if !matches!(self.peek_char(), None | Some('\n' | '\r')) {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = self.slice_from(&start);
        let span = self.make_span(start);
        self.make_token(JavaTokenKind::StringLiteral(Cow::Borrowed(text)), span)
    }

    fn lex_text_block(&mut self, start: SourcePosition) -> JavaToken<'src> {
        self.consume();
        self.consume();
        self.consume();

        loop {
            match self.peek_char() {
                None => {
                    return self.make_error_token(
                        start,
                        "Unterminated text block",
                        smallvec![JavaErrorNote::help("Add a closing `\"\"\"`")],
                    );
                },
                Some('\\') => {
                    self.consume();
                    self.consume();
                },
                Some('"') if self.remaining().starts_with("\"\"\"") => {
                    self.consume();
                    self.consume();
                    self.consume();
                    break;
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = self.slice_from(&start);
        let span = self.make_span(start);
        self.make_token(JavaTokenKind::TextBlock(Cow::Borrowed(text)), span)
    }

    fn lex_char(&mut self, start: SourcePosition) -> JavaToken<'src> {
        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n' | '\r') => {
                    return self.make_error_token(
                        start,
                        "Unterminated character literal",
                        smallvec![JavaErrorNote::help("Add a closing `'`")],
                    );
                },
                Some('\'') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if !matches!(self.peek_char(), None | Some('\n' | '\r')) {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = self.slice_from(&start);
        let span = self.make_span(start);
        self.make_token(JavaTokenKind::CharacterLiteral(Cow::Borrowed(text)), span)
    }

    // =========================================================================
    // Invalid character handling
    // =========================================================================

    fn lex_invalid_character(&mut self, start: SourcePosition) -> JavaToken<'src> {
        let ch = self.consume().unwrap_or_default();
        self.make_error_token(
            start,
            format!("Unexpected character {}", describe_char(ch)),
            smallvec![],
        )
    }
}

// =============================================================================
// Iterator implementation
// =============================================================================

impl<'src> Iterator for StrJavaTokenSource<'src> {
    type Item = JavaToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(token.kind, JavaTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Java white space: space, tab, form feed and line terminators. The BOM is
/// treated as whitespace so it survives as trivia.
fn is_java_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{000C}' | '\u{FEFF}')
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_numeric()
}

/// Returns a human-readable description of a character for error messages.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("`{}` (U+{:04X})", ch.escape_default(), ch as u32)
    } else {
        format!("`{ch}`")
    }
}
