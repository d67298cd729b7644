use crate::JavaErrorNote;
use crate::JavaErrorNoteKind;
use crate::JavaErrorNotes;
use crate::JavaParseErrorKind;
use crate::JavaSourceSpan;

/// A parse error with location information and contextual notes.
///
/// This structure provides error information for both human-readable CLI
/// output and programmatic handling by tools.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct JavaParseError {
    /// Human-readable primary error message.
    message: String,

    /// The primary span where the error was detected.
    span: JavaSourceSpan,

    /// Categorized error kind for programmatic handling.
    kind: JavaParseErrorKind,

    /// Additional notes providing context and related locations.
    notes: JavaErrorNotes,
}

impl JavaParseError {
    /// Creates a new parse error with no notes.
    pub fn new(
        message: impl Into<String>,
        span: JavaSourceSpan,
        kind: JavaParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: JavaErrorNotes::new(),
        }
    }

    /// Creates a parse error from a lexer error token, preserving the
    /// lexer's message and notes.
    pub fn from_lexer_error(
        message: impl Into<String>,
        span: JavaSourceSpan,
        lexer_notes: JavaErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind: JavaParseErrorKind::LexerError,
            notes: lexer_notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &JavaSourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &JavaParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &JavaErrorNotes {
        &self.notes
    }

    /// Adds a general note without a span.
    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(JavaErrorNote::general(message));
    }

    /// Adds a general note with a span (pointing to a related location).
    pub fn add_note_with_span(&mut self, message: impl Into<String>, span: JavaSourceSpan) {
        self.notes
            .push(JavaErrorNote::general_with_span(message, span));
    }

    /// Adds a help note without a span.
    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(JavaErrorNote::help(message));
    }

    /// Formats this error as a diagnostic string for CLI output.
    ///
    /// Produces output like:
    /// ```text
    /// error: expected `;`, found `public`
    ///   --> Order.java:3:1
    ///    |
    ///  3 | public class Order {
    ///    | ^^^^^^
    ///    |
    ///    = help: ...
    /// ```
    ///
    /// `source` is optional; without it the snippet is omitted but the
    /// location line is still shown.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');
        output.push_str(&format!("  --> {}\n", self.span.format_location()));

        if let Some(src) = source
            && let Some(snippet) = format_source_snippet(src, &self.span)
        {
            output.push_str(&snippet);
        }

        for note in &self.notes {
            let prefix = match note.kind {
                JavaErrorNoteKind::General => "note",
                JavaErrorNoteKind::Help => "help",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));
            if let (Some(note_span), Some(src)) = (&note.span, source)
                && let Some(snippet) = format_source_snippet(src, note_span)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Formats this error as a single-line summary.
    ///
    /// Produces output like:
    /// ```text
    /// Order.java:5:12: error: expected `;`, found `public`
    /// ```
    pub fn format_oneline(&self) -> String {
        format!("{}: error: {}", self.span.format_location(), self.message)
    }
}

/// Formats the source line containing `span` with a caret underline.
fn format_source_snippet(source: &str, span: &JavaSourceSpan) -> Option<String> {
    let line_num = span.start_inclusive.line();
    let line_content = source.lines().nth(line_num)?;
    let display_line_num = line_num + 1;
    let line_num_width = display_line_num.to_string().len().max(2);

    let col_start = span.start_inclusive.col_utf8();
    let col_end = if span.end_exclusive.line() == line_num {
        span.end_exclusive.col_utf8()
    } else {
        line_content.chars().count()
    };
    let underline_len = if col_end > col_start {
        col_end - col_start
    } else {
        1
    };

    let mut output = String::new();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{display_line_num:>line_num_width$} | {line_content}\n"
    ));
    output.push_str(&format!(
        "{:>width$} | {:>padding$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        padding = col_start
    ));
    Some(output)
}
