/// Source position information with dual column tracking.
///
/// This is a pure data struct with no mutation methods. Lexers are
/// responsible for computing position values as they scan input.
///
/// # Indexing Convention
///
/// **All position values are 0-based:**
/// - `line`: 0 = first line of the file
/// - `col_utf8`: UTF-8 character count within the current line
/// - `col_utf16`: Optional UTF-16 code unit offset within the current line
/// - `byte_offset`: byte offset within the whole file
///
/// Human-facing renderers (see
/// [`JavaParseError::format_oneline`](crate::JavaParseError::format_oneline))
/// add 1 to line and column.
///
/// # Dual Column Tracking
///
/// - **`col_utf8`** (always available): number of characters from the start
///   of the current line. This matches what most editors display.
/// - **`col_utf16`** (optional): UTF-16 code unit offset within the line, as
///   used by LSP. It is `None` for synthesized tokens that were never lexed
///   from a file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col_utf8: usize,
    col_utf16: Option<usize>,
    byte_offset: usize,
}

impl SourcePosition {
    /// Create a new SourcePosition.
    ///
    /// # Arguments
    /// - `line`: 0-based line number (0 = first line)
    /// - `col_utf8`: 0-based UTF-8 character count within current line
    /// - `col_utf16`: 0-based UTF-16 code unit offset within current line,
    ///   or `None` if not available
    /// - `byte_offset`: 0-based byte offset from the start of the file
    pub fn new(
        line: usize,
        col_utf8: usize,
        col_utf16: Option<usize>,
        byte_offset: usize,
    ) -> Self {
        Self {
            line,
            col_utf8,
            col_utf16,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based (UTF-8) character count within the current line.
    pub fn col_utf8(&self) -> usize {
        self.col_utf8
    }

    /// Returns the 0-based UTF-16 code unit offset within the current line,
    /// if available.
    pub fn col_utf16(&self) -> Option<usize> {
        self.col_utf16
    }

    /// Returns the 0-based byte offset from the start of the file.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}
