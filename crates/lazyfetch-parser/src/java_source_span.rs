use crate::ByteSpan;
use crate::SourcePosition;
use std::path::PathBuf;

/// Represents a span of source text from start to end position.
///
/// The span is a half-open interval: `[start_inclusive, end_exclusive)`.
/// Optionally includes the path of the file the text was read from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JavaSourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
    /// The file path to the source text this span refers to, if available.
    pub file_path: Option<PathBuf>,
}

impl JavaSourceSpan {
    /// Creates a span without file path information.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: None,
        }
    }

    /// Creates a span with file path information.
    pub fn with_file(
        start: SourcePosition,
        end: SourcePosition,
        file_path: PathBuf,
    ) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: Some(file_path),
        }
    }

    /// Creates a span covering `self` through the end of `other`.
    pub fn to(&self, other: &JavaSourceSpan) -> JavaSourceSpan {
        JavaSourceSpan {
            start_inclusive: self.start_inclusive.clone(),
            end_exclusive: other.end_exclusive.clone(),
            file_path: self.file_path.clone(),
        }
    }

    /// Extracts a compact `ByteSpan` from this span's byte offsets,
    /// discarding line/column and file path information.
    pub fn byte_span(&self) -> ByteSpan {
        ByteSpan {
            start: self.start_inclusive.byte_offset() as u32,
            end: self.end_exclusive.byte_offset() as u32,
        }
    }

    /// Formats the start of this span as `file:line:column` (1-based), using
    /// `<input>` when no file path is known.
    pub fn format_location(&self) -> String {
        let file_name = self
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        let line = self.start_inclusive.line() + 1;
        let column = self.start_inclusive.col_utf8() + 1;
        format!("{file_name}:{line}:{column}")
    }
}
