//! Result type for parsing operations that may produce partial results.

use crate::JavaParseError;

/// The result of a parsing operation.
///
/// Unlike `Result<T, E>`, `ParseResult` can contain both a partial AST and
/// errors. The parser records an error, skips to the next member or type
/// declaration, and keeps going, so one pass reports every broken region of
/// a file.
///
/// A recovered AST (one produced alongside errors) is *not* lossless: the
/// tokens skipped during recovery are dropped. Rewriting tools should only
/// print trees obtained through [`valid_ast()`](Self::valid_ast) or
/// [`into_valid_ast()`](Self::into_valid_ast).
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,
    pub errors: Vec<JavaParseError>,
}

impl<TAst> ParseResult<TAst> {
    /// Creates a successful parse result with no errors.
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    /// Creates a failed parse result with errors but no AST.
    pub(crate) fn err(errors: Vec<JavaParseError>) -> Self {
        Self { ast: None, errors }
    }

    /// Creates a recovered parse result with both AST and errors.
    pub(crate) fn recovered(ast: TAst, errors: Vec<JavaParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    /// Returns the AST only if parsing was completely successful.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, regardless of whether errors occurred.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    /// Takes ownership of the AST only if parsing was completely successful.
    pub fn into_valid_ast(self) -> Option<TAst> {
        if self.errors.is_empty() {
            self.ast
        } else {
            None
        }
    }

    /// Takes ownership of the AST regardless of errors.
    pub fn into_ast(self) -> Option<TAst> {
        self.ast
    }

    /// Converts into a standard `Result`, failing if any error was recorded.
    pub fn into_result(self) -> Result<TAst, Vec<JavaParseError>> {
        match self.ast {
            Some(ast) if self.errors.is_empty() => Ok(ast),
            _ => Err(self.errors),
        }
    }

    /// Returns `true` if parsing was completely successful.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.ast.is_some()
    }

    /// Returns `true` if any errors were encountered.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Formats all errors as a single string for display.
    pub fn format_errors(&self, source: Option<&str>) -> String {
        self.errors
            .iter()
            .map(|e| e.format_detailed(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
