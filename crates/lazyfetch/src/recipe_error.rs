use lazyfetch_parser::JavaParseError;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum RecipeError {
    /// The unit has syntax errors. Units that don't parse cleanly are never
    /// rewritten.
    #[error(
        "{} has {} syntax error(s): {}",
        display_path(.path.as_deref()),
        .errors.len(),
        format_errors(.errors),
    )]
    Parse {
        path: Option<PathBuf>,
        errors: Vec<JavaParseError>,
    },
}

fn display_path(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<input>".to_string(),
    }
}

fn format_errors(errors: &[JavaParseError]) -> String {
    errors
        .iter()
        .map(JavaParseError::format_oneline)
        .collect::<Vec<_>>()
        .join("; ")
}
