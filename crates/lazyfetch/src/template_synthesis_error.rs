use lazyfetch_parser::JavaSourceSpan;
use thiserror::Error;

/// A replacement annotation could not be built for one site. The site keeps
/// its original annotation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TemplateSynthesisError {
    #[error(
        "{}: replacement `{template}` for `{annotation}` does not parse: {details}",
        .span.format_location(),
    )]
    Unparseable {
        annotation: String,
        template: String,
        span: JavaSourceSpan,
        details: String,
    },

    #[error(
        "{}: replacement `{template}` for `{annotation}` names {} instead of `{expected}`",
        .span.format_location(),
        describe_found(.found.as_deref()),
    )]
    WrongAnnotationType {
        annotation: String,
        template: String,
        span: JavaSourceSpan,
        expected: String,
        found: Option<String>,
    },

    #[error(
        "{}: replacement `{template}` for `{annotation}` does not start with a lazy fetch argument",
        .span.format_location(),
    )]
    MissingLazyFetch {
        annotation: String,
        template: String,
        span: JavaSourceSpan,
    },
}

impl TemplateSynthesisError {
    /// The original annotation's text.
    pub fn annotation(&self) -> &str {
        match self {
            Self::Unparseable { annotation, .. }
            | Self::WrongAnnotationType { annotation, .. }
            | Self::MissingLazyFetch { annotation, .. } => annotation,
        }
    }

    pub fn template(&self) -> &str {
        match self {
            Self::Unparseable { template, .. }
            | Self::WrongAnnotationType { template, .. }
            | Self::MissingLazyFetch { template, .. } => template,
        }
    }

    /// Where the original annotation is.
    pub fn span(&self) -> &JavaSourceSpan {
        match self {
            Self::Unparseable { span, .. }
            | Self::WrongAnnotationType { span, .. }
            | Self::MissingLazyFetch { span, .. } => span,
        }
    }

    /// `file:line:column` of the original annotation.
    pub fn location(&self) -> String {
        self.span().format_location()
    }
}

fn describe_found(found: Option<&str>) -> String {
    match found {
        Some(fqn) => format!("`{fqn}`"),
        None => "an unresolved type".to_string(),
    }
}
