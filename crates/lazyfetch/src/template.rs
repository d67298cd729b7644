//! Builds replacement annotations by rendering source text and parsing it
//! back into a node.

use crate::catalog::AssociationTargets;
use crate::imports::ImportOutcome;
use crate::imports::ImportSet;
use crate::matcher::AnnotationMatch;
use crate::symbols::Scope;
use crate::symbols::SymbolTable;
use crate::template_synthesis_error::TemplateSynthesisError;
use crate::types::split_qualified_name;
use lazyfetch_parser::ast::Annotation;
use lazyfetch_parser::ast::AnnotationArgument;
use lazyfetch_parser::JavaParseError;
use lazyfetch_parser::JavaParser;

/// The text of one replacement annotation: its name as written and its
/// rendered arguments, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementDirective {
    annotation_name: String,
    arguments: Vec<String>,
}

impl ReplacementDirective {
    pub fn new(annotation_name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            annotation_name: annotation_name.into(),
            arguments,
        }
    }

    pub fn annotation_name(&self) -> &str {
        &self.annotation_name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// `@Name(arg1, arg2, ...)`
    pub fn render(&self) -> String {
        format!("@{}({})", self.annotation_name, self.arguments.join(", "))
    }
}

/// How the fetch-mode enum is spelled in a replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTypeReference {
    pub text: String,
    /// The simple name is used but doesn't resolve yet.
    pub needs_import: bool,
}

/// Picks the simple name `FetchType` when it is free or already means the
/// fetch-mode enum, and the fully qualified name when another `FetchType`
/// is in scope.
pub fn fetch_type_reference(scope: &Scope<'_, '_>, targets: &AssociationTargets) -> FetchTypeReference {
    let simple = split_qualified_name(&targets.fetch_type).1;
    match scope.resolve_simple_type(simple) {
        None => FetchTypeReference {
            text: simple.to_string(),
            needs_import: true,
        },
        Some(fqn) if fqn == targets.fetch_type => FetchTypeReference {
            text: simple.to_string(),
            needs_import: false,
        },
        Some(other) => {
            log::debug!("`{simple}` means `{other}` here; using `{}`.", targets.fetch_type);
            FetchTypeReference {
                text: targets.fetch_type.clone(),
                needs_import: false,
            }
        },
    }
}

/// Turns [`ReplacementDirective`]s into annotation nodes resolved against
/// one unit's symbols.
#[derive(Clone, Copy, Debug)]
pub struct TemplateSynthesizer<'a, 'c> {
    symbols: &'a SymbolTable<'c>,
    targets: &'a AssociationTargets,
}

impl<'a, 'c> TemplateSynthesizer<'a, 'c> {
    pub fn new(symbols: &'a SymbolTable<'c>, targets: &'a AssociationTargets) -> Self {
        Self { symbols, targets }
    }

    /// Parses the rendered directive and checks that the new node names the
    /// `expected` annotation type and starts with the lazy fetch argument.
    ///
    /// The new node takes over the leading trivia of `original`'s `@` and
    /// reports `original`'s span for all its tokens. The fetch-mode import
    /// is registered in `imports` only if synthesis succeeds.
    pub fn synthesize<'src>(
        &self,
        directive: ReplacementDirective,
        original: &Annotation<'src>,
        expected: AnnotationMatch,
        fetch_type: &FetchTypeReference,
        imports: &mut ImportSet,
    ) -> Result<Annotation<'src>, TemplateSynthesisError> {
        let template = directive.render();
        let span = original.span();
        let annotation = original.to_source().trim().to_string();
        log::trace!("Synthesizing `{template}` for `{annotation}`.");

        let parsed: Result<Annotation<'src>, Vec<JavaParseError>> =
            JavaParser::new(template.as_str())
                .parse_annotation()
                .into_result()
                .map(Annotation::into_owned);
        let mut replacement = match parsed {
            Ok(parsed) => parsed,
            Err(errors) => {
                return Err(TemplateSynthesisError::Unparseable {
                    details: errors
                        .iter()
                        .map(JavaParseError::format_oneline)
                        .collect::<Vec<_>>()
                        .join("; "),
                    annotation,
                    template,
                    span,
                });
            },
        };

        let mut staged = imports.clone();
        if fetch_type.needs_import
            && let ImportOutcome::Conflict { existing } =
                staged.maybe_add_import(&self.targets.fetch_type)
        {
            log::debug!("`{existing}` is already imported under the fetch-mode enum's name.");
        }
        let scope = self.symbols.scope_with(&staged);

        let expected_type = expected.annotation_type(self.targets);
        let found = scope.annotation_type(&replacement);
        if expected_type.is_none() || found.as_deref() != expected_type {
            return Err(TemplateSynthesisError::WrongAnnotationType {
                annotation,
                template,
                span,
                expected: expected_type.unwrap_or_default().to_string(),
                found,
            });
        }
        if !self.is_lazy_fetch(&scope, replacement.argument_list().first()) {
            return Err(TemplateSynthesisError::MissingLazyFetch {
                annotation,
                template,
                span,
            });
        }

        replacement.for_each_token_mut(&mut |token| token.span = span.clone());
        replacement.at.preceding_trivia = original.at.preceding_trivia.clone();
        *imports = staged;
        Ok(replacement)
    }

    fn is_lazy_fetch(&self, scope: &Scope<'_, '_>, argument: Option<&AnnotationArgument<'_>>) -> bool {
        let Some(argument) = argument else {
            return false;
        };
        let value = argument.value();
        argument.name() == Some("fetch")
            && scope
                .value_type(value)
                .is_some_and(|type_| type_.is_class(&self.targets.fetch_type))
            && value.to_source().trim_end().ends_with(".LAZY")
    }
}
