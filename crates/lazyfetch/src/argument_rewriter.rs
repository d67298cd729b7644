use crate::catalog::AssociationTargets;
use crate::matcher::AnnotationMatch;
use crate::symbols::Scope;
use lazyfetch_parser::ast::Annotation;

/// One entry of a rewritten argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewrittenArgument {
    /// `fetch = FetchType.LAZY`, however the fetch-mode enum ends up spelled.
    LazyFetch,
    /// An original argument, printed as written minus surrounding
    /// whitespace.
    Preserved(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewrittenArguments {
    pub arguments: Vec<RewrittenArgument>,
    /// How many fetch-mode arguments the original list had.
    pub dropped_fetch: usize,
}

impl RewrittenArguments {
    pub fn preserved(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().filter_map(|argument| match argument {
            RewrittenArgument::Preserved(text) => Some(text.as_str()),
            RewrittenArgument::LazyFetch => None,
        })
    }

    /// Renders each argument, spelling the fetch-mode enum as
    /// `fetch_type_reference`.
    pub fn render(&self, fetch_type_reference: &str) -> Vec<String> {
        self.arguments
            .iter()
            .map(|argument| match argument {
                RewrittenArgument::LazyFetch => format!("fetch = {fetch_type_reference}.LAZY"),
                RewrittenArgument::Preserved(text) => text.clone(),
            })
            .collect()
    }
}

/// Builds the argument list of a matched annotation: the lazy fetch
/// directive first, then every original argument that isn't a fetch-mode
/// argument, in order.
///
/// An argument is a fetch-mode argument when its resolved type is the
/// fetch-mode enum. Every such argument is dropped, however many there are.
/// Arguments whose type can't be resolved are kept.
pub fn rewrite_arguments(
    annotation: &Annotation<'_>,
    kind: AnnotationMatch,
    scope: &Scope<'_, '_>,
    targets: &AssociationTargets,
) -> RewrittenArguments {
    let annotation_type = kind.annotation_type(targets);
    let mut rewritten = RewrittenArguments {
        arguments: vec![RewrittenArgument::LazyFetch],
        dropped_fetch: 0,
    };

    for argument in annotation.argument_list() {
        let text = argument.to_source();
        let text = text.trim();
        match scope.argument_type(argument, annotation_type) {
            Some(type_) if type_.is_class(&targets.fetch_type) => {
                log::trace!("Dropping fetch argument `{text}`.");
                rewritten.dropped_fetch += 1;
            },
            Some(_) => rewritten
                .arguments
                .push(RewrittenArgument::Preserved(text.to_string())),
            None => {
                log::trace!("Keeping argument `{text}` of unresolved type.");
                rewritten
                    .arguments
                    .push(RewrittenArgument::Preserved(text.to_string()));
            },
        }
    }

    if rewritten.dropped_fetch > 1 {
        log::debug!(
            "`{}` had {} fetch arguments; all of them were dropped.",
            annotation.to_source().trim(),
            rewritten.dropped_fetch,
        );
    }
    rewritten
}
