use crate::catalog::AssociationTargets;
use crate::symbols::Scope;
use lazyfetch_parser::ast::Annotation;

/// Which association annotation, if any, an annotation node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationMatch {
    NotApplicable,
    OneToOne,
    ManyToOne,
}

impl AnnotationMatch {
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// The fully qualified annotation type this match stands for.
    pub fn annotation_type<'t>(&self, targets: &'t AssociationTargets) -> Option<&'t str> {
        match self {
            Self::NotApplicable => None,
            Self::OneToOne => Some(&targets.one_to_one),
            Self::ManyToOne => Some(&targets.many_to_one),
        }
    }
}

/// Matches `annotation` against the association annotation types by exact
/// fully qualified name. Names that don't resolve never match.
pub fn match_annotation(
    annotation: &Annotation<'_>,
    scope: &Scope<'_, '_>,
    targets: &AssociationTargets,
) -> AnnotationMatch {
    let Some(fqn) = scope.annotation_type(annotation) else {
        return AnnotationMatch::NotApplicable;
    };
    if fqn == targets.one_to_one {
        AnnotationMatch::OneToOne
    } else if fqn == targets.many_to_one {
        AnnotationMatch::ManyToOne
    } else {
        AnnotationMatch::NotApplicable
    }
}
