//! Cheap whole-unit checks that decide whether a recipe needs to visit a
//! unit at all.

use crate::types::split_qualified_name;
use inherent::inherent;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::token::JavaTokenKind;
use memchr::memmem;
use std::fmt;

/// A side-effect-free predicate over a whole compilation unit.
pub trait Precondition: fmt::Debug + Send + Sync {
    fn applies_to(&self, unit: &CompilationUnit<'_>) -> bool;
}

/// Holds when a unit references the type `fqn`.
///
/// A unit references a type when it imports it by name, spells out its
/// qualified name, or mentions its simple name while the type's package is
/// on-demand imported or is the unit's own package. The check is a single
/// pass over the unit's tokens; comments are never looked at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsesType {
    fqn: String,
    segments: Vec<String>,
}

impl UsesType {
    pub fn new(fqn: impl Into<String>) -> Self {
        let fqn = fqn.into();
        let segments = fqn.split('.').map(str::to_string).collect();
        Self { fqn, segments }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    fn simple_name_is_visible(&self, unit: &CompilationUnit<'_>) -> bool {
        let Some(package) = split_qualified_name(&self.fqn).0 else {
            return true;
        };
        unit.package_name().as_deref() == Some(package)
            || unit.imports.iter().any(|import| {
                import.is_on_demand() && !import.is_static() && import.imported_name() == package
            })
    }
}

#[inherent]
impl Precondition for UsesType {
    pub fn applies_to(&self, unit: &CompilationUnit<'_>) -> bool {
        let simple_name_visible = self.simple_name_is_visible(unit);
        let simple_name = self.segments.last().map(String::as_str).unwrap_or_default();
        // Qualified references alternate identifier and dot tokens:
        // `a` `.` `b` `.` `Type`.
        let pattern_len = self.segments.len() * 2 - 1;
        let mut matched = 0;
        let mut found = false;

        unit.for_each_token(&mut |token| {
            if found {
                return;
            }
            if simple_name_visible && token.is_identifier(simple_name) {
                found = true;
                return;
            }
            let expected_matches = if matched % 2 == 0 {
                token.is_identifier(&self.segments[matched / 2])
            } else {
                matches!(token.kind, JavaTokenKind::Dot)
            };
            matched = if expected_matches {
                matched + 1
            } else {
                usize::from(token.is_identifier(&self.segments[0]))
            };
            found = matched == pattern_len;
        });

        if found {
            log::trace!("Unit references `{}`.", self.fqn);
        }
        found
    }
}

/// Holds when any of its preconditions holds.
#[derive(Debug, Default)]
pub struct AnyOf {
    preconditions: Vec<Box<dyn Precondition>>,
}

impl AnyOf {
    pub fn new(preconditions: Vec<Box<dyn Precondition>>) -> Self {
        Self { preconditions }
    }

    pub fn or(mut self, precondition: impl Precondition + 'static) -> Self {
        self.preconditions.push(Box::new(precondition));
        self
    }
}

#[inherent]
impl Precondition for AnyOf {
    pub fn applies_to(&self, unit: &CompilationUnit<'_>) -> bool {
        self.preconditions
            .iter()
            .any(|precondition| precondition.applies_to(unit))
    }
}

/// Textual pre-filter: `true` if any of `simple_names` occurs anywhere in
/// `source`. A `false` answer means no precondition built from those names
/// can hold, so the unit doesn't need to be parsed.
pub fn might_reference_any(source: &str, simple_names: &[&str]) -> bool {
    simple_names
        .iter()
        .any(|name| memmem::find(source.as_bytes(), name.as_bytes()).is_some())
}
