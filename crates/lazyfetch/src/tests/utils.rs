use crate::LazyAssociations;
use crate::LazyAssociationsConfig;
use crate::SourceRewrite;
use lazyfetch_parser::ast::Annotation;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::ast::Member;
use lazyfetch_parser::ast::Modifier;
use lazyfetch_parser::ast::TopLevelDeclaration;
use lazyfetch_parser::JavaParser;

/// Imports of the entity used throughout the tests.
pub const ENTITY_IMPORTS: [&str; 5] = [
    "jakarta.persistence.Entity",
    "jakarta.persistence.Id",
    "jakarta.persistence.JoinColumn",
    "jakarta.persistence.ManyToOne",
    "java.util.UUID",
];

/// [`ENTITY_IMPORTS`] after `FetchType` was added.
pub const ENTITY_IMPORTS_WITH_FETCH_TYPE: [&str; 6] = [
    "jakarta.persistence.Entity",
    "jakarta.persistence.FetchType",
    "jakarta.persistence.Id",
    "jakarta.persistence.JoinColumn",
    "jakarta.persistence.ManyToOne",
    "java.util.UUID",
];

/// A unit with `imports` and one field carrying `annotation`.
pub fn entity(imports: &[&str], annotation: &str) -> String {
    let mut source = String::new();
    for import in imports {
        source.push_str(&format!("import {import};\n"));
    }
    source.push_str(&format!(
        "public class TestEntity {{\nprivate UUID id;\n{annotation}\nprivate Object manyToOne;\n}}\n"
    ));
    source
}

/// Replaces `jakarta.persistence.ManyToOne` with `OneToOne` in `imports`.
pub fn one_to_one_imports<'a>(imports: &[&'a str]) -> Vec<&'a str> {
    imports
        .iter()
        .map(|import| {
            if *import == "jakarta.persistence.ManyToOne" {
                "jakarta.persistence.OneToOne"
            } else {
                *import
            }
        })
        .collect()
}

pub fn parse(source: &str) -> CompilationUnit<'_> {
    let result = JavaParser::new(source).parse_compilation_unit();
    assert!(
        result.errors.is_empty(),
        "unexpected parse errors:\n{}",
        result.format_errors(Some(source)),
    );
    result.into_valid_ast().unwrap()
}

pub fn rewrite(source: &str) -> SourceRewrite {
    LazyAssociations::default().rewrite_source(source, None).unwrap()
}

pub fn rewrite_with(config: LazyAssociationsConfig, source: &str) -> SourceRewrite {
    LazyAssociations::new(config).rewrite_source(source, None).unwrap()
}

/// The first annotation on a field of the unit's first type.
pub fn first_field_annotation<'a, 'src>(unit: &'a CompilationUnit<'src>) -> &'a Annotation<'src> {
    let Some(TopLevelDeclaration::Type(declaration)) = unit.types.first() else {
        panic!("unit declares no type");
    };
    declaration
        .body
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
        .flat_map(|field| field.modifiers.iter())
        .find_map(|modifier| match modifier {
            Modifier::Annotation(annotation) => Some(annotation),
            _ => None,
        })
        .expect("no annotated field")
}
