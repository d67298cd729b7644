//! Shared helpers for parser tests.

use crate::ast::Annotation;
use crate::ast::CompilationUnit;
use crate::ast::ElementValue;
use crate::ast::Member;
use crate::ast::MethodBody;
use crate::ast::Modifier;
use crate::ast::TokenTree;
use crate::ast::TopLevelDeclaration;
use crate::ast::TypeDeclaration;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::JavaSourceSpan;
use crate::JavaParseError;
use crate::JavaParser;

/// Parses `source`, panicking with rendered diagnostics if it has errors.
pub fn parse_unit(source: &str) -> CompilationUnit<'_> {
    let result = JavaParser::new(source).parse_compilation_unit();
    if result.has_errors() {
        panic!("unexpected parse errors:\n{}", result.format_errors(Some(source)));
    }
    result.into_ast().unwrap()
}

/// Parses `source` and returns the recorded errors.
pub fn parse_errors(source: &str) -> Vec<JavaParseError> {
    JavaParser::new(source).parse_compilation_unit().errors
}

/// Parses a standalone annotation, panicking on errors.
pub fn parse_annotation(source: &str) -> Annotation<'_> {
    let result = JavaParser::new(source).parse_annotation();
    if result.has_errors() {
        panic!("unexpected parse errors:\n{}", result.format_errors(Some(source)));
    }
    result.into_ast().unwrap()
}

/// Returns the first top-level type declaration.
pub fn first_type<'a, 'src>(unit: &'a CompilationUnit<'src>) -> &'a TypeDeclaration<'src> {
    unit.types
        .iter()
        .find_map(|declaration| match declaration {
            TopLevelDeclaration::Type(declaration) => Some(declaration),
            TopLevelDeclaration::Empty(_) => None,
        })
        .expect("no type declaration")
}

/// Dotted names of every annotation in the unit, in source order,
/// including nested ones.
pub fn annotation_names(unit: &CompilationUnit<'_>) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(package) = &unit.package {
        for annotation in &package.annotations {
            collect_annotation(annotation, &mut names);
        }
    }
    for declaration in &unit.types {
        if let TopLevelDeclaration::Type(declaration) = declaration {
            collect_type(declaration, &mut names);
        }
    }
    names
}

fn collect_type(declaration: &TypeDeclaration<'_>, names: &mut Vec<String>) {
    collect_modifiers(&declaration.modifiers, names);
    collect_trees(&declaration.header, names);
    for member in &declaration.body.members {
        match member {
            Member::Field(field) => {
                collect_modifiers(&field.modifiers, names);
                collect_trees(&field.declaration, names);
            },
            Member::Method(method) => {
                collect_modifiers(&method.modifiers, names);
                collect_trees(&method.signature, names);
                if let MethodBody::Block(block) = &method.body {
                    collect_trees(&block.trees, names);
                }
            },
            Member::Type(nested) => collect_type(nested, names),
            Member::Initializer(initializer) => {
                collect_modifiers(&initializer.modifiers, names);
                collect_trees(&initializer.block.trees, names);
            },
            Member::EnumConstants(constants) => collect_trees(&constants.trees, names),
            Member::Empty(_) => (),
        }
    }
}

fn collect_modifiers(modifiers: &[Modifier<'_>], names: &mut Vec<String>) {
    for modifier in modifiers {
        if let Modifier::Annotation(annotation) = modifier {
            collect_annotation(annotation, names);
        }
    }
}

fn collect_trees(trees: &[TokenTree<'_>], names: &mut Vec<String>) {
    for tree in trees {
        match tree {
            TokenTree::Token(_) => (),
            TokenTree::Group(group) => collect_trees(&group.trees, names),
            TokenTree::Annotation(annotation) => collect_annotation(annotation, names),
        }
    }
}

fn collect_annotation(annotation: &Annotation<'_>, names: &mut Vec<String>) {
    names.push(annotation.name.to_dotted());
    for argument in annotation.argument_list() {
        collect_element_value(argument.value(), names);
    }
}

fn collect_element_value(value: &ElementValue<'_>, names: &mut Vec<String>) {
    match value {
        ElementValue::Expression(expression) => collect_trees(&expression.trees, names),
        ElementValue::Annotation(annotation) => collect_annotation(annotation, names),
        ElementValue::ArrayInitializer(array) => {
            for value in &array.values {
                collect_element_value(value, names);
            }
        },
    }
}

/// Creates a token with no trivia and a default span.
pub fn mock_token(kind: JavaTokenKind<'static>) -> JavaToken<'static> {
    JavaToken::new(kind, JavaSourceSpan::default())
}

pub fn mock_identifier(name: &str) -> JavaToken<'static> {
    mock_token(JavaTokenKind::identifier_owned(name.to_string()))
}

/// A token source that replays a fixed list of tokens.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<JavaToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<JavaToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = JavaToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
