//! Lossless syntax tree for Java compilation units.
//!
//! The tree covers the declaration level of the language: package and import
//! declarations, type declarations with their members and modifiers, and
//! annotations with their argument lists. Everything below that level (field
//! initializers, method signatures and bodies, type headers, enum constants)
//! is kept as [`TokenTree`]s: individual tokens, delimited groups, and
//! parsed [`Annotation`] nodes wherever an `@` appears.
//!
//! Nodes own their [`JavaToken`](crate::token::JavaToken)s, and every token
//! owns the trivia that precedes it. Printing a node therefore only needs to
//! concatenate its tokens; see [`AstNode`].
//!
//! # Example
//!
//! ```rust
//! use lazyfetch_parser::ast::AstNode;
//! use lazyfetch_parser::JavaParser;
//!
//! let source = "class Order { @ManyToOne Customer customer; }";
//! let result = JavaParser::new(source).parse_compilation_unit();
//! let unit = result.valid_ast().unwrap();
//! assert_eq!(unit.to_source(), source);
//! ```

mod annotation;
mod ast_node;
mod compilation_unit;
mod qualified_name;
mod token_tree;
mod type_declaration;

pub use annotation::Annotation;
pub use annotation::AnnotationArgument;
pub use annotation::AnnotationArguments;
pub use annotation::ElementValue;
pub use annotation::ElementValueArray;
pub use annotation::Expression;
pub use ast_node::AstNode;
pub use compilation_unit::CompilationUnit;
pub use compilation_unit::ImportDeclaration;
pub use compilation_unit::ImportWildcard;
pub use compilation_unit::PackageDeclaration;
pub use compilation_unit::TopLevelDeclaration;
pub use qualified_name::NameSegment;
pub use qualified_name::QualifiedName;
pub use token_tree::Delimiter;
pub use token_tree::Group;
pub use token_tree::TokenTree;
pub use type_declaration::EnumConstants;
pub use type_declaration::FieldDeclaration;
pub use type_declaration::Initializer;
pub use type_declaration::Member;
pub use type_declaration::MethodBody;
pub use type_declaration::MethodDeclaration;
pub use type_declaration::Modifier;
pub use type_declaration::TypeBody;
pub use type_declaration::TypeDeclaration;
pub use type_declaration::TypeKind;

#[cfg(test)]
mod tests;
