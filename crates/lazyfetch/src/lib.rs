//! Rewrites JPA association annotations in Java sources so that every
//! `@OneToOne` and `@ManyToOne` association is fetched lazily.
//!
//! The pass runs in stages over one compilation unit:
//!
//! 1. a textual pre-filter and a token-level [`Precondition`] skip units
//!    that can't reference either annotation type;
//! 2. the [`RewriteDriver`] folds the unit and, for each annotation,
//!    - [`match_annotation`] resolves its name against the unit's
//!      [`SymbolTable`],
//!    - [`rewrite_arguments`] puts the lazy fetch argument first and drops
//!      existing fetch arguments,
//!    - the [`TemplateSynthesizer`] renders and re-parses the replacement,
//!      registering the `FetchType` import in the unit's [`ImportSet`];
//! 3. the [`ImportSet`] inserts new imports and the unit is printed.
//!
//! [`LazyAssociations`] wires the stages together behind the [`Recipe`]
//! trait.

mod argument_rewriter;
mod catalog;
mod imports;
mod matcher;
mod precondition;
mod recipe;
mod recipe_error;
mod rewrite_driver;
mod symbols;
mod template;
mod template_synthesis_error;
mod types;

pub use argument_rewriter::RewrittenArgument;
pub use argument_rewriter::RewrittenArguments;
pub use argument_rewriter::rewrite_arguments;
pub use catalog::AssociationTargets;
pub use catalog::CatalogType;
pub use catalog::CatalogTypeKind;
pub use catalog::PersistenceNamespace;
pub use catalog::TypeCatalog;
pub use catalog::UnknownNamespaceError;
pub use imports::ImportOutcome;
pub use imports::ImportSet;
pub use matcher::AnnotationMatch;
pub use matcher::match_annotation;
pub use precondition::AnyOf;
pub use precondition::Precondition;
pub use precondition::UsesType;
pub use precondition::might_reference_any;
pub use recipe::LazyAssociations;
pub use recipe::LazyAssociationsConfig;
pub use recipe::Recipe;
pub use recipe::RecipeRun;
pub use recipe::SourceRewrite;
pub use recipe_error::RecipeError;
pub use rewrite_driver::RewriteDriver;
pub use rewrite_driver::RewriteOutcome;
pub use rewrite_driver::RewriteSite;
pub use symbols::Scope;
pub use symbols::SymbolTable;
pub use template::FetchTypeReference;
pub use template::ReplacementDirective;
pub use template::TemplateSynthesizer;
pub use template::fetch_type_reference;
pub use template_synthesis_error::TemplateSynthesisError;
pub use types::JavaType;
pub use types::PrimitiveType;

#[cfg(test)]
mod tests;
