//! The recipe surface: display metadata, a precondition, and the transform.

use crate::catalog::AssociationTargets;
use crate::catalog::PersistenceNamespace;
use crate::catalog::TypeCatalog;
use crate::precondition::AnyOf;
use crate::precondition::UsesType;
use crate::precondition::might_reference_any;
use crate::recipe_error::RecipeError;
use crate::rewrite_driver::RewriteDriver;
use crate::rewrite_driver::RewriteSite;
use crate::template_synthesis_error::TemplateSynthesisError;
use crate::types::split_qualified_name;
use inherent::inherent;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::JavaParser;
use std::path::Path;

/// A source transformation that a host can list, select and run.
pub trait Recipe: Send + Sync {
    /// A stable identifier.
    fn name(&self) -> &str;

    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether [`run`](Recipe::run) can change `unit` at all. Hosts may skip
    /// units for which this is `false`.
    fn applies_to(&self, unit: &CompilationUnit<'_>) -> bool;

    fn run<'src>(&self, unit: CompilationUnit<'src>) -> RecipeRun<'src>;
}

/// The result of running a recipe on one unit.
#[derive(Debug)]
pub struct RecipeRun<'src> {
    pub unit: CompilationUnit<'src>,
    pub changed_sites: Vec<RewriteSite>,
    pub failures: Vec<TemplateSynthesisError>,
    pub imports_added: Vec<String>,
}

impl<'src> RecipeRun<'src> {
    pub fn unchanged(unit: CompilationUnit<'src>) -> Self {
        Self {
            unit,
            changed_sites: Vec::new(),
            failures: Vec::new(),
            imports_added: Vec::new(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.changed_sites.is_empty() || !self.imports_added.is_empty()
    }
}

/// The rewritten text of one source file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceRewrite {
    pub output: String,
    pub changed_sites: Vec<RewriteSite>,
    pub failures: Vec<TemplateSynthesisError>,
    pub imports_added: Vec<String>,
}

impl SourceRewrite {
    fn unchanged(source: &str) -> Self {
        Self {
            output: source.to_string(),
            changed_sites: Vec::new(),
            failures: Vec::new(),
            imports_added: Vec::new(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.changed_sites.is_empty() || !self.imports_added.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LazyAssociationsConfig {
    pub namespace: PersistenceNamespace,
    /// Fold a package's single-type imports into `pkg.*` once it has this
    /// many and one of them was added by the rewrite.
    pub fold_threshold: Option<usize>,
}

/// Marks every `@OneToOne` and `@ManyToOne` association lazy.
///
/// Each matched annotation gets `fetch = FetchType.LAZY` as its first
/// argument; its other arguments follow in their original order and any
/// existing fetch argument is dropped. The `FetchType` import is added when
/// needed.
///
/// ```rust
/// use lazyfetch::LazyAssociations;
///
/// let source = "\
/// import jakarta.persistence.ManyToOne;
///
/// class Order {
///     @ManyToOne(optional = false)
///     Customer customer;
/// }
/// ";
/// let rewrite = LazyAssociations::default().rewrite_source(source, None).unwrap();
/// assert_eq!(rewrite.output, "\
/// import jakarta.persistence.FetchType;
/// import jakarta.persistence.ManyToOne;
///
/// class Order {
///     @ManyToOne(fetch = FetchType.LAZY, optional = false)
///     Customer customer;
/// }
/// ");
/// ```
#[derive(Debug)]
pub struct LazyAssociations {
    config: LazyAssociationsConfig,
    catalog: TypeCatalog,
    targets: AssociationTargets,
    precondition: AnyOf,
}

impl LazyAssociations {
    pub fn new(config: LazyAssociationsConfig) -> Self {
        Self::with_catalog(TypeCatalog::persistence(config.namespace), config)
    }

    /// Uses `catalog` for name resolution instead of the default
    /// persistence catalog.
    pub fn with_catalog(catalog: TypeCatalog, config: LazyAssociationsConfig) -> Self {
        let targets = AssociationTargets::for_namespace(config.namespace);
        let precondition = AnyOf::default()
            .or(UsesType::new(&targets.many_to_one))
            .or(UsesType::new(&targets.one_to_one));
        Self {
            config,
            catalog,
            targets,
            precondition,
        }
    }

    pub fn config(&self) -> &LazyAssociationsConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn targets(&self) -> &AssociationTargets {
        &self.targets
    }

    /// Parses `source`, rewrites it, and prints the result.
    ///
    /// Sources that can't mention either annotation are returned unchanged
    /// without being parsed. Sources with syntax errors are an error.
    pub fn rewrite_source(
        &self,
        source: &str,
        path: Option<&Path>,
    ) -> Result<SourceRewrite, RecipeError> {
        let simple_names = self
            .targets
            .annotation_types()
            .map(|fqn| split_qualified_name(fqn).1);
        if !might_reference_any(source, &simple_names) {
            log::trace!("Skipping {path:?}: no association annotation names in the text.");
            return Ok(SourceRewrite::unchanged(source));
        }

        let parser = match path {
            Some(path) => JavaParser::with_file_path(source, path),
            None => JavaParser::new(source),
        };
        let unit = parser
            .parse_compilation_unit()
            .into_result()
            .map_err(|errors| RecipeError::Parse {
                path: path.map(Path::to_path_buf),
                errors,
            })?;

        let run = self.run(unit);
        let output = if run.is_changed() {
            run.unit.to_source()
        } else {
            source.to_string()
        };
        Ok(SourceRewrite {
            output,
            changed_sites: run.changed_sites,
            failures: run.failures,
            imports_added: run.imports_added,
        })
    }
}

impl Default for LazyAssociations {
    fn default() -> Self {
        Self::new(LazyAssociationsConfig::default())
    }
}

#[inherent]
impl Recipe for LazyAssociations {
    pub fn name(&self) -> &str {
        "lazy-associations"
    }

    pub fn display_name(&self) -> &str {
        "Mark all associations lazy"
    }

    pub fn description(&self) -> &str {
        "Mark one-to-one and many-to-one associations lazy."
    }

    pub fn applies_to(&self, unit: &CompilationUnit<'_>) -> bool {
        self.precondition.applies_to(unit)
    }

    pub fn run<'src>(&self, unit: CompilationUnit<'src>) -> RecipeRun<'src> {
        if !self.applies_to(&unit) {
            log::debug!("Unit references neither association annotation; skipping.");
            return RecipeRun::unchanged(unit);
        }

        let outcome = RewriteDriver::new(&unit, &self.catalog, &self.targets).rewrite(unit);
        let mut unit = outcome.unit;
        let imports_added: Vec<String> = outcome.imports.added().map(str::to_string).collect();
        outcome.imports.apply_to(&mut unit, self.config.fold_threshold);
        RecipeRun {
            unit,
            changed_sites: outcome.sites,
            failures: outcome.failures,
            imports_added,
        }
    }
}
