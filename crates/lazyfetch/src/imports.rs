//! Per-unit accumulator of imports that rewrites need.
//!
//! Rewrites register the types they reference through
//! [`ImportSet::maybe_add_import`]; once the traversal is done,
//! [`ImportSet::apply_to`] splices the new `import` declarations into the
//! unit next to the existing imports they belong with.

use crate::types::split_qualified_name;
use indexmap::IndexMap;
use indexmap::IndexSet;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::ast::ImportDeclaration;
use lazyfetch_parser::ast::Modifier;
use lazyfetch_parser::ast::TopLevelDeclaration;
use lazyfetch_parser::token::JavaToken;
use lazyfetch_parser::token::JavaTriviaToken;
use lazyfetch_parser::JavaSourceSpan;

/// What [`ImportSet::maybe_add_import`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// A new single-type import will be inserted.
    Added,
    /// The type is already imported, or was added earlier.
    AlreadyImported,
    /// The type is visible without an import: `java.lang`, the unit's own
    /// package, or an on-demand import of its package.
    Implicit,
    /// A different type with the same simple name is already imported.
    Conflict { existing: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportSet {
    package: Option<String>,
    /// Simple name to fully qualified name of existing single-type imports.
    single_type: IndexMap<String, String>,
    on_demand: IndexSet<String>,
    /// Simple name to fully qualified name of imports to insert.
    added: IndexMap<String, String>,
}

impl ImportSet {
    /// Seeds the set with the package and the non-static imports of `unit`.
    pub fn from_unit(unit: &CompilationUnit<'_>) -> Self {
        let mut set = Self {
            package: unit.package_name(),
            ..Self::default()
        };
        for import in unit.imports.iter().filter(|import| !import.is_static()) {
            let name = import.imported_name();
            if import.is_on_demand() {
                set.on_demand.insert(name);
            } else {
                let (_, simple) = split_qualified_name(&name);
                set.single_type.entry(simple.to_string()).or_insert(name);
            }
        }
        set
    }

    /// Registers `fqn` for import unless it is already importable.
    /// Registering the same type twice is a no-op.
    pub fn maybe_add_import(&mut self, fqn: &str) -> ImportOutcome {
        let (package, simple) = split_qualified_name(fqn);
        let imported = self
            .single_type
            .get(simple)
            .or_else(|| self.added.get(simple));
        if let Some(imported) = imported {
            return if imported == fqn {
                ImportOutcome::AlreadyImported
            } else {
                ImportOutcome::Conflict {
                    existing: imported.clone(),
                }
            };
        }
        if self.is_implicit(package) {
            return ImportOutcome::Implicit;
        }

        log::debug!("Registering import of `{fqn}`.");
        self.added.insert(simple.to_string(), fqn.to_string());
        ImportOutcome::Added
    }

    fn is_implicit(&self, package: Option<&str>) -> bool {
        match package {
            // Types in the unnamed package can't be imported.
            None => true,
            Some(package) => {
                package == "java.lang"
                    || self.package.as_deref() == Some(package)
                    || self.on_demand.contains(package)
            },
        }
    }

    /// The fully qualified name of a type registered under `simple_name`
    /// by an earlier [`maybe_add_import`](Self::maybe_add_import).
    pub fn added_type(&self, simple_name: &str) -> Option<&str> {
        self.added.get(simple_name).map(String::as_str)
    }

    /// Types registered for import, in registration order.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.added.values().map(String::as_str)
    }

    pub fn has_additions(&self) -> bool {
        !self.added.is_empty()
    }

    /// Inserts the registered imports into `unit` and returns how many were
    /// inserted.
    ///
    /// Each import goes next to the existing imports sharing the longest
    /// package prefix with it, in alphabetical position among them. A unit
    /// without imports gets it after its package declaration, or at the top.
    ///
    /// With `fold_threshold = Some(n)`, a package that ends up with `n` or
    /// more single-type imports, at least one of them newly added, has them
    /// replaced by a single on-demand import.
    pub fn apply_to(&self, unit: &mut CompilationUnit<'_>, fold_threshold: Option<usize>) -> usize {
        for fqn in self.added.values() {
            insert_import(unit, fqn);
        }
        if let Some(threshold) = fold_threshold {
            let packages: IndexSet<&str> = self
                .added
                .values()
                .filter_map(|fqn| split_qualified_name(fqn).0)
                .collect();
            for package in packages {
                fold_package(unit, package, threshold);
            }
        }
        self.added.len()
    }
}

fn newline_trivia<'src>(text: &str) -> JavaTriviaToken<'src> {
    JavaTriviaToken::Whitespace {
        value: text.to_string().into(),
        span: JavaSourceSpan::default(),
    }
}

fn shared_segments(a: Option<&str>, b: Option<&str>) -> usize {
    match (a, b) {
        (Some(a), Some(b)) => a
            .split('.')
            .zip(b.split('.'))
            .take_while(|(x, y)| x == y)
            .count(),
        _ => 0,
    }
}

fn insert_import<'src>(unit: &mut CompilationUnit<'src>, fqn: &str) {
    let package = split_qualified_name(fqn).0;

    if unit.imports.is_empty() {
        if unit.package.is_some() {
            unit.imports.push(ImportDeclaration::new_single_type(fqn, "\n\n"));
        } else {
            unit.imports.push(ImportDeclaration::new_single_type(fqn, ""));
            if let Some(first) = first_declaration_token_mut(unit) {
                first.preceding_trivia.insert(0, newline_trivia("\n\n"));
            }
        }
        return;
    }

    let scores: Vec<Option<usize>> = unit
        .imports
        .iter()
        .map(|import| {
            (!import.is_static()).then(|| {
                let name = import.imported_name();
                let import_package = if import.is_on_demand() {
                    Some(name.as_str())
                } else {
                    split_qualified_name(&name).0
                };
                shared_segments(import_package, package)
            })
        })
        .collect();
    let best = scores.iter().flatten().max().copied();
    let group: Vec<usize> = match best {
        Some(best) => (0..scores.len()).filter(|&i| scores[i] == Some(best)).collect(),
        None => Vec::new(),
    };

    let before = group
        .iter()
        .copied()
        .find(|&i| unit.imports[i].imported_name().as_str() > fqn);
    match (before, group.last()) {
        (Some(idx), _) => insert_before(unit, idx, fqn),
        (None, Some(&last)) => unit
            .imports
            .insert(last + 1, ImportDeclaration::new_single_type(fqn, "\n")),
        // Only static imports: put the new one ahead of them.
        (None, None) => insert_before(unit, 0, fqn),
    }
}

/// Inserts before `imports[idx]`, taking over its leading trivia so a blank
/// line or comment above it stays above the group.
fn insert_before<'src>(unit: &mut CompilationUnit<'src>, idx: usize, fqn: &str) {
    let mut import: ImportDeclaration<'src> = ImportDeclaration::new_single_type(fqn, "");
    let displaced = &mut unit.imports[idx].import_kw.preceding_trivia;
    import.import_kw.preceding_trivia = std::mem::take(displaced);
    displaced.push(newline_trivia("\n"));
    unit.imports.insert(idx, import);
}

fn first_declaration_token_mut<'u, 'src>(
    unit: &'u mut CompilationUnit<'src>,
) -> Option<&'u mut JavaToken<'src>> {
    match unit.types.first_mut() {
        Some(TopLevelDeclaration::Type(declaration)) => match declaration.modifiers.first_mut() {
            Some(Modifier::Keyword(token)) => Some(token),
            Some(Modifier::Contextual(tokens)) => tokens.first_mut(),
            Some(Modifier::Annotation(annotation)) => Some(&mut annotation.at),
            None => declaration.kind_tokens.first_mut(),
        },
        Some(TopLevelDeclaration::Empty(token)) => Some(token),
        None => Some(&mut unit.eof),
    }
}

fn fold_package<'src>(unit: &mut CompilationUnit<'src>, package: &str, threshold: usize) {
    let already_on_demand = unit
        .imports
        .iter()
        .any(|import| !import.is_static() && import.is_on_demand() && import.imported_name() == package);
    if already_on_demand {
        return;
    }

    let positions: Vec<usize> = unit
        .imports
        .iter()
        .enumerate()
        .filter(|(_, import)| {
            !import.is_static()
                && !import.is_on_demand()
                && split_qualified_name(&import.imported_name()).0 == Some(package)
        })
        .map(|(idx, _)| idx)
        .collect();
    let Some(&first) = positions.first() else {
        return;
    };
    if positions.len() < threshold {
        return;
    }

    log::debug!("Folding {} imports of `{package}` into `{package}.*`.", positions.len());
    let mut folded: ImportDeclaration<'src> = ImportDeclaration::new_on_demand(package, "");
    folded.import_kw.preceding_trivia =
        std::mem::take(&mut unit.imports[first].import_kw.preceding_trivia);
    unit.imports[first] = folded;

    let mut idx = 0;
    unit.imports.retain(|_| {
        let keep = idx == first || !positions.contains(&idx);
        idx += 1;
        keep
    });
}
