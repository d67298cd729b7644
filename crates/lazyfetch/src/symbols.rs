//! Name resolution for one compilation unit.
//!
//! A [`SymbolTable`] records what a unit makes visible: its own types, its
//! imports and its package. A [`Scope`] answers resolution queries against
//! a table, optionally including the imports that rewrites have registered
//! but not yet inserted.
//!
//! Simple type names resolve in the order Java uses: types declared in the
//! unit, single-type imports, pending imports, the unit's package,
//! on-demand imports, then `java.lang`. Anything that can't be found in the
//! unit or the [`TypeCatalog`] is unresolved.

use crate::catalog::TypeCatalog;
use crate::imports::ImportSet;
use crate::types::JavaType;
use crate::types::PrimitiveType;
use crate::types::split_qualified_name;
use indexmap::IndexMap;
use indexmap::IndexSet;
use lazyfetch_parser::ast::Annotation;
use lazyfetch_parser::ast::AnnotationArgument;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::ast::ElementValue;
use lazyfetch_parser::ast::Expression;
use lazyfetch_parser::ast::Member;
use lazyfetch_parser::ast::TokenTree;
use lazyfetch_parser::ast::TopLevelDeclaration;
use lazyfetch_parser::ast::TypeDeclaration;
use lazyfetch_parser::token::JavaToken;
use lazyfetch_parser::token::JavaTokenKind;
use lazyfetch_parser::token::Keyword;

#[derive(Clone, Debug)]
pub struct SymbolTable<'c> {
    catalog: &'c TypeCatalog,
    package: Option<String>,
    /// Simple name to fully qualified name of every type declared in the
    /// unit, nested types included.
    declared: IndexMap<String, String>,
    single_type: IndexMap<String, String>,
    on_demand: IndexSet<String>,
    /// Member name to the fully qualified name of its owning type.
    static_single: IndexMap<String, String>,
    static_on_demand: IndexSet<String>,
}

impl<'c> SymbolTable<'c> {
    pub fn from_unit(unit: &CompilationUnit<'_>, catalog: &'c TypeCatalog) -> Self {
        let mut table = Self {
            catalog,
            package: unit.package_name(),
            declared: IndexMap::new(),
            single_type: IndexMap::new(),
            on_demand: IndexSet::new(),
            static_single: IndexMap::new(),
            static_on_demand: IndexSet::new(),
        };

        for import in &unit.imports {
            let name = import.imported_name();
            match (import.is_static(), import.is_on_demand()) {
                (false, false) => {
                    let (_, simple) = split_qualified_name(&name);
                    table.single_type.entry(simple.to_string()).or_insert(name);
                },
                (false, true) => {
                    table.on_demand.insert(name);
                },
                (true, false) => {
                    if let (Some(owner), member) = split_qualified_name(&name) {
                        table
                            .static_single
                            .entry(member.to_string())
                            .or_insert_with(|| owner.to_string());
                    }
                },
                (true, true) => {
                    table.static_on_demand.insert(name);
                },
            }
        }

        for declaration in &unit.types {
            if let TopLevelDeclaration::Type(declaration) = declaration {
                let qualifier = table.package.clone();
                table.declare(qualifier.as_deref(), declaration);
            }
        }
        table
    }

    fn declare(&mut self, qualifier: Option<&str>, declaration: &TypeDeclaration<'_>) {
        let simple = declaration.name.text();
        let fqn = match qualifier {
            Some(qualifier) => format!("{qualifier}.{simple}"),
            None => simple.to_string(),
        };
        for member in &declaration.body.members {
            if let Member::Type(nested) = member {
                self.declare(Some(&fqn), nested);
            }
        }
        self.declared.entry(simple.to_string()).or_insert(fqn);
    }

    pub fn catalog(&self) -> &'c TypeCatalog {
        self.catalog
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// A scope over this table alone.
    pub fn scope(&self) -> Scope<'_, 'c> {
        Scope {
            symbols: self,
            pending: None,
        }
    }

    /// A scope over this table plus the imports registered in `pending`.
    pub fn scope_with<'a>(&'a self, pending: &'a ImportSet) -> Scope<'a, 'c> {
        Scope {
            symbols: self,
            pending: Some(pending),
        }
    }

    fn is_declared_fqn(&self, fqn: &str) -> bool {
        self.declared.values().any(|declared| declared == fqn)
    }
}

/// Resolution queries over a [`SymbolTable`].
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a, 'c> {
    symbols: &'a SymbolTable<'c>,
    pending: Option<&'a ImportSet>,
}

impl<'a, 'c> Scope<'a, 'c> {
    pub fn catalog(&self) -> &'c TypeCatalog {
        self.symbols.catalog
    }

    fn is_known(&self, fqn: &str) -> bool {
        self.symbols.catalog.contains(fqn) || self.symbols.is_declared_fqn(fqn)
    }

    /// Resolves a simple type name to a fully qualified name.
    pub fn resolve_simple_type(&self, name: &str) -> Option<String> {
        let symbols = self.symbols;
        if let Some(fqn) = symbols.declared.get(name) {
            return Some(fqn.clone());
        }
        if let Some(fqn) = symbols.single_type.get(name) {
            return Some(fqn.clone());
        }
        if let Some(fqn) = self.pending.and_then(|pending| pending.added_type(name)) {
            return Some(fqn.to_string());
        }
        if let Some(package) = &symbols.package {
            let candidate = format!("{package}.{name}");
            if symbols.catalog.contains(&candidate) {
                return Some(candidate);
            }
        }

        let mut on_demand_hits = symbols
            .on_demand
            .iter()
            .map(|package| format!("{package}.{name}"))
            .filter(|candidate| symbols.catalog.contains(candidate));
        if let Some(hit) = on_demand_hits.next() {
            if let Some(other) = on_demand_hits.next() {
                log::trace!("`{name}` is ambiguous between `{hit}` and `{other}`.");
                return None;
            }
            return Some(hit);
        }

        let candidate = format!("java.lang.{name}");
        if symbols.catalog.contains(&candidate) {
            return Some(candidate);
        }
        log::trace!("Unresolved type name `{name}`.");
        None
    }

    /// Resolves a possibly qualified type name (`FetchType`,
    /// `Outer.Inner`, `jakarta.persistence.FetchType`).
    pub fn resolve_type_name(&self, dotted: &str) -> Option<String> {
        let Some((first, rest)) = dotted.split_once('.') else {
            return self.resolve_simple_type(dotted);
        };
        if let Some(outer) = self.resolve_simple_type(first) {
            let nested = format!("{outer}.{rest}");
            if self.is_known(&nested) {
                return Some(nested);
            }
        }
        if self.is_known(dotted) {
            return Some(dotted.to_string());
        }
        log::trace!("Unresolved type name `{dotted}`.");
        None
    }

    /// The owning type of a statically imported member.
    pub fn resolve_static_member(&self, member: &str) -> Option<String> {
        let symbols = self.symbols;
        if let Some(owner) = symbols.static_single.get(member) {
            return Some(owner.clone());
        }
        let mut owners = symbols
            .static_on_demand
            .iter()
            .filter(|owner| symbols.catalog.has_enum_constant(owner, member));
        match (owners.next(), owners.next()) {
            (Some(owner), None) => Some(owner.clone()),
            _ => None,
        }
    }

    /// The fully qualified name of the annotation's type.
    pub fn annotation_type(&self, annotation: &Annotation<'_>) -> Option<String> {
        self.resolve_type_name(&annotation.name.to_dotted())
    }

    /// The type of an annotation argument: the declared element type when
    /// the argument is named and the annotation type is known, otherwise the
    /// type of its value.
    pub fn argument_type(
        &self,
        argument: &AnnotationArgument<'_>,
        annotation_type: Option<&str>,
    ) -> Option<JavaType> {
        let declared = annotation_type.zip(argument.name()).and_then(|(fqn, element)| {
            self.symbols.catalog.element_type(fqn, element)
        });
        match declared {
            Some(type_) => Some(type_.clone()),
            None => self.value_type(argument.value()),
        }
    }

    pub fn value_type(&self, value: &ElementValue<'_>) -> Option<JavaType> {
        match value {
            ElementValue::Expression(expression) => self.expression_type(expression),
            ElementValue::Annotation(annotation) => {
                self.annotation_type(annotation).map(JavaType::Class)
            },
            ElementValue::ArrayInitializer(array) => array
                .values
                .first()
                .and_then(|first| self.value_type(first))
                .map(JavaType::array_of),
        }
    }

    pub fn expression_type(&self, expression: &Expression<'_>) -> Option<JavaType> {
        self.trees_type(&expression.trees)
    }

    fn trees_type(&self, trees: &[TokenTree<'_>]) -> Option<JavaType> {
        let tokens: Option<Vec<&JavaToken<'_>>> = trees.iter().map(TokenTree::as_token).collect();
        let Some(tokens) = tokens else {
            // `(expr)`
            return match trees {
                [TokenTree::Group(group)] => self.trees_type(&group.trees),
                _ => None,
            };
        };

        match tokens.as_slice() {
            [] => None,
            [token] => self.single_token_type(token),
            [sign, literal]
                if matches!(&sign.kind, JavaTokenKind::Operator(op) if op == "-" || op == "+") =>
            {
                self.single_token_type(literal)
                    .filter(|type_| matches!(type_, JavaType::Primitive(_)))
            },
            [first, ..] if is_string_literal(first) => Some(JavaType::string()),
            [.., dot, class]
                if matches!(dot.kind, JavaTokenKind::Dot)
                    && class.kind.is_keyword(Keyword::Class) =>
            {
                Some(JavaType::class("java.lang.Class"))
            },
            _ => self.enum_constant_type(&tokens),
        }
    }

    fn single_token_type(&self, token: &JavaToken<'_>) -> Option<JavaType> {
        let primitive = |p| Some(JavaType::Primitive(p));
        match &token.kind {
            JavaTokenKind::IntegerLiteral(text) => {
                if text.ends_with(['l', 'L']) {
                    primitive(PrimitiveType::Long)
                } else {
                    primitive(PrimitiveType::Int)
                }
            },
            JavaTokenKind::FloatingPointLiteral(text) => {
                if text.ends_with(['f', 'F']) {
                    primitive(PrimitiveType::Float)
                } else {
                    primitive(PrimitiveType::Double)
                }
            },
            JavaTokenKind::CharacterLiteral(_) => primitive(PrimitiveType::Char),
            JavaTokenKind::True | JavaTokenKind::False => primitive(PrimitiveType::Boolean),
            JavaTokenKind::StringLiteral(_) | JavaTokenKind::TextBlock(_) => {
                Some(JavaType::string())
            },
            JavaTokenKind::Identifier(name) => {
                let owner = self.resolve_static_member(name)?;
                self.symbols
                    .catalog
                    .has_enum_constant(&owner, name)
                    .then(|| JavaType::Class(owner))
            },
            _ => None,
        }
    }

    /// `Type.CONSTANT` or `a.b.Type.CONSTANT`, for enum types in the catalog.
    fn enum_constant_type(&self, tokens: &[&JavaToken<'_>]) -> Option<JavaType> {
        let mut segments = Vec::with_capacity(tokens.len() / 2 + 1);
        for (idx, token) in tokens.iter().enumerate() {
            match (&token.kind, idx % 2) {
                (JavaTokenKind::Identifier(name), 0) => segments.push(name.as_ref()),
                (JavaTokenKind::Dot, 1) => {},
                _ => return None,
            }
        }
        if tokens.len() % 2 == 0 {
            return None;
        }

        let (constant, qualifier) = segments.split_last()?;
        if qualifier.is_empty() {
            return None;
        }
        let owner = self.resolve_type_name(&qualifier.join("."))?;
        self.symbols
            .catalog
            .has_enum_constant(&owner, constant)
            .then(|| JavaType::Class(owner))
    }
}

fn is_string_literal(token: &JavaToken<'_>) -> bool {
    matches!(
        token.kind,
        JavaTokenKind::StringLiteral(_) | JavaTokenKind::TextBlock(_)
    )
}
