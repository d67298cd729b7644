//! Depth-first fold over an owned compilation unit that replaces matched
//! association annotations.
//!
//! Every node is moved into the fold and moved back out; only replaced
//! annotations are newly allocated. Annotations are visited wherever they
//! appear: on types and members, on parameters and type arguments, inside
//! method bodies, and nested inside other annotations' arguments (inner
//! annotations are visited before the annotation that contains them).

use crate::argument_rewriter::rewrite_arguments;
use crate::catalog::AssociationTargets;
use crate::catalog::TypeCatalog;
use crate::imports::ImportSet;
use crate::matcher::AnnotationMatch;
use crate::matcher::match_annotation;
use crate::symbols::SymbolTable;
use crate::template::ReplacementDirective;
use crate::template::TemplateSynthesizer;
use crate::template::fetch_type_reference;
use crate::template_synthesis_error::TemplateSynthesisError;
use lazyfetch_parser::ast::Annotation;
use lazyfetch_parser::ast::AnnotationArgument;
use lazyfetch_parser::ast::AnnotationArguments;
use lazyfetch_parser::ast::CompilationUnit;
use lazyfetch_parser::ast::ElementValue;
use lazyfetch_parser::ast::ElementValueArray;
use lazyfetch_parser::ast::Expression;
use lazyfetch_parser::ast::FieldDeclaration;
use lazyfetch_parser::ast::Group;
use lazyfetch_parser::ast::Initializer;
use lazyfetch_parser::ast::Member;
use lazyfetch_parser::ast::MethodBody;
use lazyfetch_parser::ast::MethodDeclaration;
use lazyfetch_parser::ast::Modifier;
use lazyfetch_parser::ast::PackageDeclaration;
use lazyfetch_parser::ast::TokenTree;
use lazyfetch_parser::ast::TopLevelDeclaration;
use lazyfetch_parser::ast::TypeBody;
use lazyfetch_parser::ast::TypeDeclaration;
use lazyfetch_parser::JavaSourceSpan;

/// Groups nest as deep as the parser allows; the fold grows the stack
/// past this much headroom.
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// One annotation that was replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct RewriteSite {
    pub kind: AnnotationMatch,
    pub span: JavaSourceSpan,
    /// The original annotation, without leading trivia.
    pub before: String,
    /// The replacement, without leading trivia.
    pub after: String,
}

impl RewriteSite {
    pub fn location(&self) -> String {
        self.span.format_location()
    }
}

/// The rewritten unit and what happened to it.
#[derive(Debug)]
pub struct RewriteOutcome<'src> {
    pub unit: CompilationUnit<'src>,
    /// The unit's imports plus everything replacements registered.
    pub imports: ImportSet,
    pub sites: Vec<RewriteSite>,
    pub failures: Vec<TemplateSynthesisError>,
}

#[derive(Debug)]
pub struct RewriteDriver<'c> {
    symbols: SymbolTable<'c>,
    targets: &'c AssociationTargets,
    imports: ImportSet,
    sites: Vec<RewriteSite>,
    failures: Vec<TemplateSynthesisError>,
}

impl<'c> RewriteDriver<'c> {
    /// Prepares a driver for `unit`, resolving names against its imports
    /// and `catalog`.
    pub fn new(
        unit: &CompilationUnit<'_>,
        catalog: &'c TypeCatalog,
        targets: &'c AssociationTargets,
    ) -> Self {
        Self {
            symbols: SymbolTable::from_unit(unit, catalog),
            targets,
            imports: ImportSet::from_unit(unit),
            sites: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Folds `unit`. A site whose replacement can't be synthesized keeps
    /// its original annotation and is reported in
    /// [`RewriteOutcome::failures`]; other sites are unaffected.
    pub fn rewrite<'src>(mut self, unit: CompilationUnit<'src>) -> RewriteOutcome<'src> {
        let unit = CompilationUnit {
            package: unit.package.map(|package| self.fold_package(package)),
            types: unit
                .types
                .into_iter()
                .map(|declaration| match declaration {
                    TopLevelDeclaration::Type(declaration) => {
                        TopLevelDeclaration::Type(self.fold_type_declaration(declaration))
                    },
                    empty @ TopLevelDeclaration::Empty(_) => empty,
                })
                .collect(),
            ..unit
        };
        log::debug!(
            "Rewrote {} annotation(s), {} failure(s).",
            self.sites.len(),
            self.failures.len(),
        );
        RewriteOutcome {
            unit,
            imports: self.imports,
            sites: self.sites,
            failures: self.failures,
        }
    }

    fn fold_package<'src>(&mut self, package: PackageDeclaration<'src>) -> PackageDeclaration<'src> {
        PackageDeclaration {
            annotations: package
                .annotations
                .into_iter()
                .map(|annotation| self.fold_annotation(annotation))
                .collect(),
            ..package
        }
    }

    fn fold_type_declaration<'src>(
        &mut self,
        declaration: TypeDeclaration<'src>,
    ) -> TypeDeclaration<'src> {
        TypeDeclaration {
            modifiers: self.fold_modifiers(declaration.modifiers),
            header: self.fold_trees(declaration.header),
            body: self.fold_body(declaration.body),
            ..declaration
        }
    }

    fn fold_body<'src>(&mut self, body: TypeBody<'src>) -> TypeBody<'src> {
        TypeBody {
            members: body
                .members
                .into_iter()
                .map(|member| self.fold_member(member))
                .collect(),
            ..body
        }
    }

    fn fold_member<'src>(&mut self, member: Member<'src>) -> Member<'src> {
        match member {
            Member::Field(field) => Member::Field(FieldDeclaration {
                modifiers: self.fold_modifiers(field.modifiers),
                declaration: self.fold_trees(field.declaration),
                ..field
            }),
            Member::Method(method) => Member::Method(MethodDeclaration {
                modifiers: self.fold_modifiers(method.modifiers),
                signature: self.fold_trees(method.signature),
                body: match method.body {
                    MethodBody::Block(block) => MethodBody::Block(self.fold_group(block)),
                    semicolon @ MethodBody::Semicolon(_) => semicolon,
                },
            }),
            Member::Type(nested) => Member::Type(Box::new(self.fold_type_declaration(*nested))),
            Member::Initializer(initializer) => Member::Initializer(Initializer {
                modifiers: self.fold_modifiers(initializer.modifiers),
                block: self.fold_group(initializer.block),
            }),
            Member::EnumConstants(mut constants) => {
                constants.trees = self.fold_trees(constants.trees);
                Member::EnumConstants(constants)
            },
            empty @ Member::Empty(_) => empty,
        }
    }

    fn fold_modifiers<'src>(&mut self, modifiers: Vec<Modifier<'src>>) -> Vec<Modifier<'src>> {
        modifiers
            .into_iter()
            .map(|modifier| match modifier {
                Modifier::Annotation(annotation) => {
                    Modifier::Annotation(self.fold_annotation(annotation))
                },
                other => other,
            })
            .collect()
    }

    fn fold_trees<'src>(&mut self, trees: Vec<TokenTree<'src>>) -> Vec<TokenTree<'src>> {
        trees
            .into_iter()
            .map(|tree| match tree {
                TokenTree::Group(group) => TokenTree::Group(self.fold_group(group)),
                TokenTree::Annotation(annotation) => {
                    TokenTree::Annotation(Box::new(self.fold_annotation(*annotation)))
                },
                token @ TokenTree::Token(_) => token,
            })
            .collect()
    }

    fn fold_group<'src>(&mut self, group: Group<'src>) -> Group<'src> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || Group {
            trees: self.fold_trees(group.trees),
            ..group
        })
    }

    fn fold_annotation<'src>(&mut self, annotation: Annotation<'src>) -> Annotation<'src> {
        let annotation = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || Annotation {
            arguments: annotation
                .arguments
                .map(|arguments| self.fold_arguments(arguments)),
            ..annotation
        });
        self.rewrite_annotation(annotation)
    }

    fn fold_arguments<'src>(&mut self, arguments: AnnotationArguments<'src>) -> AnnotationArguments<'src> {
        AnnotationArguments {
            arguments: arguments
                .arguments
                .into_iter()
                .map(|argument| match argument {
                    AnnotationArgument::Named { name, equals, value } => AnnotationArgument::Named {
                        name,
                        equals,
                        value: self.fold_value(value),
                    },
                    AnnotationArgument::Value(value) => {
                        AnnotationArgument::Value(self.fold_value(value))
                    },
                })
                .collect(),
            ..arguments
        }
    }

    fn fold_value<'src>(&mut self, value: ElementValue<'src>) -> ElementValue<'src> {
        match value {
            ElementValue::Expression(expression) => ElementValue::Expression(Expression {
                trees: self.fold_trees(expression.trees),
            }),
            ElementValue::Annotation(annotation) => {
                ElementValue::Annotation(Box::new(self.fold_annotation(*annotation)))
            },
            ElementValue::ArrayInitializer(array) => ElementValue::ArrayInitializer(ElementValueArray {
                values: array
                    .values
                    .into_iter()
                    .map(|value| self.fold_value(value))
                    .collect(),
                ..array
            }),
        }
    }

    /// Matcher, then argument rewriter, then synthesizer. Returns the
    /// original node unless a replacement with different text was built.
    fn rewrite_annotation<'src>(&mut self, annotation: Annotation<'src>) -> Annotation<'src> {
        let scope = self.symbols.scope_with(&self.imports);
        let kind = match_annotation(&annotation, &scope, self.targets);
        if !kind.is_match() {
            return annotation;
        }

        let rewritten = rewrite_arguments(&annotation, kind, &scope, self.targets);
        let fetch_type = fetch_type_reference(&scope, self.targets);
        let directive = ReplacementDirective::new(
            annotation.name.to_dotted(),
            rewritten.render(&fetch_type.text),
        );

        let synthesizer = TemplateSynthesizer::new(&self.symbols, self.targets);
        match synthesizer.synthesize(directive, &annotation, kind, &fetch_type, &mut self.imports) {
            Ok(replacement) => {
                let before = annotation.to_source();
                let after = replacement.to_source();
                if before == after {
                    log::trace!("`{}` is already lazy.", before.trim());
                    return annotation;
                }
                let site = RewriteSite {
                    kind,
                    span: annotation.span(),
                    before: before.trim().to_string(),
                    after: after.trim().to_string(),
                };
                log::debug!("{}: `{}` -> `{}`", site.location(), site.before, site.after);
                self.sites.push(site);
                replacement
            },
            Err(error) => {
                log::warn!("{error}");
                self.failures.push(error);
                annotation
            },
        }
    }
}
