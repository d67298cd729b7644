use crate::ast::Annotation;
use crate::ast::AstNode;
use crate::ast::Member;
use crate::ast::QualifiedName;
use crate::ast::TypeDeclaration;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::token::Keyword;
use inherent::inherent;

/// A parsed `.java` file.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilationUnit<'src> {
    pub package: Option<PackageDeclaration<'src>>,
    pub imports: Vec<ImportDeclaration<'src>>,
    pub types: Vec<TopLevelDeclaration<'src>>,
    /// The end-of-input token, which carries any trailing trivia.
    pub eof: JavaToken<'src>,
}

/// `package com.example.orders;`, optionally preceded by annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageDeclaration<'src> {
    pub annotations: Vec<Annotation<'src>>,
    pub package_kw: JavaToken<'src>,
    pub name: QualifiedName<'src>,
    pub semicolon: JavaToken<'src>,
}

/// `import [static] a.b.C[.*];`
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDeclaration<'src> {
    pub import_kw: JavaToken<'src>,
    pub static_kw: Option<JavaToken<'src>>,
    pub name: QualifiedName<'src>,
    pub wildcard: Option<ImportWildcard<'src>>,
    pub semicolon: JavaToken<'src>,
}

/// The trailing `.*` of an on-demand import.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportWildcard<'src> {
    pub dot: JavaToken<'src>,
    pub star: JavaToken<'src>,
}

/// A top-level declaration after the imports.
#[derive(Clone, Debug, PartialEq)]
pub enum TopLevelDeclaration<'src> {
    Type(TypeDeclaration<'src>),
    /// A stray `;`.
    Empty(JavaToken<'src>),
}

impl CompilationUnit<'_> {
    /// The dotted package name, if the unit declares one.
    pub fn package_name(&self) -> Option<String> {
        self.package.as_ref().map(|package| package.name.to_dotted())
    }

    /// Simple names of every type declared in this unit, nested types
    /// included.
    pub fn declared_type_names(&self) -> Vec<String> {
        fn collect(declaration: &TypeDeclaration<'_>, names: &mut Vec<String>) {
            names.push(declaration.name.text().to_string());
            for member in &declaration.body.members {
                if let Member::Type(nested) = member {
                    collect(nested, names);
                }
            }
        }

        let mut names = Vec::new();
        for declaration in &self.types {
            if let TopLevelDeclaration::Type(declaration) = declaration {
                collect(declaration, &mut names);
            }
        }
        names
    }
}

impl<'src> ImportDeclaration<'src> {
    /// Builds `import <fqn>;` from synthetic tokens. `leading` is the trivia
    /// placed before the `import` keyword.
    pub fn new_single_type(fqn: &str, leading: &str) -> Self {
        ImportDeclaration {
            import_kw: JavaToken::synthetic(JavaTokenKind::Keyword(Keyword::Import), leading),
            static_kw: None,
            name: QualifiedName::synthetic(fqn, " "),
            wildcard: None,
            semicolon: JavaToken::synthetic(JavaTokenKind::Semicolon, ""),
        }
    }

    /// Builds `import <package>.*;` from synthetic tokens.
    pub fn new_on_demand(package: &str, leading: &str) -> Self {
        ImportDeclaration {
            wildcard: Some(ImportWildcard {
                dot: JavaToken::synthetic(JavaTokenKind::Dot, ""),
                star: JavaToken::synthetic(JavaTokenKind::operator_owned("*".to_string()), ""),
            }),
            ..Self::new_single_type(package, leading)
        }
    }

    pub fn is_static(&self) -> bool {
        self.static_kw.is_some()
    }

    pub fn is_on_demand(&self) -> bool {
        self.wildcard.is_some()
    }

    /// The imported name without the `.*` suffix.
    pub fn imported_name(&self) -> String {
        self.name.to_dotted()
    }
}

#[inherent]
impl<'src> AstNode<'src> for CompilationUnit<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        if let Some(package) = &self.package {
            package.for_each_token(f);
        }
        for import in &self.imports {
            import.for_each_token(f);
        }
        for declaration in &self.types {
            declaration.for_each_token(f);
        }
        f(&self.eof);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for PackageDeclaration<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        for annotation in &self.annotations {
            annotation.for_each_token(f);
        }
        f(&self.package_kw);
        self.name.for_each_token(f);
        f(&self.semicolon);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for ImportDeclaration<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        f(&self.import_kw);
        if let Some(static_kw) = &self.static_kw {
            f(static_kw);
        }
        self.name.for_each_token(f);
        if let Some(wildcard) = &self.wildcard {
            f(&wildcard.dot);
            f(&wildcard.star);
        }
        f(&self.semicolon);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for TopLevelDeclaration<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Type(declaration) => declaration.for_each_token(f),
            Self::Empty(semicolon) => f(semicolon),
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}
