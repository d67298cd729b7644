use crate::ast::Annotation;
use crate::ast::AstNode;
use crate::ast::Group;
use crate::ast::TokenTree;
use crate::token::JavaToken;
use inherent::inherent;

/// Which kind of type a [`TypeDeclaration`] declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    /// `@interface`
    AnnotationType,
}

/// A class, interface, enum, record or annotation type declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDeclaration<'src> {
    pub modifiers: Vec<Modifier<'src>>,
    pub kind: TypeKind,
    /// `class`, `interface`, `enum`, `record`, or `@` `interface`.
    pub kind_tokens: Vec<JavaToken<'src>>,
    pub name: JavaToken<'src>,
    /// Everything between the name and the body: type parameters, record
    /// components, `extends`, `implements` and `permits` clauses.
    pub header: Vec<TokenTree<'src>>,
    pub body: TypeBody<'src>,
}

/// `{ members }` of a type declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeBody<'src> {
    pub open: JavaToken<'src>,
    pub members: Vec<Member<'src>>,
    pub close: JavaToken<'src>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Member<'src> {
    Field(FieldDeclaration<'src>),
    Method(MethodDeclaration<'src>),
    Type(Box<TypeDeclaration<'src>>),
    Initializer(Initializer<'src>),
    /// The constant list at the start of an enum body.
    EnumConstants(EnumConstants<'src>),
    /// A stray `;`.
    Empty(JavaToken<'src>),
}

/// A field declaration: modifiers, then the type, declarators and
/// initializers as token trees, then `;`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDeclaration<'src> {
    pub modifiers: Vec<Modifier<'src>>,
    pub declaration: Vec<TokenTree<'src>>,
    pub semicolon: JavaToken<'src>,
}

/// A method, constructor, or annotation type element.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDeclaration<'src> {
    pub modifiers: Vec<Modifier<'src>>,
    /// Type parameters, return type, name, parameters, `throws` clause, and
    /// `default` value for annotation elements.
    pub signature: Vec<TokenTree<'src>>,
    pub body: MethodBody<'src>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MethodBody<'src> {
    Block(Group<'src>),
    /// Abstract, interface and annotation element declarations end in `;`.
    Semicolon(JavaToken<'src>),
}

/// An instance or `static` initializer block.
#[derive(Clone, Debug, PartialEq)]
pub struct Initializer<'src> {
    pub modifiers: Vec<Modifier<'src>>,
    pub block: Group<'src>,
}

/// Enum constants, with their arguments and bodies, up to the optional `;`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumConstants<'src> {
    pub trees: Vec<TokenTree<'src>>,
    pub semicolon: Option<JavaToken<'src>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modifier<'src> {
    /// `public`, `static`, `final`, ...
    Keyword(JavaToken<'src>),
    /// `sealed` or `non-sealed` (three tokens).
    Contextual(Vec<JavaToken<'src>>),
    Annotation(Annotation<'src>),
}

impl<'src> TypeDeclaration<'src> {
    /// Annotations among this declaration's modifiers.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation<'src>> {
        self.modifiers.iter().filter_map(|modifier| match modifier {
            Modifier::Annotation(annotation) => Some(annotation),
            _ => None,
        })
    }
}

#[inherent]
impl<'src> AstNode<'src> for TypeDeclaration<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        for modifier in &self.modifiers {
            modifier.for_each_token(f);
        }
        for token in &self.kind_tokens {
            f(token);
        }
        f(&self.name);
        for tree in &self.header {
            tree.for_each_token(f);
        }
        self.body.for_each_token(f);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for TypeBody<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        f(&self.open);
        for member in &self.members {
            member.for_each_token(f);
        }
        f(&self.close);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for Member<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Field(field) => {
                for modifier in &field.modifiers {
                    modifier.for_each_token(f);
                }
                for tree in &field.declaration {
                    tree.for_each_token(f);
                }
                f(&field.semicolon);
            },
            Self::Method(method) => {
                for modifier in &method.modifiers {
                    modifier.for_each_token(f);
                }
                for tree in &method.signature {
                    tree.for_each_token(f);
                }
                match &method.body {
                    MethodBody::Block(block) => block.for_each_token(f),
                    MethodBody::Semicolon(semicolon) => f(semicolon),
                }
            },
            Self::Type(declaration) => declaration.for_each_token(f),
            Self::Initializer(initializer) => {
                for modifier in &initializer.modifiers {
                    modifier.for_each_token(f);
                }
                initializer.block.for_each_token(f);
            },
            Self::EnumConstants(constants) => {
                for tree in &constants.trees {
                    tree.for_each_token(f);
                }
                if let Some(semicolon) = &constants.semicolon {
                    f(semicolon);
                }
            },
            Self::Empty(semicolon) => f(semicolon),
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for Modifier<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Keyword(token) => f(token),
            Self::Contextual(tokens) => {
                for token in tokens {
                    f(token);
                }
            },
            Self::Annotation(annotation) => annotation.for_each_token(f),
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}
