use crate::ast::Annotation;
use crate::ast::AstNode;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use inherent::inherent;

/// The bracket pair enclosing a [`Group`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// `( ... )`
    Paren,
    /// `{ ... }`
    Brace,
    /// `[ ... ]`
    Bracket,
}

impl Delimiter {
    /// Returns the delimiter opened by `kind`, if `kind` is an opening
    /// bracket.
    pub fn from_open(kind: &JavaTokenKind<'_>) -> Option<Self> {
        match kind {
            JavaTokenKind::ParenOpen => Some(Self::Paren),
            JavaTokenKind::CurlyBraceOpen => Some(Self::Brace),
            JavaTokenKind::SquareBracketOpen => Some(Self::Bracket),
            _ => None,
        }
    }

    /// Returns `true` if `kind` closes this delimiter.
    pub fn is_closed_by(&self, kind: &JavaTokenKind<'_>) -> bool {
        matches!(
            (self, kind),
            (Self::Paren, JavaTokenKind::ParenClose)
                | (Self::Brace, JavaTokenKind::CurlyBraceClose)
                | (Self::Bracket, JavaTokenKind::SquareBracketClose)
        )
    }

    pub fn open_text(&self) -> &'static str {
        match self {
            Self::Paren => "(",
            Self::Brace => "{",
            Self::Bracket => "[",
        }
    }

    pub fn close_text(&self) -> &'static str {
        match self {
            Self::Paren => ")",
            Self::Brace => "}",
            Self::Bracket => "]",
        }
    }
}

/// A balanced bracket pair and the token trees between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Group<'src> {
    pub delimiter: Delimiter,
    pub open: JavaToken<'src>,
    pub trees: Vec<TokenTree<'src>>,
    pub close: JavaToken<'src>,
}

/// An unparsed stretch of source below the declaration level.
///
/// Annotations are still recognised inside token trees so that annotations
/// on parameters, local variables, type arguments or record components can
/// be visited like any other annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenTree<'src> {
    Token(JavaToken<'src>),
    Group(Group<'src>),
    Annotation(Box<Annotation<'src>>),
}

impl<'src> TokenTree<'src> {
    /// Returns the token if this tree is a single token.
    pub fn as_token(&self) -> Option<&JavaToken<'src>> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        match self {
            Self::Token(token) => f(token),
            Self::Group(group) => group.for_each_token_mut(f),
            Self::Annotation(annotation) => annotation.for_each_token_mut(f),
        }
    }

    pub fn into_owned<'any>(self) -> TokenTree<'any> {
        match self {
            Self::Token(token) => TokenTree::Token(token.into_owned()),
            Self::Group(group) => TokenTree::Group(group.into_owned()),
            Self::Annotation(annotation) => {
                TokenTree::Annotation(Box::new(annotation.into_owned()))
            },
        }
    }
}

impl<'src> Group<'src> {
    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        f(&mut self.open);
        for tree in &mut self.trees {
            tree.for_each_token_mut(f);
        }
        f(&mut self.close);
    }

    pub fn into_owned<'any>(self) -> Group<'any> {
        Group {
            delimiter: self.delimiter,
            open: self.open.into_owned(),
            trees: self.trees.into_iter().map(TokenTree::into_owned).collect(),
            close: self.close.into_owned(),
        }
    }
}

#[inherent]
impl<'src> AstNode<'src> for TokenTree<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Token(token) => f(token),
            Self::Group(group) => group.for_each_token(f),
            Self::Annotation(annotation) => annotation.for_each_token(f),
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for Group<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        f(&self.open);
        for tree in &self.trees {
            tree.for_each_token(f);
        }
        f(&self.close);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}
