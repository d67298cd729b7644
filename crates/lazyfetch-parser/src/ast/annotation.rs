use crate::ast::AstNode;
use crate::ast::QualifiedName;
use crate::ast::TokenTree;
use crate::token::JavaToken;
use crate::JavaSourceSpan;
use inherent::inherent;

/// An annotation such as `@ManyToOne`, `@Table(name = "orders")` or
/// `@jakarta.persistence.OneToOne(optional = false)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation<'src> {
    pub at: JavaToken<'src>,
    pub name: QualifiedName<'src>,
    pub arguments: Option<AnnotationArguments<'src>>,
}

/// The parenthesised argument list of an [`Annotation`].
///
/// `commas[i]` is the comma following `arguments[i]`; there is one comma
/// fewer than there are arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationArguments<'src> {
    pub open: JavaToken<'src>,
    pub arguments: Vec<AnnotationArgument<'src>>,
    pub commas: Vec<JavaToken<'src>>,
    pub close: JavaToken<'src>,
}

/// A single annotation argument: `name = value`, or a bare value (the
/// `value` element shorthand).
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationArgument<'src> {
    Named {
        name: JavaToken<'src>,
        equals: JavaToken<'src>,
        value: ElementValue<'src>,
    },
    Value(ElementValue<'src>),
}

/// The value of an annotation element.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementValue<'src> {
    Expression(Expression<'src>),
    Annotation(Box<Annotation<'src>>),
    ArrayInitializer(ElementValueArray<'src>),
}

/// `{ value, value, ... }` in element value position. A trailing comma is
/// allowed, so `commas` may be as long as `values`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementValueArray<'src> {
    pub open: JavaToken<'src>,
    pub values: Vec<ElementValue<'src>>,
    pub commas: Vec<JavaToken<'src>>,
    pub close: JavaToken<'src>,
}

/// An unparsed expression (`FetchType.EAGER`, `"orders"`, `1 << 4`,
/// `Customer.class`). Never empty when produced by the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression<'src> {
    pub trees: Vec<TokenTree<'src>>,
}

impl<'src> Annotation<'src> {
    /// Source span from the `@` through the closing parenthesis (or the last
    /// name segment when there is no argument list).
    pub fn span(&self) -> JavaSourceSpan {
        let end = match &self.arguments {
            Some(arguments) => &arguments.close.span,
            None => match self.name.segments.last() {
                Some(segment) => &segment.identifier.span,
                None => &self.at.span,
            },
        };
        self.at.span.to(end)
    }

    /// The annotation's arguments, or an empty slice for marker annotations
    /// and `@Foo()`.
    pub fn argument_list(&self) -> &[AnnotationArgument<'src>] {
        match &self.arguments {
            Some(arguments) => &arguments.arguments,
            None => &[],
        }
    }

    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        f(&mut self.at);
        self.name.for_each_token_mut(f);
        if let Some(arguments) = &mut self.arguments {
            arguments.for_each_token_mut(f);
        }
    }

    /// Detaches this annotation from the source text it was parsed from.
    pub fn into_owned<'any>(self) -> Annotation<'any> {
        Annotation {
            at: self.at.into_owned(),
            name: self.name.into_owned(),
            arguments: self.arguments.map(AnnotationArguments::into_owned),
        }
    }
}

impl<'src> AnnotationArguments<'src> {
    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        f(&mut self.open);
        let mut commas = self.commas.iter_mut();
        for argument in &mut self.arguments {
            argument.for_each_token_mut(f);
            if let Some(comma) = commas.next() {
                f(comma);
            }
        }
        for comma in commas {
            f(comma);
        }
        f(&mut self.close);
    }

    pub fn into_owned<'any>(self) -> AnnotationArguments<'any> {
        AnnotationArguments {
            open: self.open.into_owned(),
            arguments: self
                .arguments
                .into_iter()
                .map(AnnotationArgument::into_owned)
                .collect(),
            commas: self.commas.into_iter().map(JavaToken::into_owned).collect(),
            close: self.close.into_owned(),
        }
    }
}

impl<'src> AnnotationArgument<'src> {
    /// The element name for `name = value` arguments.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name.text()),
            Self::Value(_) => None,
        }
    }

    pub fn value(&self) -> &ElementValue<'src> {
        match self {
            Self::Named { value, .. } | Self::Value(value) => value,
        }
    }

    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        match self {
            Self::Named { name, equals, value } => {
                f(name);
                f(equals);
                value.for_each_token_mut(f);
            },
            Self::Value(value) => value.for_each_token_mut(f),
        }
    }

    pub fn into_owned<'any>(self) -> AnnotationArgument<'any> {
        match self {
            Self::Named { name, equals, value } => AnnotationArgument::Named {
                name: name.into_owned(),
                equals: equals.into_owned(),
                value: value.into_owned(),
            },
            Self::Value(value) => AnnotationArgument::Value(value.into_owned()),
        }
    }
}

impl<'src> ElementValue<'src> {
    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        match self {
            Self::Expression(expression) => {
                for tree in &mut expression.trees {
                    tree.for_each_token_mut(f);
                }
            },
            Self::Annotation(annotation) => annotation.for_each_token_mut(f),
            Self::ArrayInitializer(array) => {
                f(&mut array.open);
                let mut commas = array.commas.iter_mut();
                for value in &mut array.values {
                    value.for_each_token_mut(f);
                    if let Some(comma) = commas.next() {
                        f(comma);
                    }
                }
                for comma in commas {
                    f(comma);
                }
                f(&mut array.close);
            },
        }
    }

    pub fn into_owned<'any>(self) -> ElementValue<'any> {
        match self {
            Self::Expression(expression) => ElementValue::Expression(Expression {
                trees: expression
                    .trees
                    .into_iter()
                    .map(TokenTree::into_owned)
                    .collect(),
            }),
            Self::Annotation(annotation) => {
                ElementValue::Annotation(Box::new(annotation.into_owned()))
            },
            Self::ArrayInitializer(array) => {
                ElementValue::ArrayInitializer(ElementValueArray {
                    open: array.open.into_owned(),
                    values: array
                        .values
                        .into_iter()
                        .map(ElementValue::into_owned)
                        .collect(),
                    commas: array.commas.into_iter().map(JavaToken::into_owned).collect(),
                    close: array.close.into_owned(),
                })
            },
        }
    }
}

#[inherent]
impl<'src> AstNode<'src> for Annotation<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        f(&self.at);
        self.name.for_each_token(f);
        if let Some(arguments) = &self.arguments {
            arguments.for_each_token(f);
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for AnnotationArguments<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        f(&self.open);
        let mut commas = self.commas.iter();
        for argument in &self.arguments {
            argument.for_each_token(f);
            if let Some(comma) = commas.next() {
                f(comma);
            }
        }
        for comma in commas {
            f(comma);
        }
        f(&self.close);
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for AnnotationArgument<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Named { name, equals, value } => {
                f(name);
                f(equals);
                value.for_each_token(f);
            },
            Self::Value(value) => value.for_each_token(f),
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for ElementValue<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        match self {
            Self::Expression(expression) => expression.for_each_token(f),
            Self::Annotation(annotation) => annotation.for_each_token(f),
            Self::ArrayInitializer(array) => {
                f(&array.open);
                let mut commas = array.commas.iter();
                for value in &array.values {
                    value.for_each_token(f);
                    if let Some(comma) = commas.next() {
                        f(comma);
                    }
                }
                for comma in commas {
                    f(comma);
                }
                f(&array.close);
            },
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}

#[inherent]
impl<'src> AstNode<'src> for Expression<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        for tree in &self.trees {
            tree.for_each_token(f);
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}
