use crate::ast::AstNode;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::JavaSourceSpan;
use inherent::inherent;

/// One segment of a [`QualifiedName`]: an identifier, preceded by a `.`
/// for every segment after the first.
#[derive(Clone, Debug, PartialEq)]
pub struct NameSegment<'src> {
    pub dot: Option<JavaToken<'src>>,
    pub identifier: JavaToken<'src>,
}

/// A possibly-qualified name such as `ManyToOne` or
/// `jakarta.persistence.ManyToOne`.
///
/// Always has at least one segment when produced by the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedName<'src> {
    pub segments: Vec<NameSegment<'src>>,
}

impl<'src> QualifiedName<'src> {
    /// Builds a name from dotted text using synthetic tokens, with
    /// `leading_whitespace` before the first segment.
    pub fn synthetic(dotted: &str, leading_whitespace: &str) -> Self {
        let segments = dotted
            .split('.')
            .enumerate()
            .map(|(idx, part)| NameSegment {
                dot: (idx > 0).then(|| JavaToken::synthetic(JavaTokenKind::Dot, "")),
                identifier: JavaToken::synthetic(
                    JavaTokenKind::identifier_owned(part.to_string()),
                    if idx == 0 { leading_whitespace } else { "" },
                ),
            })
            .collect();
        QualifiedName { segments }
    }

    /// The name with its segments joined by `.`, without trivia.
    pub fn to_dotted(&self) -> String {
        let mut dotted = String::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                dotted.push('.');
            }
            dotted.push_str(segment.identifier.text());
        }
        dotted
    }

    /// The last segment (`ManyToOne` for `jakarta.persistence.ManyToOne`).
    pub fn simple_name(&self) -> &str {
        self.segments
            .last()
            .map(|segment| segment.identifier.text())
            .unwrap_or_default()
    }

    /// Everything before the last segment, if the name is qualified.
    pub fn qualifier(&self) -> Option<String> {
        if self.segments.len() < 2 {
            return None;
        }
        let dotted = self.to_dotted();
        dotted.rfind('.').map(|idx| dotted[..idx].to_string())
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    /// Span from the first to the last segment.
    pub fn span(&self) -> JavaSourceSpan {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => first.identifier.span.to(&last.identifier.span),
            _ => JavaSourceSpan::default(),
        }
    }

    pub fn for_each_token_mut(&mut self, f: &mut dyn FnMut(&mut JavaToken<'src>)) {
        for segment in &mut self.segments {
            if let Some(dot) = &mut segment.dot {
                f(dot);
            }
            f(&mut segment.identifier);
        }
    }

    pub fn into_owned<'any>(self) -> QualifiedName<'any> {
        QualifiedName {
            segments: self
                .segments
                .into_iter()
                .map(|segment| NameSegment {
                    dot: segment.dot.map(JavaToken::into_owned),
                    identifier: segment.identifier.into_owned(),
                })
                .collect(),
        }
    }
}

#[inherent]
impl<'src> AstNode<'src> for QualifiedName<'src> {
    pub fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>)) {
        for segment in &self.segments {
            if let Some(dot) = &segment.dot {
                f(dot);
            }
            f(&segment.identifier);
        }
    }

    pub fn append_source(&self, sink: &mut String);
    pub fn to_source(&self) -> String;
}
