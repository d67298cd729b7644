//! Recursive-descent parser for the declaration level of Java.

use crate::ast::Annotation;
use crate::ast::AnnotationArgument;
use crate::ast::AnnotationArguments;
use crate::ast::AstNode;
use crate::ast::CompilationUnit;
use crate::ast::Delimiter;
use crate::ast::ElementValue;
use crate::ast::ElementValueArray;
use crate::ast::EnumConstants;
use crate::ast::Expression;
use crate::ast::FieldDeclaration;
use crate::ast::Group;
use crate::ast::ImportDeclaration;
use crate::ast::ImportWildcard;
use crate::ast::Initializer;
use crate::ast::Member;
use crate::ast::MethodBody;
use crate::ast::MethodDeclaration;
use crate::ast::Modifier;
use crate::ast::NameSegment;
use crate::ast::PackageDeclaration;
use crate::ast::QualifiedName;
use crate::ast::TokenTree;
use crate::ast::TopLevelDeclaration;
use crate::ast::TypeBody;
use crate::ast::TypeDeclaration;
use crate::ast::TypeKind;
use crate::token::JavaToken;
use crate::token::JavaTokenKind;
use crate::token::Keyword;
use crate::token_source::JavaTokenSource;
use crate::token_source::StrJavaTokenSource;
use crate::JavaParseError;
use crate::JavaParseErrorKind;
use crate::JavaSourceSpan;
use crate::JavaTokenStream;
use crate::ParseResult;
use std::path::Path;

/// Stack left unused before a nested parse grows the stack.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated by [`stacker::maybe_grow`].
const STACK_GROWTH: usize = 1024 * 1024;

/// A recursive-descent parser for Java compilation units.
///
/// Declarations (package, imports, types, members, modifiers, annotations)
/// are parsed into typed nodes. Everything else is kept as token trees, so
/// the parser accepts any syntactically balanced method body without
/// understanding statements or expressions.
///
/// # Error Recovery
///
/// Errors are recorded and the parser skips to the next member (`;` or `}`)
/// or the next type declaration, then continues. The resulting
/// [`ParseResult`] carries every recorded error. Lexer error tokens are
/// reported when they are consumed.
///
/// # Usage
///
/// ```rust
/// use lazyfetch_parser::ast::Member;
/// use lazyfetch_parser::ast::TopLevelDeclaration;
/// use lazyfetch_parser::JavaParser;
///
/// let source = "package shop;\n\nclass Order {\n  @ManyToOne Customer customer;\n}\n";
/// let result = JavaParser::new(source).parse_compilation_unit();
///
/// assert!(result.is_ok());
/// let unit = result.valid_ast().unwrap();
/// assert_eq!(unit.package_name().as_deref(), Some("shop"));
/// let TopLevelDeclaration::Type(order) = &unit.types[0] else { panic!() };
/// assert!(matches!(order.body.members[0], Member::Field(_)));
/// ```
pub struct JavaParser<'src, TTokenSource: JavaTokenSource<'src>> {
    /// The underlying token stream with lookahead support.
    token_stream: JavaTokenStream<'src, TTokenSource>,

    /// Accumulated parse errors.
    errors: Vec<JavaParseError>,

    /// Current nesting depth of groups, type bodies and annotations.
    recursion_depth: usize,
}

impl<'src> JavaParser<'src, StrJavaTokenSource<'src>> {
    /// Creates a new parser from a string-like source.
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self::from_token_source(StrJavaTokenSource::new(source.as_ref()))
    }

    /// Creates a new parser whose spans carry `path`.
    pub fn with_file_path<S: AsRef<str> + ?Sized>(source: &'src S, path: &'src Path) -> Self {
        Self::from_token_source(StrJavaTokenSource::with_file_path(source.as_ref(), path))
    }
}

impl<'src, TTokenSource: JavaTokenSource<'src>> JavaParser<'src, TTokenSource> {
    /// Maximum nesting depth of delimited groups, type bodies and
    /// annotations.
    ///
    /// Far beyond the bracket nesting of hand-written Java. Every level goes
    /// through `nested`, which keeps debug builds on small thread stacks
    /// from overflowing before the limit is reached.
    const MAX_RECURSION_DEPTH: usize = 64;

    /// Creates a new parser from a token source.
    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: JavaTokenStream::new(token_source),
            errors: Vec::new(),
            recursion_depth: 0,
        }
    }

    // =========================================================================
    // Public entry points
    // =========================================================================

    /// Parses a whole compilation unit.
    pub fn parse_compilation_unit(mut self) -> ParseResult<CompilationUnit<'src>> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut types = Vec::new();

        // Annotations at the top of a file belong to the package declaration
        // if one follows, and to the first type declaration otherwise.
        let mut pending_modifiers = match self.parse_modifiers() {
            Ok(modifiers) => modifiers,
            Err(()) => {
                self.recover_to_next_type_declaration();
                Vec::new()
            },
        };
        if self.at_keyword(0, Keyword::Package) {
            match self.parse_package_declaration(std::mem::take(&mut pending_modifiers)) {
                Ok(declaration) => package = Some(declaration),
                Err(()) => self.recover_past_semicolon(),
            }
        }

        if pending_modifiers.is_empty() {
            while self.at_keyword(0, Keyword::Import) {
                match self.parse_import_declaration() {
                    Ok(import) => imports.push(import),
                    Err(()) => self.recover_past_semicolon(),
                }
            }
        }

        while !self.token_stream.is_at_end() {
            let modifiers = if pending_modifiers.is_empty() {
                if self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon)) {
                    if let Ok(semicolon) = self.consume_required() {
                        types.push(TopLevelDeclaration::Empty(semicolon));
                    }
                    continue;
                }
                match self.parse_modifiers() {
                    Ok(modifiers) => modifiers,
                    Err(()) => {
                        self.recover_to_next_type_declaration();
                        continue;
                    },
                }
            } else {
                std::mem::take(&mut pending_modifiers)
            };

            match self.parse_type_declaration(modifiers) {
                Ok(declaration) => types.push(TopLevelDeclaration::Type(declaration)),
                Err(()) => self.recover_to_next_type_declaration(),
            }
        }

        let eof = self
            .consume_token()
            .unwrap_or_else(|| JavaToken::synthetic(JavaTokenKind::Eof, ""));

        let unit = CompilationUnit {
            package,
            imports,
            types,
            eof,
        };

        if self.errors.is_empty() {
            ParseResult::ok(unit)
        } else {
            ParseResult::recovered(unit, self.errors)
        }
    }

    /// Parses a single annotation that must make up the whole input (apart
    /// from surrounding whitespace and comments).
    pub fn parse_annotation(mut self) -> ParseResult<Annotation<'src>> {
        let annotation = match self.parse_annotation_node() {
            Ok(annotation) => annotation,
            Err(()) => return ParseResult::err(self.errors),
        };

        if !self.token_stream.is_at_end() {
            self.unexpected("end of input");
        }

        if self.errors.is_empty() {
            ParseResult::ok(annotation)
        } else {
            ParseResult::recovered(annotation, self.errors)
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn record_error(&mut self, error: JavaParseError) {
        self.errors.push(error);
    }

    /// Consumes the next token, reporting it if the lexer produced an error
    /// token.
    fn consume_token(&mut self) -> Option<JavaToken<'src>> {
        let token = self.token_stream.consume()?;
        if let JavaTokenKind::Error {
            message,
            error_notes,
            ..
        } = &token.kind
        {
            self.record_error(JavaParseError::from_lexer_error(
                message.clone(),
                token.span.clone(),
                error_notes.clone(),
            ));
        }
        Some(token)
    }

    /// Consumes a token the caller has already peeked.
    fn consume_required(&mut self) -> Result<JavaToken<'src>, ()> {
        match self.consume_token() {
            Some(token) => Ok(token),
            None => {
                self.unexpected("a token");
                Err(())
            },
        }
    }

    fn at_kind(&mut self, n: usize, pred: impl FnOnce(&JavaTokenKind<'src>) -> bool) -> bool {
        self.token_stream.peek_kind_nth(n).is_some_and(pred)
    }

    fn at_keyword(&mut self, n: usize, keyword: Keyword) -> bool {
        self.at_kind(n, |k| k.is_keyword(keyword))
    }

    fn at_identifier(&mut self, n: usize, name: &str) -> bool {
        self.at_kind(n, |k| matches!(k, JavaTokenKind::Identifier(id) if id == name))
    }

    fn at_any_identifier(&mut self, n: usize) -> bool {
        self.at_kind(n, |k| matches!(k, JavaTokenKind::Identifier(_)))
    }

    fn at_closing_delimiter(&mut self) -> bool {
        self.at_kind(0, JavaTokenKind::is_closing_delimiter)
    }

    /// `@` that starts an annotation rather than an `@interface`
    /// declaration.
    fn at_annotation(&mut self) -> bool {
        self.at_kind(0, |k| matches!(k, JavaTokenKind::At))
            && !self.at_keyword(1, Keyword::Interface)
    }

    /// Consumes the next token if `pred` accepts it, otherwise records an
    /// error naming `expected`.
    fn expect(
        &mut self,
        pred: impl FnOnce(&JavaTokenKind<'src>) -> bool,
        expected: &str,
    ) -> Result<JavaToken<'src>, ()> {
        if self.at_kind(0, pred) {
            self.consume_required()
        } else {
            self.unexpected(expected);
            Err(())
        }
    }

    /// Records an "expected X, found Y" error at the next token.
    fn unexpected(&mut self, expected: &str) {
        let (span, found) = match self.token_stream.peek() {
            None => (JavaSourceSpan::default(), None),
            Some(token) if matches!(token.kind, JavaTokenKind::Eof) => {
                (token.span.clone(), None)
            },
            Some(token) => (token.span.clone(), Some(token.kind.describe())),
        };

        let error = match found {
            None => JavaParseError::new(
                format!("expected {expected}, found end of input"),
                span,
                JavaParseErrorKind::UnexpectedEof {
                    expected: vec![expected.to_string()],
                },
            ),
            Some(found) => JavaParseError::new(
                format!("expected {expected}, found `{found}`"),
                span,
                JavaParseErrorKind::UnexpectedToken {
                    expected: vec![expected.to_string()],
                    found,
                },
            ),
        };
        self.record_error(error);
    }

    /// Checks recursion depth and returns an error if the limit is
    /// exceeded. On success the caller must call `exit_recursion()`.
    fn enter_recursion(&mut self) -> Result<(), ()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self
                .token_stream
                .peek()
                .map(|t| t.span.clone())
                .unwrap_or_default();
            self.record_error(JavaParseError::new(
                "maximum nesting depth exceeded",
                span,
                JavaParseErrorKind::NestingTooDeep,
            ));
            self.recursion_depth -= 1;
            return Err(());
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Runs `parse` one nesting level deeper, growing the stack first when
    /// less than `STACK_RED_ZONE` of it remains.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ()>,
    ) -> Result<T, ()> {
        self.enter_recursion()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || parse(self));
        self.exit_recursion();
        result
    }

    // =========================================================================
    // Error recovery
    // =========================================================================

    /// Consumes one token tree without recording structure. Unbalanced
    /// groups are consumed up to the end of input.
    fn skip_token_tree(&mut self) {
        let opens_group = self.at_kind(0, |k| Delimiter::from_open(k).is_some());
        if self.consume_token().is_none() || !opens_group {
            return;
        }
        let mut depth = 1usize;
        while depth > 0 && !self.token_stream.is_at_end() {
            if self.at_kind(0, |k| Delimiter::from_open(k).is_some()) {
                depth += 1;
            } else if self.at_closing_delimiter() {
                depth -= 1;
            }
            self.consume_token();
        }
    }

    /// Skips to the start of the next type declaration, always making
    /// progress.
    fn recover_to_next_type_declaration(&mut self) {
        let mut skipped_any = false;
        while !self.token_stream.is_at_end() {
            if skipped_any && self.at_type_declaration_start() {
                return;
            }
            self.skip_token_tree();
            skipped_any = true;
        }
    }

    /// Skips past the next `;`, stopping early at a type declaration.
    fn recover_past_semicolon(&mut self) {
        while !self.token_stream.is_at_end() && !self.at_type_keyword() {
            let is_semicolon = self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon));
            self.skip_token_tree();
            if is_semicolon {
                return;
            }
        }
    }

    /// Skips to the end of the current member: past a `;`, or up to (not
    /// including) the `}` that closes the enclosing body.
    fn recover_to_next_member(&mut self) {
        while !self.token_stream.is_at_end() {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceClose)) {
                return;
            }
            let is_semicolon = self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon));
            self.skip_token_tree();
            if is_semicolon {
                return;
            }
        }
    }

    fn at_type_declaration_start(&mut self) -> bool {
        self.at_type_keyword()
            || self.at_kind(0, |k| {
                matches!(k, JavaTokenKind::At)
                    || matches!(k, JavaTokenKind::Keyword(kw) if kw.is_modifier())
            })
    }

    /// `class`, `interface`, `enum`, `@interface`, or `record Name` followed
    /// by `(` or `<`.
    fn at_type_keyword(&mut self) -> bool {
        self.at_keyword(0, Keyword::Class)
            || self.at_keyword(0, Keyword::Interface)
            || self.at_keyword(0, Keyword::Enum)
            || (self.at_kind(0, |k| matches!(k, JavaTokenKind::At))
                && self.at_keyword(1, Keyword::Interface))
            || (self.at_identifier(0, "record")
                && self.at_any_identifier(1)
                && self.at_kind(2, |k| {
                    matches!(k, JavaTokenKind::ParenOpen | JavaTokenKind::LessThan)
                }))
    }

    // =========================================================================
    // Package and imports
    // =========================================================================

    fn parse_package_declaration(
        &mut self,
        modifiers: Vec<Modifier<'src>>,
    ) -> Result<PackageDeclaration<'src>, ()> {
        let mut annotations = Vec::new();
        for modifier in modifiers {
            match modifier {
                Modifier::Annotation(annotation) => annotations.push(annotation),
                other => {
                    let span = other
                        .first_token()
                        .map(|t| t.span.clone())
                        .unwrap_or_default();
                    let mut error = JavaParseError::new(
                        format!(
                            "modifier `{}` is not allowed on a package declaration",
                            other.to_source().trim(),
                        ),
                        span,
                        JavaParseErrorKind::InvalidSyntax,
                    );
                    error.add_help("Only annotations may precede `package`");
                    self.record_error(error);
                },
            }
        }

        let package_kw = self.consume_required()?;
        let name = self.parse_qualified_name("a package name")?;
        let semicolon = self.expect(|k| matches!(k, JavaTokenKind::Semicolon), "`;`")?;
        Ok(PackageDeclaration {
            annotations,
            package_kw,
            name,
            semicolon,
        })
    }

    fn parse_import_declaration(&mut self) -> Result<ImportDeclaration<'src>, ()> {
        let import_kw = self.consume_required()?;
        let static_kw = if self.at_keyword(0, Keyword::Static) {
            Some(self.consume_required()?)
        } else {
            None
        };
        let name = self.parse_qualified_name("an imported name")?;
        let wildcard = if self.at_kind(0, |k| matches!(k, JavaTokenKind::Dot))
            && self.at_kind(1, |k| matches!(k, JavaTokenKind::Operator(op) if op == "*"))
        {
            let dot = self.consume_required()?;
            let star = self.consume_required()?;
            Some(ImportWildcard { dot, star })
        } else {
            None
        };
        let semicolon = self.expect(|k| matches!(k, JavaTokenKind::Semicolon), "`;`")?;
        Ok(ImportDeclaration {
            import_kw,
            static_kw,
            name,
            wildcard,
            semicolon,
        })
    }

    fn parse_qualified_name(&mut self, expected: &str) -> Result<QualifiedName<'src>, ()> {
        let first = self.expect(|k| matches!(k, JavaTokenKind::Identifier(_)), expected)?;
        let mut segments = vec![NameSegment {
            dot: None,
            identifier: first,
        }];
        while self.at_kind(0, |k| matches!(k, JavaTokenKind::Dot)) && self.at_any_identifier(1) {
            let dot = self.consume_required()?;
            let identifier = self.consume_required()?;
            segments.push(NameSegment {
                dot: Some(dot),
                identifier,
            });
        }
        Ok(QualifiedName { segments })
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    fn parse_modifiers(&mut self) -> Result<Vec<Modifier<'src>>, ()> {
        let mut modifiers = Vec::new();
        loop {
            if self.at_annotation() {
                modifiers.push(Modifier::Annotation(self.parse_annotation_node()?));
            } else if self.at_kind(0, |k| matches!(k, JavaTokenKind::Keyword(kw) if kw.is_modifier())) {
                modifiers.push(Modifier::Keyword(self.consume_required()?));
            } else if self.at_identifier(0, "sealed")
                && self.at_kind(1, |k| {
                    matches!(k, JavaTokenKind::Keyword(_) | JavaTokenKind::Identifier(_))
                })
            {
                modifiers.push(Modifier::Contextual(vec![self.consume_required()?]));
            } else if self.at_identifier(0, "non")
                && self.at_kind(1, |k| matches!(k, JavaTokenKind::Operator(op) if op == "-"))
                && self.at_identifier(2, "sealed")
            {
                let tokens = vec![
                    self.consume_required()?,
                    self.consume_required()?,
                    self.consume_required()?,
                ];
                modifiers.push(Modifier::Contextual(tokens));
            } else {
                return Ok(modifiers);
            }
        }
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    fn parse_type_declaration(
        &mut self,
        modifiers: Vec<Modifier<'src>>,
    ) -> Result<TypeDeclaration<'src>, ()> {
        let (kind, kind_tokens) = if self.at_keyword(0, Keyword::Class) {
            (TypeKind::Class, vec![self.consume_required()?])
        } else if self.at_keyword(0, Keyword::Interface) {
            (TypeKind::Interface, vec![self.consume_required()?])
        } else if self.at_keyword(0, Keyword::Enum) {
            (TypeKind::Enum, vec![self.consume_required()?])
        } else if self.at_kind(0, |k| matches!(k, JavaTokenKind::At))
            && self.at_keyword(1, Keyword::Interface)
        {
            let at = self.consume_required()?;
            let interface_kw = self.consume_required()?;
            (TypeKind::AnnotationType, vec![at, interface_kw])
        } else if self.at_identifier(0, "record") {
            (TypeKind::Record, vec![self.consume_required()?])
        } else {
            self.unexpected("`class`, `interface`, `enum`, `record` or `@interface`");
            return Err(());
        };

        let name = self.expect(|k| matches!(k, JavaTokenKind::Identifier(_)), "a type name")?;

        let mut header = Vec::new();
        loop {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceOpen)) {
                break;
            }
            if self.token_stream.is_at_end()
                || self.at_closing_delimiter()
                || self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon))
            {
                self.unexpected("`{`");
                return Err(());
            }
            header.push(self.parse_token_tree()?);
        }

        let body = self.parse_type_body(kind)?;
        Ok(TypeDeclaration {
            modifiers,
            kind,
            kind_tokens,
            name,
            header,
            body,
        })
    }

    fn parse_type_body(&mut self, kind: TypeKind) -> Result<TypeBody<'src>, ()> {
        let open = self.expect(|k| matches!(k, JavaTokenKind::CurlyBraceOpen), "`{`")?;
        self.nested(|parser| parser.parse_type_body_contents(kind, open))
    }

    fn parse_type_body_contents(
        &mut self,
        kind: TypeKind,
        open: JavaToken<'src>,
    ) -> Result<TypeBody<'src>, ()> {
        let mut members = Vec::new();

        if kind == TypeKind::Enum {
            match self.parse_enum_constants() {
                Ok(Some(constants)) => members.push(Member::EnumConstants(constants)),
                Ok(None) => (),
                Err(()) => self.recover_to_next_member(),
            }
        }

        loop {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceClose)) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.report_unclosed(&open, Delimiter::Brace);
                return Err(());
            }
            match self.parse_member() {
                Ok(member) => members.push(member),
                Err(()) => self.recover_to_next_member(),
            }
        }

        let close = self.consume_required()?;
        Ok(TypeBody {
            open,
            members,
            close,
        })
    }

    fn parse_enum_constants(&mut self) -> Result<Option<EnumConstants<'src>>, ()> {
        let mut trees = Vec::new();
        let mut semicolon = None;
        loop {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon)) {
                semicolon = Some(self.consume_required()?);
                break;
            }
            if self.token_stream.is_at_end()
                || self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceClose))
            {
                break;
            }
            if self.at_closing_delimiter() {
                self.unexpected("an enum constant");
                return Err(());
            }
            trees.push(self.parse_token_tree()?);
        }

        if trees.is_empty() && semicolon.is_none() {
            Ok(None)
        } else {
            Ok(Some(EnumConstants { trees, semicolon }))
        }
    }

    fn parse_member(&mut self) -> Result<Member<'src>, ()> {
        if self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon)) {
            return Ok(Member::Empty(self.consume_required()?));
        }

        let modifiers = self.parse_modifiers()?;

        if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceOpen)) {
            let block = self.parse_group()?;
            return Ok(Member::Initializer(Initializer { modifiers, block }));
        }

        if self.at_type_keyword() {
            let declaration = self.parse_type_declaration(modifiers)?;
            return Ok(Member::Type(Box::new(declaration)));
        }

        self.parse_field_or_method(modifiers)
    }

    /// Collects token trees up to the `;` or body that ends the member.
    ///
    /// A parenthesised group before any top-level `=` makes the member a
    /// method (or constructor); a `{` before any `=` starts its body. After
    /// `=` or `default`, a `{` is an array initializer and stays in the
    /// tree list.
    fn parse_field_or_method(
        &mut self,
        modifiers: Vec<Modifier<'src>>,
    ) -> Result<Member<'src>, ()> {
        let mut trees = Vec::new();
        let mut saw_parameters = false;
        let mut saw_equals = false;
        let mut saw_default = false;

        loop {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::Semicolon)) {
                let semicolon = self.consume_required()?;
                return Ok(if saw_parameters && !saw_equals {
                    Member::Method(MethodDeclaration {
                        modifiers,
                        signature: trees,
                        body: MethodBody::Semicolon(semicolon),
                    })
                } else {
                    Member::Field(FieldDeclaration {
                        modifiers,
                        declaration: trees,
                        semicolon,
                    })
                });
            }

            if !saw_equals
                && !saw_default
                && self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceOpen))
            {
                let block = self.parse_group()?;
                return Ok(Member::Method(MethodDeclaration {
                    modifiers,
                    signature: trees,
                    body: MethodBody::Block(block),
                }));
            }

            if self.token_stream.is_at_end() || self.at_closing_delimiter() {
                self.unexpected("`;`");
                return Err(());
            }

            if !saw_parameters && self.at_kind(0, |k| matches!(k, JavaTokenKind::Equals)) {
                saw_equals = true;
            }
            if self.at_keyword(0, Keyword::Default) {
                saw_default = true;
            }

            let tree = self.parse_token_tree()?;
            if !saw_equals
                && matches!(&tree, TokenTree::Group(group) if group.delimiter == Delimiter::Paren)
            {
                saw_parameters = true;
            }
            trees.push(tree);
        }
    }

    // =========================================================================
    // Token trees
    // =========================================================================

    fn parse_token_tree(&mut self) -> Result<TokenTree<'src>, ()> {
        if self.at_kind(0, |k| Delimiter::from_open(k).is_some()) {
            return Ok(TokenTree::Group(self.parse_group()?));
        }
        if self.at_annotation() {
            return Ok(TokenTree::Annotation(Box::new(self.parse_annotation_node()?)));
        }
        if self.token_stream.is_at_end() || self.at_closing_delimiter() {
            self.unexpected("a token");
            return Err(());
        }
        Ok(TokenTree::Token(self.consume_required()?))
    }

    fn parse_group(&mut self) -> Result<Group<'src>, ()> {
        let Some(delimiter) = self.token_stream.peek_kind_nth(0).and_then(Delimiter::from_open)
        else {
            self.unexpected("`(`, `{` or `[`");
            return Err(());
        };
        let open = self.consume_required()?;
        self.nested(|parser| parser.parse_group_contents(delimiter, open))
    }

    fn parse_group_contents(
        &mut self,
        delimiter: Delimiter,
        open: JavaToken<'src>,
    ) -> Result<Group<'src>, ()> {
        let mut trees = Vec::new();
        loop {
            if self.token_stream.is_at_end() {
                self.report_unclosed(&open, delimiter);
                return Err(());
            }
            if self.at_kind(0, |k| delimiter.is_closed_by(k)) {
                let close = self.consume_required()?;
                return Ok(Group {
                    delimiter,
                    open,
                    trees,
                    close,
                });
            }
            if self.at_closing_delimiter() {
                self.report_mismatched(&open, delimiter);
                return Err(());
            }
            trees.push(self.parse_token_tree()?);
        }
    }

    fn report_unclosed(&mut self, open: &JavaToken<'src>, delimiter: Delimiter) {
        let span = self
            .token_stream
            .peek()
            .map(|t| t.span.clone())
            .unwrap_or_default();
        let mut error = JavaParseError::new(
            format!("unclosed `{}`", delimiter.open_text()),
            span,
            JavaParseErrorKind::UnclosedDelimiter {
                delimiter: delimiter.open_text().to_string(),
            },
        );
        error.add_note_with_span(
            format!("`{}` opened here", delimiter.open_text()),
            open.span.clone(),
        );
        error.add_help(format!("Add a closing `{}`", delimiter.close_text()));
        self.record_error(error);
    }

    fn report_mismatched(&mut self, open: &JavaToken<'src>, delimiter: Delimiter) {
        let (span, found) = self
            .token_stream
            .peek()
            .map(|t| (t.span.clone(), t.text().to_string()))
            .unwrap_or_default();
        let mut error = JavaParseError::new(
            format!(
                "mismatched delimiter: expected `{}`, found `{found}`",
                delimiter.close_text(),
            ),
            span,
            JavaParseErrorKind::MismatchedDelimiter {
                expected: delimiter.close_text().to_string(),
                found,
            },
        );
        error.add_note_with_span(
            format!("`{}` opened here", delimiter.open_text()),
            open.span.clone(),
        );
        self.record_error(error);
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    fn parse_annotation_node(&mut self) -> Result<Annotation<'src>, ()> {
        let at = self.expect(|k| matches!(k, JavaTokenKind::At), "`@`")?;
        self.nested(|parser| parser.parse_annotation_rest(at))
    }

    fn parse_annotation_rest(&mut self, at: JavaToken<'src>) -> Result<Annotation<'src>, ()> {
        let name = self.parse_qualified_name("an annotation name")?;
        let arguments = if self.at_kind(0, |k| matches!(k, JavaTokenKind::ParenOpen)) {
            Some(self.parse_annotation_arguments()?)
        } else {
            None
        };
        Ok(Annotation {
            at,
            name,
            arguments,
        })
    }

    fn parse_annotation_arguments(&mut self) -> Result<AnnotationArguments<'src>, ()> {
        let open = self.consume_required()?;
        let mut arguments = Vec::new();
        let mut commas = Vec::new();

        if self.at_kind(0, |k| matches!(k, JavaTokenKind::ParenClose)) {
            let close = self.consume_required()?;
            return Ok(AnnotationArguments {
                open,
                arguments,
                commas,
                close,
            });
        }

        loop {
            let argument_span = self
                .token_stream
                .peek()
                .map(|t| t.span.clone())
                .unwrap_or_default();
            let argument = if self.at_any_identifier(0)
                && self.at_kind(1, |k| matches!(k, JavaTokenKind::Equals))
            {
                let name = self.consume_required()?;
                let equals = self.consume_required()?;
                let value = self.parse_element_value()?;
                AnnotationArgument::Named {
                    name,
                    equals,
                    value,
                }
            } else {
                AnnotationArgument::Value(self.parse_element_value()?)
            };
            let mixes_forms = match arguments.first() {
                Some(AnnotationArgument::Value(_)) => true,
                Some(AnnotationArgument::Named { .. }) => {
                    matches!(argument, AnnotationArgument::Value(_))
                },
                None => false,
            };
            if mixes_forms {
                self.record_error(JavaParseError::new(
                    "an element value without a name must be the only argument",
                    argument_span,
                    JavaParseErrorKind::InvalidSyntax,
                ));
                return Err(());
            }
            arguments.push(argument);

            if self.at_kind(0, |k| matches!(k, JavaTokenKind::Comma)) {
                commas.push(self.consume_required()?);
                continue;
            }
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::ParenClose)) {
                let close = self.consume_required()?;
                return Ok(AnnotationArguments {
                    open,
                    arguments,
                    commas,
                    close,
                });
            }
            self.unexpected("`,` or `)`");
            return Err(());
        }
    }

    fn parse_element_value(&mut self) -> Result<ElementValue<'src>, ()> {
        if self.at_kind(0, |k| matches!(k, JavaTokenKind::At)) {
            return Ok(ElementValue::Annotation(Box::new(self.parse_annotation_node()?)));
        }

        if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceOpen)) {
            let open = self.consume_required()?;
            return self
                .nested(|parser| parser.parse_element_value_array(open))
                .map(ElementValue::ArrayInitializer);
        }

        let mut trees = Vec::new();
        while !self.token_stream.is_at_end()
            && !self.at_closing_delimiter()
            && !self.at_kind(0, |k| matches!(k, JavaTokenKind::Comma))
        {
            trees.push(self.parse_token_tree()?);
        }
        if trees.is_empty() {
            self.unexpected("an element value");
            return Err(());
        }
        Ok(ElementValue::Expression(Expression { trees }))
    }

    fn parse_element_value_array(
        &mut self,
        open: JavaToken<'src>,
    ) -> Result<ElementValueArray<'src>, ()> {
        let mut values = Vec::new();
        let mut commas = Vec::new();
        loop {
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceClose)) {
                let close = self.consume_required()?;
                return Ok(ElementValueArray {
                    open,
                    values,
                    commas,
                    close,
                });
            }
            values.push(self.parse_element_value()?);
            if self.at_kind(0, |k| matches!(k, JavaTokenKind::Comma)) {
                commas.push(self.consume_required()?);
            } else if !self.at_kind(0, |k| matches!(k, JavaTokenKind::CurlyBraceClose)) {
                self.unexpected("`,` or `}`");
                return Err(());
            }
        }
    }
}
