/// A reserved Java keyword.
///
/// Contextual keywords (`record`, `sealed`, `permits`, `var`, `yield`, ...)
/// are lexed as identifiers and recognised by the parser where they matter.
/// The literals `true`, `false` and `null` have their own token kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Keyword {
    Abstract,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    Final,
    Finally,
    Float,
    For,
    Goto,
    If,
    Implements,
    Import,
    Instanceof,
    Int,
    Interface,
    Long,
    Native,
    New,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Strictfp,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    Try,
    Void,
    Volatile,
    While,
}

impl Keyword {
    /// Returns the keyword for `text`, if it is reserved.
    pub fn from_text(text: &str) -> Option<Self> {
        Some(match text {
            "abstract" => Self::Abstract,
            "assert" => Self::Assert,
            "boolean" => Self::Boolean,
            "break" => Self::Break,
            "byte" => Self::Byte,
            "case" => Self::Case,
            "catch" => Self::Catch,
            "char" => Self::Char,
            "class" => Self::Class,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "default" => Self::Default,
            "do" => Self::Do,
            "double" => Self::Double,
            "else" => Self::Else,
            "enum" => Self::Enum,
            "extends" => Self::Extends,
            "final" => Self::Final,
            "finally" => Self::Finally,
            "float" => Self::Float,
            "for" => Self::For,
            "goto" => Self::Goto,
            "if" => Self::If,
            "implements" => Self::Implements,
            "import" => Self::Import,
            "instanceof" => Self::Instanceof,
            "int" => Self::Int,
            "interface" => Self::Interface,
            "long" => Self::Long,
            "native" => Self::Native,
            "new" => Self::New,
            "package" => Self::Package,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "public" => Self::Public,
            "return" => Self::Return,
            "short" => Self::Short,
            "static" => Self::Static,
            "strictfp" => Self::Strictfp,
            "super" => Self::Super,
            "switch" => Self::Switch,
            "synchronized" => Self::Synchronized,
            "this" => Self::This,
            "throw" => Self::Throw,
            "throws" => Self::Throws,
            "transient" => Self::Transient,
            "try" => Self::Try,
            "void" => Self::Void,
            "volatile" => Self::Volatile,
            "while" => Self::While,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Assert => "assert",
            Self::Boolean => "boolean",
            Self::Break => "break",
            Self::Byte => "byte",
            Self::Case => "case",
            Self::Catch => "catch",
            Self::Char => "char",
            Self::Class => "class",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Default => "default",
            Self::Do => "do",
            Self::Double => "double",
            Self::Else => "else",
            Self::Enum => "enum",
            Self::Extends => "extends",
            Self::Final => "final",
            Self::Finally => "finally",
            Self::Float => "float",
            Self::For => "for",
            Self::Goto => "goto",
            Self::If => "if",
            Self::Implements => "implements",
            Self::Import => "import",
            Self::Instanceof => "instanceof",
            Self::Int => "int",
            Self::Interface => "interface",
            Self::Long => "long",
            Self::Native => "native",
            Self::New => "new",
            Self::Package => "package",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
            Self::Return => "return",
            Self::Short => "short",
            Self::Static => "static",
            Self::Strictfp => "strictfp",
            Self::Super => "super",
            Self::Switch => "switch",
            Self::Synchronized => "synchronized",
            Self::This => "this",
            Self::Throw => "throw",
            Self::Throws => "throws",
            Self::Transient => "transient",
            Self::Try => "try",
            Self::Void => "void",
            Self::Volatile => "volatile",
            Self::While => "while",
        }
    }

    /// Returns `true` for keywords that may appear in a declaration's
    /// modifier list.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Public
                | Self::Protected
                | Self::Private
                | Self::Static
                | Self::Abstract
                | Self::Final
                | Self::Native
                | Self::Synchronized
                | Self::Transient
                | Self::Volatile
                | Self::Strictfp
                | Self::Default
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
