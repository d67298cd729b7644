use std::fmt;

/// The Java primitive types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// A resolved Java type.
///
/// Class types are identified by their fully qualified name, with nested
/// types separated by `.` (`java.util.Map.Entry`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(PrimitiveType),
    Class(String),
    Array(Box<JavaType>),
}

impl JavaType {
    pub fn class(fqn: impl Into<String>) -> Self {
        Self::Class(fqn.into())
    }

    pub fn array_of(element: JavaType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn string() -> Self {
        Self::class("java.lang.String")
    }

    /// Returns `true` if this is exactly the class type `fqn`.
    pub fn is_class(&self, fqn: &str) -> bool {
        matches!(self, Self::Class(name) if name == fqn)
    }

    /// The fully qualified name of a class type.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// The element type of an array, or the type itself otherwise.
    pub fn element_type(&self) -> &JavaType {
        match self {
            Self::Array(element) => element.element_type(),
            other => other,
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.as_str()),
            Self::Class(name) => f.write_str(name),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// Splits `a.b.C` into `("a.b", "C")`. A name without dots has no
/// qualifier.
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(idx) => (Some(&name[..idx]), &name[idx + 1..]),
        None => (None, name),
    }
}
