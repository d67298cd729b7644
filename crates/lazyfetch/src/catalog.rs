//! Known types that names in a compilation unit can resolve to.
//!
//! A [`TypeCatalog`] stands in for a classpath: it records which fully
//! qualified type names exist, which constants an enum declares, and the
//! declared element types of annotation types. The persistence catalog
//! covers the `jakarta.persistence` (or legacy `javax.persistence`) mapping
//! annotations and enums; callers can register more types before handing
//! the catalog to a recipe.

use crate::types::JavaType;
use crate::types::PrimitiveType;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What the catalog knows about one type.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogTypeKind {
    Class,
    Enum {
        constants: IndexSet<String>,
    },
    Annotation {
        /// Element name to declared element type, in declaration order.
        elements: IndexMap<String, JavaType>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogType {
    pub fqn: String,
    pub kind: CatalogTypeKind,
}

impl CatalogType {
    pub fn class(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            kind: CatalogTypeKind::Class,
        }
    }

    pub fn enumeration(fqn: impl Into<String>, constants: &[&str]) -> Self {
        Self {
            fqn: fqn.into(),
            kind: CatalogTypeKind::Enum {
                constants: constants.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    pub fn annotation(fqn: impl Into<String>, elements: Vec<(&str, JavaType)>) -> Self {
        Self {
            fqn: fqn.into(),
            kind: CatalogTypeKind::Annotation {
                elements: elements
                    .into_iter()
                    .map(|(name, type_)| (name.to_string(), type_))
                    .collect(),
            },
        }
    }
}

/// The package family the persistence annotations live in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PersistenceNamespace {
    #[default]
    Jakarta,
    /// Java EE and pre-3.0 Jakarta releases.
    Javax,
}

impl PersistenceNamespace {
    pub fn package(&self) -> &'static str {
        match self {
            Self::Jakarta => "jakarta.persistence",
            Self::Javax => "javax.persistence",
        }
    }

    fn qualify(&self, simple_name: &str) -> String {
        format!("{}.{simple_name}", self.package())
    }
}

impl fmt::Display for PersistenceNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jakarta => f.write_str("jakarta"),
            Self::Javax => f.write_str("javax"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown persistence namespace `{0}` (expected `jakarta` or `javax`)")]
pub struct UnknownNamespaceError(pub String);

impl FromStr for PersistenceNamespace {
    type Err = UnknownNamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "jakarta" | "jakarta.persistence" => Ok(Self::Jakarta),
            "javax" | "javax.persistence" => Ok(Self::Javax),
            other => Err(UnknownNamespaceError(other.to_string())),
        }
    }
}

/// Fully qualified names of the two association annotations that get
/// rewritten and of the fetch-mode enum they point at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationTargets {
    pub one_to_one: String,
    pub many_to_one: String,
    pub fetch_type: String,
}

impl AssociationTargets {
    pub fn for_namespace(namespace: PersistenceNamespace) -> Self {
        Self {
            one_to_one: namespace.qualify("OneToOne"),
            many_to_one: namespace.qualify("ManyToOne"),
            fetch_type: namespace.qualify("FetchType"),
        }
    }

    /// The annotation types, in the order the gate checks them.
    pub fn annotation_types(&self) -> [&str; 2] {
        [&self.many_to_one, &self.one_to_one]
    }
}

impl Default for AssociationTargets {
    fn default() -> Self {
        Self::for_namespace(PersistenceNamespace::default())
    }
}

/// A registry of known types, keyed by fully qualified name.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCatalog {
    types: IndexMap<String, CatalogType>,
}

impl TypeCatalog {
    /// A catalog holding the `java.lang` types that annotation arguments
    /// commonly mention.
    pub fn new() -> Self {
        let mut catalog = Self {
            types: IndexMap::new(),
        };
        for name in [
            "Boolean", "Byte", "Character", "Class", "Double", "Enum", "Float", "Integer",
            "Long", "Number", "Object", "Short", "String", "Void",
        ] {
            catalog.register(CatalogType::class(format!("java.lang.{name}")));
        }
        catalog.register(CatalogType::annotation("java.lang.Deprecated", vec![
            ("since", JavaType::string()),
            ("forRemoval", JavaType::Primitive(PrimitiveType::Boolean)),
        ]));
        catalog.register(CatalogType::annotation("java.lang.Override", vec![]));
        catalog.register(CatalogType::annotation("java.lang.SuppressWarnings", vec![
            ("value", JavaType::array_of(JavaType::string())),
        ]));
        catalog
    }

    /// [`TypeCatalog::new`] plus the persistence API of `namespace`.
    pub fn persistence(namespace: PersistenceNamespace) -> Self {
        let mut catalog = Self::new();
        let q = |name: &str| namespace.qualify(name);
        let boolean = || JavaType::Primitive(PrimitiveType::Boolean);
        let int = || JavaType::Primitive(PrimitiveType::Int);
        let string = JavaType::string;
        let class = || JavaType::class("java.lang.Class");
        let fetch = || JavaType::class(q("FetchType"));
        let cascade = || JavaType::array_of(JavaType::class(q("CascadeType")));

        catalog.register(CatalogType::enumeration(q("FetchType"), &["LAZY", "EAGER"]));
        catalog.register(CatalogType::enumeration(q("CascadeType"), &[
            "ALL", "PERSIST", "MERGE", "REMOVE", "REFRESH", "DETACH",
        ]));
        catalog.register(CatalogType::enumeration(q("GenerationType"), &[
            "TABLE", "SEQUENCE", "IDENTITY", "UUID", "AUTO",
        ]));
        catalog.register(CatalogType::enumeration(q("EnumType"), &["ORDINAL", "STRING"]));

        catalog.register(CatalogType::annotation(q("OneToOne"), vec![
            ("targetEntity", class()),
            ("cascade", cascade()),
            ("fetch", fetch()),
            ("optional", boolean()),
            ("mappedBy", string()),
            ("orphanRemoval", boolean()),
        ]));
        catalog.register(CatalogType::annotation(q("ManyToOne"), vec![
            ("targetEntity", class()),
            ("cascade", cascade()),
            ("fetch", fetch()),
            ("optional", boolean()),
        ]));
        catalog.register(CatalogType::annotation(q("OneToMany"), vec![
            ("targetEntity", class()),
            ("cascade", cascade()),
            ("fetch", fetch()),
            ("mappedBy", string()),
            ("orphanRemoval", boolean()),
        ]));
        catalog.register(CatalogType::annotation(q("ManyToMany"), vec![
            ("targetEntity", class()),
            ("cascade", cascade()),
            ("fetch", fetch()),
            ("mappedBy", string()),
        ]));
        catalog.register(CatalogType::annotation(q("Basic"), vec![
            ("fetch", fetch()),
            ("optional", boolean()),
        ]));
        catalog.register(CatalogType::annotation(q("ElementCollection"), vec![
            ("targetClass", class()),
            ("fetch", fetch()),
        ]));
        catalog.register(CatalogType::annotation(q("Entity"), vec![("name", string())]));
        catalog.register(CatalogType::annotation(q("Table"), vec![
            ("name", string()),
            ("catalog", string()),
            ("schema", string()),
        ]));
        catalog.register(CatalogType::annotation(q("Column"), vec![
            ("name", string()),
            ("unique", boolean()),
            ("nullable", boolean()),
            ("insertable", boolean()),
            ("updatable", boolean()),
            ("length", int()),
        ]));
        catalog.register(CatalogType::annotation(q("JoinColumn"), vec![
            ("name", string()),
            ("referencedColumnName", string()),
            ("unique", boolean()),
            ("nullable", boolean()),
            ("insertable", boolean()),
            ("updatable", boolean()),
        ]));
        catalog.register(CatalogType::annotation(q("GeneratedValue"), vec![
            ("strategy", JavaType::class(q("GenerationType"))),
            ("generator", string()),
        ]));
        catalog.register(CatalogType::annotation(q("Enumerated"), vec![
            ("value", JavaType::class(q("EnumType"))),
        ]));
        catalog.register(CatalogType::annotation(q("MapsId"), vec![("value", string())]));
        for name in ["Embeddable", "Embedded", "Id", "MappedSuperclass", "Transient", "Version"] {
            catalog.register(CatalogType::annotation(q(name), vec![]));
        }
        catalog
    }

    /// Adds `type_` to the catalog, returning the entry it replaced.
    pub fn register(&mut self, type_: CatalogType) -> Option<CatalogType> {
        self.types.insert(type_.fqn.clone(), type_)
    }

    pub fn get(&self, fqn: &str) -> Option<&CatalogType> {
        self.types.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    /// Returns `true` if `enum_fqn` is a known enum declaring `constant`.
    pub fn has_enum_constant(&self, enum_fqn: &str, constant: &str) -> bool {
        matches!(
            self.get(enum_fqn),
            Some(CatalogType { kind: CatalogTypeKind::Enum { constants }, .. })
                if constants.contains(constant)
        )
    }

    /// The declared type of element `element` of annotation type
    /// `annotation_fqn`.
    pub fn element_type(&self, annotation_fqn: &str, element: &str) -> Option<&JavaType> {
        match self.get(annotation_fqn) {
            Some(CatalogType { kind: CatalogTypeKind::Annotation { elements }, .. }) => {
                elements.get(element)
            },
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &CatalogType> {
        self.types.values()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::persistence(PersistenceNamespace::default())
    }
}
