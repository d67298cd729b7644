//! Tests for `Keyword`.

use crate::token::Keyword;

/// Every keyword maps back to its own text.
#[test]
fn keyword_text_round_trips() {
    for text in ["abstract", "class", "enum", "import", "interface", "package", "while"] {
        let keyword = Keyword::from_text(text).unwrap();
        assert_eq!(keyword.as_str(), text);
        assert_eq!(keyword.to_string(), text);
    }
}

/// Contextual keywords and literals are not reserved words.
#[test]
fn contextual_keywords_are_not_reserved() {
    for text in ["record", "var", "sealed", "permits", "yield", "true", "null", "Class"] {
        assert_eq!(Keyword::from_text(text), None, "{text} should not be a keyword");
    }
}

#[test]
fn modifier_keywords() {
    assert!(Keyword::Public.is_modifier());
    assert!(Keyword::Static.is_modifier());
    assert!(Keyword::Transient.is_modifier());
    assert!(Keyword::Default.is_modifier());
    assert!(!Keyword::Class.is_modifier());
    assert!(!Keyword::Import.is_modifier());
}
