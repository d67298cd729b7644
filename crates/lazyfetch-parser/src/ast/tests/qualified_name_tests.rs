use crate::ast::QualifiedName;

#[test]
fn synthetic_name_prints_with_leading_whitespace() {
    let name = QualifiedName::synthetic("jakarta.persistence.FetchType", " ");
    assert_eq!(name.to_source(), " jakarta.persistence.FetchType");
    assert_eq!(name.to_dotted(), "jakarta.persistence.FetchType");
    assert_eq!(name.simple_name(), "FetchType");
    assert_eq!(name.qualifier().as_deref(), Some("jakarta.persistence"));
}

#[test]
fn simple_name_has_no_qualifier() {
    let name = QualifiedName::synthetic("FetchType", "");
    assert!(!name.is_qualified());
    assert_eq!(name.qualifier(), None);
    assert_eq!(name.segments.len(), 1);
}
