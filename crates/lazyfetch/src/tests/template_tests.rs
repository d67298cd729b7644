use crate::tests::utils::first_field_annotation;
use crate::tests::utils::parse;
use crate::AnnotationMatch;
use crate::AssociationTargets;
use crate::FetchTypeReference;
use crate::ImportSet;
use crate::ReplacementDirective;
use crate::SymbolTable;
use crate::TemplateSynthesisError;
use crate::TemplateSynthesizer;
use crate::TypeCatalog;
use crate::fetch_type_reference;

const SOURCE: &str = "\
import jakarta.persistence.ManyToOne;
class A { @ManyToOne(optional = false) B b; }
";

fn directive(name: &str, arguments: &[&str]) -> ReplacementDirective {
    ReplacementDirective::new(name, arguments.iter().map(|a| a.to_string()).collect())
}

fn simple_fetch_type() -> FetchTypeReference {
    FetchTypeReference {
        text: "FetchType".to_string(),
        needs_import: true,
    }
}

#[test]
fn directive_rendering() {
    let directive = directive("ManyToOne", &["fetch = FetchType.LAZY", "optional = false"]);
    assert_eq!(directive.annotation_name(), "ManyToOne");
    assert_eq!(directive.arguments().len(), 2);
    assert_eq!(directive.render(), "@ManyToOne(fetch = FetchType.LAZY, optional = false)");
}

#[test]
fn fetch_type_spelling() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();

    let unit = parse("class A {}\n");
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    assert_eq!(fetch_type_reference(&symbols.scope(), &targets), simple_fetch_type());

    let unit = parse("import jakarta.persistence.*;\nclass A {}\n");
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    assert_eq!(fetch_type_reference(&symbols.scope(), &targets), FetchTypeReference {
        text: "FetchType".to_string(),
        needs_import: false,
    });

    let unit = parse("import org.hibernate.annotations.FetchType;\nclass A {}\n");
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    assert_eq!(fetch_type_reference(&symbols.scope(), &targets), FetchTypeReference {
        text: "jakarta.persistence.FetchType".to_string(),
        needs_import: false,
    });
}

#[test]
fn synthesized_annotation_replaces_the_original_in_place() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(SOURCE);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let mut imports = ImportSet::from_unit(&unit);
    let original = first_field_annotation(&unit);

    let replacement = TemplateSynthesizer::new(&symbols, &targets)
        .synthesize(
            directive("ManyToOne", &["fetch = FetchType.LAZY", "optional = false"]),
            original,
            AnnotationMatch::ManyToOne,
            &simple_fetch_type(),
            &mut imports,
        )
        .unwrap();

    assert_eq!(replacement.to_source(), " @ManyToOne(fetch = FetchType.LAZY, optional = false)");
    let span = original.span();
    let mut tokens = 0;
    replacement.for_each_token(&mut |token| {
        tokens += 1;
        assert_eq!(token.span, span);
    });
    assert_eq!(tokens, 13);
    assert_eq!(imports.added().collect::<Vec<_>>(), vec!["jakarta.persistence.FetchType"]);
}

#[test]
fn unparseable_replacement() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(SOURCE);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let mut imports = ImportSet::from_unit(&unit);

    let error = TemplateSynthesizer::new(&symbols, &targets)
        .synthesize(
            directive("ManyToOne", &["fetch = FetchType.LAZY", "optional ="]),
            first_field_annotation(&unit),
            AnnotationMatch::ManyToOne,
            &simple_fetch_type(),
            &mut imports,
        )
        .unwrap_err();

    assert!(matches!(error, TemplateSynthesisError::Unparseable { .. }), "{error:?}");
    assert_eq!(error.location(), "<input>:2:11");
    assert_eq!(error.annotation(), "@ManyToOne(optional = false)");
    assert_eq!(error.template(), "@ManyToOne(fetch = FetchType.LAZY, optional =)");
    assert!(error.to_string().starts_with(
        "<input>:2:11: replacement `@ManyToOne(fetch = FetchType.LAZY, optional =)` for \
         `@ManyToOne(optional = false)` does not parse: ",
    ));
    assert!(!imports.has_additions());
}

#[test]
fn replacement_of_another_annotation_type() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(SOURCE);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let mut imports = ImportSet::from_unit(&unit);

    let error = TemplateSynthesizer::new(&symbols, &targets)
        .synthesize(
            directive("OneToMany", &["fetch = FetchType.LAZY"]),
            first_field_annotation(&unit),
            AnnotationMatch::ManyToOne,
            &simple_fetch_type(),
            &mut imports,
        )
        .unwrap_err();

    assert_eq!(error, TemplateSynthesisError::WrongAnnotationType {
        annotation: "@ManyToOne(optional = false)".to_string(),
        template: "@OneToMany(fetch = FetchType.LAZY)".to_string(),
        span: first_field_annotation(&unit).span(),
        expected: "jakarta.persistence.ManyToOne".to_string(),
        found: None,
    });
    assert!(error.to_string().ends_with(
        "names an unresolved type instead of `jakarta.persistence.ManyToOne`",
    ));
    assert!(!imports.has_additions());
}

#[test]
fn replacement_without_lazy_fetch_first() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(SOURCE);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let synthesizer = TemplateSynthesizer::new(&symbols, &targets);

    for arguments in [
        &["optional = false", "fetch = FetchType.LAZY"][..],
        &["fetch = FetchType.EAGER"],
        &["fetch = Mystery.LAZY"],
        &[],
    ] {
        let mut imports = ImportSet::from_unit(&unit);
        let error = synthesizer
            .synthesize(
                directive("ManyToOne", arguments),
                first_field_annotation(&unit),
                AnnotationMatch::ManyToOne,
                &simple_fetch_type(),
                &mut imports,
            )
            .unwrap_err();
        assert!(
            matches!(error, TemplateSynthesisError::MissingLazyFetch { .. }),
            "{arguments:?}: {error:?}",
        );
        assert!(!imports.has_additions());
    }
}
