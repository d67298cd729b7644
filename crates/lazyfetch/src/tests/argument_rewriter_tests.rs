use crate::tests::utils::first_field_annotation;
use crate::tests::utils::parse;
use crate::AnnotationMatch;
use crate::AssociationTargets;
use crate::PersistenceNamespace;
use crate::RewrittenArgument;
use crate::SymbolTable;
use crate::TypeCatalog;
use crate::match_annotation;
use crate::rewrite_arguments;

fn field(imports: &str, annotation: &str) -> String {
    format!("{imports}\nclass Order {{\n    {annotation}\n    Customer customer;\n}}\n")
}

const IMPORTS: &str = "\
import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;
import jakarta.persistence.OneToOne;
import jakarta.persistence.OneToMany;
";

fn matched(source: &str) -> AnnotationMatch {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(source);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    match_annotation(first_field_annotation(&unit), &symbols.scope(), &targets)
}

fn rewritten(source: &str) -> (Vec<String>, usize) {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(source);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let scope = symbols.scope();
    let annotation = first_field_annotation(&unit);
    let kind = match_annotation(annotation, &scope, &targets);
    let rewritten = rewrite_arguments(annotation, kind, &scope, &targets);
    assert_eq!(rewritten.arguments.first(), Some(&RewrittenArgument::LazyFetch));
    (rewritten.render("FetchType"), rewritten.dropped_fetch)
}

#[test]
fn matches_by_resolved_name() {
    assert_eq!(matched(&field(IMPORTS, "@ManyToOne")), AnnotationMatch::ManyToOne);
    assert_eq!(matched(&field(IMPORTS, "@OneToOne")), AnnotationMatch::OneToOne);
    assert_eq!(matched(&field(IMPORTS, "@OneToMany")), AnnotationMatch::NotApplicable);
    assert_eq!(
        matched(&field("", "@jakarta.persistence.OneToOne")),
        AnnotationMatch::OneToOne,
    );
    assert_eq!(matched(&field("", "@ManyToOne")), AnnotationMatch::NotApplicable);
    assert_eq!(
        matched(&field("import org.acme.ManyToOne;", "@ManyToOne")),
        AnnotationMatch::NotApplicable,
    );
}

#[test]
fn match_kinds_name_their_annotation_types() {
    let targets = AssociationTargets::for_namespace(PersistenceNamespace::Javax);
    assert_eq!(
        AnnotationMatch::OneToOne.annotation_type(&targets),
        Some("javax.persistence.OneToOne"),
    );
    assert_eq!(
        AnnotationMatch::ManyToOne.annotation_type(&targets),
        Some("javax.persistence.ManyToOne"),
    );
    assert_eq!(AnnotationMatch::NotApplicable.annotation_type(&targets), None);
    assert!(!AnnotationMatch::NotApplicable.is_match());
}

#[test]
fn no_arguments() {
    let (arguments, dropped) = rewritten(&field(IMPORTS, "@ManyToOne"));
    assert_eq!(arguments, vec!["fetch = FetchType.LAZY"]);
    assert_eq!(dropped, 0);

    let (arguments, _) = rewritten(&field(IMPORTS, "@ManyToOne()"));
    assert_eq!(arguments, vec!["fetch = FetchType.LAZY"]);
}

#[test]
fn fetch_arguments_are_dropped_wherever_they_are() {
    let (arguments, dropped) = rewritten(&field(
        IMPORTS,
        "@ManyToOne(optional = false, fetch = FetchType.EAGER, targetEntity = Customer.class)",
    ));
    assert_eq!(arguments, vec![
        "fetch = FetchType.LAZY",
        "optional = false",
        "targetEntity = Customer.class",
    ]);
    assert_eq!(dropped, 1);
}

#[test]
fn every_fetch_argument_is_dropped() {
    let (arguments, dropped) = rewritten(&field(
        IMPORTS,
        "@OneToOne(fetch = FetchType.EAGER, mappedBy = \"order\", fetch = FetchType.LAZY)",
    ));
    assert_eq!(arguments, vec!["fetch = FetchType.LAZY", "mappedBy = \"order\""]);
    assert_eq!(dropped, 2);
}

#[test]
fn arguments_keep_their_text() {
    let (arguments, _) = rewritten(&field(
        IMPORTS,
        "@ManyToOne(  cascade = { CascadeType.PERSIST,CascadeType.MERGE }  ,optional=false)",
    ));
    assert_eq!(arguments, vec![
        "fetch = FetchType.LAZY",
        "cascade = { CascadeType.PERSIST,CascadeType.MERGE }",
        "optional=false",
    ]);
}

#[test]
fn arguments_of_unresolved_type_are_kept() {
    let (arguments, dropped) = rewritten(&field(
        IMPORTS,
        "@ManyToOne(custom = Mystery.VALUE, optional = Flags.OPTIONAL)",
    ));
    assert_eq!(arguments, vec![
        "fetch = FetchType.LAZY",
        "custom = Mystery.VALUE",
        "optional = Flags.OPTIONAL",
    ]);
    assert_eq!(dropped, 0);
}

#[test]
fn rendering_uses_the_given_spelling() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let source = field(IMPORTS, "@ManyToOne(optional = true)");
    let unit = parse(&source);
    let symbols = SymbolTable::from_unit(&unit, &catalog);
    let scope = symbols.scope();
    let annotation = first_field_annotation(&unit);
    let rewritten = rewrite_arguments(annotation, AnnotationMatch::ManyToOne, &scope, &targets);
    assert_eq!(rewritten.preserved().collect::<Vec<_>>(), vec!["optional = true"]);
    assert_eq!(rewritten.render("jakarta.persistence.FetchType"), vec![
        "fetch = jakarta.persistence.FetchType.LAZY",
        "optional = true",
    ]);
}
