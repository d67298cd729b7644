use crate::tests::utils::parse;
use crate::tests::utils::rewrite;
use crate::AnnotationMatch;
use crate::AssociationTargets;
use crate::LazyAssociations;
use crate::RewriteDriver;
use crate::TemplateSynthesisError;
use crate::TypeCatalog;
use std::path::Path;

const IMPORTS: &str = "\
import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;
import jakarta.persistence.OneToOne;
";

/// Rewrites `body` inside a class with [`IMPORTS`] and returns the new
/// class text and the number of rewritten sites.
fn rewrite_class(body: &str) -> (String, usize) {
    let source = format!("{IMPORTS}\n{body}");
    let rewrite = rewrite(&source);
    assert!(rewrite.failures.is_empty(), "{:?}", rewrite.failures);
    let output = rewrite
        .output
        .strip_prefix(IMPORTS)
        .expect("imports are unchanged")
        .trim_start()
        .to_string();
    (output, rewrite.changed_sites.len())
}

#[test]
fn method_annotations() {
    let (output, sites) = rewrite_class(
        "class Order {\n    @ManyToOne(optional = false)\n    public Customer getCustomer() { return customer; }\n}\n",
    );
    assert_eq!(
        output,
        "class Order {\n    @ManyToOne(fetch = FetchType.LAZY, optional = false)\n    public Customer getCustomer() { return customer; }\n}\n",
    );
    assert_eq!(sites, 1);
}

#[test]
fn parameter_annotations() {
    let (output, sites) = rewrite_class(
        "class Order {\n    void assign(@OneToOne Invoice invoice, @ManyToOne(fetch = FetchType.EAGER) Customer c) {}\n}\n",
    );
    assert_eq!(
        output,
        "class Order {\n    void assign(@OneToOne(fetch = FetchType.LAZY) Invoice invoice, @ManyToOne(fetch = FetchType.LAZY) Customer c) {}\n}\n",
    );
    assert_eq!(sites, 2);
}

#[test]
fn record_component_annotations() {
    let (output, _) = rewrite_class("record Line(@ManyToOne Order order, int quantity) {}\n");
    assert_eq!(
        output,
        "record Line(@ManyToOne(fetch = FetchType.LAZY) Order order, int quantity) {}\n",
    );
}

#[test]
fn annotations_inside_method_bodies() {
    let (output, sites) = rewrite_class(
        "class Order {\n    void run() {\n        Runnable r = new Runnable() {\n            @ManyToOne Customer customer;\n            public void run() {}\n        };\n    }\n}\n",
    );
    assert!(output.contains("@ManyToOne(fetch = FetchType.LAZY) Customer customer;"), "{output}");
    assert_eq!(sites, 1);
}

#[test]
fn nested_types_and_enums() {
    let (output, sites) = rewrite_class(
        "class Order {\n    static class Line {\n        @ManyToOne Order order;\n    }\n    enum Kind {\n        A;\n        @OneToOne Order order;\n    }\n}\n",
    );
    assert!(output.contains("        @ManyToOne(fetch = FetchType.LAZY) Order order;"), "{output}");
    assert!(output.contains("        @OneToOne(fetch = FetchType.LAZY) Order order;"), "{output}");
    assert_eq!(sites, 2);
}

#[test]
fn annotations_nested_in_arguments() {
    let (output, sites) = rewrite_class(
        "class Order {\n    @Associations({@ManyToOne, @OneToOne(optional = true)})\n    Object links;\n}\n",
    );
    assert_eq!(
        output,
        "class Order {\n    @Associations({@ManyToOne(fetch = FetchType.LAZY), @OneToOne(fetch = FetchType.LAZY, optional = true)})\n    Object links;\n}\n",
    );
    assert_eq!(sites, 2);
}

#[test]
fn comments_outside_the_annotation_survive() {
    let (output, _) = rewrite_class(
        "class Order {\n    // owning side\n    @ManyToOne /* eager on purpose */ (fetch = FetchType.EAGER) // trailing\n    Customer customer;\n}\n",
    );
    assert_eq!(
        output,
        "class Order {\n    // owning side\n    @ManyToOne(fetch = FetchType.LAZY) // trailing\n    Customer customer;\n}\n",
    );
}

#[test]
fn driver_reports_sites_and_pending_imports() {
    let source = "\
import jakarta.persistence.ManyToOne;

class Order {
    @ManyToOne
    Customer customer;

    @ManyToOne(fetch = FetchType.LAZY)
    Customer previous;
}
";
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(source);
    let outcome = RewriteDriver::new(&unit, &catalog, &targets).rewrite(unit);

    assert!(outcome.failures.is_empty());
    // The second annotation sees the pending import and is already lazy.
    assert_eq!(outcome.sites.len(), 1);
    let site = &outcome.sites[0];
    assert_eq!(site.kind, AnnotationMatch::ManyToOne);
    assert_eq!(site.before, "@ManyToOne");
    assert_eq!(site.after, "@ManyToOne(fetch = FetchType.LAZY)");
    assert_eq!(site.location(), "<input>:4:5");
    assert_eq!(outcome.imports.added().collect::<Vec<_>>(), vec!["jakarta.persistence.FetchType"]);

    // The import isn't spliced in until the recipe applies it.
    assert!(!outcome.unit.to_source().contains("import jakarta.persistence.FetchType;"));
}

#[test]
fn already_lazy_annotations_are_not_sites() {
    let source = format!(
        "{IMPORTS}\nclass Order {{\n    @ManyToOne(fetch = FetchType.LAZY, optional = false) Customer customer;\n}}\n",
    );
    let rewrite = rewrite(&source);
    assert_eq!(rewrite.output, source);
    assert!(rewrite.changed_sites.is_empty());
}

/// `@ManyToOne(Customer.class)` keeps its unnamed value, and an unnamed
/// value can't follow `fetch = ...`, so that one site can't be rewritten.
const ONE_FAILING_SITE: &str = "\
import jakarta.persistence.ManyToOne;

class Order {
    @ManyToOne(Customer.class)
    Customer customer;

    @ManyToOne(optional = false)
    Customer previous;
}
";

#[test]
fn failed_site_keeps_its_annotation_and_siblings_are_rewritten() {
    let catalog = TypeCatalog::default();
    let targets = AssociationTargets::default();
    let unit = parse(ONE_FAILING_SITE);
    let outcome = RewriteDriver::new(&unit, &catalog, &targets).rewrite(unit);

    assert_eq!(outcome.failures.len(), 1);
    let failure = &outcome.failures[0];
    assert!(matches!(failure, TemplateSynthesisError::Unparseable { .. }), "{failure:?}");
    assert_eq!(failure.annotation(), "@ManyToOne(Customer.class)");
    assert_eq!(failure.template(), "@ManyToOne(fetch = FetchType.LAZY, Customer.class)");
    assert_eq!(failure.span().format_location(), "<input>:4:5");

    assert_eq!(outcome.sites.len(), 1);
    assert_eq!(outcome.sites[0].before, "@ManyToOne(optional = false)");
    assert_eq!(outcome.sites[0].location(), "<input>:7:5");

    let printed = outcome.unit.to_source();
    assert!(printed.contains("    @ManyToOne(Customer.class)\n    Customer customer;"), "{printed}");
    assert!(
        printed.contains("    @ManyToOne(fetch = FetchType.LAZY, optional = false)\n    Customer previous;"),
        "{printed}",
    );
    // Only the successful site registers the import.
    assert_eq!(outcome.imports.added().collect::<Vec<_>>(), vec!["jakarta.persistence.FetchType"]);
}

#[test]
fn recipe_reports_failed_sites_with_their_file() {
    let rewrite = LazyAssociations::default()
        .rewrite_source(ONE_FAILING_SITE, Some(Path::new("src/Order.java")))
        .unwrap();

    assert_eq!(rewrite.failures.len(), 1);
    let message = rewrite.failures[0].to_string();
    assert!(message.starts_with("src/Order.java:4:5: "), "{message}");
    assert_eq!(rewrite.changed_sites.len(), 1);
    assert!(rewrite.is_changed());
    assert_eq!(
        rewrite.output,
        "\
import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;

class Order {
    @ManyToOne(Customer.class)
    Customer customer;

    @ManyToOne(fetch = FetchType.LAZY, optional = false)
    Customer previous;
}
",
    );
}

#[test]
fn deeply_nested_initializers_are_folded() {
    // The class body plus 62 groups sits at the parser's nesting limit.
    let nested = format!("{}1{}", "(".repeat(62), ")".repeat(62));
    let (output, sites) = rewrite_class(&format!(
        "class Order {{\n    @ManyToOne Customer customer;\n    int depth = {nested};\n}}\n",
    ));
    assert_eq!(
        output,
        format!(
            "class Order {{\n    @ManyToOne(fetch = FetchType.LAZY) Customer customer;\n    int depth = {nested};\n}}\n",
        ),
    );
    assert_eq!(sites, 1);
}
