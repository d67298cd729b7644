use crate::tests::utils::parse;
use crate::tests::utils::rewrite;
use crate::LazyAssociations;
use proptest::prelude::*;

const TARGETED: [&str; 2] = ["ManyToOne", "OneToOne"];
const UNTARGETED: [&str; 4] = ["OneToMany", "ManyToMany", "Basic", "ElementCollection"];

fn other_argument() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "optional = false",
        "cascade = CascadeType.ALL",
        "cascade = {CascadeType.PERSIST, CascadeType.MERGE}",
        "mappedBy = \"owner\"",
        "targetEntity = Customer.class",
        "orphanRemoval = true",
        "custom = Unknown.VALUE",
    ])
}

fn fetch_argument() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "fetch = FetchType.EAGER",
        "fetch = FetchType.LAZY",
        "fetch=FetchType.EAGER",
        "fetch = jakarta.persistence.FetchType.EAGER",
    ])
}

/// An argument list: non-fetch arguments in order, plus fetch arguments
/// spliced in at arbitrary positions.
fn arguments() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    (
        prop::collection::vec(other_argument(), 0..4),
        prop::collection::vec((fetch_argument(), 0usize..5), 0..3),
    )
        .prop_map(|(others, fetches)| {
            let mut all = others.clone();
            for (fetch, position) in fetches {
                all.insert(position.min(all.len()), fetch);
            }
            (all, others)
        })
}

#[derive(Clone, Debug)]
struct Field {
    annotation: &'static str,
    arguments: Vec<&'static str>,
    non_fetch: Vec<&'static str>,
}

impl Field {
    fn targeted(&self) -> bool {
        TARGETED.contains(&self.annotation)
    }

    fn source(&self) -> String {
        if self.arguments.is_empty() {
            format!("@{}", self.annotation)
        } else {
            format!("@{}({})", self.annotation, self.arguments.join(", "))
        }
    }

    fn expected(&self) -> String {
        if !self.targeted() {
            return self.source();
        }
        let mut arguments = vec!["fetch = FetchType.LAZY"];
        arguments.extend(&self.non_fetch);
        format!("@{}({})", self.annotation, arguments.join(", "))
    }
}

fn field(annotations: Vec<&'static str>) -> impl Strategy<Value = Field> {
    (prop::sample::select(annotations), arguments()).prop_map(
        |(annotation, (arguments, non_fetch))| Field {
            annotation,
            arguments,
            non_fetch,
        },
    )
}

fn unit(fields: &[Field], annotation_text: impl Fn(&Field) -> String) -> String {
    let mut source = String::from("import jakarta.persistence.*;\n\nclass Order {\n");
    for (idx, field) in fields.iter().enumerate() {
        source.push_str(&format!("    {}\n    Object f{idx};\n", annotation_text(field)));
    }
    source.push_str("}\n");
    source
}

fn all_annotations() -> Vec<&'static str> {
    TARGETED.iter().chain(UNTARGETED.iter()).copied().collect()
}

proptest! {
    /// Targeted annotations get exactly one lazy fetch argument, first,
    /// followed by their other arguments in order; everything else is
    /// printed as it was.
    #[test]
    fn targeted_annotations_are_rewritten_and_others_kept(
        fields in prop::collection::vec(field(all_annotations()), 1..6),
    ) {
        let source = unit(&fields, Field::source);
        let expected = unit(&fields, Field::expected);

        let rewrite = rewrite(&source);
        prop_assert!(rewrite.failures.is_empty(), "{:?}", rewrite.failures);
        prop_assert_eq!(&rewrite.output, &expected);
        prop_assert!(rewrite.imports_added.is_empty());
    }

    /// A second pass over rewritten output changes nothing.
    #[test]
    fn rewriting_is_idempotent(
        fields in prop::collection::vec(field(all_annotations()), 1..6),
    ) {
        let once = rewrite(&unit(&fields, Field::source)).output;
        let twice = rewrite(&once);
        prop_assert_eq!(&twice.output, &once);
        prop_assert!(twice.changed_sites.is_empty());
    }

    /// Units without a targeted annotation are returned unchanged, and the
    /// recipe reports that it doesn't apply to them.
    #[test]
    fn untargeted_units_are_untouched(
        fields in prop::collection::vec(field(UNTARGETED.to_vec()), 0..6),
    ) {
        let source = unit(&fields, Field::source);
        prop_assert!(!LazyAssociations::default().applies_to(&parse(&source)));

        let rewrite = rewrite(&source);
        prop_assert_eq!(&rewrite.output, &source);
        prop_assert!(!rewrite.is_changed());
    }
}
