use crate::tests::utils::parse;
use crate::ImportOutcome;
use crate::ImportSet;

const FETCH_TYPE: &str = "jakarta.persistence.FetchType";

fn apply(source: &str, fqns: &[&str], fold_threshold: Option<usize>) -> String {
    let mut unit = parse(source);
    let mut imports = ImportSet::from_unit(&unit);
    for fqn in fqns {
        imports.maybe_add_import(fqn);
    }
    imports.apply_to(&mut unit, fold_threshold);
    unit.to_source()
}

#[test]
fn outcomes() {
    let unit = parse(
        "package shop;\nimport jakarta.persistence.ManyToOne;\nimport com.acme.FetchMode;\nimport java.util.*;\nclass A {}\n",
    );
    let mut imports = ImportSet::from_unit(&unit);
    assert_eq!(imports.maybe_add_import("jakarta.persistence.ManyToOne"), ImportOutcome::AlreadyImported);
    assert_eq!(imports.maybe_add_import("java.lang.String"), ImportOutcome::Implicit);
    assert_eq!(imports.maybe_add_import("shop.Customer"), ImportOutcome::Implicit);
    assert_eq!(imports.maybe_add_import("java.util.List"), ImportOutcome::Implicit);
    assert_eq!(imports.maybe_add_import("Unqualified"), ImportOutcome::Implicit);
    assert_eq!(
        imports.maybe_add_import("org.other.FetchMode"),
        ImportOutcome::Conflict {
            existing: "com.acme.FetchMode".to_string(),
        },
    );
    assert!(!imports.has_additions());

    assert_eq!(imports.maybe_add_import(FETCH_TYPE), ImportOutcome::Added);
    assert_eq!(imports.maybe_add_import(FETCH_TYPE), ImportOutcome::AlreadyImported);
    assert_eq!(
        imports.maybe_add_import("com.acme.FetchType"),
        ImportOutcome::Conflict {
            existing: FETCH_TYPE.to_string(),
        },
    );
    assert_eq!(imports.added().collect::<Vec<_>>(), vec![FETCH_TYPE]);
    assert_eq!(imports.added_type("FetchType"), Some(FETCH_TYPE));
}

#[test]
fn nothing_registered_changes_nothing() {
    let source = "import jakarta.persistence.ManyToOne;\n\nclass A {}\n";
    assert_eq!(apply(source, &[], Some(1)), source);
    assert_eq!(apply(source, &["java.lang.Integer"], None), source);
}

#[test]
fn inserted_in_alphabetical_position_within_its_group() {
    let source = "\
package shop;

import jakarta.persistence.Entity;
import jakarta.persistence.ManyToOne;

import java.util.List;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], None), "\
package shop;

import jakarta.persistence.Entity;
import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;

import java.util.List;

class A {}
");
}

#[test]
fn inserted_first_keeps_the_group_separator_above() {
    let source = "\
package shop;

import java.util.List;

import jakarta.persistence.ManyToOne;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], None), "\
package shop;

import java.util.List;

import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;

class A {}
");
}

#[test]
fn inserted_last_in_its_group() {
    let source = "\
import jakarta.persistence.Entity;
import java.util.List;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], None), "\
import jakarta.persistence.Entity;
import jakarta.persistence.FetchType;
import java.util.List;

class A {}
");
}

#[test]
fn first_import_after_the_package() {
    let source = "package shop;\n\nclass A {}\n";
    assert_eq!(
        apply(source, &[FETCH_TYPE], None),
        "package shop;\n\nimport jakarta.persistence.FetchType;\n\nclass A {}\n",
    );
}

#[test]
fn first_import_at_the_top() {
    assert_eq!(
        apply("@Entity\nclass A {}\n", &[FETCH_TYPE], None),
        "import jakarta.persistence.FetchType;\n\n@Entity\nclass A {}\n",
    );
    assert_eq!(
        apply("public class A {}\n", &[FETCH_TYPE], None),
        "import jakarta.persistence.FetchType;\n\npublic class A {}\n",
    );
}

#[test]
fn static_imports_only() {
    let source = "\
import static java.util.Objects.requireNonNull;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], None), "\
import jakarta.persistence.FetchType;
import static java.util.Objects.requireNonNull;

class A {}
");
}

#[test]
fn folds_at_the_threshold() {
    let source = "\
import jakarta.persistence.Entity;
import jakarta.persistence.ManyToOne;
import java.util.UUID;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], Some(3)), "\
import jakarta.persistence.*;
import java.util.UUID;

class A {}
");
    assert_eq!(apply(source, &[FETCH_TYPE], Some(4)), "\
import jakarta.persistence.Entity;
import jakarta.persistence.FetchType;
import jakarta.persistence.ManyToOne;
import java.util.UUID;

class A {}
");
}

#[test]
fn packages_without_additions_are_not_folded() {
    let source = "\
import java.util.List;
import java.util.Map;
import java.util.Set;

class A {}
";
    assert_eq!(apply(source, &[FETCH_TYPE], Some(1)), "\
import jakarta.persistence.*;
import java.util.List;
import java.util.Map;
import java.util.Set;

class A {}
");
}
