//! Printing a parsed compilation unit reproduces its input exactly.

use crate::tests::utils::parse_unit;
use proptest::prelude::*;

const ENTITY: &str = r#"/*
 * Copyright header.
 */
package com.example.shop;

import jakarta.persistence.*;
import java.util.List;   // trailing comment

/** An order. */
@Entity
@Table(name = "orders", indexes = {
    @Index(columnList = "customer_id"),
})
public class Order extends BaseEntity<Long> implements Comparable<Order> {

    @Id @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

    @ManyToOne(fetch = FetchType.EAGER, optional = false)
    @JoinColumn(name = "customer_id")
    private Customer customer;

    @OneToMany(mappedBy = "order", cascade = CascadeType.ALL)
    private List<Line> lines = new ArrayList<>();

    static final String QUERY = """
        select o from Order o
        where o.id = :id
        """;

    @Override
    public int compareTo(Order other) {
        return Long.compare(id, other.id >>> 1);
    }

    enum Status { OPEN, SHIPPED; }

    record Total(long cents) {}
}
"#;

#[test]
fn realistic_entity_round_trips() {
    assert_eq!(parse_unit(ENTITY).to_source(), ENTITY);
}

#[test]
fn crlf_and_tabs_round_trip() {
    let source = "package a;\r\n\r\nclass B {\r\n\t@ManyToOne\r\n\tC c;\r\n}\r\n";
    assert_eq!(parse_unit(source).to_source(), source);
}

fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "",
        " ",
        "\n",
        "\n    ",
        "\r\n\t",
        " /* note */ ",
        " // note\n",
        "\n/** doc */\n",
    ])
    .prop_map(str::to_string)
}

fn member() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "@ManyToOne Customer customer;",
        "@ManyToOne(fetch = FetchType.EAGER) Customer customer;",
        "@OneToOne(optional = false, cascade = {CascadeType.ALL}) Address address;",
        "private int count = 1 << 3;",
        "List<Map<String, Long>> nested;",
        "void run() { if (a < b) { call(x -> x + 1); } }",
        "abstract String name();",
        "static { init(); }",
        "enum E { A, B; }",
        "record R(@ManyToOne Customer c) {}",
        ";",
    ])
    .prop_map(str::to_string)
}

proptest! {
    /// Members separated by arbitrary whitespace and comments print back
    /// byte-for-byte.
    #[test]
    fn generated_units_round_trip(
        parts in prop::collection::vec((separator(), member()), 0..8),
        trailing in separator(),
    ) {
        let mut source = String::from("package p;\nimport a.B;\nabstract class C {");
        for (sep, member) in &parts {
            source.push_str(sep);
            source.push_str(member);
        }
        source.push_str(&trailing);
        source.push('}');
        source.push_str(&trailing);

        prop_assert_eq!(parse_unit(&source).to_source(), source);
    }
}
