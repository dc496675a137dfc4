//! Designator parsing through the public API

mod common;

use common::{init_logging, po_context, PO_NS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xmlschema_scd::scd::{axis_to_string, format_steps, string_to_axis};
use xmlschema_scd::{
    parse_relative_scd, parse_scp, Axis, Error, Limits, NameTest, ScdParser, Step,
};

#[test]
fn test_every_axis_keyword_round_trips() {
    for axis in Axis::named() {
        assert_eq!(string_to_axis(axis_to_string(axis)), axis);
        let scp = format!("/{}::*", axis);
        let steps = parse_scp(&scp, None, false).unwrap();
        assert_eq!(steps, vec![Step::new(axis, NameTest::Wildcard)]);
    }
}

#[test]
fn test_purchase_order_designator() {
    init_logging();
    let steps = parse_relative_scd(
        "xmlns(p=http://example.com/schema/po)xscd(/type::p:USAddress)",
        false,
    )
    .unwrap();
    assert_eq!(
        steps,
        vec![Step::new(Axis::Type, NameTest::qualified(Some(PO_NS), "USAddress"))]
    );
}

#[test]
fn test_canonical_rendering_reparses() {
    let ns = po_context();
    let steps = parse_scp("/p:purchaseOrder/@orderDate/~*/facet::pattern[1]", Some(&ns), false)
        .unwrap();
    assert_eq!(
        format_steps(&steps),
        "/schemaElement::{http://example.com/schema/po}purchaseOrder\
         /schemaAttribute::orderDate/type::*/facet::pattern[1]"
    );
}

#[test]
fn test_step_list_dumps_to_json() {
    let ns = po_context();
    let steps = parse_scp("//p:item[2]", Some(&ns), false).unwrap();
    let json = serde_json::to_value(&steps).unwrap();

    assert_eq!(json[0]["axis"], "specialComponent");
    assert_eq!(json[0]["name_test"], "wildcard");
    assert_eq!(json[1]["axis"], "schemaElement");
    assert_eq!(json[1]["name_test"]["qualified"]["uri"], PO_NS);
    assert_eq!(json[1]["predicate"], 2);

    let back: Vec<Step> = serde_json::from_value(json).unwrap();
    assert_eq!(back, steps);
}

#[test]
fn test_grammar_error_reports_position() {
    let err = parse_scp("/type::*/@", None, false).unwrap_err();
    match err {
        Error::Grammar(e) => {
            assert_eq!(e.position, Some(10));
            assert_eq!(e.expression.as_deref(), Some("/type::*/@"));
            assert!(e.to_string().contains("Expression: /type::*/@"));
        }
        other => panic!("expected a grammar error, got {:?}", other),
    }
}

#[test]
fn test_strict_limits() {
    let parser = ScdParser::with_limits(Limits::strict());
    let long = "/a".repeat(Limits::strict().max_steps + 1);
    assert!(matches!(
        parser.parse_scp(&long, None, false),
        Err(Error::LimitExceeded(_))
    ));
    assert!(ScdParser::new().parse_scp(&long, None, false).is_ok());
}

proptest! {
    #[test]
    fn prop_wrapped_form_matches_raw_form(local in "[a-zA-Z_][a-zA-Z0-9_.-]{0,12}", n in 1u32..50) {
        let ns = po_context();
        let raw = parse_scp(&format!("/type::p:{}[{}]", local, n), Some(&ns), false).unwrap();
        let wrapped = parse_relative_scd(
            &format!("xmlns(p={})xscd(/type::p:{}[{}])", PO_NS, local, n),
            false,
        )
        .unwrap();
        prop_assert_eq!(raw, wrapped);
    }

    #[test]
    fn prop_arbitrary_wrapped_input_never_panics(text in "(xmlns\\(|xscd\\(|[a-z:/@~.*0^()\\[\\]1-9 ])*") {
        let _ = parse_relative_scd(&text, false);
        let _ = parse_relative_scd(&text, true);
    }
}
