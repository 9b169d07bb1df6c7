// marl-core - Property-based tests for reading and printing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the reader and printer.
//!
//! Tests the following properties:
//! - printing a read form and reading it again gives an equal form
//! - printing is a fixed point after one round
//! - quoted data evaluates to itself

mod common;

use common::{MarlVal, eval_str};
use marl_parser::{pr_str, read};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating source text
// =============================================================================

fn arb_int() -> impl Strategy<Value = String> {
    any::<i64>().prop_map(|n| n.to_string())
}

fn arb_symbol() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9!?*<>=-]{0,6}".prop_filter("reserved words", |s| {
        !matches!(s.as_str(), "nil" | "true" | "false")
    })
}

fn arb_keyword() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,6}".prop_map(|s| format!(":{}", s))
}

fn arb_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ;()]",
            Just("\\n".to_string()),
            Just("\\t".to_string()),
            Just("\\\"".to_string()),
            Just("\\\\".to_string()),
        ],
        0..8,
    )
    .prop_map(|parts| format!("\"{}\"", parts.concat()))
}

fn arb_atom() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_int(),
        arb_symbol(),
        arb_keyword(),
        arb_string(),
        Just("nil".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

/// Nested lists, vectors and maps of atoms, with arbitrary spacing.
fn arb_form() -> impl Strategy<Value = String> {
    arb_atom().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("( {} )", items.join("  "))),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            prop::collection::vec((arb_keyword(), inner.clone()), 0..3).prop_map(|pairs| {
                let body: Vec<String> = pairs.iter().map(|(k, v)| format!("{} {}", k, v)).collect();
                format!("{{{}}}", body.join(" "))
            }),
        ]
    })
}

fn read_one(src: &str) -> MarlVal {
    read(src).unwrap().unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// read(print(read(s))) = read(s)
    #[test]
    fn print_then_read_is_identity(src in arb_form()) {
        let form = read_one(&src);
        let printed = pr_str(&form, true);
        prop_assert_eq!(read_one(&printed), form);
    }

    /// print(read(print(read(s)))) = print(read(s))
    #[test]
    fn printing_is_canonical(src in arb_form()) {
        let printed = pr_str(&read_one(&src), true);
        let reprinted = pr_str(&read_one(&printed), true);
        prop_assert_eq!(reprinted, printed);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// (quote x) evaluates to the form x
    #[test]
    fn quoted_data_is_itself(src in arb_form()) {
        let form = read_one(&src);
        let quoted = format!("(quote {})", src);
        prop_assert_eq!(eval_str(&quoted).unwrap(), form);
    }

    /// Integers print exactly as Rust formats them
    #[test]
    fn integers_round_trip(n in any::<i64>()) {
        prop_assert_eq!(pr_str(&read_one(&n.to_string()), true), n.to_string());
    }
}
