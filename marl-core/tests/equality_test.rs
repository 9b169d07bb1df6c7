// marl-core - Equality integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structural equality through the `=` builtin.
//!
//! Lists and vectors with the same elements are equal. Maps compare as sets
//! of pairs. Atoms and closures compare by identity. Metadata never matters.

mod common;

use common::{ErrorKind, MarlVal, eval_str_with_env, new_env};

fn is_true(src: &str) {
    assert_eval!(src, MarlVal::bool(true));
}

fn is_false(src: &str) {
    assert_eval!(src, MarlVal::bool(false));
}

#[test]
fn test_scalars() {
    is_true("(= 1 1)");
    is_false("(= 1 2)");
    is_true("(= nil nil)");
    is_false("(= nil false)");
    is_true("(= \"abc\" \"abc\")");
    is_false("(= \"abc\" \"abd\")");
    is_true("(= :a :a)");
    is_false("(= :a 'a)");
    is_true("(= 'sym 'sym)");
    is_false("(= 1 \"1\")");
}

#[test]
fn test_lists() {
    is_true("(= (list 1 2) (list 1 2))");
    is_false("(= (list 1 2) (list 1 2 3))");
    is_false("(= (list 1 2) (list 2 1))");
    is_true("(= () ())");
    is_true("(= (list (list 1) [2]) (list (list 1) [2]))");
}

#[test]
fn test_list_equals_vector_with_same_elements() {
    is_true("(= [1 2] (list 1 2))");
    is_true("(= (list 1 2) [1 2])");
    is_true("(= [] ())");
    is_false("(= [1 2] (list 1 2 3))");
    is_true("(= [[1] (list 2)] (list (list 1) [2]))");
}

#[test]
fn test_list_and_vector_still_distinguishable() {
    is_true("(list? (list 1 2))");
    is_false("(list? [1 2])");
    is_true("(vector? [1 2])");
    is_false("(vector? (list 1 2))");
    assert_prints!("[1 2]", "[1 2]");
    assert_prints!("(list 1 2)", "(1 2)");
}

#[test]
fn test_maps_ignore_pair_order() {
    is_true("(= {:a 1} {:a 1})");
    is_true("(= {:a 1 :b 2} {:b 2 :a 1})");
    is_false("(= {:a 1} {:a 2})");
    is_false("(= {:a 1} {:a 1 :b 2})");
    is_true("(= {} (hash-map))");
    is_true("(= {[1] :v} (hash-map (list 1) :v))");
}

#[test]
fn test_chained() {
    is_true("(= 1 1 1)");
    is_false("(= 1 1 2)");
    is_true("(= 5)");
    assert_eval_err!("(=)", ErrorKind::Arity);
}

#[test]
fn test_atoms_by_identity() {
    let env = new_env();
    eval_str_with_env("(def! a (atom 1))", &env).unwrap();
    assert_eval_with_env!("(= a a)", MarlVal::bool(true), &env);
    assert_eval_with_env!("(= a (atom 1))", MarlVal::bool(false), &env);
}

#[test]
fn test_functions_by_identity() {
    let env = new_env();
    eval_str_with_env("(def! f (fn* () 1))", &env).unwrap();
    assert_eval_with_env!("(= f f)", MarlVal::bool(true), &env);
    assert_eval_with_env!("(= f (fn* () 1))", MarlVal::bool(false), &env);
    assert_eval_with_env!("(= + +)", MarlVal::bool(true), &env);
}

#[test]
fn test_metadata_ignored() {
    is_true("(= [1 2] (with-meta [1 2] {:tag 1}))");
    is_true("(= {:a 1} ^{:m true} {:a 1})");
}
