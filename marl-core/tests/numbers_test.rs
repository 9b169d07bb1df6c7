// marl-core - Arithmetic and comparison integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integer arithmetic is checked: overflow and division by zero are value
//! errors, and non-integer operands are type errors.

mod common;

use common::{ErrorKind, MarlVal};

#[test]
fn test_addition_and_multiplication() {
    assert_eval!("(+)", MarlVal::int(0));
    assert_eval!("(+ 1 2 3)", MarlVal::int(6));
    assert_eval!("(*)", MarlVal::int(1));
    assert_eval!("(* 2 3 4)", MarlVal::int(24));
}

#[test]
fn test_subtraction() {
    assert_eval!("(- 10 3 2)", MarlVal::int(5));
    assert_eval!("(- 5)", MarlVal::int(-5));
    assert_eval!("(- 5 0)", MarlVal::int(5));
    assert_eval_err!("(-)", ErrorKind::Arity);
}

#[test]
fn test_division_truncates() {
    assert_eval!("(/ 10 3)", MarlVal::int(3));
    assert_eval!("(/ -7 2)", MarlVal::int(-3));
    assert_eval!("(/ 100 5 2)", MarlVal::int(10));
    assert_eval!("(/ 1)", MarlVal::int(1));
    assert_eval!("(/ 2)", MarlVal::int(0));
}

#[test]
fn test_division_by_zero() {
    assert_eval_err!("(/ 1 0)", ErrorKind::Value);
    assert_eval_err!("(/ 0)", ErrorKind::Value);
    assert_eval_err_contains!("(/ 1 0)", "division by zero");
}

#[test]
fn test_overflow() {
    assert_eval_err!("(+ 9223372036854775807 1)", ErrorKind::Value);
    assert_eval_err!("(* 9223372036854775807 2)", ErrorKind::Value);
    assert_eval_err!("(- -9223372036854775807 2)", ErrorKind::Value);
    assert_eval_err!("(- (- -9223372036854775807 1))", ErrorKind::Value);
    assert_eval_err!("(/ (- -9223372036854775807 1) -1)", ErrorKind::Value);
    assert_eval_err_contains!("(+ 9223372036854775807 1)", "overflow");
}

#[test]
fn test_extreme_literals() {
    assert_eval!("9223372036854775807", MarlVal::int(i64::MAX));
    assert_eval!("-9223372036854775808", MarlVal::int(i64::MIN));
}

#[test]
fn test_non_integer_operands() {
    assert_eval_err!("(+ 1 \"a\")", ErrorKind::Type);
    assert_eval_err!("(* 2 nil)", ErrorKind::Type);
    assert_eval_err!("(- :k)", ErrorKind::Type);
    assert_eval_err!("(< 1 'b)", ErrorKind::Type);
    assert_eval_err_contains!("(+ 1 \"a\")", "expected int, got string");
}

#[test]
fn test_ordering() {
    assert_eval!("(< 1 2 3)", MarlVal::bool(true));
    assert_eval!("(< 1 3 2)", MarlVal::bool(false));
    assert_eval!("(<= 1 1 2)", MarlVal::bool(true));
    assert_eval!("(> 3 2 1)", MarlVal::bool(true));
    assert_eval!("(>= 3 3 4)", MarlVal::bool(false));
    assert_eval!("(< 1)", MarlVal::bool(true));
}

#[test]
fn test_not() {
    assert_eval!("(not nil)", MarlVal::bool(true));
    assert_eval!("(not false)", MarlVal::bool(true));
    assert_eval!("(not 0)", MarlVal::bool(false));
    assert_eval_err!("(not)", ErrorKind::Arity);
}

#[test]
fn test_number_predicate() {
    assert_eval!("(number? 1)", MarlVal::bool(true));
    assert_eval!("(number? \"1\")", MarlVal::bool(false));
}
