// marl-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! All arithmetic is on `i64` and checked. An overflowing result is an error
//! rather than a wrapped value, and so is division by zero. Division
//! truncates toward zero.

use marl_parser::MarlVal;

use crate::error::{Error, Result};

use super::require_int;

/// Fold integer arguments with a checked operation.
fn fold_checked(
    name: &'static str,
    init: i64,
    args: &[MarlVal],
    op: fn(i64, i64) -> Option<i64>,
) -> Result<i64> {
    let mut acc = init;
    for arg in args {
        let n = require_int(name, arg)?;
        acc = op(acc, n).ok_or(Error::Overflow(name))?;
    }
    Ok(acc)
}

/// (+ & nums) - Sum; `(+)` is 0
pub(crate) fn builtin_add(args: &[MarlVal]) -> Result<MarlVal> {
    fold_checked("+", 0, args, i64::checked_add).map(MarlVal::int)
}

/// (* & nums) - Product; `(*)` is 1
pub(crate) fn builtin_mul(args: &[MarlVal]) -> Result<MarlVal> {
    fold_checked("*", 1, args, i64::checked_mul).map(MarlVal::int)
}

/// (- x & nums) - Subtract the rest from x, or negate a single argument
pub(crate) fn builtin_sub(args: &[MarlVal]) -> Result<MarlVal> {
    let (first, rest) = match args.split_first() {
        Some(split) => split,
        None => return Err(Error::arity_at_least("-", 1, 0)),
    };
    let first = require_int("-", first)?;

    if rest.is_empty() {
        return first
            .checked_neg()
            .map(MarlVal::int)
            .ok_or(Error::Overflow("-"));
    }
    fold_checked("-", first, rest, i64::checked_sub).map(MarlVal::int)
}

/// (/ x & nums) - Divide x by the rest, or take the reciprocal of one argument
pub(crate) fn builtin_div(args: &[MarlVal]) -> Result<MarlVal> {
    let (first, rest) = match args.split_first() {
        Some(split) => split,
        None => return Err(Error::arity_at_least("/", 1, 0)),
    };
    let first = require_int("/", first)?;

    if rest.is_empty() {
        return divide(1, first).map(MarlVal::int);
    }
    let mut acc = first;
    for arg in rest {
        acc = divide(acc, require_int("/", arg)?)?;
    }
    Ok(MarlVal::int(acc))
}

fn divide(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    // Only i64::MIN / -1 can fail once zero is excluded.
    a.checked_div(b).ok_or(Error::Overflow("/"))
}
