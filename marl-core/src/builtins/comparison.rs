// marl-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, >, <=, >=, and logical not

use std::cmp::Ordering;

use marl_parser::MarlVal;

use crate::error::{Error, Result};

use super::require_int;

/// (= x & more) - Structural equality of every adjacent pair
pub(crate) fn builtin_eq(args: &[MarlVal]) -> Result<MarlVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least("=", 1, 0));
    }
    Ok(MarlVal::bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

/// Check that every adjacent pair of integers satisfies `accept`.
fn compare_chain(
    name: &'static str,
    args: &[MarlVal],
    accept: fn(Ordering) -> bool,
) -> Result<MarlVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least(name, 1, 0));
    }
    let nums = args
        .iter()
        .map(|arg| require_int(name, arg))
        .collect::<Result<Vec<_>>>()?;
    Ok(MarlVal::bool(
        nums.windows(2).all(|pair| accept(pair[0].cmp(&pair[1]))),
    ))
}

/// (< x & more) - Strictly increasing
pub(crate) fn builtin_lt(args: &[MarlVal]) -> Result<MarlVal> {
    compare_chain("<", args, Ordering::is_lt)
}

/// (> x & more) - Strictly decreasing
pub(crate) fn builtin_gt(args: &[MarlVal]) -> Result<MarlVal> {
    compare_chain(">", args, Ordering::is_gt)
}

/// (<= x & more) - Non-decreasing
pub(crate) fn builtin_le(args: &[MarlVal]) -> Result<MarlVal> {
    compare_chain("<=", args, Ordering::is_le)
}

/// (>= x & more) - Non-increasing
pub(crate) fn builtin_ge(args: &[MarlVal]) -> Result<MarlVal> {
    compare_chain(">=", args, Ordering::is_ge)
}

/// (not x) - true if x is false or nil
pub(crate) fn builtin_not(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("not", 1, args.len()));
    }
    Ok(MarlVal::bool(!args[0].is_truthy()))
}
