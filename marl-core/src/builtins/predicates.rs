// marl-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, symbol?, keyword?, string?, number?,
//! fn?, sequential?

use marl_parser::MarlVal;

use crate::error::{Error, Result};

/// Apply a one-argument predicate.
fn predicate(name: &'static str, args: &[MarlVal], test: fn(&MarlVal) -> bool) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named(name, 1, args.len()));
    }
    Ok(MarlVal::bool(test(&args[0])))
}

pub(crate) fn builtin_nil_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("nil?", args, MarlVal::is_nil)
}

pub(crate) fn builtin_true_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("true?", args, |v| matches!(v, MarlVal::Bool(true)))
}

pub(crate) fn builtin_false_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("false?", args, |v| matches!(v, MarlVal::Bool(false)))
}

pub(crate) fn builtin_symbol_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("symbol?", args, |v| matches!(v, MarlVal::Symbol(_)))
}

pub(crate) fn builtin_keyword_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("keyword?", args, |v| matches!(v, MarlVal::Keyword(_)))
}

pub(crate) fn builtin_string_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("string?", args, |v| matches!(v, MarlVal::String(_)))
}

pub(crate) fn builtin_number_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("number?", args, |v| matches!(v, MarlVal::Int(_)))
}

/// (fn? x) - Closures and builtins
pub(crate) fn builtin_fn_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("fn?", args, MarlVal::is_fn)
}

/// (sequential? x) - Lists and vectors
pub(crate) fn builtin_sequential_p(args: &[MarlVal]) -> Result<MarlVal> {
    predicate("sequential?", args, |v| v.as_seq().is_some())
}
