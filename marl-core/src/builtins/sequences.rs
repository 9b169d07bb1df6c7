// marl-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: list, vector, vec, cons, concat, first, rest, nth,
//! count, empty?, list?, vector?
//!
//! Lists and vectors are both sequences here, and `nil` reads as the empty
//! sequence. Functions that build a new sequence return a list unless their
//! name says otherwise.

use marl_parser::{MarlVal, Vector};

use crate::error::{Error, Result};

use super::require_int;

/// Elements of a list, vector or nil.
fn seq_items(name: &'static str, val: &MarlVal) -> Result<Vector<MarlVal>> {
    match val {
        MarlVal::Nil => Ok(Vector::new()),
        MarlVal::List(items, _) | MarlVal::Vector(items, _) => Ok(items.clone()),
        other => Err(Error::type_error_in(name, "list, vector or nil", other.type_name())),
    }
}

// ============================================================================
// Construction
// ============================================================================

/// (list & items)
pub(crate) fn builtin_list(args: &[MarlVal]) -> Result<MarlVal> {
    Ok(MarlVal::list(args.to_vec()))
}

/// (vector & items)
pub(crate) fn builtin_vector(args: &[MarlVal]) -> Result<MarlVal> {
    Ok(MarlVal::vector(args.to_vec()))
}

/// (vec coll) - Vector with the elements of a sequence
pub(crate) fn builtin_vec(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vec", 1, args.len()));
    }
    Ok(MarlVal::Vector(seq_items("vec", &args[0])?, None))
}

/// (cons x coll) - List with x in front of the elements of coll
pub(crate) fn builtin_cons(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    let mut items = seq_items("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(MarlVal::List(items, None))
}

/// (concat & colls) - List of all elements, in order
pub(crate) fn builtin_concat(args: &[MarlVal]) -> Result<MarlVal> {
    let mut items = Vector::new();
    for arg in args {
        items.append(seq_items("concat", arg)?);
    }
    Ok(MarlVal::List(items, None))
}

// ============================================================================
// Access
// ============================================================================

/// (first coll) - First element, or nil
pub(crate) fn builtin_first(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("first", 1, args.len()));
    }
    let items = seq_items("first", &args[0])?;
    Ok(items.front().cloned().unwrap_or(MarlVal::Nil))
}

/// (rest coll) - List of all but the first element
pub(crate) fn builtin_rest(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("rest", 1, args.len()));
    }
    let mut items = seq_items("rest", &args[0])?;
    if !items.is_empty() {
        items.pop_front();
    }
    Ok(MarlVal::List(items, None))
}

/// (nth coll index)
pub(crate) fn builtin_nth(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("nth", 2, args.len()));
    }
    let items = seq_items("nth", &args[0])?;
    let index = require_int("nth", &args[1])?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i).cloned())
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}

/// (count coll) - Number of elements in a sequence or map; nil counts 0
pub(crate) fn builtin_count(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("count", 1, args.len()));
    }
    let len = match &args[0] {
        MarlVal::Map(map, _) => map.len(),
        other => seq_items("count", other)?.len(),
    };
    i64::try_from(len)
        .map(MarlVal::int)
        .map_err(|_| Error::Overflow("count"))
}

/// (empty? coll)
pub(crate) fn builtin_empty_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("empty?", 1, args.len()));
    }
    let empty = match &args[0] {
        MarlVal::Map(map, _) => map.is_empty(),
        other => seq_items("empty?", other)?.is_empty(),
    };
    Ok(MarlVal::bool(empty))
}

// ============================================================================
// Predicates
// ============================================================================

/// (list? x)
pub(crate) fn builtin_list_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("list?", 1, args.len()));
    }
    Ok(MarlVal::bool(matches!(args[0], MarlVal::List(..))))
}

/// (vector? x)
pub(crate) fn builtin_vector_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vector?", 1, args.len()));
    }
    Ok(MarlVal::bool(matches!(args[0], MarlVal::Vector(..))))
}
