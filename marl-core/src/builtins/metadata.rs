// marl-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Metadata operations: meta, with-meta
//!
//! Lists, vectors, maps and functions can carry a metadata map. Attaching
//! metadata returns a new value; the original is unchanged and equality
//! ignores metadata.

use std::rc::Rc;

use marl_parser::MarlVal;

use crate::error::{Error, Result};

/// (meta obj) - Returns the metadata map of obj, or nil
pub(crate) fn builtin_meta(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("meta", 1, args.len()));
    }
    Ok(match args[0].meta() {
        Some(meta) => MarlVal::Map((**meta).clone(), None),
        None => MarlVal::Nil,
    })
}

/// (with-meta obj m) - Returns obj carrying metadata m
pub(crate) fn builtin_with_meta(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("with-meta", 2, args.len()));
    }
    attach_meta(&args[0], &args[1])
}

/// Attach `meta` (a map, or nil to clear) to `value`.
pub(crate) fn attach_meta(value: &MarlVal, meta: &MarlVal) -> Result<MarlVal> {
    let meta = match meta {
        MarlVal::Nil => None,
        MarlVal::Map(map, _) => Some(Rc::new(map.clone())),
        other => {
            return Err(Error::type_error_in(
                "with-meta",
                "map or nil",
                other.type_name(),
            ));
        }
    };
    value.with_meta(meta).ok_or_else(|| {
        Error::type_error_in(
            "with-meta",
            "list, vector, map or function",
            value.type_name(),
        )
    })
}
