// marl-core - Map built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Map operations: hash-map, map?, get, contains?, assoc, keys, vals

use marl_parser::{MarlMap, MarlVal};

use crate::error::{Error, Result};

/// The map behind a map-or-nil argument.
fn map_arg(name: &'static str, val: &MarlVal) -> Result<MarlMap> {
    match val {
        MarlVal::Nil => Ok(MarlMap::new()),
        MarlVal::Map(map, _) => Ok(map.clone()),
        other => Err(Error::type_error_in(name, "map or nil", other.type_name())),
    }
}

/// (hash-map & kvs) - Map from alternating keys and values
pub(crate) fn builtin_hash_map(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() % 2 != 0 {
        return Err(Error::arity_pairs("hash-map", 0, args.len()));
    }
    let pairs = args
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()));
    Ok(MarlVal::Map(MarlMap::from_pairs(pairs), None))
}

/// (map? x)
pub(crate) fn builtin_map_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("map?", 1, args.len()));
    }
    Ok(MarlVal::bool(matches!(args[0], MarlVal::Map(..))))
}

/// (get map key not-found?) - Value for key, else not-found or nil
pub(crate) fn builtin_get(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::arity_range("get", 2, 3, args.len()));
    }

    let not_found = args.get(2).cloned().unwrap_or(MarlVal::Nil);
    let map = map_arg("get", &args[0])?;
    Ok(map.get(&args[1]).cloned().unwrap_or(not_found))
}

/// (contains? map key)
pub(crate) fn builtin_contains_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("contains?", 2, args.len()));
    }
    let map = map_arg("contains?", &args[0])?;
    Ok(MarlVal::bool(map.contains_key(&args[1])))
}

/// (assoc map k v & kvs) - New map with the pairs added or replaced
pub(crate) fn builtin_assoc(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() < 3 || (args.len() - 1) % 2 != 0 {
        return Err(Error::arity_pairs("assoc", 1, args.len()));
    }

    let mut map = map_arg("assoc", &args[0])?;
    for pair in args[1..].chunks(2) {
        map.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(MarlVal::Map(map, None))
}

/// (keys map) - List of keys
pub(crate) fn builtin_keys(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keys", 1, args.len()));
    }
    let map = map_arg("keys", &args[0])?;
    Ok(MarlVal::list(map.keys().cloned().collect()))
}

/// (vals map) - List of values, in the same order as `keys`
pub(crate) fn builtin_vals(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vals", 1, args.len()));
    }
    let map = map_arg("vals", &args[0])?;
    Ok(MarlVal::list(map.values().cloned().collect()))
}
