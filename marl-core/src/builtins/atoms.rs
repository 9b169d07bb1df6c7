// marl-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, atom?, deref, reset!, swap!

use marl_parser::{MarlAtom, MarlVal};

use crate::error::{Error, Result};
use crate::eval::apply;

fn require_atom<'a>(name: &str, val: &'a MarlVal) -> Result<&'a MarlAtom> {
    match val {
        MarlVal::Atom(atom) => Ok(atom),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

// ============================================================================
// Atom Creation and Predicate
// ============================================================================

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom", 1, args.len()));
    }
    Ok(MarlVal::atom(args[0].clone()))
}

/// (atom? x) - Returns true if x is an atom
pub(crate) fn builtin_atom_p(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom?", 1, args.len()));
    }
    Ok(MarlVal::bool(matches!(args[0], MarlVal::Atom(_))))
}

// ============================================================================
// Basic Operations
// ============================================================================

/// (deref atom) - Current value
pub(crate) fn builtin_deref(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("deref", 1, args.len()));
    }
    Ok(require_atom("deref", &args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("reset!", 2, args.len()));
    }
    Ok(require_atom("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - Set atom to (f current & args), returns it
pub(crate) fn builtin_swap(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least("swap!", 2, args.len()));
    }
    let atom = require_atom("swap!", &args[0])?;
    let func = &args[1];
    if !func.is_fn() {
        return Err(Error::type_error_in("swap!", "function", func.type_name()));
    }

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);

    let new_val = apply(func, &call_args)?;
    Ok(atom.reset(new_val))
}
