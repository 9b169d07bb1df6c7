// marl-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Expansion of `quasiquote` into ordinary list construction.
//!
//! `` `(a ~b ~@c) `` becomes `(cons 'a (cons b (concat c ())))`. The
//! `cons`, `concat` and `vec` heads are embedded as builtin values rather
//! than symbols, so the expansion does not depend on what those names are
//! bound to where it runs.

use marl_parser::{MarlVal, Vector, ensure_sufficient_stack};

use super::apply::make_native_fn;
use crate::builtins::sequences::{builtin_concat, builtin_cons, builtin_vec};

/// Expand a quasiquoted form into code that builds it.
pub fn quasiquote(ast: &MarlVal) -> MarlVal {
    ensure_sufficient_stack(|| expand_form(ast))
}

fn expand_form(ast: &MarlVal) -> MarlVal {
    match ast {
        MarlVal::Unquote(inner) => (**inner).clone(),
        MarlVal::List(items, _) => {
            if let Some(inner) = unquoted_operand(items, "unquote") {
                return inner;
            }
            expand_seq(items)
        }
        MarlVal::Vector(items, _) => MarlVal::list(vec![vec_fn(), expand_seq(items)]),
        MarlVal::Map(..) | MarlVal::Symbol(_) => MarlVal::Quote(Box::new(ast.clone())),
        MarlVal::Quote(_)
        | MarlVal::Quasiquote(_)
        | MarlVal::SpliceUnquote(_)
        | MarlVal::Deref(_)
        | MarlVal::WithMeta(..) => match ast.expand_reader_macro() {
            Some(expanded) => quasiquote(&expanded),
            None => ast.clone(),
        },
        _ => ast.clone(),
    }
}

/// Fold the elements right to left into `cons`/`concat` calls.
fn expand_seq(items: &Vector<MarlVal>) -> MarlVal {
    let mut acc = MarlVal::empty_list();
    for elt in items.iter().rev() {
        acc = match splice_operand(elt) {
            Some(spliced) => MarlVal::list(vec![concat_fn(), spliced, acc]),
            None => MarlVal::list(vec![cons_fn(), quasiquote(elt), acc]),
        };
    }
    acc
}

fn splice_operand(elt: &MarlVal) -> Option<MarlVal> {
    match elt {
        MarlVal::SpliceUnquote(inner) => Some((**inner).clone()),
        MarlVal::List(items, _) => unquoted_operand(items, "splice-unquote"),
        _ => None,
    }
}

/// The operand of a two-element list `(name x)`.
fn unquoted_operand(items: &Vector<MarlVal>, name: &str) -> Option<MarlVal> {
    if items.len() != 2 {
        return None;
    }
    match items.front() {
        Some(MarlVal::Symbol(sym)) if sym.name() == name => items.get(1).cloned(),
        _ => None,
    }
}

fn cons_fn() -> MarlVal {
    MarlVal::NativeFn(make_native_fn("cons", builtin_cons), None)
}

fn concat_fn() -> MarlVal {
    MarlVal::NativeFn(make_native_fn("concat", builtin_concat), None)
}

fn vec_fn() -> MarlVal {
    MarlVal::NativeFn(make_native_fn("vec", builtin_vec), None)
}
