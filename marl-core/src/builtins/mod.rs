// marl-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for marl.

mod arithmetic;
mod atoms;
mod comparison;
mod evaluation;
pub(crate) mod io;
mod maps;
pub(crate) mod metadata;
mod predicates;
pub(crate) mod sequences;

use marl_parser::{MarlVal, Symbol};
use tracing::debug;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt, builtin_not};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_slurp,
    builtin_str,
};
use maps::{
    builtin_assoc, builtin_contains_p, builtin_get, builtin_hash_map, builtin_keys,
    builtin_map_p, builtin_vals,
};
use metadata::{builtin_meta, builtin_with_meta};
use predicates::{
    builtin_false_p, builtin_fn_p, builtin_keyword_p, builtin_nil_p, builtin_number_p,
    builtin_sequential_p, builtin_string_p, builtin_symbol_p, builtin_true_p,
};
use sequences::{
    builtin_concat, builtin_cons, builtin_count, builtin_empty_p, builtin_first, builtin_list,
    builtin_list_p, builtin_nth, builtin_rest, builtin_vec, builtin_vector, builtin_vector_p,
};

/// Register all built-in functions in the environment.
///
/// `eval` and `load-file` evaluate in `env` itself, so this is meant to be
/// called on the root environment.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison and logic
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);
    env.define_native("not", builtin_not);

    // Type predicates
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("sequential?", builtin_sequential_p);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector", builtin_vector);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("vec", builtin_vec);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("nth", builtin_nth);
    env.define_native("count", builtin_count);
    env.define_native("empty?", builtin_empty_p);

    // Maps
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("map?", builtin_map_p);
    env.define_native("get", builtin_get);
    env.define_native("contains?", builtin_contains_p);
    env.define_native("assoc", builtin_assoc);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Strings and printing
    env.define_native("str", builtin_str);
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);

    // Reader and files
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Metadata
    env.define_native("meta", builtin_meta);
    env.define_native("with-meta", builtin_with_meta);

    // Evaluation against this environment
    evaluation::register(env);

    debug!("registered builtins");
}

/// Extension trait for defining native functions in an environment.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[MarlVal]) -> Result<MarlVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[MarlVal]) -> Result<MarlVal>) {
        let native = make_native_fn(name, func);
        self.define(Symbol::new(name), MarlVal::NativeFn(native, None));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Require an integer argument.
pub(crate) fn require_int(name: &str, val: &MarlVal) -> Result<i64> {
    match val {
        MarlVal::Int(n) => Ok(*n),
        other => Err(Error::type_error_in(name, "int", other.type_name())),
    }
}

/// Require a string argument.
pub(crate) fn require_string<'a>(name: &str, val: &'a MarlVal) -> Result<&'a str> {
    match val {
        MarlVal::String(s) => Ok(&**s),
        other => Err(Error::type_error_in(name, "string", other.type_name())),
    }
}
