// marl-core - Evaluation built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! eval and load-file
//!
//! Both run in the environment they were registered in. They hold it weakly,
//! since the builtins themselves are bindings inside that environment.

use std::path::Path;

use marl_parser::{MarlVal, Symbol};

use crate::env::{Env, WeakEnv};
use crate::error::{Error, Result};
use crate::eval::{eval, make_native_fn};

use super::require_string;

/// Define `eval` and `load-file` against `env`.
pub(super) fn register(env: &Env) {
    let weak = env.downgrade();
    let eval_fn = make_native_fn("eval", move |args| builtin_eval(&weak, args));
    env.define(Symbol::new("eval"), MarlVal::NativeFn(eval_fn, None));

    let weak = env.downgrade();
    let load_fn = make_native_fn("load-file", move |args| builtin_load_file(&weak, args));
    env.define(Symbol::new("load-file"), MarlVal::NativeFn(load_fn, None));
}

fn upgrade(name: &str, env: &WeakEnv) -> Result<Env> {
    env.upgrade()
        .ok_or_else(|| Error::Internal(format!("{}: environment no longer exists", name)))
}

/// (eval form) - Evaluate form in the root environment
fn builtin_eval(env: &WeakEnv, args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("eval", 1, args.len()));
    }
    eval(&args[0], &upgrade("eval", env)?)
}

/// (load-file path) - Evaluate every form in a file, returns nil
fn builtin_load_file(env: &WeakEnv, args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("load-file", 1, args.len()));
    }
    let path = require_string("load-file", &args[0])?;
    crate::load_file(Path::new(path), &upgrade("load-file", env)?)
}
