// marl-core - Runtime and evaluator for the marl language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # marl-core
//!
//! Runtime and evaluator for the marl language.
//! Provides a tail-call-safe tree-walking interpreter for `MarlVal`
//! expressions, plus the builtin library.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

use std::path::Path;

use tracing::debug;

pub use builtins::register_builtins;
pub use env::{Env, WeakEnv};
pub use error::{AritySpec, Error, ErrorKind, Result};
pub use eval::{
    apply, eval, get_eval_depth, make_native_fn, quasiquote,
    set_max_eval_depth,
};

// Re-export parser types for convenience
pub use marl_parser::{Keyword, MarlMap, MarlVal, ParseError, Symbol, pr_str};

/// Name under which command-line arguments are exposed to programs.
pub const ARGV: &str = "*ARGV*";

/// Create a root environment with the builtin library and an empty `*ARGV*`.
pub fn new_root_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env.define(Symbol::new(ARGV), MarlVal::empty_list());
    env
}

/// Bind `*ARGV*` to the given arguments as a list of strings.
pub fn set_argv(env: &Env, args: &[String]) {
    let argv = args.iter().map(|arg| MarlVal::string(arg.as_str())).collect();
    env.define(Symbol::new(ARGV), MarlVal::list(argv));
}

/// Read and evaluate every form in `source`, returning the last value.
///
/// Blank input evaluates to nil.
pub fn eval_str(source: &str, env: &Env) -> Result<MarlVal> {
    let mut result = MarlVal::Nil;
    for form in marl_parser::read_all(source)? {
        result = eval(&form, env)?;
    }
    Ok(result)
}

/// Read, evaluate and print: the readable form of the last value.
pub fn rep(source: &str, env: &Env) -> Result<String> {
    eval_str(source, env).map(|value| pr_str(&value, true))
}

/// Evaluate a source file in `env`.
///
/// Comments are stripped and the forms are evaluated in order as one `do`
/// block. Returns nil.
pub fn load_file(path: &Path, env: &Env) -> Result<MarlVal> {
    debug!(path = %path.display(), "loading file");
    let source = builtins::io::read_file(path)?;
    let wrapped = format!("(do {}\nnil)", marl_parser::strip_comments(&source));
    match marl_parser::read_all(&wrapped)?.as_slice() {
        [form] => eval(form, env),
        [] => Ok(MarlVal::Nil),
        [_, ..] => Err(Error::syntax(
            "load-file",
            format!("unbalanced ')' in {}", path.display()),
        )),
    }
}
