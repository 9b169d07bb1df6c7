// marl-core - Evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The marl evaluator.
//!
//! [`eval`] runs a loop over the current form and environment. Forms in tail
//! position (a closure body, the chosen `if` branch, the last form of `do`,
//! the `let*` body and a `quasiquote` expansion) replace the current state
//! instead of recursing, so tail calls run in constant host stack.
//!
//! Non-tail nesting is bounded by a per-thread maximum depth; exceeding it
//! raises [`Error::EvalDepth`]. Each nested `eval` runs under
//! [`ensure_sufficient_stack`], so reaching that limit never depends on the
//! size of the calling thread's stack.

pub mod apply;
pub mod quasiquote;

use std::cell::Cell;
use std::rc::Rc;

use marl_parser::{MarlFn, MarlMap, MarlVal, Symbol, Vector, ensure_sufficient_stack, pr_str};
use tracing::{debug, trace};

use crate::builtins::metadata::attach_meta;
use crate::env::Env;
use crate::error::{Error, Result};

pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use quasiquote::quasiquote;

use apply::{apply_native, call_env};

/// Name of the binding that switches on step tracing.
pub const DEBUG_EVAL: &str = "DEBUG-EVAL";

// ============================================================================
// Recursion Depth Limiting
// ============================================================================

pub const DEFAULT_MAX_EVAL_DEPTH: usize = 1000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
    static DEBUG_EVAL_SYMBOL: Symbol = Symbol::new(DEBUG_EVAL);
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// Counts one level of `eval` nesting for as long as it lives.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            (current + 1, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::EvalDepth(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Evaluation loop
// ============================================================================

/// Outcome of one evaluation step.
enum Step {
    /// Evaluation finished with a value.
    Done(MarlVal),
    /// Keep going with a form in tail position.
    Continue(MarlVal, Env),
}

/// Evaluate an expression in an environment.
pub fn eval(expr: &MarlVal, env: &Env) -> Result<MarlVal> {
    let _guard = EvalDepthGuard::new()?;
    ensure_sufficient_stack(|| eval_loop(expr, env))
}

fn eval_loop(expr: &MarlVal, env: &Env) -> Result<MarlVal> {
    let mut expr = expr.clone();
    let mut env = env.clone();
    loop {
        if debug_eval_enabled(&env) {
            println!("EVAL: {}", pr_str(&expr, true));
        }
        match eval_step(&expr, &env)? {
            Step::Done(value) => return Ok(value),
            Step::Continue(next, next_env) => {
                expr = next;
                env = next_env;
            }
        }
    }
}

fn debug_eval_enabled(env: &Env) -> bool {
    DEBUG_EVAL_SYMBOL.with(|sym| env.get(sym).is_some_and(|flag| flag.is_truthy()))
}

fn eval_step(expr: &MarlVal, env: &Env) -> Result<Step> {
    match expr {
        MarlVal::Symbol(sym) => env.lookup(sym).map(Step::Done),

        MarlVal::List(items, _) => {
            let head = match items.front() {
                Some(head) => head,
                None => return Ok(Step::Done(expr.clone())),
            };
            if let MarlVal::Symbol(sym) = head {
                if let Some(step) = eval_special_form(sym, items, env)? {
                    return Ok(step);
                }
            }
            eval_application(items, env)
        }

        MarlVal::Vector(items, meta) => {
            let evaluated = eval_each(items, env)?;
            Ok(Step::Done(MarlVal::Vector(evaluated, meta.clone())))
        }

        MarlVal::Map(map, meta) => {
            let mut evaluated = MarlMap::new();
            for (key, value) in map.iter() {
                evaluated.insert(key.clone(), eval(value, env)?);
            }
            Ok(Step::Done(MarlVal::Map(evaluated, meta.clone())))
        }

        MarlVal::Quote(inner) => Ok(Step::Done((**inner).clone())),
        MarlVal::Quasiquote(inner) => Ok(Step::Continue(quasiquote(inner), env.clone())),
        MarlVal::Unquote(_) => Err(Error::syntax("unquote", "not inside quasiquote")),
        MarlVal::SpliceUnquote(_) => {
            Err(Error::syntax("splice-unquote", "not inside quasiquote"))
        }

        MarlVal::Deref(inner) => match eval(inner, env)? {
            MarlVal::Atom(atom) => Ok(Step::Done(atom.deref())),
            other => Err(Error::type_error_in("deref", "atom", other.type_name())),
        },

        MarlVal::WithMeta(value, meta) => {
            let value = eval(value, env)?;
            let meta = eval(meta, env)?;
            attach_meta(&value, &meta).map(Step::Done)
        }

        MarlVal::Nil
        | MarlVal::Bool(_)
        | MarlVal::Int(_)
        | MarlVal::String(_)
        | MarlVal::Keyword(_)
        | MarlVal::Atom(_)
        | MarlVal::Fn(..)
        | MarlVal::NativeFn(..) => Ok(Step::Done(expr.clone())),
    }
}

fn eval_each(items: &Vector<MarlVal>, env: &Env) -> Result<Vector<MarlVal>> {
    let mut evaluated = Vector::new();
    for item in items.iter() {
        evaluated.push_back(eval(item, env)?);
    }
    Ok(evaluated)
}

/// Evaluate every element, then call the head with the rest.
fn eval_application(items: &Vector<MarlVal>, env: &Env) -> Result<Step> {
    let mut evaluated = Vec::with_capacity(items.len());
    for item in items.iter() {
        evaluated.push(eval(item, env)?);
    }
    let (head, args) = match evaluated.split_first() {
        Some(split) => split,
        None => return Ok(Step::Done(MarlVal::empty_list())),
    };

    match head {
        MarlVal::Fn(func, _) => {
            let fn_env = call_env(func, args)?;
            trace!(args = args.len(), "tail call into closure");
            Ok(Step::Continue(func.body.clone(), fn_env))
        }
        MarlVal::NativeFn(func, _) => apply_native(func, args).map(Step::Done),
        other => Err(Error::NotCallable(pr_str(other, true))),
    }
}

// ============================================================================
// Special forms
// ============================================================================

/// Dispatch on a special form name. Returns None if `sym` names none.
fn eval_special_form(sym: &Symbol, items: &Vector<MarlVal>, env: &Env) -> Result<Option<Step>> {
    let name = sym.name();
    if !is_special_form(name) {
        return Ok(None);
    }
    let args: Vec<MarlVal> = items.iter().skip(1).cloned().collect();

    let step = match name {
        "def!" => eval_def(&args, env)?,
        "let*" => eval_let(&args, env)?,
        "do" => eval_do(&args, env)?,
        "if" => eval_if(&args, env)?,
        "fn*" => eval_fn(&args, env)?,
        "quote" => {
            let [form] = args.as_slice() else {
                return Err(arg_count("quote", "1", args.len()));
            };
            Step::Done(form.clone())
        }
        "quasiquote" => {
            let [form] = args.as_slice() else {
                return Err(arg_count("quasiquote", "1", args.len()));
            };
            Step::Continue(quasiquote(form), env.clone())
        }
        "unquote" => return Err(Error::syntax("unquote", "not inside quasiquote")),
        "splice-unquote" => {
            return Err(Error::syntax("splice-unquote", "not inside quasiquote"));
        }
        _ => return Ok(None),
    };
    Ok(Some(step))
}

/// Check if a symbol names a special form.
pub fn is_special_form(name: &str) -> bool {
    matches!(
        name,
        "def!"
            | "let*"
            | "do"
            | "if"
            | "fn*"
            | "quote"
            | "quasiquote"
            | "unquote"
            | "splice-unquote"
    )
}

fn arg_count(form: &'static str, expected: &str, got: usize) -> Error {
    Error::syntax(form, format!("expected {} arguments, got {}", expected, got))
}

/// (def! name expr)
fn eval_def(args: &[MarlVal], env: &Env) -> Result<Step> {
    let [name, expr] = args else {
        return Err(arg_count("def!", "2", args.len()));
    };
    let name = match name {
        MarlVal::Symbol(sym) => sym,
        other => {
            return Err(Error::syntax(
                "def!",
                format!("name must be a symbol, got {}", other.type_name()),
            ));
        }
    };

    let value = eval(expr, env)?;
    debug!(name = %name, "def!");
    env.define(name.clone(), value.clone());
    Ok(Step::Done(value))
}

/// (let* [name expr ...] body)
fn eval_let(args: &[MarlVal], env: &Env) -> Result<Step> {
    let [bindings, body] = args else {
        return Err(arg_count("let*", "2", args.len()));
    };
    let bindings = bindings.as_seq().ok_or_else(|| {
        Error::syntax(
            "let*",
            format!(
                "bindings must be a list or vector, got {}",
                bindings.type_name()
            ),
        )
    })?;
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "bindings must contain an even number of forms",
        ));
    }

    let let_env = env.child();
    let mut iter = bindings.iter();
    while let (Some(name), Some(expr)) = (iter.next(), iter.next()) {
        let name = match name {
            MarlVal::Symbol(sym) => sym,
            other => {
                return Err(Error::syntax(
                    "let*",
                    format!("binding name must be a symbol, got {}", other.type_name()),
                ));
            }
        };
        let value = eval(expr, &let_env)?;
        let_env.define(name.clone(), value);
    }

    Ok(Step::Continue(body.clone(), let_env))
}

/// (do form ...)
fn eval_do(args: &[MarlVal], env: &Env) -> Result<Step> {
    let (last, init) = match args.split_last() {
        Some(split) => split,
        None => return Ok(Step::Done(MarlVal::Nil)),
    };
    for form in init {
        eval(form, env)?;
    }
    Ok(Step::Continue(last.clone(), env.clone()))
}

/// (if test then else?)
fn eval_if(args: &[MarlVal], env: &Env) -> Result<Step> {
    let (test, then, otherwise) = match args {
        [test, then] => (test, then, None),
        [test, then, otherwise] => (test, then, Some(otherwise)),
        _ => return Err(arg_count("if", "2 or 3", args.len())),
    };

    if eval(test, env)?.is_truthy() {
        Ok(Step::Continue(then.clone(), env.clone()))
    } else {
        match otherwise {
            Some(form) => Ok(Step::Continue(form.clone(), env.clone())),
            None => Ok(Step::Done(MarlVal::Nil)),
        }
    }
}

/// (fn* [params] body)
fn eval_fn(args: &[MarlVal], env: &Env) -> Result<Step> {
    let [params, body] = args else {
        return Err(arg_count("fn*", "2", args.len()));
    };
    let params = params.as_seq().ok_or_else(|| {
        Error::type_error_in("fn* parameters", "list or vector", params.type_name())
    })?;
    let (params, rest_param) = parse_params(params)?;

    trace!(params = params.len(), variadic = rest_param.is_some(), "fn*");
    let func = MarlFn::new(params, rest_param, body.clone(), Rc::new(env.clone()));
    Ok(Step::Done(MarlVal::Fn(Rc::new(func), None)))
}

/// Split a parameter list into fixed names and an optional rest name.
fn parse_params(forms: &Vector<MarlVal>) -> Result<(Vec<Symbol>, Option<Symbol>)> {
    let mut params = Vec::new();
    let mut iter = forms.iter();

    while let Some(form) = iter.next() {
        let sym = match form {
            MarlVal::Symbol(sym) => sym,
            other => {
                return Err(Error::type_error_in(
                    "fn* parameter",
                    "symbol",
                    other.type_name(),
                ));
            }
        };
        if sym.is_variadic_marker() {
            return match (iter.next(), iter.next()) {
                (Some(MarlVal::Symbol(rest)), None) if !rest.is_variadic_marker() => {
                    Ok((params, Some(rest.clone())))
                }
                _ => Err(Error::syntax(
                    "fn*",
                    "'&' must be followed by exactly one parameter name",
                )),
            };
        }
        params.push(sym.clone());
    }

    Ok((params, None))
}

// ============================================================================
// Tests
// ============================================================================
