// marl-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for marl.
//!
//! The evaluator applies closures itself so that their bodies run in tail
//! position. This module is the non-tail path used by builtins such as
//! `swap!` that call back into user functions.

use std::any::Any;
use std::rc::Rc;

use marl_parser::{MarlFn, MarlNativeFn, MarlVal, pr_str};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[MarlVal]) -> Result<MarlVal>;

/// Apply a function to arguments.
pub fn apply(func: &MarlVal, args: &[MarlVal]) -> Result<MarlVal> {
    match func {
        MarlVal::Fn(f, _) => apply_fn(f, args),
        MarlVal::NativeFn(f, _) => apply_native(f, args),
        other => Err(Error::NotCallable(pr_str(other, true))),
    }
}

/// Apply a closure by evaluating its body in a fresh call scope.
pub(crate) fn apply_fn(func: &MarlFn, args: &[MarlVal]) -> Result<MarlVal> {
    let fn_env = call_env(func, args)?;
    eval(&func.body, &fn_env)
}

/// Build the scope a closure body runs in: a child of the captured
/// environment with the parameters bound.
pub(crate) fn call_env(func: &MarlFn, args: &[MarlVal]) -> Result<Env> {
    let captured = func
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Function environment has invalid type".into()))?;

    let fn_env = captured.child();
    fn_env.bind_params(&func.params, func.rest_param.as_ref(), args)?;
    Ok(fn_env)
}

/// Apply a native function.
pub(crate) fn apply_native(func: &MarlNativeFn, args: &[MarlVal]) -> Result<MarlVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native function has invalid type".into()))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[MarlVal]) -> Result<MarlVal> + 'static,
) -> MarlNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    MarlNativeFn::new(name, func_any)
}
