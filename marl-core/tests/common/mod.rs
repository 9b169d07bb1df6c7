// marl-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for marl integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh root environment
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_to_string`] - Evaluate and print the result readably
//! - [`new_env`] - Create a new root environment
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_prints!`] - Assert the readable printed form of the result
//! - [`assert_eval_err!`] - Assert that code produces an error of a kind
//! - [`assert_eval_err_contains!`] - Assert on the error message
//! - [`assert_eval_with_env!`] - Assert evaluation with a shared environment

#![allow(dead_code)]

pub use marl_core::{Env, Error, ErrorKind, eval, new_root_env, pr_str};
#[allow(unused_imports)]
pub use marl_parser::{Keyword, MarlVal, Symbol};

/// Evaluate every form in `s` in a fresh root environment.
///
/// # Returns
///
/// Returns the value of the last form, or the first error.
pub fn eval_str(s: &str) -> Result<MarlVal, Error> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate every form in `s` in the given environment.
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MarlVal, Error> {
    marl_core::eval_str(s, env)
}

/// Evaluate in a fresh environment and print the result readably.
pub fn eval_to_string(s: &str) -> Result<String, Error> {
    eval_str(s).map(|v| pr_str(&v, true))
}

/// Create a new root environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    new_root_env()
}

/// Shorthand for a keyword value.
pub fn kw(name: &str) -> MarlVal {
    MarlVal::keyword(Keyword::new(name))
}

/// Shorthand for a list of integers.
pub fn int_list(items: &[i64]) -> MarlVal {
    MarlVal::list(items.iter().copied().map(MarlVal::int).collect())
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", MarlVal::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` prints as `expected`.
///
/// # Example
///
/// ```ignore
/// assert_prints!("(list 1 2)", "(1 2)");
/// ```
#[macro_export]
macro_rules! assert_prints {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_to_string($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        pretty_assertions::assert_eq!(result.unwrap(), $expected);
    };
}

/// Assert that evaluating `input` produces an error, optionally of a kind.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 :not-a-number)");
/// assert_eval_err!("(+ 1 :not-a-number)", ErrorKind::Type);
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
    ($input:expr, $kind:expr) => {
        let result = $crate::common::eval_str($input);
        match result {
            Ok(value) => panic!("Expected error for '{}' but got {:?}", $input, value),
            Err(err) => assert_eq!(
                err.kind(),
                $kind,
                "Wrong error kind for '{}': {}",
                $input,
                err
            ),
        }
    };
}

/// Assert that evaluating `input` in the given environment produces the expected value.
///
/// # Example
///
/// ```ignore
/// let env = new_env();
/// eval_str_with_env("(def! x 42)", &env).unwrap();
/// assert_eval_with_env!("x", MarlVal::int(42), &env);
/// ```
#[macro_export]
macro_rules! assert_eval_with_env {
    ($input:expr, $expected:expr, $env:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error matching the given pattern.
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(/ 1 0)", "division by zero");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $pattern:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.to_lowercase().contains(&$pattern.to_lowercase()),
            "Error message '{}' does not contain '{}'",
            err_msg,
            $pattern
        );
    };
}
