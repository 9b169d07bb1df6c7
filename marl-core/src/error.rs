// marl-core - Error types for the marl evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for marl evaluation.
//!
//! Every variant belongs to one [`ErrorKind`], the category a user sees:
//! syntax, name, type, arity, value or I/O.

use std::fmt;

use marl_parser::{ParseError, Symbol};
use thiserror::Error;

/// Result type for marl evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Reader failure: unbalanced input, bad literal, odd map
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Malformed special form or misplaced reader macro
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },

    /// Undefined symbol reference
    #[error("'{0}' not found")]
    UndefinedSymbol(Symbol),

    /// Wrong number of arguments to a function
    #[error("{}", arity_message(.name, .expected, .got))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },

    /// Type error - wrong type for an operation
    #[error("{}", type_message(.context, .expected, .got))]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },

    /// Attempted to call something that isn't callable
    #[error("{0} is not a function")]
    NotCallable(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// Checked integer arithmetic overflowed
    #[error("Integer overflow in '{0}'")]
    Overflow(&'static str),

    #[error("Index {index} out of bounds for collection of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    /// Non-tail nesting exceeded the configured maximum
    #[error("Stack overflow: maximum recursion depth ({0}) exceeded")]
    EvalDepth(usize),

    /// File could not be read
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    /// Internal error - invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The user-facing category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    Arity,
    Value,
    Io,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Arity => "ArityError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Io => "IOError",
            ErrorKind::Internal => "InternalError",
        };
        write!(f, "{}", name)
    }
}

/// Expected argument count of a function.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
    /// This many leading arguments, then key/value pairs
    Pairs(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
            AritySpec::Pairs(0) => write!(f, "key/value pairs"),
            AritySpec::Pairs(n) => write!(f, "{} followed by key/value pairs", n),
        }
    }
}

fn arity_message(name: &Option<String>, expected: &AritySpec, got: &usize) -> String {
    let plural = if *got == 1 { "" } else { "s" };
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, given {} arg{}",
            name, expected, got, plural
        ),
        None => format!(
            "Wrong number of arguments: expected {}, given {} arg{}",
            expected, got, plural
        ),
    }
}

fn type_message(context: &Option<String>, expected: &str, got: &str) -> String {
    match context {
        Some(ctx) => format!("{}: expected {}, got {}", ctx, expected, got),
        None => format!("Type error: expected {}, got {}", expected, got),
    }
}

impl Error {
    /// The category this error is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(_) | Error::InvalidSyntax { .. } => ErrorKind::Syntax,
            Error::UndefinedSymbol(_) => ErrorKind::Name,
            Error::TypeError { .. } | Error::NotCallable(_) => ErrorKind::Type,
            Error::ArityError { .. } => ErrorKind::Arity,
            Error::DivisionByZero
            | Error::Overflow(_)
            | Error::IndexOutOfBounds { .. }
            | Error::EvalDepth(_) => ErrorKind::Value,
            Error::Io { .. } => ErrorKind::Io,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for a bounded range of arities.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for `fixed` leading arguments followed by
    /// key/value pairs.
    pub fn arity_pairs(name: impl Into<String>, fixed: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Pairs(fixed),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_symbol_message() {
        let err = Error::UndefinedSymbol(Symbol::new("abc"));
        assert_eq!(err.to_string(), "'abc' not found");
        assert_eq!(err.kind(), ErrorKind::Name);
    }

    #[test]
    fn test_arity_message() {
        let err = Error::arity_named("f", 2, 1);
        assert_eq!(
            err.to_string(),
            "Wrong number of arguments to 'f': expected 2, given 1 arg"
        );
        let err = Error::arity_at_least("g", 1, 0);
        assert_eq!(
            err.to_string(),
            "Wrong number of arguments to 'g': expected at least 1, given 0 args"
        );
        let err = Error::arity_pairs("assoc", 1, 2);
        assert_eq!(
            err.to_string(),
            "Wrong number of arguments to 'assoc': expected 1 followed by key/value pairs, given 2 args"
        );
        let err = Error::arity_pairs("hash-map", 0, 1);
        assert_eq!(
            err.to_string(),
            "Wrong number of arguments to 'hash-map': expected key/value pairs, given 1 arg"
        );
    }

    #[test]
    fn test_not_callable_message() {
        let err = Error::NotCallable("1".to_string());
        assert_eq!(err.to_string(), "1 is not a function");
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::DivisionByZero.kind(), ErrorKind::Value);
        assert_eq!(Error::syntax("if", "bad").kind(), ErrorKind::Syntax);
        assert_eq!(Error::arity_range("get", 2, 3, 1).kind(), ErrorKind::Arity);
        assert_eq!(ErrorKind::Io.to_string(), "IOError");
    }
}
