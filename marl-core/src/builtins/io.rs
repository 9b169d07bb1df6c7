// marl-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: str, pr-str, prn, println, read-string, slurp

use std::path::Path;

use marl_parser::{MarlVal, pr_seq, read};

use crate::error::{Error, Result};

use super::require_string;

// ============================================================================
// String Output
// ============================================================================

/// (str & args) - concatenate args printed for display
pub(crate) fn builtin_str(args: &[MarlVal]) -> Result<MarlVal> {
    Ok(MarlVal::string(pr_seq(args, false, "")))
}

/// (pr-str & args) - print args to string with print representation
pub(crate) fn builtin_pr_str(args: &[MarlVal]) -> Result<MarlVal> {
    Ok(MarlVal::string(pr_seq(args, true, " ")))
}

/// (prn & args) - print args readably with newline
pub(crate) fn builtin_prn(args: &[MarlVal]) -> Result<MarlVal> {
    println!("{}", pr_seq(args, true, " "));
    Ok(MarlVal::Nil)
}

/// (println & args) - print args for display with newline
pub(crate) fn builtin_println(args: &[MarlVal]) -> Result<MarlVal> {
    println!("{}", pr_seq(args, false, " "));
    Ok(MarlVal::Nil)
}

// ============================================================================
// Reading
// ============================================================================

/// (read-string s) - parse the first form in s; nil for blank input
pub(crate) fn builtin_read_string(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-string", 1, args.len()));
    }
    let source = require_string("read-string", &args[0])?;
    Ok(read(source)?.unwrap_or(MarlVal::Nil))
}

/// (slurp filename) - read file contents as string
pub(crate) fn builtin_slurp(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("slurp", 1, args.len()));
    }
    let path = require_string("slurp", &args[0])?;
    read_file(Path::new(path)).map(MarlVal::string)
}

/// Read a whole file, reporting failures as I/O errors.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
