// marl-core - File loading integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for load-file, slurp, read-string and eval.

mod common;

use std::io::Write;

use common::{ErrorKind, MarlVal, eval_str_with_env, new_env};
use marl_core::load_file;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn quoted_path(file: &NamedTempFile) -> String {
    format!("{:?}", file.path().display().to_string())
}

#[test]
fn test_load_file_defines_in_root() {
    let file = source_file(
        "; helpers\n\
         (def! inc (fn* (x) (+ x 1))) ; trailing comment\n\
         (def! answer (inc 41))\n",
    );
    let env = new_env();
    let result = load_file(file.path(), &env).unwrap();
    assert_eq!(result, MarlVal::Nil);
    assert_eval_with_env!("answer", MarlVal::int(42), &env);
}

#[test]
fn test_load_file_builtin() {
    let file = source_file("(def! from-file \"loaded ; not a comment\")");
    let env = new_env();
    let src = format!("(load-file {})", quoted_path(&file));
    assert_eval_with_env!(&src, MarlVal::Nil, &env);
    assert_eval_with_env!(
        "from-file",
        MarlVal::string("loaded ; not a comment"),
        &env
    );
}

#[test]
fn test_load_file_inside_let_defines_in_root() {
    let file = source_file("(def! loaded-value 1)");
    let env = new_env();
    let src = format!("(let* (x 1) (load-file {}))", quoted_path(&file));
    eval_str_with_env(&src, &env).unwrap();
    assert_eval_with_env!("loaded-value", MarlVal::int(1), &env);
}

#[test]
fn test_load_empty_file() {
    let file = source_file("");
    let env = new_env();
    assert_eq!(load_file(file.path(), &env).unwrap(), MarlVal::Nil);
}

#[test]
fn test_load_file_syntax_error() {
    let file = source_file("(def! broken (+ 1 2)");
    let env = new_env();
    let err = load_file(file.path(), &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.marl");
    let env = new_env();

    let err = load_file(&missing, &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let src = format!("(slurp {:?})", missing.display().to_string());
    let err = eval_str_with_env(&src, &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_slurp() {
    let file = source_file("line one\nline two");
    let src = format!("(slurp {})", quoted_path(&file));
    assert_eval!(&src, MarlVal::string("line one\nline two"));
}

#[test]
fn test_read_string() {
    assert_prints!("(read-string \"(1 2 (3))\")", "(1 2 (3))");
    assert_eval!("(read-string \"   \")", MarlVal::Nil);
    assert_eval!("(read-string \"; only a comment\")", MarlVal::Nil);
    assert_eval!("(read-string \"sym\")", MarlVal::sym("sym"));
    assert_eval_err!("(read-string \"(1\")", ErrorKind::Syntax);
    assert_eval_err!("(read-string 1)", ErrorKind::Type);
}

#[test]
fn test_eval_builtin() {
    assert_eval!("(eval (read-string \"(+ 1 2)\"))", MarlVal::int(3));
    assert_eval!("(eval (list + 2 3))", MarlVal::int(5));
    assert_eval!("(eval ''x)", MarlVal::sym("x"));
}

#[test]
fn test_eval_uses_root_environment() {
    let env = new_env();
    eval_str_with_env("(def! x :root)", &env).unwrap();
    assert_prints!("(do (def! x :root) (let* (x :local) (eval 'x)))", ":root");
    eval_str_with_env("(let* (y 1) (eval (read-string \"(def! y-global 2)\")))", &env).unwrap();
    assert_eval_with_env!("y-global", MarlVal::int(2), &env);
}

#[test]
fn test_stray_close_paren_is_rejected() {
    let file = source_file("(def! first-def 1))\n(def! after-stray 2)\n");
    let env = new_env();
    let err = load_file(file.path(), &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);

    // Nothing in the file ran
    let err = eval_str_with_env("after-stray", &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    let err = eval_str_with_env("first-def", &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}

#[test]
fn test_stray_close_paren_balanced_by_later_open() {
    let file = source_file("(def! early 1))\n(def! late 2\n");
    let env = new_env();
    let err = load_file(file.path(), &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.to_string().contains("unbalanced ')'"));
    let err = eval_str_with_env("early", &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}
