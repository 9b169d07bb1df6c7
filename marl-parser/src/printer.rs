// marl-parser - Printer for marl values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Converts values back to text.
//!
//! In readable mode strings are quoted and escaped so the output can be read
//! back; otherwise their contents are written raw.

use crate::stack::ensure_sufficient_stack;
use crate::value::MarlVal;

/// Render `val` as text.
pub fn pr_str(val: &MarlVal, print_readably: bool) -> String {
    let mut out = String::new();
    write_val(&mut out, val, print_readably);
    out
}

/// Render each value and join the results with `separator`.
pub fn pr_seq<'a>(
    vals: impl IntoIterator<Item = &'a MarlVal>,
    print_readably: bool,
    separator: &str,
) -> String {
    let mut out = String::new();
    for (i, val) in vals.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write_val(&mut out, val, print_readably);
    }
    out
}

fn write_val(out: &mut String, val: &MarlVal, readably: bool) {
    ensure_sufficient_stack(|| write_nested_val(out, val, readably));
}

fn write_nested_val(out: &mut String, val: &MarlVal, readably: bool) {
    match val {
        MarlVal::Nil => out.push_str("nil"),
        MarlVal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        MarlVal::Int(n) => out.push_str(&n.to_string()),
        MarlVal::String(s) => {
            if readably {
                out.push('"');
                out.push_str(&escape_string(s));
                out.push('"');
            } else {
                out.push_str(s);
            }
        }
        MarlVal::Symbol(sym) => out.push_str(sym.name()),
        MarlVal::Keyword(kw) => {
            out.push(':');
            out.push_str(kw.name());
        }
        MarlVal::List(items, _) => write_seq(out, items.iter(), "(", ")", readably),
        MarlVal::Vector(items, _) => write_seq(out, items.iter(), "[", "]", readably),
        MarlVal::Map(map, _) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_val(out, k, readably);
                out.push(' ');
                write_val(out, v, readably);
            }
            out.push('}');
        }
        MarlVal::Atom(atom) => {
            out.push_str("(atom ");
            write_val(out, &atom.deref(), readably);
            out.push(')');
        }
        MarlVal::Fn(..) => out.push_str("#<function>"),
        MarlVal::NativeFn(f, _) => {
            out.push_str("#<builtin ");
            out.push_str(f.name());
            out.push('>');
        }
        MarlVal::Quote(_)
        | MarlVal::Quasiquote(_)
        | MarlVal::Unquote(_)
        | MarlVal::SpliceUnquote(_)
        | MarlVal::Deref(_)
        | MarlVal::WithMeta(..) => {
            if let Some(expanded) = val.expand_reader_macro() {
                write_val(out, &expanded, readably);
            }
        }
    }
}

fn write_seq<'a>(
    out: &mut String,
    items: impl Iterator<Item = &'a MarlVal>,
    open: &str,
    close: &str,
    readably: bool,
) {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_val(out, item, readably);
    }
    out.push_str(close);
}

/// Escape a string so the reader decodes it back to the same text.
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;
    use crate::value::MarlAtom;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars() {
        assert_eq!(pr_str(&MarlVal::nil(), true), "nil");
        assert_eq!(pr_str(&MarlVal::bool(true), true), "true");
        assert_eq!(pr_str(&MarlVal::int(-7), true), "-7");
        assert_eq!(pr_str(&MarlVal::keyword(Keyword::new("k")), true), ":k");
    }

    #[test]
    fn test_string_readable_and_raw() {
        let s = MarlVal::string("a \"b\"\n\\");
        assert_eq!(pr_str(&s, true), r#""a \"b\"\n\\""#);
        assert_eq!(pr_str(&s, false), "a \"b\"\n\\");
    }

    #[test]
    fn test_collections() {
        let list = MarlVal::list(vec![MarlVal::int(1), MarlVal::sym("x")]);
        assert_eq!(pr_str(&list, true), "(1 x)");
        let vector = MarlVal::vector(vec![MarlVal::int(1), MarlVal::string("s")]);
        assert_eq!(pr_str(&vector, true), "[1 \"s\"]");
        assert_eq!(pr_str(&vector, false), "[1 s]");
        let map = MarlVal::map(vec![(MarlVal::keyword(Keyword::new("a")), MarlVal::int(1))]);
        assert_eq!(pr_str(&map, true), "{:a 1}");
    }

    #[test]
    fn test_reader_macro_forms() {
        let quoted = MarlVal::Quote(Box::new(MarlVal::sym("x")));
        assert_eq!(pr_str(&quoted, true), "(quote x)");
        let spliced = MarlVal::SpliceUnquote(Box::new(MarlVal::sym("xs")));
        assert_eq!(pr_str(&spliced, true), "(splice-unquote xs)");
        let tagged = MarlVal::WithMeta(
            Box::new(MarlVal::vector(vec![])),
            Box::new(MarlVal::map(vec![])),
        );
        assert_eq!(pr_str(&tagged, true), "(with-meta [] {})");
    }

    #[test]
    fn test_atom() {
        let atom = MarlVal::Atom(MarlAtom::new(MarlVal::string("v")));
        assert_eq!(pr_str(&atom, true), "(atom \"v\")");
    }

    #[test]
    fn test_pr_seq() {
        let vals = [MarlVal::string("a"), MarlVal::int(1)];
        assert_eq!(pr_seq(&vals, true, " "), "\"a\" 1");
        assert_eq!(pr_seq(&vals, false, ""), "a1");
    }
}
