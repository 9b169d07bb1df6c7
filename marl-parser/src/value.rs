// marl-parser - Core value types for marl
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The runtime value model.
//!
//! Every value is one variant of [`MarlVal`]. Values are immutable apart from
//! [`MarlAtom`] cells and share structure through `Rc` and `im::Vector`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::keyword::Keyword;
use crate::map::MarlMap;
use crate::printer::pr_str;
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;

/// Metadata is an ordinary map attached to a value.
pub type Meta = MarlMap;

/// The core value type for marl.
///
/// Lists, vectors, maps and functions carry optional metadata. Metadata
/// never takes part in equality or printing.
#[derive(Clone)]
pub enum MarlVal {
    /// The absent value
    Nil,
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Immutable text
    String(Rc<str>),
    Symbol(Symbol),
    Keyword(Keyword),
    List(Vector<MarlVal>, Option<Rc<Meta>>),
    Vector(Vector<MarlVal>, Option<Rc<Meta>>),
    Map(MarlMap, Option<Rc<Meta>>),
    /// Mutable reference cell
    Atom(MarlAtom),
    /// User-defined closure
    Fn(Rc<MarlFn>, Option<Rc<Meta>>),
    /// Host primitive
    NativeFn(MarlNativeFn, Option<Rc<Meta>>),

    // Reader macro forms
    /// `'x`
    Quote(Box<MarlVal>),
    /// `` `x ``
    Quasiquote(Box<MarlVal>),
    /// `~x`
    Unquote(Box<MarlVal>),
    /// `~@x`
    SpliceUnquote(Box<MarlVal>),
    /// `@x`
    Deref(Box<MarlVal>),
    /// `^m v`, stored as (value, meta)
    WithMeta(Box<MarlVal>, Box<MarlVal>),
}

// ============================================================================
// Function Types
// ============================================================================

/// A user-defined function (closure).
///
/// The captured environment is type-erased because the environment type
/// lives in marl-core, which depends on this crate.
pub struct MarlFn {
    /// Fixed parameter names
    pub params: Vec<Symbol>,
    /// Name bound to the list of remaining arguments, if variadic
    pub rest_param: Option<Symbol>,
    pub body: MarlVal,
    /// Captured environment (type-erased to avoid a circular dependency)
    pub env: Rc<dyn Any>,
}

impl MarlFn {
    pub fn new(
        params: Vec<Symbol>,
        rest_param: Option<Symbol>,
        body: MarlVal,
        env: Rc<dyn Any>,
    ) -> Self {
        MarlFn {
            params,
            rest_param,
            body,
            env,
        }
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct MarlNativeFn {
    /// Function name for display and equality
    pub name: &'static str,
    /// The actual function (type-erased)
    func: Rc<dyn Any>,
}

impl MarlNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        MarlNativeFn { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable cell holding exactly one value.
///
/// Atoms compare by identity: two atoms are equal only if they are the same
/// cell.
#[derive(Clone)]
pub struct MarlAtom {
    value: Rc<RefCell<MarlVal>>,
}

impl MarlAtom {
    pub fn new(value: MarlVal) -> Self {
        MarlAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Read the current value.
    pub fn deref(&self) -> MarlVal {
        self.value.borrow().clone()
    }

    /// Replace the current value, returning the new one.
    pub fn reset(&self, new_val: MarlVal) -> MarlVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    pub fn ptr_eq(&self, other: &MarlAtom) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl MarlVal {
    pub fn nil() -> Self {
        MarlVal::Nil
    }

    pub fn bool(b: bool) -> Self {
        MarlVal::Bool(b)
    }

    pub fn int(n: i64) -> Self {
        MarlVal::Int(n)
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        MarlVal::String(s.into())
    }

    pub fn symbol(sym: Symbol) -> Self {
        MarlVal::Symbol(sym)
    }

    /// Shorthand for a symbol value built from its name.
    pub fn sym(name: &str) -> Self {
        MarlVal::Symbol(Symbol::new(name))
    }

    pub fn keyword(kw: Keyword) -> Self {
        MarlVal::Keyword(kw)
    }

    pub fn empty_list() -> Self {
        MarlVal::List(Vector::new(), None)
    }

    /// Create a list from elements
    pub fn list(elements: Vec<MarlVal>) -> Self {
        MarlVal::List(elements.into_iter().collect(), None)
    }

    /// Create a vector from elements
    pub fn vector(elements: Vec<MarlVal>) -> Self {
        MarlVal::Vector(elements.into_iter().collect(), None)
    }

    /// Create a map from key-value pairs. A repeated key keeps its last value.
    pub fn map(pairs: Vec<(MarlVal, MarlVal)>) -> Self {
        MarlVal::Map(MarlMap::from_pairs(pairs), None)
    }

    pub fn atom(value: MarlVal) -> Self {
        MarlVal::Atom(MarlAtom::new(value))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, MarlVal::Nil)
    }

    /// Everything except `false` and `nil` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, MarlVal::Nil | MarlVal::Bool(false))
    }

    pub fn is_fn(&self) -> bool {
        matches!(self, MarlVal::Fn(..) | MarlVal::NativeFn(..))
    }

    /// The elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<MarlVal>> {
        match self {
            MarlVal::List(items, _) | MarlVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            MarlVal::Nil => "nil",
            MarlVal::Bool(_) => "bool",
            MarlVal::Int(_) => "int",
            MarlVal::String(_) => "string",
            MarlVal::Symbol(_) => "symbol",
            MarlVal::Keyword(_) => "keyword",
            MarlVal::List(..) => "list",
            MarlVal::Vector(..) => "vector",
            MarlVal::Map(..) => "map",
            MarlVal::Atom(_) => "atom",
            MarlVal::Fn(..) => "fn",
            MarlVal::NativeFn(..) => "native-fn",
            MarlVal::Quote(_) => "quote",
            MarlVal::Quasiquote(_) => "quasiquote",
            MarlVal::Unquote(_) => "unquote",
            MarlVal::SpliceUnquote(_) => "splice-unquote",
            MarlVal::Deref(_) => "deref",
            MarlVal::WithMeta(..) => "with-meta",
        }
    }

    /// Get the metadata of this value, if any.
    pub fn meta(&self) -> Option<&Rc<Meta>> {
        match self {
            MarlVal::List(_, meta)
            | MarlVal::Vector(_, meta)
            | MarlVal::Map(_, meta)
            | MarlVal::Fn(_, meta)
            | MarlVal::NativeFn(_, meta) => meta.as_ref(),
            _ => None,
        }
    }

    /// Return a copy of this value carrying `meta`.
    /// Returns None if the value cannot carry metadata.
    pub fn with_meta(&self, meta: Option<Rc<Meta>>) -> Option<MarlVal> {
        match self {
            MarlVal::List(items, _) => Some(MarlVal::List(items.clone(), meta)),
            MarlVal::Vector(items, _) => Some(MarlVal::Vector(items.clone(), meta)),
            MarlVal::Map(m, _) => Some(MarlVal::Map(m.clone(), meta)),
            MarlVal::Fn(f, _) => Some(MarlVal::Fn(Rc::clone(f), meta)),
            MarlVal::NativeFn(f, _) => Some(MarlVal::NativeFn(f.clone(), meta)),
            _ => None,
        }
    }

    /// The canonical list form of a reader macro, e.g. `'x` as `(quote x)`.
    pub fn expand_reader_macro(&self) -> Option<MarlVal> {
        let (name, inner) = match self {
            MarlVal::Quote(inner) => ("quote", inner),
            MarlVal::Quasiquote(inner) => ("quasiquote", inner),
            MarlVal::Unquote(inner) => ("unquote", inner),
            MarlVal::SpliceUnquote(inner) => ("splice-unquote", inner),
            MarlVal::Deref(inner) => ("deref", inner),
            MarlVal::WithMeta(value, meta) => {
                return Some(MarlVal::list(vec![
                    MarlVal::sym("with-meta"),
                    (**value).clone(),
                    (**meta).clone(),
                ]));
            }
            _ => return None,
        };
        Some(MarlVal::list(vec![MarlVal::sym(name), (**inner).clone()]))
    }
}

// ============================================================================
// Display implementation
// ============================================================================

impl fmt::Display for MarlVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self, true))
    }
}

impl fmt::Debug for MarlVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Debug for MarlFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<function>")
    }
}

impl fmt::Debug for MarlNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<builtin {}>", self.name)
    }
}

impl fmt::Debug for MarlAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {})", self.value.borrow())
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for MarlVal {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| structurally_equal(self, other))
    }
}

/// Metadata is ignored, and lists equal vectors with the same elements.
fn structurally_equal(a: &MarlVal, b: &MarlVal) -> bool {
    match (a, b) {
        (MarlVal::Nil, MarlVal::Nil) => true,
        (MarlVal::Bool(a), MarlVal::Bool(b)) => a == b,
        (MarlVal::Int(a), MarlVal::Int(b)) => a == b,
        (MarlVal::String(a), MarlVal::String(b)) => a == b,
        (MarlVal::Symbol(a), MarlVal::Symbol(b)) => a == b,
        (MarlVal::Keyword(a), MarlVal::Keyword(b)) => a == b,
        (
            MarlVal::List(a, _) | MarlVal::Vector(a, _),
            MarlVal::List(b, _) | MarlVal::Vector(b, _),
        ) => a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y),
        (MarlVal::Map(a, _), MarlVal::Map(b, _)) => a == b,
        (MarlVal::Atom(a), MarlVal::Atom(b)) => a.ptr_eq(b),
        (MarlVal::Fn(a, _), MarlVal::Fn(b, _)) => Rc::ptr_eq(a, b),
        (MarlVal::NativeFn(a, _), MarlVal::NativeFn(b, _)) => a.name == b.name,
        (MarlVal::Quote(a), MarlVal::Quote(b))
        | (MarlVal::Quasiquote(a), MarlVal::Quasiquote(b))
        | (MarlVal::Unquote(a), MarlVal::Unquote(b))
        | (MarlVal::SpliceUnquote(a), MarlVal::SpliceUnquote(b))
        | (MarlVal::Deref(a), MarlVal::Deref(b)) => a == b,
        (MarlVal::WithMeta(av, am), MarlVal::WithMeta(bv, bm)) => av == bv && am == bm,
        _ => false,
    }
}

impl From<i64> for MarlVal {
    fn from(n: i64) -> Self {
        MarlVal::Int(n)
    }
}

impl From<bool> for MarlVal {
    fn from(b: bool) -> Self {
        MarlVal::Bool(b)
    }
}

impl From<&str> for MarlVal {
    fn from(s: &str) -> Self {
        MarlVal::string(s)
    }
}
