// marl-parser - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are the identifiers of marl source code.
//!
//! # Interning
//!
//! Symbol names are interned in a per-thread table, so two symbols with the
//! same name share one allocation. Equality first compares pointers and only
//! falls back to comparing text for symbols built on different threads.
//!
//! Interned names are never deallocated. The table grows with the number of
//! distinct names a program mentions, which is bounded for ordinary code.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

thread_local! {
    static INTERNER: RefCell<HashSet<Rc<str>>> = RefCell::new(HashSet::new());
}

/// Return the shared allocation for `text`, creating it on first use.
pub(crate) fn intern(text: &str) -> Rc<str> {
    INTERNER.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(existing) = table.get(text) {
            return Rc::clone(existing);
        }
        let interned: Rc<str> = Rc::from(text);
        table.insert(Rc::clone(&interned));
        interned
    })
}

/// An identifier such as `x`, `+` or `def!`.
#[derive(Clone)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    /// Create (or reuse) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        Symbol { name: intern(name) }
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the `&` marker that introduces a rest parameter.
    pub fn is_variadic_marker(&self) -> bool {
        &*self.name == "&"
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.name, &other.name) || self.name == other.name
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}
