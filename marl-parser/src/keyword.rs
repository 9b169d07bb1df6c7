// marl-parser - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers written with a leading colon.
//!
//! A keyword never compares equal to a symbol with the same name. Names are
//! interned through the same table as symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::symbol::intern;

/// A keyword such as `:name`. The stored name excludes the colon.
#[derive(Clone)]
pub struct Keyword {
    name: Rc<str>,
}

impl Keyword {
    /// Create a keyword from its name, without the leading colon.
    pub fn new(name: &str) -> Self {
        Keyword { name: intern(name) }
    }

    /// The keyword's name, without the leading colon.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.name, &other.name) || self.name == other.name
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(:{})", self.name)
    }
}
