// marl-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use marl_parser::{MarlVal, Symbol};

use crate::error::{AritySpec, Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references, enabling
/// lexical scoping. Each environment has its own bindings map
/// and optionally a parent environment for outer scope lookup.
///
/// # Examples
///
/// ```
/// use marl_core::Env;
/// use marl_parser::{MarlVal, Symbol};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define(Symbol::new("x"), MarlVal::int(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MarlVal::int(42));
///
/// // Create a child environment that inherits parent bindings
/// let child = env.child();
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MarlVal::int(42));
///
/// // Child can shadow parent bindings
/// child.define(Symbol::new("x"), MarlVal::int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MarlVal::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MarlVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, MarlVal>,
    parent: Option<Env>,
}

/// A non-owning handle to an environment.
///
/// Builtins stored inside the root environment hold one of these to reach
/// it, so the root does not keep itself alive.
#[derive(Debug, Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl WeakEnv {
    /// Recover the environment if it is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Get a weak handle to this environment.
    #[must_use]
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Define a binding in this environment (not parent).
    pub fn define(&self, sym: Symbol, val: MarlVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Find a symbol in this environment or its parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    #[must_use]
    pub fn get(&self, sym: &Symbol) -> Option<MarlVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Look up a symbol in this environment or parent chain.
    pub fn lookup(&self, sym: &Symbol) -> Result<MarlVal> {
        self.get(sym)
            .ok_or_else(|| Error::UndefinedSymbol(sym.clone()))
    }

    /// Check if a symbol is defined in this environment or parent chain.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.get(sym).is_some()
    }

    /// Bind `args` to parameter names in this environment.
    ///
    /// With a rest name, arguments past the fixed parameters are collected
    /// into a list (possibly empty). Without one the counts must match.
    pub fn bind_params(
        &self,
        params: &[Symbol],
        rest_param: Option<&Symbol>,
        args: &[MarlVal],
    ) -> Result<()> {
        let arity_ok = match rest_param {
            Some(_) => args.len() >= params.len(),
            None => args.len() == params.len(),
        };
        if !arity_ok {
            let expected = match rest_param {
                Some(_) => AritySpec::AtLeast(params.len()),
                None => AritySpec::Exact(params.len()),
            };
            return Err(Error::ArityError {
                expected,
                got: args.len(),
                name: None,
            });
        }

        let mut inner = self.inner.borrow_mut();
        for (param, arg) in params.iter().zip(args) {
            inner.bindings.insert(param.clone(), arg.clone());
        }
        if let Some(rest) = rest_param {
            let rest_args = args[params.len()..].to_vec();
            inner.bindings.insert(rest.clone(), MarlVal::list(rest_args));
        }
        Ok(())
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
