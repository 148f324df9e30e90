// lispr-core - Lexical environments
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment frames for lispr.
//!
//! Frames form a chain from the innermost scope up to the root. Lookups
//! walk outwards; writes always land in the frame they are made on, so an
//! inner binding shadows an outer one without touching it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use lispr_parser::{FnParams, LisprVal, Symbol};

use crate::error::{AritySpec, Error, Result};

/// A lexical environment frame.
///
/// Cloning an `Env` clones the handle, not the bindings.
///
/// # Example
///
/// ```
/// use lispr_core::env::Env;
/// use lispr_parser::{LisprVal, Symbol};
///
/// let root = Env::new();
/// root.set(Symbol::new("x"), LisprVal::int(1));
/// let inner = root.child();
/// inner.set(Symbol::new("x"), LisprVal::int(2));
///
/// assert_eq!(inner.get(&Symbol::new("x")).unwrap(), LisprVal::int(2));
/// assert_eq!(root.get(&Symbol::new("x")).unwrap(), LisprVal::int(1));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, LisprVal>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create an empty child frame of this environment.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Create a child frame binding `params` positionally against `args`.
    ///
    /// A rest parameter receives the remaining arguments as a list. Extra
    /// arguments without a rest parameter are ignored.
    pub fn bind(&self, params: &FnParams, args: &[LisprVal]) -> Result<Self> {
        let required = params.required();
        if args.len() < required {
            let expected = if params.rest.is_some() {
                AritySpec::AtLeast(required)
            } else {
                AritySpec::Exact(required)
            };
            return Err(Error::ArityError {
                expected,
                got: args.len(),
                name: None,
            });
        }

        let frame = self.child();
        {
            let mut inner = frame.inner.borrow_mut();
            for (param, arg) in params.params.iter().zip(args) {
                inner.bindings.insert(param.clone(), arg.clone());
            }
            if let Some(rest) = &params.rest {
                let rest_args = LisprVal::list(args[required..].to_vec());
                inner.bindings.insert(rest.clone(), rest_args);
            }
        }
        Ok(frame)
    }

    /// Find the nearest frame that binds `sym`.
    pub fn find(&self, sym: &Symbol) -> Option<Env> {
        let mut current = self.clone();
        loop {
            let parent = {
                let inner = current.inner.borrow();
                if inner.bindings.contains_key(sym) {
                    break;
                }
                inner.parent.clone()
            };
            current = parent?;
        }
        Some(current)
    }

    /// Look up `sym` in this frame and its ancestors.
    pub fn lookup(&self, sym: &Symbol) -> Option<LisprVal> {
        self.find(sym)
            .and_then(|frame| frame.inner.borrow().bindings.get(sym).cloned())
    }

    /// Resolve `sym`, failing if no frame binds it.
    pub fn get(&self, sym: &Symbol) -> Result<LisprVal> {
        self.lookup(sym)
            .ok_or_else(|| Error::UndefinedSymbol(sym.clone()))
    }

    /// Bind `sym` in this frame, returning the value.
    pub fn set(&self, sym: Symbol, val: LisprVal) -> LisprVal {
        self.inner.borrow_mut().bindings.insert(sym, val.clone());
        val
    }

    /// True if `sym` is bound in this frame or an ancestor.
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.find(sym).is_some()
    }

    /// True if both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A handle that does not keep this frame alive.
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Remove every binding in this frame.
    ///
    /// Closures stored in a frame hold that frame, so dropping the last
    /// outside handle is not enough to free it. Clearing breaks the cycle.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.inner.borrow_mut().bindings);
        drop(bindings);
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Env")
            .field("bindings", &inner.bindings.len())
            .field("has_parent", &inner.parent.is_some())
            .finish_non_exhaustive()
    }
}

/// A non-owning handle to an [`Env`] frame.
#[derive(Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl WeakEnv {
    /// The frame, if it is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lispr_parser::LisprFn;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn params(names: &[&str], rest: Option<&str>) -> FnParams {
        FnParams {
            params: names.iter().map(|n| sym(n)).collect(),
            rest: rest.map(sym),
        }
    }

    #[test]
    fn test_set_and_get() {
        let env = Env::new();
        assert_eq!(env.set(sym("x"), LisprVal::int(42)), LisprVal::int(42));
        assert_eq!(env.get(&sym("x")).unwrap(), LisprVal::int(42));
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Env::new();
        let err = env.get(&sym("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Unable to resolve symbol: missing");
    }

    #[test]
    fn test_child_sees_parent() {
        let parent = Env::new();
        parent.set(sym("x"), LisprVal::int(1));
        let child = parent.child();
        assert_eq!(child.get(&sym("x")).unwrap(), LisprVal::int(1));
    }

    #[test]
    fn test_set_shadows_instead_of_mutating() {
        let parent = Env::new();
        parent.set(sym("x"), LisprVal::int(1));
        let child = parent.child();
        child.set(sym("x"), LisprVal::int(2));
        assert_eq!(child.get(&sym("x")).unwrap(), LisprVal::int(2));
        assert_eq!(parent.get(&sym("x")).unwrap(), LisprVal::int(1));
    }

    #[test]
    fn test_find_returns_defining_frame() {
        let root = Env::new();
        root.set(sym("x"), LisprVal::Nil);
        let mid = root.child();
        let leaf = mid.child();
        let found = leaf.find(&sym("x")).unwrap();
        assert!(found.ptr_eq(&root));
        assert!(leaf.find(&sym("y")).is_none());
    }

    #[test]
    fn test_find_distinguishes_nil_from_unbound() {
        let env = Env::new();
        env.set(sym("n"), LisprVal::Nil);
        assert!(env.is_defined(&sym("n")));
        assert!(!env.is_defined(&sym("m")));
    }

    #[test]
    fn test_bind_positional() {
        let env = Env::new();
        let frame = env
            .bind(&params(&["a", "b"], None), &[LisprVal::int(1), LisprVal::int(2)])
            .unwrap();
        assert_eq!(frame.get(&sym("a")).unwrap(), LisprVal::int(1));
        assert_eq!(frame.get(&sym("b")).unwrap(), LisprVal::int(2));
    }

    #[test]
    fn test_bind_rest() {
        let env = Env::new();
        let args = [LisprVal::int(1), LisprVal::int(2), LisprVal::int(3)];
        let frame = env.bind(&params(&["a"], Some("more")), &args).unwrap();
        assert_eq!(
            frame.get(&sym("more")).unwrap(),
            LisprVal::list(vec![LisprVal::int(2), LisprVal::int(3)])
        );

        let frame = env.bind(&params(&[], Some("xs")), &[]).unwrap();
        assert_eq!(frame.get(&sym("xs")).unwrap(), LisprVal::list(vec![]));
    }

    #[test]
    fn test_bind_too_few_args() {
        let env = Env::new();
        let err = env
            .bind(&params(&["a", "b"], None), &[LisprVal::int(1)])
            .unwrap_err();
        assert!(matches!(err, Error::ArityError { got: 1, .. }));
    }

    #[test]
    fn test_bind_too_few_args_with_rest() {
        let env = Env::new();
        assert!(matches!(
            env.bind(&params(&["a"], Some("more")), &[]),
            Err(Error::ArityError {
                expected: AritySpec::AtLeast(1),
                got: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_debug_shows_frame_shape() {
        let env = Env::new();
        env.set(sym("x"), LisprVal::int(1));
        let printed = format!("{:?}", env.child());
        assert!(printed.starts_with("Env { bindings: 0, has_parent: true"), "{}", printed);
    }

    #[test]
    fn test_weak_handle_does_not_keep_frame() {
        let env = Env::new();
        let weak = env.downgrade();
        assert!(weak.upgrade().is_some_and(|e| e.ptr_eq(&env)));
        drop(env);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_clear_releases_self_references() {
        let env = Env::new();
        // A closure bound in the frame it captured
        let f = LisprFn::new(FnParams::default(), LisprVal::Nil, Rc::new(env.clone()));
        env.set(sym("f"), LisprVal::closure(f));
        let weak = env.downgrade();

        env.clear();
        assert!(!env.is_defined(&sym("f")));
        drop(env);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_bind_ignores_extra_args() {
        let env = Env::new();
        let frame = env
            .bind(&params(&["a"], None), &[LisprVal::int(1), LisprVal::int(2)])
            .unwrap();
        assert_eq!(frame.get(&sym("a")).unwrap(), LisprVal::int(1));
    }
}
