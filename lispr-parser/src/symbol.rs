// lispr-parser - Symbol type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are bare identifiers resolved through the environment.
//!
//! Two symbols are equal when their names are equal. Names are reference
//! counted so cloning a symbol never copies the underlying string.

use std::fmt;
use std::rc::Rc;

/// An identifier such as `x`, `let*` or `swap!`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Create a symbol with the given name.
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Symbol(name.into())
    }

    /// Get the symbol's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// True for the `&` marker that introduces a rest parameter.
    #[inline]
    pub fn is_rest_marker(&self) -> bool {
        &*self.0 == "&"
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}
