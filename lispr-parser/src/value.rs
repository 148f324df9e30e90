// lispr-parser - Core value types
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The core value type for lispr.
//!
//! Composite values are persistent `im` collections: every update produces
//! a new value that shares structure with the old one, and no reference to
//! the old value can observe the change. [`LisprAtom`] is the only mutable
//! variant.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};

use crate::keyword::Keyword;
use crate::printer::pr_str;
use crate::symbol::Symbol;

/// Attached metadata. Never participates in equality.
pub type Meta = Rc<LisprVal>;

/// The core value type for lispr.
///
/// `List`, `Vector`, `Map`, `NativeFn` and `Fn` can carry metadata.
#[derive(Clone)]
pub enum LisprVal {
    /// The nil value
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Immutable string
    String(Rc<str>),
    /// Keyword, stored with its sentinel prefix
    Keyword(Keyword),
    /// Symbol, resolved by the evaluator
    Symbol(Symbol),
    /// List: the call form when evaluated
    List(Vector<LisprVal>, Option<Meta>),
    /// Vector: evaluates elementwise, never as a call
    Vector(Vector<LisprVal>, Option<Meta>),
    /// Map keyed by strings and prefixed keywords
    Map(OrdMap<Rc<str>, LisprVal>, Option<Meta>),
    /// Host function
    NativeFn(LisprNativeFn),
    /// User-defined closure or macro
    Fn(Rc<LisprFn>),
    /// Mutable reference cell
    Atom(LisprAtom),
}

// ============================================================================
// Function types
// ============================================================================

/// The parameter list of a closure.
///
/// `(a b & more)` has `params = [a, b]` and `rest = Some(more)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FnParams {
    pub params: Vec<Symbol>,
    pub rest: Option<Symbol>,
}

impl FnParams {
    /// Number of arguments a call must supply at minimum.
    #[inline]
    pub fn required(&self) -> usize {
        self.params.len()
    }

    /// Rebuild the parameter list as it would be written in source.
    pub fn to_form(&self) -> LisprVal {
        let mut items: Vec<LisprVal> = self
            .params
            .iter()
            .map(|p| LisprVal::Symbol(p.clone()))
            .collect();
        if let Some(rest) = &self.rest {
            items.push(LisprVal::symbol("&"));
            items.push(LisprVal::Symbol(rest.clone()));
        }
        LisprVal::list(items)
    }
}

/// A user-defined function.
///
/// The captured environment is type-erased because `Env` lives in
/// `lispr-core`; the evaluator downcasts it back on every call.
#[derive(Clone)]
pub struct LisprFn {
    pub params: FnParams,
    pub body: LisprVal,
    pub env: Rc<dyn Any>,
    pub is_macro: bool,
    pub meta: Option<Meta>,
}

impl LisprFn {
    /// Create a new non-macro closure.
    pub fn new(params: FnParams, body: LisprVal, env: Rc<dyn Any>) -> Self {
        LisprFn {
            params,
            body,
            env,
            is_macro: false,
            meta: None,
        }
    }

    /// A copy of this closure flagged as a macro.
    #[must_use]
    pub fn to_macro(&self) -> Self {
        LisprFn {
            is_macro: true,
            ..self.clone()
        }
    }
}

impl fmt::Debug for LisprFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LisprFn")
            .field("params", &self.params)
            .field("is_macro", &self.is_macro)
            .finish_non_exhaustive()
    }
}

/// A host function registered under a name.
#[derive(Clone)]
pub struct LisprNativeFn {
    name: &'static str,
    func: Rc<dyn Any>,
    meta: Option<Meta>,
}

impl LisprNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        LisprNativeFn {
            name,
            func,
            meta: None,
        }
    }

    /// Get the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// The same function with different metadata.
    #[must_use]
    pub fn with_meta(&self, meta: Option<Meta>) -> Self {
        LisprNativeFn {
            name: self.name,
            func: Rc::clone(&self.func),
            meta,
        }
    }
}

impl fmt::Debug for LisprNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

/// A single mutable slot.
///
/// Clones share the slot, so a `reset` through one handle is visible
/// through every other.
#[derive(Clone)]
pub struct LisprAtom {
    value: Rc<RefCell<LisprVal>>,
}

impl LisprAtom {
    pub fn new(value: LisprVal) -> Self {
        LisprAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value.
    pub fn deref(&self) -> LisprVal {
        self.value.borrow().clone()
    }

    /// Replace the current value, returning the new one.
    pub fn reset(&self, value: LisprVal) -> LisprVal {
        *self.value.borrow_mut() = value.clone();
        value
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &LisprAtom) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for LisprAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {})", self.value.borrow())
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl LisprVal {
    #[inline]
    pub fn nil() -> Self {
        LisprVal::Nil
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        LisprVal::Bool(b)
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        LisprVal::Int(n)
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        LisprVal::String(s.into())
    }

    /// Create a keyword from its bare name.
    pub fn keyword(name: &str) -> Self {
        LisprVal::Keyword(Keyword::new(name))
    }

    pub fn symbol(name: impl Into<Rc<str>>) -> Self {
        LisprVal::Symbol(Symbol::new(name))
    }

    pub fn list(items: Vec<LisprVal>) -> Self {
        LisprVal::List(Vector::from(items), None)
    }

    pub fn list_from(items: Vector<LisprVal>) -> Self {
        LisprVal::List(items, None)
    }

    pub fn vector(items: Vec<LisprVal>) -> Self {
        LisprVal::Vector(Vector::from(items), None)
    }

    pub fn vector_from(items: Vector<LisprVal>) -> Self {
        LisprVal::Vector(items, None)
    }

    pub fn map(entries: OrdMap<Rc<str>, LisprVal>) -> Self {
        LisprVal::Map(entries, None)
    }

    pub fn atom(value: LisprVal) -> Self {
        LisprVal::Atom(LisprAtom::new(value))
    }

    pub fn closure(f: LisprFn) -> Self {
        LisprVal::Fn(Rc::new(f))
    }

    /// Rebuild a map key as the value it was made from.
    ///
    /// Any key starting with [`KEYWORD_PREFIX`] comes back as a keyword,
    /// including one made from a string that happened to start with it.
    ///
    /// [`KEYWORD_PREFIX`]: crate::keyword::KEYWORD_PREFIX
    pub fn from_map_key(key: &Rc<str>) -> Self {
        match Keyword::from_key(key) {
            Some(kw) => LisprVal::Keyword(kw),
            None => LisprVal::String(Rc::clone(key)),
        }
    }
}

// ============================================================================
// Predicates and accessors
// ============================================================================

impl LisprVal {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, LisprVal::Nil)
    }

    /// Everything except `nil` and `false` is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, LisprVal::Nil | LisprVal::Bool(false))
    }

    /// True for lists and vectors.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        matches!(self, LisprVal::List(..) | LisprVal::Vector(..))
    }

    /// The elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<LisprVal>> {
        match self {
            LisprVal::List(items, _) | LisprVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            LisprVal::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// The string form used to key a map, for strings and keywords.
    ///
    /// Strings key as themselves, so `"\u{29e}a"` and `:a` collide.
    pub fn map_key(&self) -> Option<Rc<str>> {
        match self {
            LisprVal::String(s) => Some(Rc::clone(s)),
            LisprVal::Keyword(kw) => Some(Rc::clone(kw.as_key())),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            LisprVal::Nil => "nil",
            LisprVal::Bool(_) => "boolean",
            LisprVal::Int(_) => "integer",
            LisprVal::String(_) => "string",
            LisprVal::Keyword(_) => "keyword",
            LisprVal::Symbol(_) => "symbol",
            LisprVal::List(..) => "list",
            LisprVal::Vector(..) => "vector",
            LisprVal::Map(..) => "map",
            LisprVal::NativeFn(_) => "native-fn",
            LisprVal::Fn(f) if f.is_macro => "macro",
            LisprVal::Fn(_) => "fn",
            LisprVal::Atom(_) => "atom",
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

impl LisprVal {
    /// Get the metadata of this value, if any.
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            LisprVal::List(_, m) | LisprVal::Vector(_, m) | LisprVal::Map(_, m) => m.as_ref(),
            LisprVal::NativeFn(f) => f.meta(),
            LisprVal::Fn(f) => f.meta.as_ref(),
            _ => None,
        }
    }

    pub fn supports_meta(&self) -> bool {
        matches!(
            self,
            LisprVal::List(..)
                | LisprVal::Vector(..)
                | LisprVal::Map(..)
                | LisprVal::NativeFn(_)
                | LisprVal::Fn(_)
        )
    }

    /// A copy of this value carrying `meta`, or `None` if the variant
    /// cannot hold metadata.
    pub fn with_meta(&self, meta: LisprVal) -> Option<LisprVal> {
        let meta = Some(Rc::new(meta));
        match self {
            LisprVal::List(items, _) => Some(LisprVal::List(items.clone(), meta)),
            LisprVal::Vector(items, _) => Some(LisprVal::Vector(items.clone(), meta)),
            LisprVal::Map(entries, _) => Some(LisprVal::Map(entries.clone(), meta)),
            LisprVal::NativeFn(f) => Some(LisprVal::NativeFn(f.with_meta(meta))),
            LisprVal::Fn(f) => {
                let mut f = LisprFn::clone(f);
                f.meta = meta;
                Some(LisprVal::closure(f))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Equality
// ============================================================================

fn seq_eq(a: &Vector<LisprVal>, b: &Vector<LisprVal>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

impl PartialEq for LisprVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LisprVal::Nil, LisprVal::Nil) => true,
            (LisprVal::Bool(a), LisprVal::Bool(b)) => a == b,
            (LisprVal::Int(a), LisprVal::Int(b)) => a == b,
            (LisprVal::String(a), LisprVal::String(b)) => a == b,
            (LisprVal::Keyword(a), LisprVal::Keyword(b)) => a == b,
            (LisprVal::Symbol(a), LisprVal::Symbol(b)) => a == b,
            // Lists and vectors compare with each other; metadata is ignored
            (
                LisprVal::List(a, _) | LisprVal::Vector(a, _),
                LisprVal::List(b, _) | LisprVal::Vector(b, _),
            ) => seq_eq(a, b),
            (LisprVal::Map(a, _), LisprVal::Map(b, _)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (LisprVal::NativeFn(a), LisprVal::NativeFn(b)) => Rc::ptr_eq(a.func(), b.func()),
            (LisprVal::Fn(a), LisprVal::Fn(b)) => Rc::ptr_eq(a, b),
            (LisprVal::Atom(a), LisprVal::Atom(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for LisprVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pr_str(self, true))
    }
}

impl fmt::Debug for LisprVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<bool> for LisprVal {
    fn from(b: bool) -> Self {
        LisprVal::Bool(b)
    }
}

impl From<i64> for LisprVal {
    fn from(n: i64) -> Self {
        LisprVal::Int(n)
    }
}

impl From<&str> for LisprVal {
    fn from(s: &str) -> Self {
        LisprVal::string(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
