// lispr-core - Evaluator and runtime for lispr
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lispr-core
//!
//! Evaluator and runtime for lispr, a small Lisp.
//! Provides environments, a tail-call-safe AST-walking evaluator with
//! macros and quasiquote, the builtin function set, and an
//! [`Interpreter`] session that ties them together.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod interpreter;

pub use builtins::{get_slice, register_builtins};
pub use env::Env;
pub use error::{AritySpec, Error, Result};
pub use eval::{
    apply, eval, get_eval_depth, get_max_eval_depth, make_native_fn, set_max_eval_depth,
};
pub use interpreter::{Config, Interpreter};

// Re-export parser types for convenience
pub use lispr_parser::{Keyword, LisprVal, Symbol};
