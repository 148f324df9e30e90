// lispr-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for lispr expressions.
//!
//! [`eval`] runs list forms inside a trampoline: special forms and closure
//! calls in tail position hand back the next `(expr, env)` pair instead of
//! recursing, so a self-recursive tail call runs in constant stack. Only
//! non-tail positions (arguments, `if` conditions, `define` values) recurse.

pub mod apply;
pub mod exceptions;
pub mod macros;
pub mod quasiquote;
pub mod special_forms;
mod stack;

pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use macros::{is_macro_call, macroexpand};
pub use quasiquote::quasiquote;

use std::cell::Cell;

use lispr_parser::{LisprVal, OrdMap, Vector};
use tracing::trace;

use crate::env::Env;
use crate::error::{Error, Result};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum recursion depth for eval. Can be configured via `set_max_eval_depth`.
///
/// The native stack grows on demand, so this bounds runaway
/// recursion rather than the thread's stack size.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 1_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::EvalError(format!(
                "Stack overflow: maximum recursion depth ({}) exceeded",
                max
            )))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Trampoline
// ============================================================================

/// Outcome of one evaluation step.
pub(crate) enum Trampoline {
    /// Evaluation finished with this value.
    Value(LisprVal),
    /// Continue the loop with this form in this environment.
    Eval(LisprVal, Env),
}

/// Evaluate an expression in the given environment.
#[must_use = "eval returns a value that should be used"]
pub fn eval(expr: &LisprVal, env: &Env) -> Result<LisprVal> {
    let _guard = EvalDepthGuard::new()?;
    stack::ensure_sufficient_stack(|| eval_loop(expr, env))
}

fn eval_loop(expr: &LisprVal, env: &Env) -> Result<LisprVal> {
    let mut expr = expr.clone();
    let mut env = env.clone();
    loop {
        expr = macroexpand(&expr, &env)?;

        let items = match &expr {
            LisprVal::List(items, _) if !items.is_empty() => items.clone(),
            LisprVal::List(..) => return Ok(expr),
            _ => return eval_ast(&expr, &env),
        };

        match eval_step(&items, &env)? {
            Trampoline::Value(val) => return Ok(val),
            Trampoline::Eval(next, next_env) => {
                expr = next;
                env = next_env;
            }
        }
    }
}

/// Evaluate a non-list form: symbols resolve, vectors and maps evaluate
/// their elements, everything else evaluates to itself.
fn eval_ast(expr: &LisprVal, env: &Env) -> Result<LisprVal> {
    match expr {
        LisprVal::Symbol(sym) => env.get(sym),
        LisprVal::Vector(items, _) => {
            let evaluated = items
                .iter()
                .map(|item| eval(item, env))
                .collect::<Result<Vector<_>>>()?;
            Ok(LisprVal::vector_from(evaluated))
        }
        LisprVal::Map(entries, _) => {
            let mut evaluated = OrdMap::new();
            for (key, val) in entries.iter() {
                let key = eval(&LisprVal::from_map_key(key), env)?;
                let key = key.map_key().ok_or_else(|| {
                    Error::type_error_in("map key", "string or keyword", key.type_name())
                })?;
                evaluated.insert(key, eval(val, env)?);
            }
            Ok(LisprVal::map(evaluated))
        }
        other => Ok(other.clone()),
    }
}

/// Signature shared by every special form handler.
type SpecialForm = fn(&Vector<LisprVal>, &Env) -> Result<Trampoline>;

fn special_form(name: &str) -> Option<SpecialForm> {
    Some(match name {
        "define" => special_forms::eval_define,
        "let*" => special_forms::eval_let,
        "quote" => special_forms::eval_quote,
        "quasiquote" => special_forms::eval_quasiquote,
        "defmacro!" => special_forms::eval_defmacro,
        "macroExpand" | "macroexpand" => special_forms::eval_macroexpand,
        "try*" => exceptions::eval_try,
        "do" => special_forms::eval_do,
        "if" => special_forms::eval_if,
        "lambda" => special_forms::eval_lambda,
        _ => return None,
    })
}

/// Dispatch a non-empty list on its head.
fn eval_step(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    if let Some(LisprVal::Symbol(head)) = items.front()
        && let Some(handler) = special_form(head.name())
    {
        trace!(form = head.name(), "special form");
        return handler(items, env);
    }
    eval_call(items, env)
}

/// The default case: evaluate every element, then call the head.
fn eval_call(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    let mut evaluated = items.iter().map(|item| eval(item, env));
    let func = match evaluated.next() {
        Some(func) => func?,
        None => return Ok(Trampoline::Value(LisprVal::list(Vec::new()))),
    };
    let args = evaluated.collect::<Result<Vec<_>>>()?;

    match &func {
        // Closure bodies continue in the trampoline
        LisprVal::Fn(f) => {
            let frame = apply::bind_closure(f, &args)?;
            Ok(Trampoline::Eval(f.body.clone(), frame))
        }
        LisprVal::NativeFn(f) => apply::apply_native(f, &args).map(Trampoline::Value),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lispr_parser::{Parser, Symbol};

    fn eval_src(src: &str, env: &Env) -> Result<LisprVal> {
        let mut result = LisprVal::Nil;
        for form in Parser::parse_all_str(src)? {
            result = eval(&form, env)?;
        }
        Ok(result)
    }

    #[test]
    fn test_self_evaluating() {
        let env = Env::new();
        for src in ["1", "\"s\"", "nil", "true", ":k", "()"] {
            let form = Parser::parse_str(src).unwrap().unwrap();
            assert_eq!(eval(&form, &env).unwrap(), form);
        }
    }

    #[test]
    fn test_symbol_lookup() {
        let env = Env::new();
        env.set(Symbol::new("x"), LisprVal::int(5));
        assert_eq!(eval_src("x", &env).unwrap(), LisprVal::int(5));
        assert!(matches!(
            eval_src("y", &env),
            Err(Error::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn test_vector_elements_evaluate() {
        let env = Env::new();
        env.set(Symbol::new("x"), LisprVal::int(5));
        assert_eq!(
            eval_src("[x (quote y)]", &env).unwrap(),
            LisprVal::vector(vec![LisprVal::int(5), LisprVal::symbol("y")])
        );
    }

    #[test]
    fn test_map_values_evaluate() {
        let env = Env::new();
        env.set(Symbol::new("x"), LisprVal::int(5));
        let result = eval_src("{:a x}", &env).unwrap();
        assert_eq!(result.to_string(), "{:a 5}");
    }

    #[test]
    fn test_not_callable() {
        let env = Env::new();
        let err = eval_src("(1)", &env).unwrap_err();
        assert!(matches!(err, Error::NotCallable(_)));
        assert_eq!(err.to_string(), "Cannot call value: 1");
    }

    #[test]
    fn test_depth_guard() {
        let previous = set_max_eval_depth(50);
        let env = Env::new();
        let mut nested = String::from("1");
        for _ in 0..60 {
            nested = format!("[{}]", nested);
        }
        let err = eval_src(&nested, &env).unwrap_err();
        assert!(err.to_string().contains("Stack overflow"));
        assert_eq!(get_eval_depth(), 0);
        set_max_eval_depth(previous);
    }
}
