// lispr-core - Special form implementations
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms: `define`, `let*`, `quote`, `quasiquote`, `defmacro!`,
//! `macroExpand`, `do`, `if` and `lambda`.
//!
//! Each handler receives the whole form, head included. Forms whose result
//! is in tail position return [`Trampoline::Eval`] so the caller's loop
//! continues with it.

use std::rc::Rc;

use lispr_parser::{FnParams, LisprFn, LisprVal, Symbol, Vector};

use super::{Trampoline, eval, macroexpand, quasiquote};
use crate::env::Env;
use crate::error::{Error, Result};

/// Fail unless the form has exactly `n` elements, head included.
fn expect_len(items: &Vector<LisprVal>, form: &'static str, n: usize) -> Result<()> {
    if items.len() == n {
        Ok(())
    } else {
        Err(Error::syntax(
            form,
            format!("expected {} argument(s), got {}", n - 1, items.len() - 1),
        ))
    }
}

fn expect_symbol(val: &LisprVal, form: &'static str) -> Result<Symbol> {
    val.as_symbol()
        .cloned()
        .ok_or_else(|| Error::syntax(form, format!("expected a symbol, got {}", val.type_name())))
}

/// Body forms as a single expression: nil, the form itself, or an implicit `do`.
fn body_expr(items: &Vector<LisprVal>, start: usize) -> LisprVal {
    match items.len().saturating_sub(start) {
        0 => LisprVal::Nil,
        1 => items[start].clone(),
        _ => {
            let mut body = items.clone().split_off(start);
            body.push_front(LisprVal::symbol("do"));
            LisprVal::list_from(body)
        }
    }
}

// ============================================================================
// Binding forms
// ============================================================================

/// `(define sym expr)`
pub(crate) fn eval_define(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    expect_len(items, "define", 3)?;
    let sym = expect_symbol(&items[1], "define")?;
    let val = eval(&items[2], env)?;
    Ok(Trampoline::Value(env.set(sym, val)))
}

/// `(let* (sym expr ...) body...)`
pub(crate) fn eval_let(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    if items.len() < 2 {
        return Err(Error::syntax("let*", "expected a binding list"));
    }
    let bindings = items[1].as_seq().ok_or_else(|| {
        Error::syntax(
            "let*",
            format!("bindings must be a list or vector, got {}", items[1].type_name()),
        )
    })?;
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "bindings must contain an even number of forms",
        ));
    }

    let frame = env.child();
    let mut pairs = bindings.iter();
    while let (Some(target), Some(expr)) = (pairs.next(), pairs.next()) {
        let sym = expect_symbol(target, "let*")?;
        // Each binding is visible to the ones after it
        let val = eval(expr, &frame)?;
        frame.set(sym, val);
    }

    Ok(Trampoline::Eval(body_expr(items, 2), frame))
}

/// `(defmacro! sym expr)`, where `expr` evaluates to a closure.
pub(crate) fn eval_defmacro(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    expect_len(items, "defmacro!", 3)?;
    let sym = expect_symbol(&items[1], "defmacro!")?;
    match eval(&items[2], env)? {
        LisprVal::Fn(f) => {
            let mac = LisprVal::closure(f.to_macro());
            Ok(Trampoline::Value(env.set(sym, mac)))
        }
        other => Err(Error::type_error_in(
            "defmacro!",
            "fn",
            other.type_name(),
        )),
    }
}

// ============================================================================
// Quoting
// ============================================================================

/// `(quote form)`
pub(crate) fn eval_quote(items: &Vector<LisprVal>, _env: &Env) -> Result<Trampoline> {
    expect_len(items, "quote", 2)?;
    Ok(Trampoline::Value(items[1].clone()))
}

/// `(quasiquote form)`
pub(crate) fn eval_quasiquote(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    expect_len(items, "quasiquote", 2)?;
    Ok(Trampoline::Eval(quasiquote(&items[1]), env.clone()))
}

/// `(macroExpand form)`
pub(crate) fn eval_macroexpand(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    expect_len(items, "macroExpand", 2)?;
    macroexpand(&items[1], env).map(Trampoline::Value)
}

// ============================================================================
// Control flow
// ============================================================================

/// `(do form...)`
pub(crate) fn eval_do(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    let Some(last) = items.last().filter(|_| items.len() > 1) else {
        return Ok(Trampoline::Value(LisprVal::Nil));
    };
    for form in items.iter().skip(1).take(items.len() - 2) {
        let _ = eval(form, env)?;
    }
    Ok(Trampoline::Eval(last.clone(), env.clone()))
}

/// `(if cond then else?)`
pub(crate) fn eval_if(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    if !(3..=4).contains(&items.len()) {
        return Err(Error::syntax(
            "if",
            format!("expected 2 or 3 arguments, got {}", items.len() - 1),
        ));
    }
    let branch = if eval(&items[1], env)?.is_truthy() {
        items[2].clone()
    } else if let Some(otherwise) = items.get(3) {
        otherwise.clone()
    } else {
        return Ok(Trampoline::Value(LisprVal::Nil));
    };
    Ok(Trampoline::Eval(branch, env.clone()))
}

// ============================================================================
// Functions
// ============================================================================

/// Parse a parameter list such as `(a b & rest)` or `[a b]`.
pub(crate) fn parse_params(form: &LisprVal) -> Result<FnParams> {
    let items = form.as_seq().ok_or_else(|| {
        Error::syntax(
            "lambda",
            format!("parameters must be a list or vector, got {}", form.type_name()),
        )
    })?;

    let mut params = FnParams::default();
    let mut iter = items.iter();
    while let Some(item) = iter.next() {
        let sym = expect_symbol(item, "lambda")?;
        if sym.is_rest_marker() {
            let rest = iter
                .next()
                .ok_or_else(|| Error::syntax("lambda", "& must be followed by a parameter"))?;
            params.rest = Some(expect_symbol(rest, "lambda")?);
            if iter.next().is_some() {
                return Err(Error::syntax(
                    "lambda",
                    "only one parameter may follow &",
                ));
            }
            break;
        }
        params.params.push(sym);
    }
    Ok(params)
}

/// `(lambda params body...)`
pub(crate) fn eval_lambda(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    if items.len() < 2 {
        return Err(Error::syntax("lambda", "expected a parameter list"));
    }
    let params = parse_params(&items[1])?;
    let body = body_expr(items, 2);
    let closure = LisprFn::new(params, body, Rc::new(env.clone()));
    Ok(Trampoline::Value(LisprVal::closure(closure)))
}
