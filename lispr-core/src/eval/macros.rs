// lispr-core - Macro expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Macro expansion.
//!
//! A list is a macro call when its head is a symbol bound to a closure
//! flagged as a macro. Expansion applies that closure to the unevaluated
//! argument forms and repeats on the result until the head no longer
//! names a macro.

use std::rc::Rc;

use lispr_parser::{LisprFn, LisprVal};
use tracing::trace;

use super::apply::apply_fn;
use crate::env::Env;
use crate::error::Result;

/// The macro `expr` calls, if it is a macro call in `env`.
pub fn is_macro_call(expr: &LisprVal, env: &Env) -> Option<Rc<LisprFn>> {
    let LisprVal::List(items, _) = expr else {
        return None;
    };
    let LisprVal::Symbol(head) = items.front()? else {
        return None;
    };
    // `find` first so a symbol bound to nil is not mistaken for unbound
    let frame = env.find(head)?;
    match frame.lookup(head)? {
        LisprVal::Fn(f) if f.is_macro => Some(f),
        _ => None,
    }
}

/// Expand `expr` until it is no longer a macro call.
pub fn macroexpand(expr: &LisprVal, env: &Env) -> Result<LisprVal> {
    let mut expr = expr.clone();
    while let Some(mac) = is_macro_call(&expr, env) {
        let args: Vec<LisprVal> = match &expr {
            LisprVal::List(items, _) => items.iter().skip(1).cloned().collect(),
            _ => Vec::new(),
        };
        trace!(form = %expr, "expanding macro");
        expr = apply_fn(&mac, &args)?;
    }
    Ok(expr)
}
