// lispr-core - Exception handling special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `try*`/`catch*`.
//!
//! `(try* body (catch* e handler))` evaluates `body`. If it fails, `e` is
//! bound in a child frame to the thrown value, or for host errors to the
//! error message as a string, and `handler` runs there. A failing handler
//! propagates its own error.

use lispr_parser::{LisprVal, Symbol, Vector};
use tracing::debug;

use super::{Trampoline, eval};
use crate::env::Env;
use crate::error::{Error, Result};

/// Parse `(catch* binding handler)`.
fn parse_catch(clause: &LisprVal) -> Result<(Symbol, LisprVal)> {
    let items = match clause {
        LisprVal::List(items, _) => items,
        other => {
            return Err(Error::syntax(
                "try*",
                format!("expected a catch* clause, got {}", other.type_name()),
            ));
        }
    };

    match items.front().and_then(LisprVal::as_symbol) {
        Some(head) if head.name() == "catch*" => {}
        _ => return Err(Error::syntax("try*", "expected a catch* clause")),
    }
    if items.len() != 3 {
        return Err(Error::syntax(
            "try*",
            "catch* requires a binding and a handler",
        ));
    }

    let binding = items[1].as_symbol().cloned().ok_or_else(|| {
        Error::syntax(
            "try*",
            format!("catch* binding must be a symbol, got {}", items[1].type_name()),
        )
    })?;
    Ok((binding, items[2].clone()))
}

/// `(try* body)` or `(try* body (catch* binding handler))`
pub(crate) fn eval_try(items: &Vector<LisprVal>, env: &Env) -> Result<Trampoline> {
    let catch = match items.len() {
        2 => None,
        3 => Some(parse_catch(&items[2])?),
        n => {
            return Err(Error::syntax(
                "try*",
                format!("expected a body and an optional catch* clause, got {} forms", n - 1),
            ));
        }
    };

    match (eval(&items[1], env), catch) {
        (Ok(val), _) => Ok(Trampoline::Value(val)),
        (Err(err), None) => Err(err),
        (Err(err), Some((binding, handler))) => {
            debug!(error = %err, "caught error");
            let frame = env.child();
            frame.set(binding, err.to_catch_value());
            eval(&handler, &frame).map(Trampoline::Value)
        }
    }
}
