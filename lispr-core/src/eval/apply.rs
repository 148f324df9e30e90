// lispr-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for lispr.
//!
//! [`apply`] is the one invocation path shared by the evaluator and by
//! builtins that take a callback (`apply`, `map`, `swap!`). A closure
//! entered here is evaluated by a nested [`eval`] and is not part of the
//! caller's trampoline.

use std::any::Any;
use std::rc::Rc;

use lispr_parser::{LisprFn, LisprNativeFn, LisprVal};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[LisprVal]) -> Result<LisprVal>;

/// Apply a function to arguments.
pub fn apply(func: &LisprVal, args: &[LisprVal]) -> Result<LisprVal> {
    match func {
        LisprVal::Fn(f) => apply_fn(f, args),
        LisprVal::NativeFn(f) => apply_native(f, args),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// The environment a closure was created in.
pub(crate) fn closure_env(func: &LisprFn) -> Result<&Env> {
    func.env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Function environment has invalid type".into()))
}

/// Build the call frame for a closure, parented on its captured environment.
pub(crate) fn bind_closure(func: &LisprFn, args: &[LisprVal]) -> Result<Env> {
    closure_env(func)?.bind(&func.params, args)
}

pub(crate) fn apply_fn(func: &LisprFn, args: &[LisprVal]) -> Result<LisprVal> {
    let frame = bind_closure(func, args)?;
    eval(&func.body, &frame)
}

pub(crate) fn apply_native(func: &LisprNativeFn, args: &[LisprVal]) -> Result<LisprVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native function has invalid type".into()))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[LisprVal]) -> Result<LisprVal> + 'static,
) -> LisprNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    LisprNativeFn::new(name, func_any)
}
