// lispr-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, <=, >, >=
//!
//! All are variadic and hold when every adjacent pair satisfies the
//! relation.

use lispr_parser::LisprVal;

use crate::error::Result;

use super::{check_arity_at_least, int_arg};

/// (= x & more) - structural equality
pub(crate) fn builtin_eq(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("=", args, 1)?;
    Ok(LisprVal::Bool(args.windows(2).all(|w| w[0] == w[1])))
}

fn compare_chain(name: &str, args: &[LisprVal], holds: fn(i64, i64) -> bool) -> Result<LisprVal> {
    check_arity_at_least(name, args, 1)?;
    let nums = args
        .iter()
        .map(|arg| int_arg(name, arg))
        .collect::<Result<Vec<_>>>()?;
    Ok(LisprVal::Bool(nums.windows(2).all(|w| holds(w[0], w[1]))))
}

pub(crate) fn builtin_lt(args: &[LisprVal]) -> Result<LisprVal> {
    compare_chain("<", args, |a, b| a < b)
}

pub(crate) fn builtin_le(args: &[LisprVal]) -> Result<LisprVal> {
    compare_chain("<=", args, |a, b| a <= b)
}

pub(crate) fn builtin_gt(args: &[LisprVal]) -> Result<LisprVal> {
    compare_chain(">", args, |a, b| a > b)
}

pub(crate) fn builtin_ge(args: &[LisprVal]) -> Result<LisprVal> {
    compare_chain(">=", args, |a, b| a >= b)
}
