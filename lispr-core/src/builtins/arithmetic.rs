// lispr-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! All arithmetic is on 64-bit integers and is checked: an operation that
//! would overflow returns an error instead of wrapping. Division truncates
//! toward zero.

use lispr_parser::LisprVal;

use crate::error::{Error, Result};

use super::int_arg;

fn overflow(op: &str) -> Error {
    Error::EvalError(format!("Integer overflow in '{}'", op))
}

/// Collect the arguments of `op` as integers.
fn int_args(op: &str, args: &[LisprVal]) -> Result<Vec<i64>> {
    args.iter().map(|arg| int_arg(op, arg)).collect()
}

/// Fold `rest` into `init` with a checked operation.
fn fold_checked(
    op: &str,
    init: i64,
    rest: &[i64],
    f: impl Fn(i64, i64) -> Option<i64>,
) -> Result<LisprVal> {
    rest.iter()
        .try_fold(init, |acc, &n| f(acc, n).ok_or_else(|| overflow(op)))
        .map(LisprVal::Int)
}

/// (+ & nums)
pub(crate) fn builtin_add(args: &[LisprVal]) -> Result<LisprVal> {
    let nums = int_args("+", args)?;
    fold_checked("+", 0, &nums, i64::checked_add)
}

/// (- x & nums) - with one argument, negates it
pub(crate) fn builtin_sub(args: &[LisprVal]) -> Result<LisprVal> {
    let nums = int_args("-", args)?;
    match nums.split_first() {
        None => Err(Error::arity_at_least("-", 1, 0)),
        Some((x, [])) => x.checked_neg().map(LisprVal::Int).ok_or_else(|| overflow("-")),
        Some((x, rest)) => fold_checked("-", *x, rest, i64::checked_sub),
    }
}

/// (* & nums)
pub(crate) fn builtin_mul(args: &[LisprVal]) -> Result<LisprVal> {
    let nums = int_args("*", args)?;
    fold_checked("*", 1, &nums, i64::checked_mul)
}

/// (/ x & nums) - with one argument, returns (/ 1 x)
pub(crate) fn builtin_div(args: &[LisprVal]) -> Result<LisprVal> {
    let nums = int_args("/", args)?;
    let (init, divisors) = match nums.split_first() {
        None => return Err(Error::arity_at_least("/", 1, 0)),
        Some((x, [])) => (1, std::slice::from_ref(x)),
        Some((x, rest)) => (*x, rest),
    };

    let mut acc = init;
    for &d in divisors {
        if d == 0 {
            return Err(Error::DivisionByZero);
        }
        acc = acc.checked_div(d).ok_or_else(|| overflow("/"))?;
    }
    Ok(LisprVal::Int(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<LisprVal> {
        ns.iter().copied().map(LisprVal::Int).collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(builtin_add(&[]).unwrap(), LisprVal::Int(0));
        assert_eq!(builtin_add(&ints(&[1, 2, 3])).unwrap(), LisprVal::Int(6));
        assert!(builtin_add(&ints(&[i64::MAX, 1])).is_err());
        assert!(builtin_add(&[LisprVal::string("1")]).is_err());
    }

    #[test]
    fn test_sub() {
        assert_eq!(builtin_sub(&ints(&[10, 3])).unwrap(), LisprVal::Int(7));
        assert_eq!(builtin_sub(&ints(&[5])).unwrap(), LisprVal::Int(-5));
        assert!(builtin_sub(&ints(&[i64::MIN])).is_err());
        assert!(builtin_sub(&[]).is_err());
    }

    #[test]
    fn test_mul() {
        assert_eq!(builtin_mul(&[]).unwrap(), LisprVal::Int(1));
        assert_eq!(builtin_mul(&ints(&[2, 3])).unwrap(), LisprVal::Int(6));
        assert!(builtin_mul(&ints(&[i64::MAX, 2])).is_err());
    }

    #[test]
    fn test_div() {
        assert_eq!(builtin_div(&ints(&[9, 6])).unwrap(), LisprVal::Int(1));
        assert_eq!(builtin_div(&ints(&[-7, 2])).unwrap(), LisprVal::Int(-3));
        assert_eq!(builtin_div(&ints(&[1])).unwrap(), LisprVal::Int(1));
        assert!(matches!(
            builtin_div(&ints(&[1, 0])),
            Err(Error::DivisionByZero)
        ));
        assert!(builtin_div(&ints(&[i64::MIN, -1])).is_err());
    }
}
