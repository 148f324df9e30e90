// lispr-core - Higher-order built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Higher-order functions: apply, map

use lispr_parser::{LisprVal, Vector};

use crate::error::Result;
use crate::eval::apply;

use super::{check_arity_at_least, get_slice_or_empty};

/// (apply f args) or (apply f a b c args) - call f with the final
/// sequence spread after the leading arguments
pub(crate) fn builtin_apply(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("apply", args, 2)?;
    let (func, rest) = (&args[0], &args[1..]);
    let (last, leading) = match rest.split_last() {
        Some(split) => split,
        None => return apply(func, &[]),
    };

    let mut all_args = leading.to_vec();
    all_args.extend(get_slice_or_empty("apply", last)?);
    apply(func, &all_args)
}

/// (map f coll & colls) - a list of f applied elementwise, stopping at the
/// shortest collection
pub(crate) fn builtin_map(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("map", args, 2)?;
    let func = &args[0];

    if let [coll] = &args[1..] {
        let mapped = get_slice_or_empty("map", coll)?
            .iter()
            .map(|item| apply(func, std::slice::from_ref(item)))
            .collect::<Result<Vector<_>>>()?;
        return Ok(LisprVal::list_from(mapped));
    }

    let colls = args[1..]
        .iter()
        .map(|coll| get_slice_or_empty("map", coll))
        .collect::<Result<Vec<_>>>()?;
    let min_len = colls.iter().map(Vector::len).min().unwrap_or(0);

    let mut result = Vector::new();
    for i in 0..min_len {
        let call_args: Vec<LisprVal> = colls.iter().map(|c| c[i].clone()).collect();
        result.push_back(apply(func, &call_args)?);
    }
    Ok(LisprVal::list_from(result))
}
