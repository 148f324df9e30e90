// lispr-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Metadata operations: with-meta, meta

use lispr_parser::LisprVal;

use crate::error::{Error, Result};

use super::check_arity;

/// (with-meta obj m) - a copy of obj carrying m
pub(crate) fn builtin_with_meta(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("with-meta", args, 2)?;
    args[0].with_meta(args[1].clone()).ok_or_else(|| {
        Error::type_error_in(
            "with-meta",
            "collection or function",
            args[0].type_name(),
        )
    })
}

/// (meta obj) - the metadata of obj, or nil
pub(crate) fn builtin_meta(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("meta", args, 1)?;
    Ok(args[0].meta().map_or(LisprVal::Nil, |m| (**m).clone()))
}
