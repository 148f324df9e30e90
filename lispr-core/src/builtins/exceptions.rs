// lispr-core - Exception built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! throw

use lispr_parser::LisprVal;

use crate::error::{Error, Result};

use super::check_arity;

/// (throw value) - raise any value for `catch*` to receive
pub(crate) fn builtin_throw(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("throw", args, 1)?;
    Err(Error::Thrown(args[0].clone()))
}
