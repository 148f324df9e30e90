// lispr-core - String and symbol built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! String operations: str, pr-str, symbol, keyword

use std::rc::Rc;

use lispr_parser::{LisprVal, Symbol, print_list};

use crate::error::{Error, Result};

use super::check_arity;

/// (str & args) - concatenate the display forms of args
pub(crate) fn builtin_str(args: &[LisprVal]) -> Result<LisprVal> {
    Ok(LisprVal::string(print_list(args, false, "")))
}

/// (pr-str & args) - readable forms of args, space separated
pub(crate) fn builtin_pr_str(args: &[LisprVal]) -> Result<LisprVal> {
    Ok(LisprVal::string(print_list(args, true, " ")))
}

/// (symbol name)
pub(crate) fn builtin_symbol(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("symbol", args, 1)?;
    match &args[0] {
        LisprVal::String(s) => Ok(LisprVal::Symbol(Symbol::new(Rc::clone(s)))),
        sym @ LisprVal::Symbol(_) => Ok(sym.clone()),
        other => Err(Error::type_error_in("symbol", "string", other.type_name())),
    }
}

/// (keyword name)
pub(crate) fn builtin_keyword(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("keyword", args, 1)?;
    match &args[0] {
        LisprVal::String(s) => Ok(LisprVal::keyword(s)),
        kw @ LisprVal::Keyword(_) => Ok(kw.clone()),
        other => Err(Error::type_error_in("keyword", "string", other.type_name())),
    }
}
