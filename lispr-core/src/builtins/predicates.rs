// lispr-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, number?, string?, symbol?,
//! keyword?, list?, vector?, map?, sequential?, atom?, fn?, macro?

use lispr_parser::LisprVal;

use crate::error::Result;

use super::check_arity;

/// Define a one-argument predicate from a pattern.
macro_rules! predicate {
    ($fn_name:ident, $name:literal, $pattern:pat) => {
        pub(crate) fn $fn_name(args: &[LisprVal]) -> Result<LisprVal> {
            check_arity($name, args, 1)?;
            Ok(LisprVal::Bool(matches!(&args[0], $pattern)))
        }
    };
}

predicate!(builtin_nil_p, "nil?", LisprVal::Nil);
predicate!(builtin_true_p, "true?", LisprVal::Bool(true));
predicate!(builtin_false_p, "false?", LisprVal::Bool(false));
predicate!(builtin_number_p, "number?", LisprVal::Int(_));
predicate!(builtin_string_p, "string?", LisprVal::String(_));
predicate!(builtin_symbol_p, "symbol?", LisprVal::Symbol(_));
predicate!(builtin_keyword_p, "keyword?", LisprVal::Keyword(_));
predicate!(builtin_list_p, "list?", LisprVal::List(..));
predicate!(builtin_vector_p, "vector?", LisprVal::Vector(..));
predicate!(builtin_map_p, "map?", LisprVal::Map(..));
predicate!(
    builtin_sequential_p,
    "sequential?",
    LisprVal::List(..) | LisprVal::Vector(..)
);
predicate!(builtin_atom_p, "atom?", LisprVal::Atom(_));

/// (fn? x) - true for natives and non-macro closures
pub(crate) fn builtin_fn_p(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("fn?", args, 1)?;
    Ok(LisprVal::Bool(match &args[0] {
        LisprVal::NativeFn(_) => true,
        LisprVal::Fn(f) => !f.is_macro,
        _ => false,
    }))
}

pub(crate) fn builtin_macro_p(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("macro?", args, 1)?;
    Ok(LisprVal::Bool(
        matches!(&args[0], LisprVal::Fn(f) if f.is_macro),
    ))
}
