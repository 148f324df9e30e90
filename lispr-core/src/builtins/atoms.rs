// lispr-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, deref, reset!, swap!

use lispr_parser::{LisprAtom, LisprVal};

use crate::error::{Error, Result};
use crate::eval::apply;

use super::{check_arity, check_arity_at_least};

fn atom_arg<'a>(name: &str, val: &'a LisprVal) -> Result<&'a LisprAtom> {
    match val {
        LisprVal::Atom(a) => Ok(a),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x) - create a mutable reference
pub(crate) fn builtin_atom(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("atom", args, 1)?;
    Ok(LisprVal::atom(args[0].clone()))
}

/// (deref atom) aka @atom
pub(crate) fn builtin_deref(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("deref", args, 1)?;
    Ok(atom_arg("deref", &args[0])?.deref())
}

/// (reset! atom new-value)
pub(crate) fn builtin_reset(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("reset!", args, 2)?;
    Ok(atom_arg("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - set the atom to (f current args...)
pub(crate) fn builtin_swap(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("swap!", args, 2)?;
    let atom = atom_arg("swap!", &args[0])?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);

    // No borrow of the cell is held while f runs
    let new_val = apply(&args[1], &call_args)?;
    Ok(atom.reset(new_val))
}
