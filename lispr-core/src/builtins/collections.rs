// lispr-core - Collection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Collection operations: list, vector, hash-map, assoc, dissoc, get,
//! contains?, keys, vals
//!
//! Maps are persistent, so `assoc` and `dissoc` return a new map and
//! leave their argument untouched.

use std::rc::Rc;

use lispr_parser::{LisprVal, OrdMap, Vector};

use crate::error::{Error, Result};

use super::{check_arity, check_arity_at_least};

type Entries = OrdMap<Rc<str>, LisprVal>;

fn key_arg(name: &str, val: &LisprVal) -> Result<Rc<str>> {
    val.map_key()
        .ok_or_else(|| Error::type_error_in(name, "string or keyword", val.type_name()))
}

fn map_arg<'a>(name: &str, val: &'a LisprVal) -> Result<&'a Entries> {
    match val {
        LisprVal::Map(entries, _) => Ok(entries),
        other => Err(Error::type_error_in(name, "map", other.type_name())),
    }
}

/// Insert alternating key/value arguments into `entries`.
fn insert_pairs(name: &str, mut entries: Entries, kvs: &[LisprVal]) -> Result<Entries> {
    if kvs.len() % 2 != 0 {
        return Err(Error::EvalError(format!(
            "{}: expected an even number of key/value arguments",
            name
        )));
    }
    for pair in kvs.chunks_exact(2) {
        entries.insert(key_arg(name, &pair[0])?, pair[1].clone());
    }
    Ok(entries)
}

// ============================================================================
// Constructors
// ============================================================================

/// (list & items)
pub(crate) fn builtin_list(args: &[LisprVal]) -> Result<LisprVal> {
    Ok(LisprVal::list(args.to_vec()))
}

/// (vector & items)
pub(crate) fn builtin_vector(args: &[LisprVal]) -> Result<LisprVal> {
    Ok(LisprVal::vector(args.to_vec()))
}

/// (hash-map & kvs)
pub(crate) fn builtin_hash_map(args: &[LisprVal]) -> Result<LisprVal> {
    insert_pairs("hash-map", OrdMap::new(), args).map(LisprVal::map)
}

// ============================================================================
// Map Operations
// ============================================================================

/// (assoc map k v & kvs)
pub(crate) fn builtin_assoc(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("assoc", args, 3)?;
    let entries = map_arg("assoc", &args[0])?.clone();
    insert_pairs("assoc", entries, &args[1..]).map(LisprVal::map)
}

/// (dissoc map & keys)
pub(crate) fn builtin_dissoc(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("dissoc", args, 1)?;
    let mut entries = map_arg("dissoc", &args[0])?.clone();
    for key in &args[1..] {
        entries.remove(&key_arg("dissoc", key)?);
    }
    Ok(LisprVal::map(entries))
}

/// (get map key) - nil when the key or the map is missing
pub(crate) fn builtin_get(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("get", args, 2)?;
    if args[0].is_nil() {
        return Ok(LisprVal::Nil);
    }
    let entries = map_arg("get", &args[0])?;
    let key = key_arg("get", &args[1])?;
    Ok(entries.get(&key).cloned().unwrap_or(LisprVal::Nil))
}

/// (contains? map key)
pub(crate) fn builtin_contains_p(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("contains?", args, 2)?;
    if args[0].is_nil() {
        return Ok(LisprVal::Bool(false));
    }
    let entries = map_arg("contains?", &args[0])?;
    let key = key_arg("contains?", &args[1])?;
    Ok(LisprVal::Bool(entries.contains_key(&key)))
}

/// (keys map) - a list of keys in map order
pub(crate) fn builtin_keys(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("keys", args, 1)?;
    if args[0].is_nil() {
        return Ok(LisprVal::list_from(Vector::new()));
    }
    let entries = map_arg("keys", &args[0])?;
    Ok(LisprVal::list_from(
        entries.keys().map(LisprVal::from_map_key).collect(),
    ))
}

/// (vals map) - a list of values in key order
pub(crate) fn builtin_vals(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("vals", args, 1)?;
    if args[0].is_nil() {
        return Ok(LisprVal::list_from(Vector::new()));
    }
    let entries = map_arg("vals", &args[0])?;
    Ok(LisprVal::list_from(entries.values().cloned().collect()))
}
