// lispr-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: cons, concat, nth, first, rest, empty?, count,
//! conj, seq
//!
//! Lists and vectors are persistent. Every operation here builds a new
//! sequence and shares structure with its inputs, so no caller ever sees
//! an argument change.

use std::rc::Rc;

use lispr_parser::{LisprVal, OrdMap, Vector};

use crate::error::{Error, Result};

use super::{check_arity, check_arity_at_least, get_slice, get_slice_or_empty, int_arg};

// ============================================================================
// Construction
// ============================================================================

/// (cons x seq) - a new list with x in front
pub(crate) fn builtin_cons(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("cons", args, 2)?;
    let mut items = get_slice_or_empty("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(LisprVal::list_from(items))
}

/// (concat & seqs) - a new list of all elements in order
pub(crate) fn builtin_concat(args: &[LisprVal]) -> Result<LisprVal> {
    let mut result = Vector::new();
    for arg in args {
        result.append(get_slice_or_empty("concat", arg)?);
    }
    Ok(LisprVal::list_from(result))
}

/// (conj coll & items) - prepend to a list, append to a vector, merge into a map
pub(crate) fn builtin_conj(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity_at_least("conj", args, 2)?;
    let extra = &args[1..];
    match &args[0] {
        LisprVal::List(items, meta) => {
            let mut items = items.clone();
            for item in extra {
                items.push_front(item.clone());
            }
            Ok(LisprVal::List(items, meta.clone()))
        }
        LisprVal::Vector(items, meta) => {
            let mut items = items.clone();
            items.extend(extra.iter().cloned());
            Ok(LisprVal::Vector(items, meta.clone()))
        }
        LisprVal::Map(entries, meta) => {
            let mut entries = entries.clone();
            for item in extra {
                conj_entry(&mut entries, item)?;
            }
            Ok(LisprVal::Map(entries, meta.clone()))
        }
        other => Err(Error::type_error_in(
            "conj",
            "list, vector or map",
            other.type_name(),
        )),
    }
}

/// Merge a map, or a `[key value]` pair, into `entries`.
fn conj_entry(entries: &mut OrdMap<Rc<str>, LisprVal>, item: &LisprVal) -> Result<()> {
    match item {
        LisprVal::Map(other, _) => {
            for (k, v) in other.iter() {
                entries.insert(k.clone(), v.clone());
            }
            Ok(())
        }
        LisprVal::Vector(pair, _) if pair.len() == 2 => {
            let key = pair[0].map_key().ok_or_else(|| {
                Error::type_error_in("conj", "string or keyword", pair[0].type_name())
            })?;
            entries.insert(key, pair[1].clone());
            Ok(())
        }
        other => Err(Error::type_error_in(
            "conj",
            "map or [key value] vector",
            other.type_name(),
        )),
    }
}

// ============================================================================
// Access
// ============================================================================

/// (nth seq index)
pub(crate) fn builtin_nth(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("nth", args, 2)?;
    let items = get_slice("nth", &args[0])?;
    let index = int_arg("nth", &args[1])?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}

/// (first seq) - nil for an empty sequence or nil
pub(crate) fn builtin_first(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("first", args, 1)?;
    let items = get_slice_or_empty("first", &args[0])?;
    Ok(items.front().cloned().unwrap_or(LisprVal::Nil))
}

/// (rest seq) - always a list, empty when there is nothing after the first
pub(crate) fn builtin_rest(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("rest", args, 1)?;
    let items = get_slice_or_empty("rest", &args[0])?;
    if items.is_empty() {
        return Ok(LisprVal::list_from(items));
    }
    Ok(LisprVal::list_from(items.skip(1)))
}

// ============================================================================
// Size
// ============================================================================

/// (empty? coll)
pub(crate) fn builtin_empty_p(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("empty?", args, 1)?;
    Ok(LisprVal::Bool(count_of("empty?", &args[0])? == 0))
}

/// (count coll) - nil counts as 0
pub(crate) fn builtin_count(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("count", args, 1)?;
    let n = count_of("count", &args[0])?;
    i64::try_from(n)
        .map(LisprVal::int)
        .map_err(|_| Error::EvalError("count: collection too large".into()))
}

fn count_of(name: &str, val: &LisprVal) -> Result<usize> {
    match val {
        LisprVal::Nil => Ok(0),
        LisprVal::Map(entries, _) => Ok(entries.len()),
        other => get_slice(name, other).map(Vector::len),
    }
}

/// (seq coll) - a list view of coll, nil when empty
pub(crate) fn builtin_seq(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("seq", args, 1)?;
    match &args[0] {
        LisprVal::Nil => Ok(LisprVal::Nil),
        LisprVal::List(items, _) | LisprVal::Vector(items, _) if items.is_empty() => {
            Ok(LisprVal::Nil)
        }
        LisprVal::List(items, _) | LisprVal::Vector(items, _) => {
            Ok(LisprVal::list_from(items.clone()))
        }
        LisprVal::String(s) if s.is_empty() => Ok(LisprVal::Nil),
        LisprVal::String(s) => Ok(LisprVal::list(
            s.chars().map(|c| LisprVal::string(c.to_string())).collect(),
        )),
        other => Err(Error::type_error_in(
            "seq",
            "list, vector or string",
            other.type_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<LisprVal> {
        ns.iter().copied().map(LisprVal::int).collect()
    }

    #[test]
    fn test_cons_concat() {
        let v = LisprVal::vector(ints(&[2, 3]));
        let consed = builtin_cons(&[LisprVal::int(1), v.clone()]).unwrap();
        assert_eq!(consed.to_string(), "(1 2 3)");
        assert_eq!(v.to_string(), "[2 3]");
        assert_eq!(
            builtin_cons(&[LisprVal::int(1), LisprVal::Nil]).unwrap().to_string(),
            "(1)"
        );

        let joined = builtin_concat(&[
            LisprVal::list(ints(&[1])),
            LisprVal::Nil,
            v,
        ])
        .unwrap();
        assert_eq!(joined.to_string(), "(1 2 3)");
        assert_eq!(builtin_concat(&[]).unwrap().to_string(), "()");
    }

    #[test]
    fn test_conj() {
        let l = LisprVal::list(ints(&[1]));
        assert_eq!(
            builtin_conj(&[l.clone(), LisprVal::int(2), LisprVal::int(3)])
                .unwrap()
                .to_string(),
            "(3 2 1)"
        );
        assert_eq!(l.to_string(), "(1)");

        let v = LisprVal::vector(ints(&[1]));
        assert_eq!(
            builtin_conj(&[v.clone(), LisprVal::int(2)]).unwrap().to_string(),
            "[1 2]"
        );
        assert_eq!(v.to_string(), "[1]");
    }

    #[test]
    fn test_conj_map() {
        let m = LisprVal::map(Default::default());
        let pair = LisprVal::vector(vec![LisprVal::keyword("a"), LisprVal::int(1)]);
        let m2 = builtin_conj(&[m.clone(), pair]).unwrap();
        assert_eq!(m2.to_string(), "{:a 1}");
        assert_eq!(m.to_string(), "{}");
        assert!(builtin_conj(&[m, LisprVal::int(1)]).is_err());
    }

    #[test]
    fn test_nth() {
        let l = LisprVal::list(ints(&[10, 20]));
        assert_eq!(builtin_nth(&[l.clone(), LisprVal::int(1)]).unwrap(), LisprVal::int(20));
        assert!(matches!(
            builtin_nth(&[l.clone(), LisprVal::int(2)]),
            Err(Error::IndexOutOfBounds { index: 2, length: 2 })
        ));
        assert!(builtin_nth(&[l, LisprVal::int(-1)]).is_err());
    }

    #[test]
    fn test_first_rest() {
        let v = LisprVal::vector(ints(&[1, 2]));
        assert_eq!(builtin_first(&[v.clone()]).unwrap(), LisprVal::int(1));
        assert_eq!(builtin_rest(&[v]).unwrap().to_string(), "(2)");
        assert_eq!(builtin_first(&[LisprVal::Nil]).unwrap(), LisprVal::Nil);
        assert_eq!(builtin_rest(&[LisprVal::Nil]).unwrap().to_string(), "()");
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(builtin_count(&[LisprVal::Nil]).unwrap(), LisprVal::int(0));
        assert_eq!(
            builtin_count(&[LisprVal::list(ints(&[1, 2]))]).unwrap(),
            LisprVal::int(2)
        );
        assert_eq!(
            builtin_empty_p(&[LisprVal::vector(vec![])]).unwrap(),
            LisprVal::Bool(true)
        );
        assert!(builtin_count(&[LisprVal::int(1)]).is_err());
    }

    #[test]
    fn test_seq() {
        assert_eq!(builtin_seq(&[LisprVal::list(vec![])]).unwrap(), LisprVal::Nil);
        assert_eq!(
            builtin_seq(&[LisprVal::string("ab")]).unwrap().to_string(),
            "(\"a\" \"b\")"
        );
        assert_eq!(
            builtin_seq(&[LisprVal::vector(ints(&[1]))]).unwrap().to_string(),
            "(1)"
        );
    }
}
