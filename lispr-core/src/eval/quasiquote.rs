// lispr-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Quasiquote expansion.
//!
//! Rewrites a quasiquoted template into an ordinary expression built from
//! `quote`, `cons` and `concat`. Evaluating the result rebuilds the
//! template with `unquote` forms substituted and `splice-unquote` forms
//! spliced in place. Recursion depth is bounded by the nesting of the
//! template itself.

use lispr_parser::{LisprVal, Vector};

/// True for a list or vector with at least one element.
fn is_pair(val: &LisprVal) -> bool {
    val.as_seq().is_some_and(|items| !items.is_empty())
}

/// True if `val` is a sequence whose first element is the symbol `name`.
fn starts_with(val: &LisprVal, name: &str) -> bool {
    val.as_seq()
        .and_then(|items| items.front())
        .and_then(LisprVal::as_symbol)
        .is_some_and(|sym| sym.name() == name)
}

fn nth_or_nil(items: &Vector<LisprVal>, index: usize) -> LisprVal {
    items.get(index).cloned().unwrap_or(LisprVal::Nil)
}

/// Expand a quasiquoted form into the expression that constructs it.
pub fn quasiquote(ast: &LisprVal) -> LisprVal {
    let items = match ast.as_seq() {
        Some(items) if is_pair(ast) => items,
        _ => return LisprVal::list(vec![LisprVal::symbol("quote"), ast.clone()]),
    };

    if starts_with(ast, "unquote") {
        return nth_or_nil(items, 1);
    }

    let first = &items[0];
    let rest = LisprVal::list_from(items.clone().split_off(1));

    if is_pair(first) && starts_with(first, "splice-unquote") {
        let spliced = first.as_seq().map_or(LisprVal::Nil, |inner| nth_or_nil(inner, 1));
        return LisprVal::list(vec![LisprVal::symbol("concat"), spliced, quasiquote(&rest)]);
    }

    LisprVal::list(vec![
        LisprVal::symbol("cons"),
        quasiquote(first),
        quasiquote(&rest),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lispr_parser::Parser;

    fn expand(src: &str) -> String {
        quasiquote(&Parser::parse_str(src).unwrap().unwrap()).to_string()
    }

    #[test]
    fn test_atom_is_quoted() {
        assert_eq!(expand("a"), "(quote a)");
        assert_eq!(expand("()"), "(quote ())");
        assert_eq!(expand("7"), "(quote 7)");
    }

    #[test]
    fn test_unquote_returns_form() {
        assert_eq!(expand("(unquote x)"), "x");
    }

    #[test]
    fn test_default_rebuild() {
        assert_eq!(
            expand("(a (unquote b))"),
            "(cons (quote a) (cons b (quote ())))"
        );
    }

    #[test]
    fn test_splice() {
        assert_eq!(
            expand("((splice-unquote xs) 4)"),
            "(concat xs (cons (quote 4) (quote ())))"
        );
    }

    #[test]
    fn test_vector_expands_like_list() {
        assert_eq!(expand("[a]"), "(cons (quote a) (quote ()))");
    }
}
