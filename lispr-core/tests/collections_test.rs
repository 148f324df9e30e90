// lispr-core - Collection integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for lists, vectors and maps, including copy-on-write
//! behaviour of every update operation.

mod common;

use common::{LisprVal, eval_str};

// =============================================================================
// Lists and vectors
// =============================================================================

#[test]
fn test_constructors() {
    assert_rep!("(list 1 2 3)", "(1 2 3)");
    assert_rep!("(vector 1 2 3)", "[1 2 3]");
    assert_rep!("(list)", "()");
}

#[test]
fn test_list_vector_equality() {
    assert_eval!("(= '(1 2) [1 2])", LisprVal::Bool(true));
    assert_eval!("(= [1 [2]] (list 1 (list 2)))", LisprVal::Bool(true));
    assert_eval!("(= [1 2] [1 2 3])", LisprVal::Bool(false));
}

#[test]
fn test_sequence_access() {
    assert_eval!("(first [5 6])", LisprVal::int(5));
    assert_rep!("(rest [5 6])", "(6)");
    assert_eval!("(nth '(a b c) 2)", LisprVal::symbol("c"));
    assert_eval!("(count [1 2 3])", LisprVal::int(3));
    assert_eval!("(empty? ())", LisprVal::Bool(true));
}

#[test]
fn test_cons_and_concat_return_lists() {
    assert_rep!("(cons 0 [1 2])", "(0 1 2)");
    assert_rep!("(concat [1] '(2) [])", "(1 2)");
}

#[test]
fn test_map_and_apply() {
    assert_rep!("(map (lambda (x) (* x x)) [1 2 3])", "(1 4 9)");
    assert_eval!("(apply + 1 2 '(3 4))", LisprVal::int(10));
    assert_rep!("(apply list [])", "()");
}

#[test]
fn test_seq() {
    assert_rep!("(seq \"ab\")", "(\"a\" \"b\")");
    assert_eval!("(seq [])", LisprVal::Nil);
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn test_map_literal_and_access() {
    assert_eval!("(get {:a 1} :a)", LisprVal::int(1));
    assert_eval!("(get {:a 1} :b)", LisprVal::Nil);
    assert_eval!("(contains? {\"k\" nil} \"k\")", LisprVal::Bool(true));
    assert_rep!("(keys {:b 2 :a 1})", "(:a :b)");
    assert_rep!("(vals {:b 2 :a 1})", "(1 2)");
}

#[test]
fn test_map_equality() {
    assert_eval!("(= {:a 1 :b 2} (hash-map :b 2 :a 1))", LisprVal::Bool(true));
    assert_eval!("(= {:a 1} {:a 2})", LisprVal::Bool(false));
}

#[test]
fn test_map_literal_key_must_be_string_or_keyword() {
    assert_eval_err!("{1 2}");
}

// =============================================================================
// Copy-on-write
// =============================================================================

#[test]
fn test_conj_vector_does_not_alias() {
    assert_rep!(
        "(define v [1 2])
         (define a (conj v 3))
         (define b (conj v 4))
         (list v a b)",
        "([1 2] [1 2 3] [1 2 4])"
    );
}

#[test]
fn test_conj_list_prepends() {
    assert_rep!(
        "(define l '(1))
         (list (conj l 2 3) l)",
        "((3 2 1) (1))"
    );
}

#[test]
fn test_assoc_dissoc_leave_original() {
    assert_rep!(
        "(define m {:a 1})
         (define m2 (assoc m :b 2))
         (define m3 (dissoc m2 :a))
         (list m m2 m3)",
        "({:a 1} {:a 1 :b 2} {:b 2})"
    );
}

#[test]
fn test_cons_leaves_original() {
    assert_rep!(
        "(define xs [1])
         (cons 0 xs)
         xs",
        "[1]"
    );
}

#[test]
fn test_updates_inside_atom_are_independent() {
    assert_rep!(
        "(define snapshot [1])
         (define a (atom snapshot))
         (swap! a conj 2)
         (list snapshot @a)",
        "([1] [1 2])"
    );
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_metadata_is_attached_to_copy() {
    assert_rep!(
        "(define v [1])
         (define w (with-meta v {:tag 1}))
         (list (meta v) (meta w) (= v w))",
        "(nil {:tag 1} true)"
    );
}

#[test]
fn test_metadata_reader_macro() {
    assert_rep!("(meta ^{:k 1} [1])", "{:k 1}");
}

#[test]
fn test_metadata_on_closure() {
    assert_rep!("(meta (with-meta (lambda (x) x) :m))", ":m");
    assert!(eval_str("(with-meta 1 :m)").is_err());
}
