// lispr-core - Quasiquote integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for quasiquote, unquote and splice-unquote.

mod common;

use common::LisprVal;

#[test]
fn test_quasiquote_without_unquote_is_quote() {
    assert_rep!("`(a b c)", "(a b c)");
    assert_rep!("`sym", "sym");
    assert_rep!("`7", "7");
    assert_rep!("`()", "()");
}

#[test]
fn test_unquote_substitutes_value() {
    assert_rep!("(define b 5) `(a ~b c)", "(a 5 c)");
}

#[test]
fn test_eval_of_quasiquote_form() {
    assert_rep!(
        "(define b 5) (eval (quote (quasiquote (a (unquote b) c))))",
        "(a 5 c)"
    );
}

#[test]
fn test_splice_unquote() {
    assert_rep!("`(1 ~@(list 2 3) 4)", "(1 2 3 4)");
}

#[test]
fn test_splice_at_end_and_empty() {
    assert_rep!("(define xs '(7 8)) `(0 ~@xs)", "(0 7 8)");
    assert_rep!("`(0 ~@() 1)", "(0 1)");
}

#[test]
fn test_nested_structure() {
    assert_rep!("(define x 1) `(a (b ~x) (c (d ~(+ x 1))))", "(a (b 1) (c (d 2)))");
}

#[test]
fn test_unquote_evaluates_expression() {
    assert_eval!("`~(+ 1 2)", LisprVal::int(3));
}

#[test]
fn test_vector_template_builds_list() {
    assert_rep!("(define v 2) `[1 ~v]", "(1 2)");
}

#[test]
fn test_quasiquote_builds_code_for_macros() {
    assert_eval!(
        "(defmacro! swap-args (lambda (f a b) `(~f ~b ~a)))
         (swap-args - 1 10)",
        LisprVal::int(9)
    );
}
