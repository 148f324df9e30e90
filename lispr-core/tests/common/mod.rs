// lispr-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for lispr integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh bootstrapped interpreter
//! - [`rep`] - Like [`eval_str`], returning the readable printout
//! - [`eval_all`] - Evaluate several sources in one interpreter, returning the last
//! - [`new_env`] - Create a bare environment with builtins registered
//! - [`new_interp`] - Create a bootstrapped interpreter
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_rep!`] - Assert the readable printout of a result
//! - [`assert_eval_err!`] - Assert that code produces an error
//! - [`assert_eval_err_contains!`] - Assert an error whose message contains a substring

#![allow(dead_code)]

pub use lispr_core::builtins::register_builtins;
pub use lispr_core::env::Env;
pub use lispr_core::eval::eval;
#[allow(unused_imports)]
pub use lispr_core::{Config, Interpreter};
#[allow(unused_imports)]
pub use lispr_parser::{Keyword, LisprVal, Parser, Symbol};

/// Create a fresh interpreter with the bootstrap definitions loaded.
///
/// # Panics
///
/// Panics if bootstrapping fails.
#[must_use]
pub fn new_interp() -> Interpreter {
    Interpreter::new().expect("Failed to bootstrap interpreter")
}

/// Evaluate every form in `s` in a fresh interpreter.
///
/// # Returns
///
/// Returns the last value, or the error message.
#[must_use]
pub fn eval_str(s: &str) -> Result<LisprVal, String> {
    new_interp().eval_str(s).map_err(|e| e.to_string())
}

/// Evaluate `s` in a fresh interpreter and print the result readably.
#[must_use]
pub fn rep(s: &str) -> Result<String, String> {
    new_interp().rep(s).map_err(|e| e.to_string())
}

/// Evaluate several sources in one interpreter, returning the last result.
#[must_use]
pub fn eval_all(strs: &[&str]) -> Result<LisprVal, String> {
    let interp = new_interp();
    let mut result = LisprVal::Nil;
    for s in strs {
        result = interp.eval_str(s).map_err(|e| e.to_string())?;
    }
    Ok(result)
}

/// Evaluate `s` in an existing bare environment.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<LisprVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    let mut result = LisprVal::Nil;
    while let Some(expr) = parser.parse().map_err(|e| e.to_string())? {
        result = eval(&expr, env).map_err(|e| e.to_string())?;
    }
    Ok(result)
}

/// Create a new environment with builtins registered and no bootstrap.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", LisprVal::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert the readable printout of evaluating `input`.
///
/// # Example
///
/// ```ignore
/// assert_rep!("(list 1 2)", "(1 2)");
/// ```
#[macro_export]
macro_rules! assert_rep {
    ($input:expr, $expected:expr) => {
        match $crate::common::rep($input) {
            Ok(printed) => assert_eq!(printed, $expected, "Printout of '{}'", $input),
            Err(e) => panic!("Failed to evaluate '{}': {}", $input, e),
        }
    };
}

/// Assert that evaluating `input` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` fails with a message containing `needle`.
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $needle:expr) => {
        match $crate::common::eval_str($input) {
            Ok(val) => panic!("Expected error for '{}' but got {}", $input, val),
            Err(msg) => assert!(
                msg.contains($needle),
                "Error for '{}' was {:?}, expected it to contain {:?}",
                $input,
                msg,
                $needle
            ),
        }
    };
}
