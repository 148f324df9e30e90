// lispr-core - Error types for the lispr evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for lispr evaluation.
//!
//! Every failure is an [`Error`]. A value raised by `throw` travels as
//! [`Error::Thrown`] so `try*`/`catch*` can recover the original value;
//! every other variant is a host error whose message is what `catch*`
//! binds.

use std::fmt;

use lispr_parser::{LisprVal, ParseError, Symbol};

/// Result type for lispr evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Undefined symbol reference
    #[error("Unable to resolve symbol: {0}")]
    UndefinedSymbol(Symbol),

    /// Wrong number of arguments to a function
    #[error("{}", arity_message(.name, .expected, .got))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },

    /// Type error - wrong type for an operation
    #[error("{}", type_message(.context, .expected, .got))]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },

    /// Attempted to call something that isn't callable
    #[error("Cannot call value: {0}")]
    NotCallable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Index {index} out of bounds for collection of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    /// Malformed special form
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },

    /// General evaluation error
    #[error("{0}")]
    EvalError(String),

    /// Reader failure from `read-string` or a loaded file
    #[error(transparent)]
    Read(#[from] ParseError),

    /// File or console failure
    #[error("{0}")]
    Io(String),

    /// User-thrown value (via throw)
    #[error("{0}")]
    Thrown(LisprVal),

    /// Internal error - invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone, PartialEq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

fn arity_message(name: &Option<String>, expected: &AritySpec, got: &usize) -> String {
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ),
        None => format!(
            "Wrong number of arguments: expected {}, got {}",
            expected, got
        ),
    }
}

fn type_message(context: &Option<String>, expected: &str, got: &str) -> String {
    match context {
        Some(ctx) => format!("{}: expected {}, got {}", ctx, expected, got),
        None => format!("Type error: expected {}, got {}", expected, got),
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl Error {
    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// The value a `catch*` clause binds for this error.
    pub fn to_catch_value(&self) -> LisprVal {
        match self {
            Error::Thrown(val) => val.clone(),
            other => LisprVal::string(other.to_string()),
        }
    }
}
