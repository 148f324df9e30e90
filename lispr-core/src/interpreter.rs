// lispr-core - Interpreter session
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A ready-to-use interpreter session.
//!
//! [`Interpreter`] owns a root environment with the builtins registered,
//! an `eval` function bound to that root, and the bootstrap definitions
//! (`not`, `load-file`, `cond`, `gensym`, `or`) evaluated.

use std::path::Path;

use lispr_parser::{LisprVal, Parser, Symbol, pr_str};
use tracing::debug;

use crate::builtins::{EnvExt, register_builtins};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{
    DEFAULT_MAX_EVAL_DEPTH, apply, eval, get_max_eval_depth, make_native_fn, set_max_eval_depth,
};

/// Definitions evaluated in every new session, in order.
const BOOTSTRAP: &[&str] = &[
    "(define not (lambda (a) (if a false true)))",
    r#"(define load-file
         (lambda (f) (eval (read-string (str "(do " (slurp f) "\nnil)")))))"#,
    r#"(defmacro! cond
         (lambda (& xs)
           (if (> (count xs) 0)
             (list 'if (first xs)
                   (if (> (count xs) 1)
                     (nth xs 1)
                     (throw "odd number of forms to cond"))
                   (cons 'cond (rest (rest xs)))))))"#,
    "(define *gensym-counter* (atom 0))",
    r#"(define gensym
         (lambda () (symbol (str "G__" (swap! *gensym-counter* (lambda (x) (+ 1 x)))))))"#,
    r#"(defmacro! or
         (lambda (& xs)
           (if (empty? xs)
             nil
             (if (= 1 (count xs))
               (first xs)
               (let* (condvar (gensym))
                 `(let* (~condvar ~(first xs))
                    (if ~condvar ~condvar (or ~@(rest xs)))))))))"#,
];

/// Session settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum nesting of `eval` calls before a stack overflow error.
    pub max_eval_depth: usize,
    /// Value bound to `*host-language*`.
    pub host_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            host_language: "rust".to_string(),
        }
    }
}

/// A lispr interpreter session.
///
/// Not thread-safe: values use `Rc` and `RefCell` internally. The eval
/// depth limit is per thread, so the most recently configured session on
/// a thread sets it.
///
/// # Example
///
/// ```rust
/// use lispr_core::Interpreter;
///
/// let interp = Interpreter::new().unwrap();
/// assert_eq!(interp.rep("(or nil 2)").unwrap(), "2");
/// ```
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    /// Create a session with the default [`Config`].
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        set_max_eval_depth(config.max_eval_depth);

        let env = Env::new();
        register_builtins(&env);

        // Weak, since the root binds this function
        let root = env.downgrade();
        let eval_fn = make_native_fn("eval", move |args| {
            let root = root
                .upgrade()
                .ok_or_else(|| Error::Internal("root environment has been dropped".into()))?;
            match args {
                [form] => eval(form, &root),
                _ => Err(Error::arity_named("eval", 1, args.len())),
            }
        });
        env.set(Symbol::new("eval"), LisprVal::NativeFn(eval_fn));
        env.set(Symbol::new("*ARGV*"), LisprVal::list(Vec::new()));
        env.set(
            Symbol::new("*host-language*"),
            LisprVal::string(config.host_language.as_str()),
        );

        let interp = Interpreter { env };
        for src in BOOTSTRAP {
            interp.eval_str(src)?;
        }
        debug!(
            forms = BOOTSTRAP.len(),
            max_eval_depth = get_max_eval_depth(),
            "bootstrapped interpreter"
        );
        Ok(interp)
    }

    /// The root environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate an already-read form.
    pub fn eval(&self, form: &LisprVal) -> Result<LisprVal> {
        eval(form, &self.env)
    }

    /// Read and evaluate every form in `src`, returning the last value
    /// (nil for empty input).
    pub fn eval_str(&self, src: &str) -> Result<LisprVal> {
        let mut parser = Parser::new(src)?;
        let mut result = LisprVal::Nil;
        while let Some(form) = parser.parse()? {
            result = eval(&form, &self.env)?;
        }
        Ok(result)
    }

    /// Read, evaluate and print: the readable form of the last value.
    pub fn rep(&self, src: &str) -> Result<String> {
        self.eval_str(src).map(|val| pr_str(&val, true))
    }

    /// Bind `*ARGV*` to a list of strings.
    pub fn set_argv<I, S>(&self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv = args
            .into_iter()
            .map(|arg| LisprVal::string(arg.as_ref()))
            .collect();
        self.env.set(Symbol::new("*ARGV*"), LisprVal::list(argv));
    }

    /// Run a source file through `load-file`.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LisprVal> {
        let path = path.as_ref().to_string_lossy().into_owned();
        debug!(path = %path, "loading file");
        self.call("load-file", &[LisprVal::string(path)])
    }

    /// Look up a root binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<LisprVal> {
        self.env.lookup(&Symbol::new(name))
    }

    /// Call a function bound in the root environment.
    pub fn call(&self, name: &str, args: &[LisprVal]) -> Result<LisprVal> {
        let func = self
            .get(name)
            .ok_or_else(|| Error::UndefinedSymbol(Symbol::new(name)))?;
        apply(&func, args)
    }

    /// Bind a native Rust function in the root environment.
    pub fn register_native(
        &self,
        name: &'static str,
        func: fn(&[LisprVal]) -> Result<LisprVal>,
    ) {
        self.env.define_native(name, func);
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        // Root closures capture the root frame
        self.env.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_defines_names() {
        let interp = Interpreter::new().unwrap();
        for name in ["not", "load-file", "cond", "gensym", "or", "eval", "*ARGV*"] {
            assert!(interp.get(name).is_some(), "{} missing", name);
        }
        assert_eq!(interp.rep("*host-language*").unwrap(), "\"rust\"");
    }

    #[test]
    fn test_eval_str_returns_last() {
        let interp = Interpreter::new().unwrap();
        assert_eq!(interp.eval_str("(define x 2) (* x 3)").unwrap(), LisprVal::int(6));
        assert_eq!(interp.eval_str("").unwrap(), LisprVal::Nil);
    }

    #[test]
    fn test_set_argv() {
        let interp = Interpreter::new().unwrap();
        interp.set_argv(["a", "b"]);
        assert_eq!(interp.rep("*ARGV*").unwrap(), "(\"a\" \"b\")");
    }

    #[test]
    fn test_register_native() {
        fn answer(_: &[LisprVal]) -> Result<LisprVal> {
            Ok(LisprVal::int(42))
        }
        let interp = Interpreter::new().unwrap();
        interp.register_native("answer", answer);
        assert_eq!(interp.rep("(answer)").unwrap(), "42");
    }

    #[test]
    fn test_dropping_interpreter_frees_root() {
        let interp = Interpreter::new().unwrap();
        interp
            .eval_str("(define f (lambda () (eval '(not true))))")
            .unwrap();
        assert_eq!(interp.rep("(f)").unwrap(), "false");
        let root = interp.env().downgrade();
        drop(interp);
        assert!(root.upgrade().is_none());
    }

    #[test]
    fn test_config_sets_depth_limit() {
        let config = Config {
            max_eval_depth: 123,
            ..Config::default()
        };
        let _interp = Interpreter::with_config(config).unwrap();
        assert_eq!(get_max_eval_depth(), 123);
    }

    #[test]
    fn test_custom_host_language() {
        let config = Config {
            host_language: "lispr".into(),
            ..Config::default()
        };
        let interp = Interpreter::with_config(config).unwrap();
        assert_eq!(interp.rep("*host-language*").unwrap(), "\"lispr\"");
    }
}
