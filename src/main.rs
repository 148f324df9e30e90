// lispr - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use lispr_core::{Config, Interpreter, LisprVal};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "lisp> ";
const CONTINUATION_PROMPT: &str = "  ... ";

#[derive(Parser)]
#[command(name = "lispr", version, about = "A small Lisp with tail calls, macros and quasiquote")]
struct Cli {
    /// Script to run
    file: Option<PathBuf>,

    /// Arguments bound to *ARGV* for the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Evaluate an expression and print the result
    #[arg(short, long)]
    eval: Option<String>,

    /// Maximum nesting of non-tail evaluation
    #[arg(long)]
    max_depth: Option<usize>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LISPR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::default();
    if let Some(depth) = cli.max_depth {
        config.max_eval_depth = depth;
    }

    let interp = match Interpreter::with_config(config) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Failed to start interpreter: {}", e);
            process::exit(1);
        }
    };

    if let Some(expr) = &cli.eval {
        match interp.rep(expr) {
            Ok(printed) => println!("{}", printed),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if let Some(file) = &cli.file {
        interp.set_argv(&cli.args);
        debug!(file = %file.display(), args = cli.args.len(), "running script");
        if let Err(e) = interp.load_file(file) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    run_repl(&interp);
}

/// Run the interactive REPL
fn run_repl(interp: &Interpreter) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to start line editor: {}", e);
            process::exit(1);
        }
    };
    let history_path = dirs::home_dir().map(|home| home.join(".lispr_history"));
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    let host = match interp.get("*host-language*") {
        Some(LisprVal::String(s)) => s.to_string(),
        _ => "unknown".to_string(),
    };
    println!("lispr {} ({})", env!("CARGO_PKG_VERSION"), host);

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { PROMPT } else { CONTINUATION_PROMPT };
        match rl.readline(prompt) {
            Ok(line) => {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);
                if !is_balanced(&buffer) {
                    continue;
                }

                let input = std::mem::take(&mut buffer);
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match interp.rep(input) {
                    Ok(printed) => println!("{}", printed),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) if !buffer.is_empty() => {
                buffer.clear();
                println!("^C");
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
}

/// True once every opened bracket outside strings and comments is closed.
fn is_balanced(input: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    let mut in_comment = false;
    for ch in input.chars() {
        if in_comment {
            in_comment = ch != '\n';
            continue;
        }
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            ';' => in_comment = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0 && !in_string
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("(+ 1 2)"));
        assert!(!is_balanced("(define f (lambda (x)"));
        assert!(is_balanced("\"(\""));
        assert!(!is_balanced("\"open"));
        assert!(is_balanced("(a) ; (unclosed comment"));
        assert!(is_balanced(")"));
    }

    #[test]
    fn test_cli_parses_script_args() {
        let cli = Cli::parse_from(["lispr", "script.lisp", "a", "-b"]);
        assert_eq!(cli.file, Some(PathBuf::from("script.lisp")));
        assert_eq!(cli.args, vec!["a".to_string(), "-b".to_string()]);
        assert!(cli.eval.is_none());
    }

    #[test]
    fn test_cli_parses_eval_and_depth() {
        let cli = Cli::parse_from(["lispr", "-e", "(+ 1 2)", "--max-depth", "50"]);
        assert_eq!(cli.eval.as_deref(), Some("(+ 1 2)"));
        assert_eq!(cli.max_depth, Some(50));
    }
}
