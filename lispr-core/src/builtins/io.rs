// lispr-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: prn, println, read-string, slurp, readline, time-ms

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use lispr_parser::{LisprVal, print_list, read_str};

use crate::error::{Error, Result};

use super::{check_arity, str_arg};

// ============================================================================
// Print Output
// ============================================================================

/// (prn & args) - print readable forms followed by a newline
pub(crate) fn builtin_prn(args: &[LisprVal]) -> Result<LisprVal> {
    println!("{}", print_list(args, true, " "));
    Ok(LisprVal::Nil)
}

/// (println & args) - print display forms followed by a newline
pub(crate) fn builtin_println(args: &[LisprVal]) -> Result<LisprVal> {
    println!("{}", print_list(args, false, " "));
    Ok(LisprVal::Nil)
}

// ============================================================================
// Reading
// ============================================================================

/// (read-string s) - read one form from a string
pub(crate) fn builtin_read_string(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("read-string", args, 1)?;
    let src = str_arg("read-string", &args[0])?;
    Ok(read_str(src)?)
}

/// (slurp path) - the contents of a file as a string
pub(crate) fn builtin_slurp(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("slurp", args, 1)?;
    let path = str_arg("slurp", &args[0])?;
    std::fs::read_to_string(path)
        .map(LisprVal::string)
        .map_err(|e| Error::Io(format!("slurp: {}: {}", path, e)))
}

/// (readline prompt) - read a line from stdin, nil at end of input
pub(crate) fn builtin_readline(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("readline", args, 1)?;
    let prompt = str_arg("readline", &args[0])?;

    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(LisprVal::Nil);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(LisprVal::string(trimmed))
}

// ============================================================================
// Time
// ============================================================================

/// (time-ms) - milliseconds since the Unix epoch
pub(crate) fn builtin_time_ms(args: &[LisprVal]) -> Result<LisprVal> {
    check_arity("time-ms", args, 0)?;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Io(e.to_string()))?;
    let millis = i64::try_from(elapsed.as_millis())
        .map_err(|_| Error::EvalError("time-ms: clock out of range".into()))?;
    Ok(LisprVal::int(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        let val = builtin_read_string(&[LisprVal::string("(+ 1 2)")]).unwrap();
        assert_eq!(val.to_string(), "(+ 1 2)");
        assert_eq!(
            builtin_read_string(&[LisprVal::string("")]).unwrap(),
            LisprVal::Nil
        );
        assert!(matches!(
            builtin_read_string(&[LisprVal::string("(1 2")]),
            Err(Error::Read(_))
        ));
    }

    #[test]
    fn test_slurp() {
        let path = std::env::temp_dir().join("lispr_slurp_test.txt");
        std::fs::write(&path, "hello\n").unwrap();
        let path_str = path.to_string_lossy().into_owned();
        assert_eq!(
            builtin_slurp(&[LisprVal::string(path_str)]).unwrap(),
            LisprVal::string("hello\n")
        );
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            builtin_slurp(&[LisprVal::string("/nonexistent/lispr/file")]),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_time_ms() {
        let LisprVal::Int(ms) = builtin_time_ms(&[]).unwrap() else {
            panic!("expected integer");
        };
        assert!(ms > 0);
        assert!(builtin_time_ms(&[LisprVal::Nil]).is_err());
    }
}
