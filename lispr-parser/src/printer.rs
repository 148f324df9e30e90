// lispr-parser - Printer for lispr values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Converts values back to text.
//!
//! In readable mode strings are quoted and escaped, so the output of
//! [`pr_str`] re-reads to an equal value for everything except functions
//! and atoms.

use std::fmt::Write;

use crate::value::LisprVal;

/// Format a value. `readable` quotes and escapes strings.
pub fn pr_str(val: &LisprVal, readable: bool) -> String {
    let mut out = String::new();
    write_val(&mut out, val, readable);
    out
}

/// Format each value and join the results with `sep`.
pub fn print_list<'a, I>(vals: I, readable: bool, sep: &str) -> String
where
    I: IntoIterator<Item = &'a LisprVal>,
{
    let mut out = String::new();
    for (i, val) in vals.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        write_val(&mut out, val, readable);
    }
    out
}

/// Escape a string for readable output.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_seq<'a>(
    out: &mut String,
    items: impl Iterator<Item = &'a LisprVal>,
    readable: bool,
    open: char,
    close: char,
) {
    out.push(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_val(out, item, readable);
    }
    out.push(close);
}

fn write_val(out: &mut String, val: &LisprVal, readable: bool) {
    match val {
        LisprVal::Nil => out.push_str("nil"),
        LisprVal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        LisprVal::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        LisprVal::String(s) if readable => out.push_str(&escape_string(s)),
        LisprVal::String(s) => out.push_str(s),
        LisprVal::Keyword(kw) => {
            let _ = write!(out, "{}", kw);
        }
        LisprVal::Symbol(sym) => out.push_str(sym.name()),
        LisprVal::List(items, _) => write_seq(out, items.iter(), readable, '(', ')'),
        LisprVal::Vector(items, _) => write_seq(out, items.iter(), readable, '[', ']'),
        LisprVal::Map(entries, _) => {
            out.push('{');
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_val(out, &LisprVal::from_map_key(k), readable);
                out.push(' ');
                write_val(out, v, readable);
            }
            out.push('}');
        }
        LisprVal::NativeFn(f) => {
            let _ = write!(out, "#<native-fn {}>", f.name());
        }
        LisprVal::Fn(f) => {
            out.push_str("(lambda ");
            write_val(out, &f.params.to_form(), true);
            out.push(' ');
            write_val(out, &f.body, true);
            out.push(')');
        }
        LisprVal::Atom(a) => {
            out.push_str("(atom ");
            write_val(out, &a.deref(), true);
            out.push(')');
        }
    }
}
