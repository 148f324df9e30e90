// lispr-parser - Values, reader and printer for lispr
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lispr-parser
//!
//! The value model for lispr, together with the reader that produces
//! values from source text and the printer that turns them back into text.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use im::{OrdMap, Vector};
pub use keyword::{KEYWORD_PREFIX, Keyword, is_keyword_key};
pub use lexer::{Lexer, LexerError};
pub use parser::{ParseError, Parser, read_str};
pub use printer::{escape_string, pr_str, print_list};
pub use symbol::Symbol;
pub use value::{FnParams, LisprAtom, LisprFn, LisprNativeFn, LisprVal, Meta};
