// lispr-parser - Parser for lispr
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for lispr source code.
//!
//! Converts tokens into `LisprVal` forms. Reader macros expand into plain
//! lists: `'x` reads as `(quote x)`, `` `x `` as `(quasiquote x)`, `~x` as
//! `(unquote x)`, `~@x` as `(splice-unquote x)`, `@x` as `(deref x)` and
//! `^m x` as `(with-meta x m)`.

use std::fmt;
use std::rc::Rc;

use im::OrdMap;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::value::LisprVal;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `LisprVal` forms.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<LisprVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<LisprVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<LisprVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<LisprVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn parse_form(&mut self) -> Result<LisprVal, ParseError> {
        match self.advance()? {
            Token::Nil => Ok(LisprVal::Nil),
            Token::True => Ok(LisprVal::Bool(true)),
            Token::False => Ok(LisprVal::Bool(false)),
            Token::Int(n) => Ok(LisprVal::Int(n)),
            Token::String(s) => Ok(LisprVal::string(s)),
            Token::Symbol(s) => Ok(LisprVal::Symbol(Symbol::new(s))),
            Token::Keyword(s) => Ok(LisprVal::Keyword(Keyword::new(&s))),

            Token::LParen => Ok(LisprVal::list(self.parse_seq(Token::RParen, ')')?)),
            Token::LBracket => Ok(LisprVal::vector(self.parse_seq(Token::RBracket, ']')?)),
            Token::LBrace => self.parse_map(),

            Token::Quote => self.parse_quote("quote"),
            Token::Quasiquote => self.parse_quote("quasiquote"),
            Token::Unquote => self.parse_quote("unquote"),
            Token::SpliceUnquote => self.parse_quote("splice-unquote"),
            Token::Deref => self.parse_quote("deref"),
            Token::Meta => self.parse_meta(),

            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    /// Parse forms up to `close`, consuming it.
    fn parse_seq(&mut self, close: Token, delim: char) -> Result<Vec<LisprVal>, ParseError> {
        let mut elements = Vec::new();
        loop {
            if self.current == close {
                self.advance()?;
                return Ok(elements);
            }
            if matches!(self.current, Token::Eof) {
                return Err(self.error(format!("Unterminated form: expected '{}'", delim)));
            }
            elements.push(self.parse_form()?);
        }
    }

    fn parse_map(&mut self) -> Result<LisprVal, ParseError> {
        let forms = self.parse_seq(Token::RBrace, '}')?;
        if forms.len() % 2 != 0 {
            return Err(self.error("Map literal must contain an even number of forms".to_string()));
        }

        let mut entries = OrdMap::new();
        for pair in forms.chunks(2) {
            let key: Rc<str> = pair[0].map_key().ok_or_else(|| {
                self.error(format!(
                    "Map keys must be strings or keywords, got {}",
                    pair[0].type_name()
                ))
            })?;
            entries.insert(key, pair[1].clone());
        }
        Ok(LisprVal::map(entries))
    }

    fn parse_quote(&mut self, name: &str) -> Result<LisprVal, ParseError> {
        let form = self.parse_form()?;
        Ok(LisprVal::list(vec![LisprVal::symbol(name), form]))
    }

    fn parse_meta(&mut self) -> Result<LisprVal, ParseError> {
        let meta = self.parse_form()?;
        let target = self.parse_form()?;
        Ok(LisprVal::list(vec![
            LisprVal::symbol("with-meta"),
            target,
            meta,
        ]))
    }
}

/// Read the first form from `source`, or `nil` if it holds none.
pub fn read_str(source: &str) -> Result<LisprVal, ParseError> {
    Ok(Parser::parse_str(source)?.unwrap_or(LisprVal::Nil))
}

// ============================================================================
// Tests
// ============================================================================
