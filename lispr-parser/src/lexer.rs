// lispr-parser - Lexer for lispr
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for lispr source code.
//!
//! Converts a source string into a stream of tokens. Commas count as
//! whitespace and `;` starts a comment running to the end of the line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    Quasiquote,    // `
    Unquote,       // ~
    SpliceUnquote, // ~@
    Deref,         // @
    Meta,          // ^

    // Literals
    Nil,
    True,
    False,
    Int(i64),
    String(String),
    Symbol(String),
    Keyword(String),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::SpliceUnquote => write!(f, "~@"),
            Token::Deref => write!(f, "@"),
            Token::Meta => write!(f, "^"),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Int(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for LexerError {}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let single = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '\'' => Some(Token::Quote),
            '`' => Some(Token::Quasiquote),
            '@' => Some(Token::Deref),
            '^' => Some(Token::Meta),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        match c {
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::SpliceUnquote)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '"' => self.read_string(),
            ':' => self.read_keyword(),
            '-' | '+' => self.read_number_or_symbol(),
            '0'..='9' => self.read_number(String::new()),
            _ if is_symbol_char(c) => self.read_symbol(),
            _ => Err(self.error(format!("Unexpected character: '{}'", c))),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume opening "
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some(c) => return Err(self.error(format!("Unknown escape sequence: \\{}", c))),
                    None => return Err(self.error("Unterminated string escape".to_string())),
                },
                Some(c) => s.push(c),
                None => return Err(self.error("Unterminated string".to_string())),
            }
        }

        Ok(Token::String(s))
    }

    fn read_keyword(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume :
        let name = self.collect_symbol_chars(String::new());
        if name.is_empty() {
            return Err(self.error("Expected keyword name after :".to_string()));
        }
        Ok(Token::Keyword(name))
    }

    fn read_symbol(&mut self) -> Result<Token, LexerError> {
        let name = self.collect_symbol_chars(String::new());
        Ok(match name.as_str() {
            "nil" => Token::Nil,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Symbol(name),
        })
    }

    fn read_number_or_symbol(&mut self) -> Result<Token, LexerError> {
        let mut prefix = String::new();
        if let Some(sign) = self.advance() {
            prefix.push(sign);
        }

        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.read_number(prefix),
            // `+`, `-`, or a symbol such as `->x`
            _ => Ok(Token::Symbol(self.collect_symbol_chars(prefix))),
        }
    }

    fn read_number(&mut self, mut digits: String) -> Result<Token, LexerError> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(c) = self.peek()
            && is_symbol_char(c)
        {
            return Err(self.error(format!("Invalid number: {}{}", digits, c)));
        }

        digits
            .parse::<i64>()
            .map(Token::Int)
            .map_err(|_| self.error(format!("Integer literal out of range: {}", digits)))
    }

    fn collect_symbol_chars(&mut self, mut name: String) -> String {
        while let Some(c) = self.peek() {
            if is_symbol_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }
}

/// Check if a character can appear in a symbol.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '~' | '@' | '^' | '"' | ';' | ','
        )
}

// ============================================================================
// Tests
// ============================================================================
