// marl-parser - Parser for marl
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for marl source code.
//!
//! Converts tokens into `MarlVal` trees. Reader macros become their wrapper
//! variants, e.g. `'x` parses to `MarlVal::Quote(x)`.

use std::fmt;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::map::MarlMap;
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;
use crate::value::MarlVal;

/// Longest run of digits accepted as an integer literal.
const MAX_INT_DIGITS: usize = 19;

/// Deepest nesting of collections and reader macros the reader accepts.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Parser error with position information.
#[derive(Debug, Clone)]
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

/// The parser converts tokens into `MarlVal` trees.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        let (line, column) = lexer.token_start();
        Ok(Parser {
            lexer,
            current,
            line,
            column,
            depth: 0,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<MarlVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<MarlVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<MarlVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<MarlVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.current = self.lexer.next_token()?;
        (self.line, self.column) = self.lexer.token_start();
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}', got {}", expected, self.current)))
        }
    }

    fn parse_form(&mut self) -> Result<MarlVal, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "forms nested more than {} levels deep",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.parse_nested_form());
        self.depth -= 1;
        result
    }

    fn parse_nested_form(&mut self) -> Result<MarlVal, ParseError> {
        match &self.current {
            Token::Atom(text) => {
                let val = classify_atom(text).map_err(|message| self.error(message))?;
                self.advance()?;
                Ok(val)
            }

            // Collections
            Token::LParen => {
                let items = self.parse_seq(Token::RParen)?;
                Ok(MarlVal::list(items))
            }
            Token::LBracket => {
                let items = self.parse_seq(Token::RBracket)?;
                Ok(MarlVal::vector(items))
            }
            Token::LBrace => self.parse_map(),

            // Reader macros
            Token::Quote => self.parse_wrapped(MarlVal::Quote),
            Token::Quasiquote => self.parse_wrapped(MarlVal::Quasiquote),
            Token::Unquote => self.parse_wrapped(MarlVal::Unquote),
            Token::SpliceUnquote => self.parse_wrapped(MarlVal::SpliceUnquote),
            Token::Deref => self.parse_wrapped(MarlVal::Deref),
            Token::Meta => self.parse_meta(),

            // Unexpected tokens
            Token::RParen => Err(self.error("unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("unexpected '}'".to_string())),
            Token::Eof => Err(self.error("unexpected end of input".to_string())),
        }
    }

    /// Collect forms up to `close`, consuming both delimiters.
    fn parse_seq(&mut self, close: Token) -> Result<Vec<MarlVal>, ParseError> {
        self.advance()?; // consume the opening delimiter
        let mut elements = Vec::new();

        while self.current != close && !matches!(self.current, Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&close)?;
        Ok(elements)
    }

    fn parse_map(&mut self) -> Result<MarlVal, ParseError> {
        self.advance()?; // consume {
        let mut map = MarlMap::new();

        while !matches!(self.current, Token::RBrace | Token::Eof) {
            let key = self.parse_form()?;
            if matches!(self.current, Token::RBrace | Token::Eof) {
                return Err(
                    self.error("map literal must contain an even number of forms".to_string())
                );
            }
            let value = self.parse_form()?;
            map.insert(key, value);
        }

        self.expect(&Token::RBrace)?;
        Ok(MarlVal::Map(map, None))
    }

    fn parse_wrapped(
        &mut self,
        wrap: fn(Box<MarlVal>) -> MarlVal,
    ) -> Result<MarlVal, ParseError> {
        self.advance()?; // consume the sigil
        let form = self.parse_form()?;
        Ok(wrap(Box::new(form)))
    }

    /// `^meta value` reads the metadata first, then the value it applies to.
    fn parse_meta(&mut self) -> Result<MarlVal, ParseError> {
        self.advance()?; // consume ^
        let meta = self.parse_form()?;
        let value = self.parse_form()?;
        Ok(MarlVal::WithMeta(Box::new(value), Box::new(meta)))
    }
}

// ============================================================================
// Atom classification
// ============================================================================

/// Turn the raw text of an atom token into a value.
///
/// Tried in order: integer, `nil`, booleans, string literal, keyword, and
/// finally symbol, which accepts anything.
fn classify_atom(text: &str) -> Result<MarlVal, String> {
    if is_int_literal(text) {
        return text
            .parse::<i64>()
            .map(MarlVal::int)
            .map_err(|_| format!("integer literal out of range: {}", text));
    }

    match text {
        "nil" => return Ok(MarlVal::nil()),
        "true" => return Ok(MarlVal::bool(true)),
        "false" => return Ok(MarlVal::bool(false)),
        _ => {}
    }

    if let Some(body) = text.strip_prefix('"') {
        return read_string_literal(body).map(MarlVal::string);
    }

    if let Some(name) = text.strip_prefix(':') {
        return Ok(MarlVal::keyword(Keyword::new(name)));
    }

    Ok(MarlVal::symbol(Symbol::new(text)))
}

/// An optional sign followed by one to nineteen ASCII digits.
fn is_int_literal(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty()
        && digits.len() <= MAX_INT_DIGITS
        && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decode the text after the opening quote of a string literal.
fn read_string_literal(body: &str) -> Result<String, String> {
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    loop {
        match chars.next() {
            Some('"') => {
                if chars.next().is_some() {
                    return Err("unexpected text after string literal".to_string());
                }
                return Ok(decoded);
            }
            Some('\\') => match chars.next() {
                Some('n') => decoded.push('\n'),
                Some('t') => decoded.push('\t'),
                Some('r') => decoded.push('\r'),
                Some('"') => decoded.push('"'),
                Some('\\') => decoded.push('\\'),
                Some(c) => return Err(format!("unknown escape sequence: \\{}", c)),
                None => return Err("expected '\"', got EOF".to_string()),
            },
            Some(c) => decoded.push(c),
            None => return Err("expected '\"', got EOF".to_string()),
        }
    }
}

/// Remove `;` comments from every line, leaving string literals intact.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut in_string = false;
        let mut escaped = false;
        for c in line.chars() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
            } else if c == '"' {
                in_string = true;
            } else if c == ';' {
                break;
            }
            out.push(c);
        }
    }

    out
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Parse a string and return the first form, or None for blank input.
pub fn read(source: &str) -> Result<Option<MarlVal>, ParseError> {
    Parser::parse_str(source)
}

/// Parse a string and return all forms.
pub fn read_all(source: &str) -> Result<Vec<MarlVal>, ParseError> {
    Parser::parse_all_str(source)
}

// ============================================================================
// Tests
// ============================================================================
