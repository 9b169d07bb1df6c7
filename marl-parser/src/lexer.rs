// marl-parser - Lexer for marl
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for marl source code.
//!
//! Splits a source string into delimiters, reader-macro sigils and atom
//! tokens. Atoms are kept as raw text; deciding whether one is a number,
//! string, keyword or symbol is left to the parser.

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

    /// Raw text of a number, string literal, keyword or symbol
    Atom(String),

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
            Token::Atom(text) => write!(f, "{}", text),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone)]
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
    /// Where the most recently returned token began
    token_line: usize,
    token_column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Get the next token from the source.
    ///
    /// An unterminated string literal is returned as an atom holding the
    /// partial text; the parser reports it.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();
        self.token_line = self.line;
        self.token_column = self.column;

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '\'' => Token::Quote,
            '`' => Token::Quasiquote,
            '@' => Token::Deref,
            '^' => Token::Meta,
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    return Ok(Token::SpliceUnquote);
                }
                return Ok(Token::Unquote);
            }
            '"' => return Ok(self.read_string()),
            _ => return self.read_atom(),
        };
        self.advance();
        Ok(token)
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

    /// Line and column where the last token returned by `next_token` began.
    pub fn token_start(&self) -> (usize, usize) {
        (self.token_line, self.token_column)
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
                    // Skip to end of line
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

    /// Read a string literal verbatim, quotes and escapes included.
    fn read_string(&mut self) -> Token {
        let mut text = String::new();
        if let Some(open) = self.advance() {
            text.push(open);
        }

        while let Some(c) = self.advance() {
            text.push(c);
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                _ => {}
            }
        }

        Token::Atom(text)
    }

    fn read_atom(&mut self) -> Result<Token, LexerError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !is_atom_char(c) {
                break;
            }
            text.push(c);
            self.advance();
        }

        if text.is_empty() {
            // Only reachable for a character no rule accepts.
            let c = self.peek().unwrap_or_default();
            return Err(self.error(format!("Unexpected character: '{}'", c)));
        }
        Ok(Token::Atom(text))
    }
}

/// Characters that may continue an atom. Sigils such as `~` and `@` are only
/// special at the start of a token.
fn is_atom_char(c: char) -> bool {
    !(c.is_whitespace()
        || matches!(
            c,
            '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | ',' | ';'
        ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(s: &str) -> Result<Vec<Token>, LexerError> {
        Lexer::new(s).tokenize()
    }

    fn atom(s: &str) -> Token {
        Token::Atom(s.to_string())
    }

    #[test]
    fn test_delimiters() {
        let tokens = tokenize("()[]{}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_reader_macros() {
        let tokens = tokenize("' ` ~ ~@ @ ^").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Quote,
                Token::Quasiquote,
                Token::Unquote,
                Token::SpliceUnquote,
                Token::Deref,
                Token::Meta,
            ]
        );
    }

    #[test]
    fn test_sigil_binds_to_following_atom() {
        let tokens = tokenize("'abc ~@xs").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Quote, atom("abc"), Token::SpliceUnquote, atom("xs")]
        );
    }

    #[test]
    fn test_atoms() {
        let tokens = tokenize("123 -4 foo :kw def! nil").unwrap();
        assert_eq!(
            tokens,
            vec![
                atom("123"),
                atom("-4"),
                atom("foo"),
                atom(":kw"),
                atom("def!"),
                atom("nil"),
            ]
        );
    }

    #[test]
    fn test_sigil_chars_inside_atom() {
        let tokens = tokenize("a~b c@d e^f").unwrap();
        assert_eq!(tokens, vec![atom("a~b"), atom("c@d"), atom("e^f")]);
    }

    #[test]
    fn test_strings_keep_raw_text() {
        let tokens = tokenize(r#""hello \"world\"" "a\\""#).unwrap();
        assert_eq!(
            tokens,
            vec![atom(r#""hello \"world\"""#), atom(r#""a\\""#)]
        );
    }

    #[test]
    fn test_string_with_delimiters() {
        let tokens = tokenize(r#"("a (b) ; c")"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::LParen, atom(r#""a (b) ; c""#), Token::RParen]
        );
    }

    #[test]
    fn test_unterminated_string_is_passed_through() {
        let tokens = tokenize(r#""abc"#).unwrap();
        assert_eq!(tokens, vec![atom(r#""abc"#)]);
    }

    #[test]
    fn test_commas_as_whitespace() {
        let tokens = tokenize("[1, 2,,3]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LBracket,
                atom("1"),
                atom("2"),
                atom("3"),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("1 ; comment\n2").unwrap();
        assert_eq!(tokens, vec![atom("1"), atom("2")]);
    }

    #[test]
    fn test_position_tracking() {
        let mut lexer = Lexer::new("a\n  b");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(lexer.line(), 2);
        assert_eq!(lexer.column(), 4);
        assert_eq!(lexer.token_start(), (2, 3));
    }

    #[test]
    fn test_complex_expression() {
        let tokens = tokenize("(def! inc (fn* [x] (+ x 1)))").unwrap();
        assert_eq!(tokens.len(), 15);
        assert_eq!(tokens[0], Token::LParen);
        assert_eq!(tokens[1], atom("def!"));
    }
}
