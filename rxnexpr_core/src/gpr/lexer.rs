//! Lex a GPR string into a series of tokens for later parsing
//!
//! Gene ids are opaque: any run of characters which isn't whitespace or a parenthesis is an
//! identifier, unless it is one of the `and`/`or`/`not` keywords. Bare `0` and `1` are lexed as
//! identifiers too, since a model may name a gene that way; the parser reads the ones which
//! survive substitution as literals.

use thiserror::Error;

use crate::gpr::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Consume the source string, returning the token vector terminated by [`Token::Eof`]
    pub fn lex(mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c: char = self.advance();
        match c {
            // Single Character Tokens
            '(' => self.add_token(Token::LeftParen),
            ')' => self.add_token(Token::RightParen),
            // Whitespace
            c if c.is_whitespace() => {}
            // Identifiers and Operators
            c if Lexer::is_identifier_char(c) => self.read_identifier(),
            _ => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    position: self.start,
                })
            }
        };
        Ok(())
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn read_identifier(&mut self) {
        while Lexer::is_identifier_char(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        match text.as_str() {
            "and" | "And" | "AND" => self.add_token(Token::And),
            "or" | "Or" | "OR" => self.add_token(Token::Or),
            "not" | "Not" | "NOT" => self.add_token(Token::Not),
            gene => self.add_token(Token::Identifier(gene.to_string())),
        }
    }

    /// Gene ids in the wild carry all sorts of separators, e.g. `YCR024C-A`, `HGNC:1234`,
    /// `abc/1` or `5'nt`. Control characters are the only thing rejected.
    fn is_identifier_char(c: char) -> bool {
        !(c.is_whitespace() || c.is_control() || c == '(' || c == ')')
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

/// Errors raised while lexing a GPR string
#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexerError {
    /// Character which can't start or continue any token
    #[error("Invalid character `{character}` at position {position}")]
    InvalidCharacter { character: char, position: usize },
}
