use crate::expression::LogicLiteral;
use crate::gpr::token::Token;
use crate::gpr::{Gpr, GprOperatorType};

use thiserror::Error;
/*
GPR Grammar:
expression -> disjunction
disjunction -> conjunction ("OR" conjunction)* ;
conjunction -> unary ("AND" unary)* ;
unary -> "NOT" unary | primary ;
primary -> GENE | LITERAL | "(" expression ")" ;

LITERAL is a substituted literal token, or a bare `0`/`1` identifier left over after substitution

e.g. ( Gene1 AND Gene2) OR (Gene3 AND NOT Gene4)
 */

/// GPR Parser
pub struct GPRParser {
    /// Vector of tokens from the GPR string
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl GPRParser {
    /// Create a new GPRParser
    ///
    /// A trailing [`Token::Eof`] is appended if the token vector doesn't already end in one.
    pub fn new(mut tokens: Vec<Token>) -> GPRParser {
        if tokens.last() != Some(&Token::Eof) {
            tokens.push(Token::Eof);
        }
        GPRParser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into a GPR AST
    pub fn parse(&mut self) -> Result<Gpr, ParseError> {
        let gpr = self.disjunction()?;
        if !self.is_at_end() {
            // If entire expression has not been parsed, and error has occured
            return Err(ParseError::EarlyTermination);
        }
        Ok(gpr)
    }

    fn disjunction(&mut self) -> Result<Gpr, ParseError> {
        let mut expr = self.conjunction()?;

        while self.match_token(&[Token::Or]) {
            let right = self.conjunction()?;
            expr = Gpr::new_binary_operation(expr, GprOperatorType::Or, right)
                .map_err(|_| ParseError::InvalidBinaryOperator)?;
        }
        Ok(expr)
    }

    fn conjunction(&mut self) -> Result<Gpr, ParseError> {
        let mut expr = self.unary()?;

        while self.match_token(&[Token::And]) {
            let right = self.unary()?;
            expr = Gpr::new_binary_operation(expr, GprOperatorType::And, right)
                .map_err(|_| ParseError::InvalidBinaryOperator)?;
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Gpr, ParseError> {
        if self.match_token(&[Token::Not]) {
            let right = self.unary()?;
            return Gpr::new_unary_operation(GprOperatorType::Not, right)
                .map_err(|_| ParseError::InvalidUnaryOperator);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Gpr, ParseError> {
        if let Some(identifier) = self.match_identifier() {
            return Ok(match identifier.as_str() {
                "0" => Gpr::Literal(LogicLiteral::False),
                "1" => Gpr::Literal(LogicLiteral::True),
                gene => Gpr::new_gene_node(gene),
            });
        }

        if let Some(literal) = self.match_literal() {
            return Ok(Gpr::Literal(literal));
        }

        if self.match_token(&[Token::LeftParen]) {
            let expr = self.disjunction()?;
            self.consume(Token::RightParen, "Expect ')' after expression.")?;
            return Ok(expr);
        }

        Err(ParseError::ExpectedExpression)
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// Check whether the token at the current position matches one of the provided `tokens`,
    /// if it does advance [`self.current`] and return true, otherwise return false
    fn match_token(&mut self, tokens: &[Token]) -> bool {
        for t in tokens {
            if self.check(t) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Similar to [`match_token`], but for matching an identifier token. If the current
    /// token is an identifier return `Some(GeneId)`, where GeneId is the gene's string identifier,
    /// otherwise return None
    fn match_identifier(&mut self) -> Option<String> {
        if let Token::Identifier(id) = self.peek() {
            let id = id.clone();
            self.advance();
            return Some(id);
        }
        None
    }

    fn match_literal(&mut self) -> Option<LogicLiteral> {
        if let Token::Literal(literal) = self.peek() {
            let literal = *literal;
            self.advance();
            return Some(literal);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek() == token
    }

    /// Advance `self.current` one position unless at end of GPR Vec
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// Check whether the parser is at the end of the source Vec
    fn is_at_end(&self) -> bool {
        *self.peek() == Token::Eof
    }

    /// Get the current token
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Check whether the current token matches an input token, if it matches advance to the
    /// next token, and if it doesn't return an error. Used mainly for matching parenthesis in
    /// source GPR vec.
    fn consume(&mut self, token: Token, msg: &str) -> Result<(), ParseError> {
        if self.check(&token) {
            self.advance();
            return Ok(());
        }

        Err(ParseError::MissingToken(msg.to_string()))
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// Token was expected to be a binary operator but was not
    #[error("Invalid binary operator encountered, expected only `and` and `or`")]
    InvalidBinaryOperator,
    /// Token was expected to be a unary operator but was not
    #[error("Invalid unary operator encountered, expected only `not`")]
    InvalidUnaryOperator,
    /// Missing expected token (e.g. a right parenthesis)
    #[error("Missing expected token: {0}")]
    MissingToken(String),
    /// No expression found when one was expected
    #[error("No expression found, check that the GPR string is not empty")]
    ExpectedExpression,
    /// Expression was not completed when parsing terminated
    #[error("Parsing terminated early, check for two gene identifiers without an operator between them")]
    EarlyTermination,
}
