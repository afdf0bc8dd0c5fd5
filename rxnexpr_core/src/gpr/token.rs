//! Module providing Token struct for lexing

use std::fmt::{Display, Formatter};

use crate::expression::LogicLiteral;

/// Represents Tokens in GPR
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Token {
    Identifier(String),
    Literal(LogicLiteral),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Eof,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(id) => write!(f, "{}", id),
            Token::Literal(lit) => write!(f, "{}", lit),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Eof => Ok(()),
        }
    }
}

/// Render a token stream back into a GPR string
///
/// Parentheses hug their contents, all other tokens are separated by a single space.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if *token == Token::Eof {
            break;
        }
        let needs_space = match (previous, token) {
            (None, _) => false,
            (Some(Token::LeftParen), _) => false,
            (_, Token::RightParen) => false,
            _ => true,
        };
        if needs_space {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        previous = Some(token);
    }
    out
}
