//! Module for parsing Gene Protein Reaction strings into AST values, and evaluating them once
//! every gene has been replaced by a logic literal

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use thiserror::Error;

use crate::expression::LogicLiteral;
use crate::gpr::lexer::LexerError;
use crate::gpr::parser::ParseError;
use crate::gpr::token::Token;

pub mod lexer;
pub mod parser;
pub mod token;

/// Parse a Gene Protein Reaction string into a GPR Tree
///
/// # Parameters
/// - `input`: &str representing the gene protein reaction rule
///
/// # Returns
/// Parse result which is
/// - `Ok`: The root node of the GPR tree
/// - `Err`: Returns the GprParseError describing the issue with the GPR rule which
///     was being parsed.
///
/// # Examples
/// ```rust
/// use rxnexpr_core::gpr::parse_gpr;
/// let gpr = parse_gpr("Rv0001 and (Rv0002 or Rv0003)").unwrap();
/// assert_eq!(gpr.to_string(), "(Rv0001 and (Rv0002 or Rv0003))");
/// ```
pub fn parse_gpr(input: &str) -> Result<Gpr, GprParseError> {
    let tokens = lex_gpr(input)?;
    Ok(parse_gpr_tokens(tokens)?)
}

/// Convert a GPR string into tokens
pub fn lex_gpr(input: &str) -> Result<Vec<Token>, LexerError> {
    lexer::Lexer::new(input).lex()
}

/// Parse an already lexed (and possibly substituted) token vector into a GPR tree
pub fn parse_gpr_tokens(tokens: Vec<Token>) -> Result<Gpr, ParseError> {
    parser::GPRParser::new(tokens).parse()
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GprParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of GPR string to tokens): {0}")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to GPR tree): {0}")]
    ParsingError(#[from] ParseError),
}

// region GPR AST
/// Representation of a Gene Protein Reaction Rule as an AST
#[derive(Clone, Debug, PartialEq)]
pub enum Gpr {
    /// Operation on genes (see [`GprOperation`])
    Operation(GprOperation),
    /// A terminal gene node, holding the gene id
    GeneNode(String),
    /// A terminal logic literal, what a gene node becomes after substitution
    Literal(LogicLiteral),
}

impl Display for Gpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_id())
    }
}

impl Gpr {
    /// Create a new binary operation node
    pub fn new_binary_operation(
        left: Gpr,
        operator: GprOperatorType,
        right: Gpr,
    ) -> Result<Gpr, GprError> {
        let op = match operator {
            GprOperatorType::Or => GprOperation::Or {
                left: Box::new(left),
                right: Box::new(right),
            },
            GprOperatorType::And => GprOperation::And {
                left: Box::new(left),
                right: Box::new(right),
            },
            GprOperatorType::Not => return Err(GprError::InvalidBinaryOp),
        };
        Ok(Gpr::Operation(op))
    }

    /// Create a new unary operation node
    pub fn new_unary_operation(operator: GprOperatorType, operand: Gpr) -> Result<Gpr, GprError> {
        let op = match operator {
            GprOperatorType::Not => GprOperation::Not {
                val: Box::new(operand),
            },
            _ => return Err(GprError::InvalidUnaryOp),
        };
        Ok(Gpr::Operation(op))
    }

    /// Create a new gene node
    pub fn new_gene_node(gene: &str) -> Gpr {
        Gpr::GeneNode(gene.to_string())
    }

    /// Generate a GPR string with gene ids from the GPR AST
    pub fn to_string_id(&self) -> String {
        match self {
            Gpr::Operation(op) => match op {
                GprOperation::Or { left, right } => {
                    format!("({} or {})", left.to_string_id(), right.to_string_id())
                }
                GprOperation::And { left, right } => {
                    format!("({} and {})", left.to_string_id(), right.to_string_id())
                }
                GprOperation::Not { val } => {
                    format!("(not {})", val.to_string_id())
                }
            },
            Gpr::GeneNode(gene_ref) => gene_ref.to_string(),
            Gpr::Literal(literal) => literal.to_string(),
        }
    }

    /// Gene ids referenced by the tree, in order of first appearance
    pub fn genes(&self) -> IndexSet<String> {
        let mut genes = IndexSet::new();
        self.collect_genes(&mut genes);
        genes
    }

    fn collect_genes(&self, genes: &mut IndexSet<String>) {
        match self {
            Gpr::Operation(GprOperation::Or { left, right })
            | Gpr::Operation(GprOperation::And { left, right }) => {
                left.collect_genes(genes);
                right.collect_genes(genes);
            }
            Gpr::Operation(GprOperation::Not { val }) => val.collect_genes(genes),
            Gpr::GeneNode(gene) => {
                genes.insert(gene.clone());
            }
            Gpr::Literal(_) => {}
        }
    }

    /// Evaluate a tree whose genes have all been substituted by literals
    ///
    /// Any gene node left in the tree makes the whole evaluation inconclusive, even when
    /// short circuiting would have skipped it, and every residual id is reported.
    pub fn eval(&self) -> Result<LogicLiteral, UnresolvedGenes> {
        let residual = self.genes();
        if !residual.is_empty() {
            return Err(UnresolvedGenes(residual.into_iter().collect()));
        }
        Ok(self.eval_literals())
    }

    fn eval_literals(&self) -> LogicLiteral {
        match self {
            Gpr::Operation(op) => match op {
                GprOperation::Or { left, right } => left.eval_literals() | right.eval_literals(),
                GprOperation::And { left, right } => left.eval_literals() & right.eval_literals(),
                GprOperation::Not { val } => !val.eval_literals(),
            },
            Gpr::Literal(literal) => *literal,
            // eval has already rejected trees with gene nodes
            Gpr::GeneNode(_) => LogicLiteral::False,
        }
    }
}

/// Possible operations on genes
#[derive(Clone, Debug, PartialEq)]
pub enum GprOperation {
    Or { left: Box<Gpr>, right: Box<Gpr> },
    And { left: Box<Gpr>, right: Box<Gpr> },
    Not { val: Box<Gpr> },
}

/// Types of Allowed GPR Operations
pub enum GprOperatorType {
    /// Or, results in active if either left or right are active
    Or,
    /// And, results in active if both left and right are active
    And,
    /// Not, results in active if val is inactive
    Not,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GprError {
    #[error("Invalid Binary Operation")]
    InvalidBinaryOp,
    #[error("Invalid Unary Operation")]
    InvalidUnaryOp,
}

/// Gene ids left in a GPR which should only hold literals
#[derive(Clone, Debug, Error, PartialEq)]
#[error("GPR still references genes after substitution: {0:?}")]
pub struct UnresolvedGenes(pub Vec<String>);
// endregion GPR AST
