//! Core rust implementation of reaction expression classification for metabolic models.
//!
//! Reactions are sorted into lowly, uncertain and highly expressed tiers from three valued gene
//! calls and each reaction's gene protein reaction (GPR) rule.

pub mod configuration;
pub mod expression;
pub mod gpr;
pub mod metabolic_model;

pub use crate::configuration::{Configuration, SubstitutionMode, UnresolvedPolicy, CONFIGURATION};
pub use crate::expression::classifier::{classify_by_expression, ClassificationResult};
pub use crate::expression::evaluator::{evaluate_reaction_calls, ReactionCalls};
pub use crate::expression::grouping::group_identifiers_by_length;
pub use crate::expression::substitution::substitute_formula;
pub use crate::expression::{ClassificationError, GeneCall, RxnCall};
