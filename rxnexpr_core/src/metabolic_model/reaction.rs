//! This module provides a struct for representing reactions
use derive_builder::Builder;

use crate::gpr::{parse_gpr, Gpr, GprParseError};

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Gene Protein Reaction rule, an empty rule marks a reaction without gene association
    #[builder(default = "String::new()")]
    pub gene_reaction_rule: String,
}

impl Reaction {
    /// Whether the reaction has no gene association
    pub fn is_orphan(&self) -> bool {
        self.gene_reaction_rule.trim().is_empty()
    }

    /// Parse the gene reaction rule into a GPR tree, `None` for orphan reactions
    pub fn gpr(&self) -> Result<Option<Gpr>, GprParseError> {
        if self.is_orphan() {
            return Ok(None);
        }
        parse_gpr(&self.gene_reaction_rule).map(Some)
    }
}
