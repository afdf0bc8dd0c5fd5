//! This module provides the Model struct for representing an entire metabolic model
use indexmap::{IndexMap, IndexSet};

use crate::configuration::Configuration;
use crate::expression::classifier::{classify_by_expression_with, ClassificationResult};
use crate::expression::{ClassificationError, GeneCall};
use crate::gpr::GprParseError;
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::reaction::Reaction;

/// Represents a Genome Scale Metabolic Model, reduced to what expression classification needs
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene Objects
    pub genes: IndexMap<String, Gene>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a reaction to the model
    ///
    /// # Examples
    /// ```rust
    /// use rxnexpr_core::metabolic_model::model::Model;
    /// use rxnexpr_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a gene to the model
    pub fn add_gene(&mut self, gene: Gene) {
        let id = gene.id.clone();
        self.genes.insert(id, gene);
    }

    /// Ids of the genes in the model
    pub fn gene_ids(&self) -> IndexSet<String> {
        self.genes.keys().cloned().collect()
    }

    /// Map of reaction ids to gene reaction rules, empty for orphan reactions
    pub fn gene_reaction_rules(&self) -> IndexMap<String, String> {
        self.reactions
            .iter()
            .map(|(id, reaction)| (id.clone(), reaction.gene_reaction_rule.clone()))
            .collect()
    }

    /// Gene ids referenced by a GPR without a matching gene in the model
    ///
    /// Reactions using these genes can't be classified.
    pub fn unmodeled_genes(&self) -> Result<IndexSet<String>, GprParseError> {
        let mut missing = IndexSet::new();
        for reaction in self.reactions.values() {
            if let Some(gpr) = reaction.gpr()? {
                missing.extend(
                    gpr.genes()
                        .into_iter()
                        .filter(|gene| !self.genes.contains_key(gene)),
                );
            }
        }
        Ok(missing)
    }

    /// Classify the reactions of the model as lowly, uncertain or highly expressed using the
    /// global configuration
    pub fn classify_reactions_by_expression(
        &self,
        calls: &IndexMap<String, GeneCall>,
    ) -> Result<ClassificationResult, ClassificationError> {
        self.classify_reactions_by_expression_with(&Configuration::current(), calls)
    }

    /// Classify the reactions of the model by expression using an explicit configuration
    pub fn classify_reactions_by_expression_with(
        &self,
        config: &Configuration,
        calls: &IndexMap<String, GeneCall>,
    ) -> Result<ClassificationResult, ClassificationError> {
        classify_by_expression_with(
            config,
            calls,
            &self.gene_reaction_rules(),
            &self.gene_ids(),
        )
    }
}
