//! Partition reactions into lowly, uncertainly and highly expressed sets
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::expression::evaluator::{evaluate_reaction_calls_with, ReactionCalls};
use crate::expression::{ClassificationError, GeneCall, RxnCall};

/// Reactions with a gene association, split by expression
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Lowly expressed reactions
    #[serde(rename = "rL")]
    pub low: IndexSet<String>,
    /// Reactions with uncertain (moderate) expression
    #[serde(rename = "rU")]
    pub uncertain: IndexSet<String>,
    /// Highly expressed reactions
    #[serde(rename = "rH")]
    pub high: IndexSet<String>,
    /// Reactions left unclassified because their GPR references genes outside the model
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub unresolved: IndexSet<String>,
}

impl ClassificationResult {
    /// Set holding reactions with `call`
    pub fn reactions(&self, call: RxnCall) -> &IndexSet<String> {
        match call {
            RxnCall::Low => &self.low,
            RxnCall::Uncertain => &self.uncertain,
            RxnCall::High => &self.high,
        }
    }

    /// Call of a reaction, `None` for orphan, unresolved or unknown reactions
    pub fn call_of(&self, rxn: &str) -> Option<RxnCall> {
        [RxnCall::Low, RxnCall::Uncertain, RxnCall::High]
            .into_iter()
            .find(|call| self.reactions(*call).contains(rxn))
    }
}

impl From<ReactionCalls> for ClassificationResult {
    fn from(rxn_calls: ReactionCalls) -> Self {
        let mut result = ClassificationResult {
            unresolved: rxn_calls.unresolved,
            ..ClassificationResult::default()
        };
        for (rxn, call) in rxn_calls.calls {
            match call {
                RxnCall::Low => result.low.insert(rxn),
                RxnCall::Uncertain => result.uncertain.insert(rxn),
                RxnCall::High => result.high.insert(rxn),
            };
        }
        result
    }
}

/// Classify reactions with gene associations as highly, uncertain or lowly expressed, using
/// the global [`Configuration`]
///
/// Orphan reactions (empty GPR) appear in none of the sets.
///
/// # Examples
/// ```rust
/// use indexmap::{IndexMap, IndexSet};
/// use rxnexpr_core::expression::GeneCall;
/// use rxnexpr_core::expression::classifier::classify_by_expression;
/// let calls = IndexMap::from([("G1".to_string(), GeneCall::Low), ("G10".to_string(), GeneCall::High)]);
/// let gprs = IndexMap::from([("R1".to_string(), "G10 or G1".to_string())]);
/// let genes = IndexSet::from(["G1".to_string(), "G10".to_string()]);
/// let result = classify_by_expression(&calls, &gprs, &genes).unwrap();
/// assert!(result.high.contains("R1"));
/// ```
pub fn classify_by_expression(
    calls: &IndexMap<String, GeneCall>,
    gprs: &IndexMap<String, String>,
    model_genes: &IndexSet<String>,
) -> Result<ClassificationResult, ClassificationError> {
    classify_by_expression_with(&Configuration::current(), calls, gprs, model_genes)
}

/// Classify reactions by expression using an explicit configuration
pub fn classify_by_expression_with(
    config: &Configuration,
    calls: &IndexMap<String, GeneCall>,
    gprs: &IndexMap<String, String>,
    model_genes: &IndexSet<String>,
) -> Result<ClassificationResult, ClassificationError> {
    let result: ClassificationResult =
        evaluate_reaction_calls_with(config, calls, gprs, model_genes)?.into();
    tracing::debug!(
        low = result.low.len(),
        uncertain = result.uncertain.len(),
        high = result.high.len(),
        unresolved = result.unresolved.len(),
        "classified reactions by expression"
    );
    Ok(result)
}
