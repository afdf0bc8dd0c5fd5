//! Process wide defaults for classification runs
use std::sync::{LazyLock, RwLock};

use crate::expression::GeneCall;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub substitution: SubstitutionMode,
    pub unresolved: UnresolvedPolicy,
    /// Call assumed for model genes absent from the gene calls
    pub missing_call: GeneCall,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            substitution: SubstitutionMode::Tokenized,
            unresolved: UnresolvedPolicy::Skip,
            missing_call: GeneCall::Uncertain,
        }
    }
}

impl Configuration {
    /// Snapshot of the global configuration
    ///
    /// A poisoned lock still holds a usable configuration, so it is read through.
    pub fn current() -> Configuration {
        match CONFIGURATION.read() {
            Ok(config) => *config,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Enum used to specify how gene ids are replaced in a GPR
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubstitutionMode {
    /// Lex the GPR and replace identifier tokens equal to a gene id
    Tokenized,
    /// Replace gene ids as raw substrings of the GPR, longest ids first
    Literal,
}

/// Enum used to specify what happens to a reaction whose GPR still references genes after
/// substitution (genes which are not part of the model)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Leave the reaction out of both passes and report it as unresolved
    Skip,
    /// Never mark the reaction low, and call it uncertain unless the second pass resolves
    DefaultUncertain,
}
