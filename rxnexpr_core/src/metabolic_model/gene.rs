//! This module provides the Gene struct, representing a gene of a metabolic model
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Gene {
    /// Used to identify the gene, and how the gene is referenced in GPRs
    pub id: String,
}

impl Gene {
    pub fn new(id: String) -> Gene {
        Gene { id }
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
