//! Module providing the Model struct for representing a metabolic model.

pub mod gene;
pub mod model;
pub mod reaction;
