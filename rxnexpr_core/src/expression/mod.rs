//! Classification of reactions into expression tiers from gene calls
//!
//! The work is split the same way the data flows:
//! - [`grouping`] buckets model gene ids by length, longest first
//! - [`substitution`] replaces gene ids in a GPR with logic literals
//! - [`evaluator`] runs the two substitute-and-evaluate passes per reaction
//! - [`classifier`] partitions the reaction calls into low, uncertain and high sets
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gpr::GprParseError;

pub mod classifier;
pub mod evaluator;
pub mod grouping;
pub mod substitution;

// region Calls
/// Expression call for a single gene
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum GeneCall {
    /// Expression below the low threshold (-1)
    Low,
    /// Expression between the thresholds (0)
    Uncertain,
    /// Expression above the high threshold (1)
    High,
}

impl TryFrom<i64> for GeneCall {
    type Error = InvalidGeneCallValue;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(GeneCall::Low),
            0 => Ok(GeneCall::Uncertain),
            1 => Ok(GeneCall::High),
            other => Err(InvalidGeneCallValue(other)),
        }
    }
}

impl From<GeneCall> for i64 {
    fn from(call: GeneCall) -> Self {
        match call {
            GeneCall::Low => -1,
            GeneCall::Uncertain => 0,
            GeneCall::High => 1,
        }
    }
}

/// Gene call outside of {-1, 0, 1}
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Invalid gene call value {0}, expected one of -1, 0 or 1")]
pub struct InvalidGeneCallValue(pub i64);

/// Expression call derived for a reaction with a gene association
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RxnCall {
    /// Lowly expressed (-1)
    Low,
    /// Moderate or uncertain expression (0)
    Uncertain,
    /// Highly expressed (1)
    High,
}

impl TryFrom<i64> for RxnCall {
    type Error = InvalidGeneCallValue;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match GeneCall::try_from(value)? {
            GeneCall::Low => RxnCall::Low,
            GeneCall::Uncertain => RxnCall::Uncertain,
            GeneCall::High => RxnCall::High,
        })
    }
}

impl From<RxnCall> for i64 {
    fn from(call: RxnCall) -> Self {
        match call {
            RxnCall::Low => -1,
            RxnCall::Uncertain => 0,
            RxnCall::High => 1,
        }
    }
}
// endregion Calls

// region Logic Literals
/// The value a gene takes once substituted into a GPR, rendered as `0` or `1`
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LogicLiteral {
    False,
    True,
}

impl Display for LogicLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicLiteral::False => write!(f, "0"),
            LogicLiteral::True => write!(f, "1"),
        }
    }
}

impl From<bool> for LogicLiteral {
    fn from(value: bool) -> Self {
        if value {
            LogicLiteral::True
        } else {
            LogicLiteral::False
        }
    }
}

impl From<LogicLiteral> for bool {
    fn from(value: LogicLiteral) -> Self {
        value == LogicLiteral::True
    }
}

impl BitAnd for LogicLiteral {
    type Output = LogicLiteral;

    fn bitand(self, rhs: Self) -> Self::Output {
        (bool::from(self) && bool::from(rhs)).into()
    }
}

impl BitOr for LogicLiteral {
    type Output = LogicLiteral;

    fn bitor(self, rhs: Self) -> Self::Output {
        (bool::from(self) || bool::from(rhs)).into()
    }
}

impl Not for LogicLiteral {
    type Output = LogicLiteral;

    fn not(self) -> Self::Output {
        (!bool::from(self)).into()
    }
}

/// Rules for translating a gene call into the literal substituted for that gene
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallTranslation {
    pub low: LogicLiteral,
    pub uncertain: LogicLiteral,
    pub high: LogicLiteral,
}

impl CallTranslation {
    /// First pass: only lowly expressed genes are false, a reaction evaluating to false is low
    pub const LOW_PASS: CallTranslation = CallTranslation {
        low: LogicLiteral::False,
        uncertain: LogicLiteral::True,
        high: LogicLiteral::True,
    };

    /// Second pass: only highly expressed genes are true, a reaction evaluating to true is high
    pub const HIGH_PASS: CallTranslation = CallTranslation {
        low: LogicLiteral::False,
        uncertain: LogicLiteral::False,
        high: LogicLiteral::True,
    };

    /// Literal for a gene call
    pub fn translate(&self, call: GeneCall) -> LogicLiteral {
        match call {
            GeneCall::Low => self.low,
            GeneCall::Uncertain => self.uncertain,
            GeneCall::High => self.high,
        }
    }
}
// endregion Logic Literals

/// Errors which abort a classification run
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassificationError {
    /// The GPR of a reaction is not a valid boolean expression
    #[error("Malformed GPR for reaction `{reaction}`: {source}")]
    MalformedFormula {
        reaction: String,
        source: GprParseError,
    },
}
