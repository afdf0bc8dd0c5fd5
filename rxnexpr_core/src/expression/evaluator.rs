//! Derive a call for every reaction with a gene association
//!
//! A three valued gene call can't be pushed through a two valued boolean GPR in one go, so the
//! GPR of each reaction is evaluated twice:
//! 1. Only lowly expressed genes are false. Reactions whose GPR is false are lowly expressed.
//! 2. For the remaining reactions only highly expressed genes are true. Reactions whose GPR is
//!    true are highly expressed, everything else is uncertain.
use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};

use crate::configuration::{Configuration, SubstitutionMode, UnresolvedPolicy};
use crate::expression::grouping::LengthBuckets;
use crate::expression::substitution::Substituter;
use crate::expression::{CallTranslation, ClassificationError, GeneCall, LogicLiteral, RxnCall};
use crate::gpr::token::render_tokens;
use crate::gpr::{lex_gpr, parse_gpr, parse_gpr_tokens, GprParseError, UnresolvedGenes};

/// Calls for the reactions of a model
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReactionCalls {
    /// Map of reaction ids to reaction calls, in the order the reactions were given
    pub calls: IndexMap<String, RxnCall>,
    /// Reactions whose GPR references genes outside the model
    ///
    /// Only filled under [`UnresolvedPolicy::Skip`], these reactions have no entry in `calls`.
    pub unresolved: IndexSet<String>,
}

/// Evaluation pass over the reactions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Identify lowly expressed reactions
    Low,
    /// Separate highly expressed from uncertain reactions
    High,
}

impl Pass {
    pub fn translation(&self) -> CallTranslation {
        match self {
            Pass::Low => CallTranslation::LOW_PASS,
            Pass::High => CallTranslation::HIGH_PASS,
        }
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Low => write!(f, "low"),
            Pass::High => write!(f, "high"),
        }
    }
}

/// Result of substituting and evaluating one GPR
#[derive(Clone, Debug, PartialEq)]
enum Outcome {
    Resolved(LogicLiteral),
    Unresolved { residual: String, genes: Vec<String> },
}

/// Create the reaction calls using the global [`Configuration`]
///
/// # Parameters
/// - `calls`: map of gene ids to gene calls
/// - `gprs`: map of reaction ids to GPR strings, an empty GPR marks an orphan reaction
/// - `model_genes`: the gene ids which are part of the model
///
/// # Examples
/// ```rust
/// use indexmap::{IndexMap, IndexSet};
/// use rxnexpr_core::expression::{GeneCall, RxnCall};
/// use rxnexpr_core::expression::evaluator::evaluate_reaction_calls;
/// let calls = IndexMap::from([("A".to_string(), GeneCall::High), ("B".to_string(), GeneCall::Low)]);
/// let gprs = IndexMap::from([
///     ("R_and".to_string(), "A and B".to_string()),
///     ("R_or".to_string(), "A or B".to_string()),
///     ("R_orphan".to_string(), String::new()),
/// ]);
/// let genes = IndexSet::from(["A".to_string(), "B".to_string()]);
/// let rxn_calls = evaluate_reaction_calls(&calls, &gprs, &genes).unwrap();
/// assert_eq!(rxn_calls.calls["R_and"], RxnCall::Low);
/// assert_eq!(rxn_calls.calls["R_or"], RxnCall::High);
/// assert!(!rxn_calls.calls.contains_key("R_orphan"));
/// ```
pub fn evaluate_reaction_calls(
    calls: &IndexMap<String, GeneCall>,
    gprs: &IndexMap<String, String>,
    model_genes: &IndexSet<String>,
) -> Result<ReactionCalls, ClassificationError> {
    evaluate_reaction_calls_with(&Configuration::current(), calls, gprs, model_genes)
}

/// Create the reaction calls using an explicit configuration
pub fn evaluate_reaction_calls_with(
    config: &Configuration,
    calls: &IndexMap<String, GeneCall>,
    gprs: &IndexMap<String, String>,
    model_genes: &IndexSet<String>,
) -> Result<ReactionCalls, ClassificationError> {
    let evaluator = Evaluator {
        config,
        calls,
        buckets: LengthBuckets::new(model_genes),
    };
    // Orphan reactions have no gene association and get no call
    let associated: Vec<(&String, &String)> = gprs
        .iter()
        .filter(|(_, gpr)| !gpr.trim().is_empty())
        .collect();

    let mut low: IndexSet<&str> = IndexSet::new();
    // Reactions already warned about, each anomaly is logged once per run
    let mut reported: IndexSet<&str> = IndexSet::new();
    let mut unresolved: IndexSet<String> = IndexSet::new();
    for (rxn, gpr) in associated.iter() {
        match evaluator.evaluate(rxn, gpr, Pass::Low)? {
            Outcome::Resolved(LogicLiteral::False) => {
                low.insert(rxn.as_str());
            }
            Outcome::Resolved(LogicLiteral::True) => {}
            Outcome::Unresolved { residual, genes } => {
                warn_unresolved(rxn, Pass::Low, &residual, &genes);
                reported.insert(rxn.as_str());
                if config.unresolved == UnresolvedPolicy::Skip {
                    unresolved.insert(rxn.to_string());
                }
            }
        }
    }

    let mut rxn_calls: IndexMap<String, RxnCall> = IndexMap::new();
    for (rxn, gpr) in associated.iter() {
        if low.contains(rxn.as_str()) {
            rxn_calls.insert(rxn.to_string(), RxnCall::Low);
            continue;
        }
        if unresolved.contains(rxn.as_str()) {
            continue;
        }
        let call = match evaluator.evaluate(rxn, gpr, Pass::High)? {
            Outcome::Resolved(LogicLiteral::True) => RxnCall::High,
            Outcome::Resolved(LogicLiteral::False) => RxnCall::Uncertain,
            Outcome::Unresolved { residual, genes } => {
                if !reported.contains(rxn.as_str()) {
                    warn_unresolved(rxn, Pass::High, &residual, &genes);
                }
                match config.unresolved {
                    UnresolvedPolicy::Skip => {
                        unresolved.insert(rxn.to_string());
                        continue;
                    }
                    UnresolvedPolicy::DefaultUncertain => RxnCall::Uncertain,
                }
            }
        };
        rxn_calls.insert(rxn.to_string(), call);
    }

    tracing::debug!(
        reactions = gprs.len(),
        called = rxn_calls.len(),
        low = low.len(),
        unresolved = unresolved.len(),
        "created reaction calls"
    );
    Ok(ReactionCalls {
        calls: rxn_calls,
        unresolved,
    })
}

struct Evaluator<'a> {
    config: &'a Configuration,
    calls: &'a IndexMap<String, GeneCall>,
    buckets: LengthBuckets,
}

impl Evaluator<'_> {
    /// Substitute every model gene of `gpr`, longest ids first, and evaluate the result
    fn evaluate(&self, rxn: &str, gpr: &str, pass: Pass) -> Result<Outcome, ClassificationError> {
        let malformed = |source: GprParseError| ClassificationError::MalformedFormula {
            reaction: rxn.to_string(),
            source,
        };
        let substituter = Substituter::new(self.calls, pass.translation(), self.config.missing_call);
        let (residual, tree) = match self.config.substitution {
            SubstitutionMode::Tokenized => {
                let mut tokens = lex_gpr(gpr).map_err(|e| malformed(e.into()))?;
                for (_, bucket) in self.buckets.iter() {
                    substituter.substitute_tokens(&mut tokens, bucket);
                }
                let residual = render_tokens(&tokens);
                let tree = parse_gpr_tokens(tokens).map_err(|e| malformed(e.into()))?;
                (residual, tree)
            }
            SubstitutionMode::Literal => {
                let mut residual = gpr.to_string();
                for (_, bucket) in self.buckets.iter() {
                    residual = substituter.substitute_literal(&residual, bucket);
                }
                let tree = parse_gpr(&residual).map_err(malformed)?;
                (residual, tree)
            }
        };
        Ok(match tree.eval() {
            Ok(literal) => Outcome::Resolved(literal),
            Err(UnresolvedGenes(genes)) => Outcome::Unresolved { residual, genes },
        })
    }
}

fn warn_unresolved(rxn: &str, pass: Pass, residual: &str, genes: &[String]) {
    tracing::warn!(
        reaction = %rxn,
        pass = %pass,
        residual = %residual,
        genes = ?genes,
        "replacement error, GPR still references genes outside the model"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::gpr::parser::ParseError;

    /// Writer collecting formatted log lines for inspection
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::WARN)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, logs.contents())
    }

    fn genes(ids: &[&str]) -> IndexSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn gene_calls(calls: &[(&str, GeneCall)]) -> IndexMap<String, GeneCall> {
        calls.iter().map(|(id, call)| (id.to_string(), *call)).collect()
    }

    fn gprs(rules: &[(&str, &str)]) -> IndexMap<String, String> {
        rules
            .iter()
            .map(|(rxn, gpr)| (rxn.to_string(), gpr.to_string()))
            .collect()
    }

    fn with_mode(substitution: SubstitutionMode, unresolved: UnresolvedPolicy) -> Configuration {
        Configuration {
            substitution,
            unresolved,
            ..Configuration::default()
        }
    }

    fn call_of(
        config: &Configuration,
        gpr: &str,
        calls: &[(&str, GeneCall)],
        model_genes: &[&str],
    ) -> Option<RxnCall> {
        let result = evaluate_reaction_calls_with(
            config,
            &gene_calls(calls),
            &gprs(&[("R1", gpr)]),
            &genes(model_genes),
        )
        .unwrap();
        result.calls.get("R1").copied()
    }

    #[test]
    fn boolean_logic() {
        for mode in [SubstitutionMode::Tokenized, SubstitutionMode::Literal] {
            let config = with_mode(mode, UnresolvedPolicy::Skip);
            let ab = ["A", "B"];
            use GeneCall::*;
            assert_eq!(call_of(&config, "A and B", &[("A", High), ("B", High)], &ab), Some(RxnCall::High));
            assert_eq!(call_of(&config, "A or B", &[("A", Low), ("B", Low)], &ab), Some(RxnCall::Low));
            assert_eq!(call_of(&config, "A and B", &[("A", High), ("B", Low)], &ab), Some(RxnCall::Low));
            assert_eq!(call_of(&config, "A or B", &[("A", High), ("B", Low)], &ab), Some(RxnCall::High));
            assert_eq!(
                call_of(&config, "A and B", &[("A", High), ("B", Uncertain)], &ab),
                Some(RxnCall::Uncertain)
            );
            assert_eq!(
                call_of(&config, "A or B", &[("A", Low), ("B", Uncertain)], &ab),
                Some(RxnCall::Uncertain)
            );
            assert_eq!(
                call_of(&config, "(A or B) and not B", &[("A", High), ("B", Low)], &ab),
                Some(RxnCall::High)
            );
        }
    }

    #[test]
    fn missing_calls_are_uncertain() {
        let config = Configuration::default();
        // A has no call, so it is true in the low pass and false in the high pass
        assert_eq!(
            call_of(&config, "A and B", &[("B", GeneCall::High)], &["A", "B"]),
            Some(RxnCall::Uncertain)
        );
        assert_eq!(
            call_of(&config, "A or B", &[("B", GeneCall::Low)], &["A", "B"]),
            Some(RxnCall::Uncertain)
        );
    }

    #[test]
    fn missing_call_is_configurable() {
        let config = Configuration {
            missing_call: GeneCall::Low,
            ..Configuration::default()
        };
        assert_eq!(
            call_of(&config, "A and B", &[("B", GeneCall::High)], &["A", "B"]),
            Some(RxnCall::Low)
        );
    }

    #[test]
    fn prefix_ids_do_not_collide() {
        for mode in [SubstitutionMode::Tokenized, SubstitutionMode::Literal] {
            let config = with_mode(mode, UnresolvedPolicy::Skip);
            let calls = [("G1", GeneCall::Low), ("G10", GeneCall::High)];
            assert_eq!(
                call_of(&config, "G10 or G1", &calls, &["G1", "G10"]),
                Some(RxnCall::High)
            );
            assert_eq!(
                call_of(&config, "G10 and G1", &calls, &["G1", "G10"]),
                Some(RxnCall::Low)
            );
            let yeast = [("YCR024C", GeneCall::Low), ("YCR024C-A", GeneCall::High)];
            assert_eq!(
                call_of(&config, "YCR024C-A", &yeast, &["YCR024C", "YCR024C-A"]),
                Some(RxnCall::High)
            );
        }
    }

    #[test]
    fn orphans_are_excluded() {
        let result = evaluate_reaction_calls_with(
            &Configuration::default(),
            &gene_calls(&[("A", GeneCall::High)]),
            &gprs(&[("R1", "A"), ("R_orphan", ""), ("R_blank", "  ")]),
            &genes(&["A"]),
        )
        .unwrap();
        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls["R1"], RxnCall::High);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn calls_follow_reaction_order() {
        let result = evaluate_reaction_calls_with(
            &Configuration::default(),
            &gene_calls(&[("A", GeneCall::High), ("B", GeneCall::Low)]),
            &gprs(&[("R3", "A"), ("R1", "B"), ("R2", "A and B")]),
            &genes(&["A", "B"]),
        )
        .unwrap();
        let order: Vec<&str> = result.calls.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["R3", "R1", "R2"]);
    }

    #[test]
    fn unresolved_skipped_by_default() {
        for mode in [SubstitutionMode::Tokenized, SubstitutionMode::Literal] {
            let config = with_mode(mode, UnresolvedPolicy::Skip);
            let result = evaluate_reaction_calls_with(
                &config,
                &gene_calls(&[("A", GeneCall::High)]),
                &gprs(&[("R1", "A and X"), ("R2", "A")]),
                &genes(&["A"]),
            )
            .unwrap();
            assert!(!result.calls.contains_key("R1"));
            assert_eq!(result.unresolved, IndexSet::from(["R1".to_string()]));
            assert_eq!(result.calls["R2"], RxnCall::High);
        }
    }

    #[test]
    fn unresolved_default_uncertain() {
        let config = with_mode(SubstitutionMode::Tokenized, UnresolvedPolicy::DefaultUncertain);
        // Even a GPR which would be low if X were known is never marked low
        let result = evaluate_reaction_calls_with(
            &config,
            &gene_calls(&[("A", GeneCall::Low), ("X", GeneCall::Low)]),
            &gprs(&[("R1", "A and X")]),
            &genes(&["A"]),
        )
        .unwrap();
        assert_eq!(result.calls["R1"], RxnCall::Uncertain);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn malformed_gpr_is_fatal() {
        let err = evaluate_reaction_calls_with(
            &Configuration::default(),
            &gene_calls(&[("A", GeneCall::High)]),
            &gprs(&[("R1", "A"), ("R_bad", "(A and")]),
            &genes(&["A"]),
        )
        .unwrap_err();
        match err {
            ClassificationError::MalformedFormula { reaction, source } => {
                assert_eq!(reaction, "R_bad");
                assert_eq!(source, GprParseError::ParsingError(ParseError::ExpectedExpression));
            }
        }
    }

    #[test]
    fn outcome_reports_residual() {
        let config = Configuration::default();
        let calls = gene_calls(&[("A", GeneCall::High)]);
        let evaluator = Evaluator {
            config: &config,
            calls: &calls,
            buckets: LengthBuckets::new(["A"]),
        };
        assert_eq!(
            evaluator.evaluate("R1", "(A or X)", Pass::Low).unwrap(),
            Outcome::Unresolved {
                residual: "(1 or X)".to_string(),
                genes: vec!["X".to_string()],
            }
        );
    }

    #[test]
    fn opaque_gene_ids() {
        for mode in [SubstitutionMode::Tokenized, SubstitutionMode::Literal] {
            let config = with_mode(mode, UnresolvedPolicy::Skip);
            let calls = [("abc/1", GeneCall::High), ("5'nt", GeneCall::Low)];
            let model_genes = ["abc/1", "5'nt"];
            assert_eq!(
                call_of(&config, "abc/1 and abc/1", &calls, &model_genes),
                Some(RxnCall::High)
            );
            assert_eq!(
                call_of(&config, "abc/1 and 5'nt", &calls, &model_genes),
                Some(RxnCall::Low)
            );
            let calls = [("G1+G2", GeneCall::Low), ("abc/1", GeneCall::High)];
            assert_eq!(
                call_of(&config, "G1+G2 or abc/1", &calls, &["G1+G2", "abc/1"]),
                Some(RxnCall::High)
            );
        }
    }

    #[test]
    fn digit_gene_ids() {
        for mode in [SubstitutionMode::Tokenized, SubstitutionMode::Literal] {
            let config = with_mode(mode, UnresolvedPolicy::Skip);
            assert_eq!(call_of(&config, "1", &[("1", GeneCall::Low)], &["1"]), Some(RxnCall::Low));
            assert_eq!(call_of(&config, "0", &[("0", GeneCall::High)], &["0"]), Some(RxnCall::High));
        }
    }

    #[test]
    fn unresolved_warning_has_context() {
        let config = with_mode(SubstitutionMode::Tokenized, UnresolvedPolicy::Skip);
        let (result, logs) = with_captured_logs(|| {
            evaluate_reaction_calls_with(
                &config,
                &gene_calls(&[("A", GeneCall::High)]),
                &gprs(&[("R1", "A and X")]),
                &genes(&["A"]),
            )
        });
        assert!(result.unwrap().unresolved.contains("R1"));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("reaction=R1"));
        assert!(logs.contains("pass=low"));
        assert!(logs.contains("residual=1 and X"));
        assert!(logs.contains("genes=[\"X\"]"));
        assert_eq!(logs.matches("replacement error").count(), 1);
    }

    #[test]
    fn unresolved_warns_once_per_reaction() {
        let config = with_mode(SubstitutionMode::Tokenized, UnresolvedPolicy::DefaultUncertain);
        let (result, logs) = with_captured_logs(|| {
            evaluate_reaction_calls_with(
                &config,
                &gene_calls(&[("A", GeneCall::High)]),
                &gprs(&[("R1", "A and X"), ("R2", "A")]),
                &genes(&["A"]),
            )
        });
        let result = result.unwrap();
        assert_eq!(result.calls["R1"], RxnCall::Uncertain);
        assert_eq!(result.calls["R2"], RxnCall::High);
        assert_eq!(logs.matches("replacement error").count(), 1);
        assert!(logs.contains("pass=low"));
        assert!(!logs.contains("pass=high"));
    }
}
