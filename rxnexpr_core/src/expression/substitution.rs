//! Replace gene ids inside a GPR with the logic literals their calls translate to
//!
//! Two flavours are provided. Token substitution lexes the GPR and swaps identifier tokens whose
//! text is exactly a gene id, so one id can never clobber part of another. Literal substitution
//! is plain substring replacement over the GPR string; it is only safe when buckets are applied
//! longest id first.
use indexmap::{IndexMap, IndexSet};

use crate::expression::{CallTranslation, GeneCall, LogicLiteral};
use crate::gpr::lexer::LexerError;
use crate::gpr::lex_gpr;
use crate::gpr::token::{render_tokens, Token};

/// Translates genes into literals for a single pass
#[derive(Clone, Copy, Debug)]
pub struct Substituter<'c> {
    /// Map of gene ids to gene calls
    calls: &'c IndexMap<String, GeneCall>,
    /// Rules for the current pass
    translation: CallTranslation,
    /// Call assumed for genes without an entry in `calls`
    missing_call: GeneCall,
}

impl<'c> Substituter<'c> {
    pub fn new(
        calls: &'c IndexMap<String, GeneCall>,
        translation: CallTranslation,
        missing_call: GeneCall,
    ) -> Self {
        Substituter {
            calls,
            translation,
            missing_call,
        }
    }

    /// Literal substituted for `gene`
    pub fn literal_for(&self, gene: &str) -> LogicLiteral {
        let call = self.calls.get(gene).copied().unwrap_or(self.missing_call);
        self.translation.translate(call)
    }

    /// Replace every identifier token which is one of `ids`
    pub fn substitute_tokens(&self, tokens: &mut [Token], ids: &IndexSet<String>) {
        for token in tokens.iter_mut() {
            let literal = match token {
                Token::Identifier(id) if ids.contains(id.as_str()) => self.literal_for(id),
                _ => continue,
            };
            *token = Token::Literal(literal);
        }
    }

    /// Replace every occurrence of each of `ids` as a raw substring of `gpr`
    pub fn substitute_literal(&self, gpr: &str, ids: &IndexSet<String>) -> String {
        let mut gpr = gpr.to_string();
        for id in ids {
            if gpr.contains(id.as_str()) {
                gpr = gpr.replace(id.as_str(), &self.literal_for(id).to_string());
            }
        }
        gpr
    }
}

/// Substitute the genes in `ids` into `gpr` by token identity
///
/// Genes without a call are treated as uncertain.
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use rxnexpr_core::expression::{CallTranslation, GeneCall};
/// use rxnexpr_core::expression::substitution::substitute_formula;
/// let calls = IndexMap::from([("G1".to_string(), GeneCall::Low), ("G10".to_string(), GeneCall::High)]);
/// let gpr = substitute_formula("G10 or G1", ["G1", "G10"], &calls, &CallTranslation::LOW_PASS).unwrap();
/// assert_eq!(gpr, "1 or 0");
/// ```
pub fn substitute_formula<I, S>(
    gpr: &str,
    ids: I,
    calls: &IndexMap<String, GeneCall>,
    translation: &CallTranslation,
) -> Result<String, LexerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids = collect_ids(ids);
    let mut tokens = lex_gpr(gpr)?;
    Substituter::new(calls, *translation, GeneCall::Uncertain).substitute_tokens(&mut tokens, &ids);
    Ok(render_tokens(&tokens))
}

/// Substitute the genes in `ids` into `gpr` by raw substring replacement
///
/// Genes without a call are treated as uncertain. Whitespace and layout of `gpr` are kept.
pub fn substitute_formula_literal<I, S>(
    gpr: &str,
    ids: I,
    calls: &IndexMap<String, GeneCall>,
    translation: &CallTranslation,
) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids = collect_ids(ids);
    Substituter::new(calls, *translation, GeneCall::Uncertain).substitute_literal(gpr, &ids)
}

fn collect_ids<I, S>(ids: I) -> IndexSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter().map(|id| id.as_ref().to_string()).collect()
}
