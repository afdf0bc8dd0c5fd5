use indexmap::{IndexMap, IndexSet};
use proptest::prelude::*;
use rxnexpr_core::expression::classifier::classify_by_expression_with;
use rxnexpr_core::expression::grouping::group_identifiers_by_length;
use rxnexpr_core::{Configuration, GeneCall, SubstitutionMode};

fn gene_call() -> impl Strategy<Value = GeneCall> {
    prop_oneof![
        Just(GeneCall::Low),
        Just(GeneCall::Uncertain),
        Just(GeneCall::High),
    ]
}

/// Gene ids sharing prefixes on purpose, e.g. G1, G10, G1/, G10'
fn gene_ids() -> impl Strategy<Value = IndexSet<String>> {
    let suffix = prop::sample::select(vec!["", "", "/", "'", "+", "#", "/1"]);
    prop::collection::vec((1u32..200, suffix), 1..12).prop_map(|ids| {
        ids.into_iter()
            .map(|(n, suffix)| format!("G{}{}", n, suffix))
            .collect()
    })
}

/// A random GPR over `genes`, as a string
fn gpr_over(genes: Vec<String>) -> impl Strategy<Value = String> {
    prop::sample::select(genes).prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{} and {}", l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{} or {}", l, r)),
            inner.prop_map(|e| format!("({})", e)),
        ]
    })
}

type Inputs = (
    IndexMap<String, GeneCall>,
    IndexMap<String, String>,
    IndexSet<String>,
);

fn inputs() -> impl Strategy<Value = Inputs> {
    gene_ids().prop_flat_map(|genes| {
        let listed: Vec<String> = genes.iter().cloned().collect();
        let calls = prop::collection::vec(prop::option::of(gene_call()), listed.len()).prop_map({
            let listed = listed.clone();
            move |calls| {
                listed
                    .iter()
                    .zip(calls)
                    .filter_map(|(id, call)| call.map(|c| (id.clone(), c)))
                    .collect::<IndexMap<String, GeneCall>>()
            }
        });
        let gprs = prop::collection::vec(
            prop_oneof![4 => gpr_over(listed.clone()), 1 => Just(String::new())],
            1..10,
        )
        .prop_map(|rules| {
            rules
                .into_iter()
                .enumerate()
                .map(|(i, rule)| (format!("R{}", i), rule))
                .collect::<IndexMap<String, String>>()
        });
        (calls, gprs, Just(genes))
    })
}

fn config(substitution: SubstitutionMode) -> Configuration {
    Configuration {
        substitution,
        ..Configuration::default()
    }
}

proptest! {
    #[test]
    fn buckets_partition_genes(genes in prop::collection::hash_set("[A-Za-z0-9_-]{1,12}", 0..40)) {
        let groups = group_identifiers_by_length(&genes);
        let mut seen = 0;
        for (length, bucket) in &groups {
            prop_assert!(!bucket.is_empty());
            for id in bucket {
                prop_assert_eq!(id.chars().count(), *length);
                prop_assert!(genes.contains(id));
            }
            seen += bucket.len();
        }
        prop_assert_eq!(seen, genes.len());
        let lengths: std::collections::HashSet<usize> = genes.iter().map(|g| g.chars().count()).collect();
        prop_assert_eq!(groups.len(), lengths.len());
    }

    #[test]
    fn every_associated_reaction_gets_one_tier((calls, gprs, genes) in inputs()) {
        let result = classify_by_expression_with(
            &config(SubstitutionMode::Tokenized), &calls, &gprs, &genes,
        ).unwrap();
        prop_assert!(result.unresolved.is_empty());
        for (rxn, gpr) in &gprs {
            let hits = [&result.low, &result.uncertain, &result.high]
                .iter()
                .filter(|set| set.contains(rxn))
                .count();
            if gpr.is_empty() {
                prop_assert_eq!(hits, 0);
            } else {
                prop_assert_eq!(hits, 1);
            }
        }
    }

    #[test]
    fn classification_is_idempotent((calls, gprs, genes) in inputs()) {
        let config = Configuration::default();
        let first = classify_by_expression_with(&config, &calls, &gprs, &genes).unwrap();
        let second = classify_by_expression_with(&config, &calls, &gprs, &genes).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn literal_matches_tokenized_longest_first((calls, gprs, genes) in inputs()) {
        let tokenized = classify_by_expression_with(
            &config(SubstitutionMode::Tokenized), &calls, &gprs, &genes,
        ).unwrap();
        let literal = classify_by_expression_with(
            &config(SubstitutionMode::Literal), &calls, &gprs, &genes,
        ).unwrap();
        prop_assert_eq!(tokenized, literal);
    }
}
