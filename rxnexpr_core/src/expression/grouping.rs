//! Group gene ids by their length
//!
//! Some gene ids are part of others (e.g. `YCR024C` and `YCR024C-A` in yeast), so when genes
//! are substituted into a GPR string the long ids have to be replaced before the short ones.
use std::collections::BTreeMap;

use indexmap::IndexSet;

/// Group gene ids by their length (counted in characters)
///
/// # Examples
/// ```rust
/// use rxnexpr_core::expression::grouping::group_identifiers_by_length;
/// let groups = group_identifiers_by_length(["G1", "G10", "G2"]);
/// assert_eq!(groups[&2].len(), 2);
/// assert!(groups[&3].contains("G10"));
/// ```
pub fn group_identifiers_by_length<I, S>(ids: I) -> BTreeMap<usize, IndexSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut by_length: BTreeMap<usize, IndexSet<String>> = BTreeMap::new();
    for id in ids {
        let id = id.as_ref();
        by_length
            .entry(id.chars().count())
            .or_default()
            .insert(id.to_string());
    }
    by_length
}

/// Gene ids grouped by length, iterated longest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LengthBuckets {
    buckets: BTreeMap<usize, IndexSet<String>>,
}

impl LengthBuckets {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LengthBuckets {
            buckets: group_identifiers_by_length(ids),
        }
    }

    /// Distinct id lengths, sorted descending
    pub fn lengths(&self) -> Vec<usize> {
        self.buckets.keys().rev().copied().collect()
    }

    /// Buckets in substitution order (strictly descending length)
    pub fn iter(&self) -> impl Iterator<Item = (usize, &IndexSet<String>)> {
        self.buckets.iter().rev().map(|(length, ids)| (*length, ids))
    }

    /// Bucket holding ids of exactly `length` characters
    pub fn get(&self, length: usize) -> Option<&IndexSet<String>> {
        self.buckets.get(&length)
    }

    /// Whether `id` is one of the grouped ids
    pub fn contains(&self, id: &str) -> bool {
        self.buckets
            .get(&id.chars().count())
            .is_some_and(|bucket| bucket.contains(id))
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
