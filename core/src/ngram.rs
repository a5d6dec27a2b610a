//! Frequency-ranked n-gram phrases keyed by their leading word.
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::normalize;

/// A phrase and the corpus frequency it was recorded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NGramEntry {
    pub phrase: String,
    pub frequency: u64,
}

/// Leading word -> phrases starting with it, most frequent first.
///
/// Both keys and phrases are stored normalized (see [`normalize`]), so
/// lookups with "Café" and "cafe" land in the same bucket.
///
/// # Example
/// ```
/// use autocomplete_core::ngram::NGramTable;
///
/// let mut table = NGramTable::new();
/// table.insert(&["the", "cat"], 5);
/// table.insert(&["the", "dog"], 9);
///
/// assert_eq!(table.phrases("the"), vec!["the dog", "the cat"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NGramTable {
    buckets: AHashMap<String, Vec<NGramEntry>>,
}

impl NGramTable {
    pub fn new() -> Self {
        Self {
            buckets: AHashMap::new(),
        }
    }

    /// Record an n-gram.
    ///
    /// The new entry goes after every entry with an equal or higher
    /// frequency, which keeps equal frequencies in insertion order.
    /// An empty word list is ignored.
    pub fn insert<S: AsRef<str>>(&mut self, words: &[S], frequency: u64) {
        let Some(first) = words.first() else {
            debug!("ignoring n-gram with no words");
            return;
        };

        let key = normalize(first.as_ref());
        let joined = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        let entry = NGramEntry {
            phrase: normalize(&joined),
            frequency,
        };

        let bucket = self.buckets.entry(key).or_default();
        let pos = bucket.partition_point(|e| e.frequency >= frequency);
        bucket.insert(pos, entry);
    }

    /// Entries for `key` in ranking order, empty if the key is unknown.
    pub fn lookup(&self, key: &str) -> &[NGramEntry] {
        self.buckets
            .get(&normalize(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Phrases for `key` in ranking order.
    pub fn phrases(&self, key: &str) -> Vec<String> {
        self.lookup(key).iter().map(|e| e.phrase.clone()).collect()
    }

    /// Number of distinct leading words.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of phrases across all buckets.
    pub fn total_entries(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }
}
