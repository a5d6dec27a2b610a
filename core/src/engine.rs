//! Suggestion engine: trie completions followed by n-gram phrases.
//!
//! The engine owns one [`PrefixIndex`] and one [`NGramTable`]. It is filled
//! once through [`SuggestionEngine::insert`] and
//! [`SuggestionEngine::insert_ngram`] and is read-only afterwards, so a
//! finished engine can be shared across threads behind an `Arc`.
use serde::Serialize;
use tracing::{debug, trace};

use crate::ngram::NGramTable;
use crate::trie::PrefixIndex;
use crate::utils::normalize;
use crate::Config;

/// Why part (or all) of a query came back empty.
///
/// None of these are errors; they only explain an empty contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMiss {
    /// The text had no tokens after stripping whitespace.
    EmptyQuery,
    /// The last token has no path in the trie.
    PrefixMiss,
    /// The last token is not a key of the n-gram table.
    NoNGramMatch,
}

/// Result of one query, with the two sources kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    /// Ranked trie completions, already cut to the head count.
    pub trie: Vec<String>,
    /// N-gram phrases for the last token, most frequent first.
    pub ngram: Vec<String>,
    misses: Vec<QueryMiss>,
}

impl Suggestions {
    fn empty_query() -> Self {
        Self {
            misses: vec![QueryMiss::EmptyQuery],
            ..Self::default()
        }
    }

    pub fn misses(&self) -> &[QueryMiss] {
        &self.misses
    }

    pub fn is_miss(&self, miss: QueryMiss) -> bool {
        self.misses.contains(&miss)
    }

    pub fn len(&self) -> usize {
        self.trie.len() + self.ngram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty() && self.ngram.is_empty()
    }

    /// Trie completions, then n-gram phrases. Duplicates are kept.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.trie.iter().chain(self.ngram.iter()).map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        let mut out = self.trie;
        out.extend(self.ngram);
        out
    }

    /// The concatenated list cut to what a front end shows.
    pub fn display(&self, limit: Option<usize>) -> Vec<String> {
        let limit = limit.unwrap_or(usize::MAX);
        self.iter().take(limit).map(str::to_string).collect()
    }
}

/// Dictionary trie plus n-gram table behind a single query.
///
/// # Example
/// ```
/// use autocomplete_core::SuggestionEngine;
///
/// let mut engine = SuggestionEngine::new();
/// for word in ["cat", "cats", "car"] {
///     engine.insert(word);
/// }
/// engine.insert_ngram(&["ca", "va"], 2);
///
/// assert_eq!(
///     engine.get_suggestions("ca"),
///     vec!["car", "cat", "cats", "ca va"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    index: PrefixIndex,
    ngrams: NGramTable,
    config: Config,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            index: PrefixIndex::new(),
            ngrams: NGramTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn ngrams(&self) -> &NGramTable {
        &self.ngrams
    }

    /// Add a dictionary word. Callers strip whitespace and skip blank lines.
    pub fn insert(&mut self, word: &str) {
        if self.config.fold_dictionary {
            self.index.insert(&normalize(word));
        } else {
            self.index.insert(word);
        }
    }

    /// Add an n-gram under its own first word.
    pub fn insert_ngram<S: AsRef<str>>(&mut self, words: &[S], frequency: u64) {
        self.ngrams.insert(words, frequency);
    }

    /// Suggestions for `text` with the configured head count.
    pub fn get_suggestions(&self, text: &str) -> Vec<String> {
        self.suggest(text).into_vec()
    }

    /// Suggestions for `text` keeping at most `head` trie completions.
    pub fn get_suggestions_with_head(&self, text: &str, head: usize) -> Vec<String> {
        self.suggest_with_head(text, head).into_vec()
    }

    pub fn suggest(&self, text: &str) -> Suggestions {
        self.suggest_with_head(text, self.config.head_count)
    }

    /// Run a query and keep the two sources apart.
    ///
    /// Trie completions are rooted at the whole stripped text, so earlier
    /// words typed by the user are preserved, and ranked by how many
    /// characters they add, then alphabetically. N-gram phrases are looked
    /// up by the last token and appended untruncated.
    pub fn suggest_with_head(&self, text: &str, head: usize) -> Suggestions {
        let stripped = text.trim();
        let prefix = if self.config.fold_dictionary {
            normalize(stripped)
        } else {
            stripped.to_string()
        };

        let Some(last_token) = prefix.split_whitespace().last() else {
            trace!("empty query");
            return Suggestions::empty_query();
        };

        let mut misses = Vec::new();

        let trie = match self.index.find_node(last_token) {
            Some(node) => {
                let prefix_len = prefix.chars().count();
                let mut found = self.index.collect(node, &prefix);
                found.sort_by(|(a, a_len), (b, b_len)| {
                    (a_len - prefix_len, a).cmp(&(b_len - prefix_len, b))
                });
                found.truncate(head);
                found.into_iter().map(|(word, _)| word).collect()
            }
            None => {
                misses.push(QueryMiss::PrefixMiss);
                Vec::new()
            }
        };

        let ngram = self.ngrams.phrases(last_token);
        if ngram.is_empty() {
            misses.push(QueryMiss::NoNGramMatch);
        }

        debug!(
            query = %prefix,
            token = %last_token,
            trie = trie.len(),
            ngram = ngram.len(),
            "suggestions"
        );

        Suggestions {
            trie,
            ngram,
            misses,
        }
    }
}
