//! autocomplete-core
//!
//! Prefix-indexed suggestion engine shared by the autocomplete front ends.
//!
//! A character trie supplies completions of the word being typed and a
//! frequency-ranked n-gram table supplies multi-word phrases keyed by a
//! leading word. The engine concatenates the two sources per query.
//!
//! Public API:
//! - `PrefixIndex` - Arena-backed character trie
//! - `NGramTable` - Leading word -> phrases, most frequent first
//! - `SuggestionEngine` - Query contract consumed by the UI layer
//! - `EngineHandle` - Shared read handle with whole-index replacement
//! - `Config` - Ranking and loading options
use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

pub mod trie;
pub use trie::{NodeId, NodeSummary, PrefixIndex, TrieNode};

pub mod ngram;
pub use ngram::{NGramEntry, NGramTable};

pub mod engine;
pub use engine::{QueryMiss, SuggestionEngine, Suggestions};

pub mod corpus;
pub use corpus::{LoadStats, NGramRecord};

pub mod layout;
pub use layout::{Bounds, Position, TrieLayout};

pub mod handle;
pub use handle::EngineHandle;

/// Ranking and loading options for the suggestion engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How many trie completions are kept ahead of the n-gram phrases.
    pub head_count: usize,

    /// How many suggestions a front end shows; 0 shows all of them.
    /// The engine itself never applies this limit.
    pub display_limit: usize,

    /// Trailing tokens dropped from every n-gram corpus record
    /// (the `||`-delimited annotation suffix).
    pub ngram_suffix_tokens: usize,

    /// Normalize dictionary words on insertion and the query text before the
    /// trie walk, so "Ação" completes from "acao". N-gram keys are always
    /// normalized.
    pub fold_dictionary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            head_count: 5,
            display_limit: 8,
            ngram_suffix_tokens: 4,
            fold_dictionary: false,
        }
    }
}

impl Config {
    /// Display limit as an option, `None` meaning unlimited.
    pub fn display_limit(&self) -> Option<usize> {
        (self.display_limit > 0).then_some(self.display_limit)
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::char::canonical_combining_class;
    use unicode_normalization::UnicodeNormalization;

    /// Fold case and strip diacritics: lowercase, compatibility-decompose,
    /// then drop every combining mark. "Café" becomes "cafe".
    ///
    /// Total over any input; whitespace is left untouched.
    pub fn normalize(s: &str) -> String {
        s.to_lowercase()
            .nfkd()
            .filter(|&c| canonical_combining_class(c) == 0)
            .collect()
    }
}
