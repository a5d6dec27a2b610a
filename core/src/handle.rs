//! Shared, swappable access to a finished [`SuggestionEngine`].
//!
//! Queries run against an `Arc` snapshot and never hold the lock while
//! ranking. Reindexing builds a fresh engine off to the side and swaps it in
//! whole; individual trie nodes are never mutated under readers.
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::engine::{SuggestionEngine, Suggestions};

#[derive(Debug, Clone)]
pub struct EngineHandle {
    inner: Arc<RwLock<Arc<SuggestionEngine>>>,
}

impl EngineHandle {
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Current engine. The snapshot stays valid after a later `replace`.
    pub fn snapshot(&self) -> Arc<SuggestionEngine> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a rebuilt engine and return the previous one.
    pub fn replace(&self, engine: SuggestionEngine) -> Arc<SuggestionEngine> {
        let words = engine.index().len();
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let old = std::mem::replace(&mut *guard, Arc::new(engine));
        info!(words, "replaced suggestion index");
        old
    }

    pub fn get_suggestions(&self, text: &str) -> Vec<String> {
        self.snapshot().get_suggestions(text)
    }

    pub fn suggest(&self, text: &str) -> Suggestions {
        self.snapshot().suggest(text)
    }
}
