// core/src/corpus.rs
//
// Loaders for the two text corpora the engine is built from:
// - word list: one word per line, blank lines ignored
// - n-gram corpus: `<freq> <word_1> .. <word_k> <suffix tokens>` per line
//
// Malformed lines are skipped and counted; only I/O failures are errors.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use crate::engine::SuggestionEngine;

/// One parsed n-gram corpus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGramRecord {
    pub frequency: u64,
    pub words: Vec<String>,
}

/// Outcome of loading one corpus file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub loaded: usize,
    pub skipped: usize,
}

/// Parse a single n-gram corpus line.
///
/// Returns `None` for lines with fewer than three tokens, a non-integer
/// frequency, or no words left once the first token and the trailing
/// `suffix_tokens` tokens are removed.
///
/// Frequencies are unsigned counts, so a negative frequency makes the line
/// malformed.
///
/// # Example
/// ```
/// use autocomplete_core::corpus::parse_ngram_line;
///
/// let rec = parse_ngram_line("42 bom dia a todos || 1 2 3", 4).unwrap();
/// assert_eq!(rec.frequency, 42);
/// assert_eq!(rec.words, vec!["bom", "dia", "a", "todos"]);
/// ```
pub fn parse_ngram_line(line: &str, suffix_tokens: usize) -> Option<NGramRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let frequency = parts[0].parse::<u64>().ok()?;
    let end = parts.len().checked_sub(suffix_tokens)?;
    if end <= 1 {
        return None;
    }
    let words = parts[1..end].iter().map(|s| s.to_string()).collect();
    Some(NGramRecord { frequency, words })
}

/// Feed a word list into `engine`, one trimmed word per non-blank line.
pub fn read_words<R: BufRead>(engine: &mut SuggestionEngine, reader: R) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for line in reader.lines() {
        let line = line.context("failed to read word list line")?;
        let word = line.trim();
        if word.is_empty() {
            stats.skipped += 1;
            continue;
        }
        engine.insert(word);
        stats.loaded += 1;
    }
    Ok(stats)
}

/// Feed an n-gram corpus into `engine`.
///
/// The number of trailing tokens dropped per line comes from the engine's
/// config.
pub fn read_ngrams<R: BufRead>(engine: &mut SuggestionEngine, reader: R) -> Result<LoadStats> {
    let suffix_tokens = engine.config().ngram_suffix_tokens;
    let mut stats = LoadStats::default();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read n-gram line {}", line_num + 1))?;
        if line.trim().is_empty() {
            stats.skipped += 1;
            continue;
        }
        match parse_ngram_line(&line, suffix_tokens) {
            Some(rec) => {
                engine.insert_ngram(&rec.words, rec.frequency);
                stats.loaded += 1;
            }
            None => {
                warn!(line = line_num + 1, content = %line, "skipping malformed n-gram record");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

/// Load a word list file.
pub fn load_words<P: AsRef<Path>>(engine: &mut SuggestionEngine, path: P) -> Result<LoadStats> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open word list {}", path.display()))?;
    let stats = read_words(engine, BufReader::new(file))
        .with_context(|| format!("while loading {}", path.display()))?;
    info!(
        path = %path.display(),
        loaded = stats.loaded,
        skipped = stats.skipped,
        "loaded word list"
    );
    Ok(stats)
}

/// Load an n-gram corpus file.
pub fn load_ngrams<P: AsRef<Path>>(engine: &mut SuggestionEngine, path: P) -> Result<LoadStats> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open n-gram corpus {}", path.display()))?;
    let stats = read_ngrams(engine, BufReader::new(file))
        .with_context(|| format!("while loading {}", path.display()))?;
    info!(
        path = %path.display(),
        loaded = stats.loaded,
        skipped = stats.skipped,
        "loaded n-gram corpus"
    );
    Ok(stats)
}
