// core/tests/suggestion_properties.rs
//
// End-to-end checks of the query contract against a small Portuguese corpus:
// - every dictionary word completes to itself
// - trie completions extend the typed text and are ranked by added length
// - n-gram phrases follow the trie completions in frequency order
// - blank queries and misses degrade to empty lists

use autocomplete_core::corpus::{read_ngrams, read_words};
use autocomplete_core::{Config, QueryMiss, SuggestionEngine};
use std::io::Cursor;

const WORDS: &str = "\
casa
casaco
casamento
carro
carroça
cão
gato
gatinho

pão
";

const NGRAMS: &str = "\
40 casa de praia || 0 0 0
75 casa nova || 0 0 0
40 casa grande || 0 0 0
12 gato preto || 0 0 0
30 pão de queijo || 0 0 0
9 café com leite || 0 0 0
";

fn build(config: Config) -> SuggestionEngine {
    let mut engine = SuggestionEngine::with_config(config);
    read_words(&mut engine, Cursor::new(WORDS)).unwrap();
    read_ngrams(&mut engine, Cursor::new(NGRAMS)).unwrap();
    engine
}

#[test]
fn every_word_completes_to_itself() {
    let engine = build(Config::default());
    for word in WORDS.lines().map(str::trim).filter(|w| !w.is_empty()) {
        let s = engine.suggest_with_head(word, usize::MAX);
        assert!(
            s.trie.iter().any(|c| c == word),
            "{word} missing from {:?}",
            s.trie
        );
    }
}

#[test]
fn completions_extend_the_typed_text() {
    let engine = build(Config::default());
    for prefix in ["c", "ca", "car", "ga", "vou de car"] {
        let s = engine.suggest_with_head(prefix, usize::MAX);
        assert!(!s.trie.is_empty(), "no completions for {prefix}");
        for c in &s.trie {
            assert!(c.starts_with(prefix), "{c} does not extend {prefix}");
        }
    }
}

#[test]
fn completions_ranked_by_added_length_then_alphabetically() {
    let engine = build(Config::default());
    let s = engine.suggest_with_head("ca", usize::MAX);

    let keys: Vec<(usize, &str)> = s
        .trie
        .iter()
        .map(|c| (c.chars().count() - 2, c.as_str()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    assert_eq!(
        s.trie,
        vec!["casa", "carro", "casaco", "carroça", "casamento"]
    );
}

#[test]
fn accented_letter_is_its_own_branch() {
    let engine = build(Config::default());

    // "cão" walks c -> ã -> o, so "ca" never reaches it
    let s = engine.suggest_with_head("ca", usize::MAX);
    assert!(!s.trie.iter().any(|c| c == "cão"));

    let s = engine.suggest_with_head("c", usize::MAX);
    assert_eq!(
        s.trie,
        vec!["cão", "casa", "carro", "casaco", "carroça", "casamento"]
    );
}

#[test]
fn head_count_limits_only_the_trie_part() {
    let engine = build(Config::default());
    let got = engine.get_suggestions("casa");

    assert_eq!(
        got,
        vec![
            "casa",
            "casaco",
            "casamento",
            "casa nova",
            "casa de praia",
            "casa grande",
        ]
    );

    let got = engine.get_suggestions_with_head("casa", 1);
    assert_eq!(got, vec!["casa", "casa nova", "casa de praia", "casa grande"]);
}

#[test]
fn head_count_comes_from_config() {
    let engine = build(Config {
        head_count: 2,
        ..Config::default()
    });
    let s = engine.suggest("ca");
    assert_eq!(s.trie, vec!["casa", "carro"]);
}

#[test]
fn blank_queries_are_empty() {
    let engine = build(Config::default());
    assert!(engine.get_suggestions("").is_empty());
    assert!(engine.get_suggestions("   ").is_empty());
    assert_eq!(engine.suggest(" ").misses(), &[QueryMiss::EmptyQuery]);
}

#[test]
fn prefix_miss_returns_only_ngrams() {
    let mut engine = SuggestionEngine::new();
    engine.insert("dog");
    engine.insert_ngram(&["cat", "nap"], 3);

    assert_eq!(engine.get_suggestions("cat"), vec!["cat nap"]);
}

#[test]
fn ngram_bucket_found_with_or_without_accents() {
    let engine = build(Config::default());

    let accented = engine.suggest("café");
    let plain = engine.suggest("cafe");
    assert_eq!(accented.ngram, vec!["cafe com leite"]);
    assert_eq!(plain.ngram, accented.ngram);

    // "pão" is in the dictionary verbatim, its phrase is stored folded
    assert_eq!(engine.get_suggestions("pão"), vec!["pão", "pao de queijo"]);
}

#[test]
fn ngram_lookup_uses_last_token() {
    let engine = build(Config::default());
    let s = engine.suggest("meu gato");

    assert_eq!(s.trie, vec!["meu gato"]);
    assert_eq!(s.ngram, vec!["gato preto"]);
}

#[test]
fn folded_dictionary_matches_unaccented_typing() {
    let engine = build(Config {
        fold_dictionary: true,
        ..Config::default()
    });

    assert_eq!(engine.suggest("cao").trie, vec!["cao"]);
    assert_eq!(
        engine.suggest_with_head("Carro", usize::MAX).trie,
        vec!["carro", "carroca"]
    );
}
