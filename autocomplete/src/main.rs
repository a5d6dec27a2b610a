use anyhow::{Context, Result};
use autocomplete_core::corpus::{load_ngrams, load_words};
use autocomplete_core::{Config, SuggestionEngine, Suggestions, TrieLayout};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autocomplete")]
#[command(about = "Prefix and n-gram word suggestions over a dictionary")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word list, one word per line
    #[arg(long, global = true)]
    words: Option<PathBuf>,

    /// N-gram corpus: `<freq> <words..> <suffix tokens>` per line
    #[arg(long, global = true)]
    ngrams: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trie completions kept ahead of n-gram phrases (overrides config)
    #[arg(long, global = true)]
    head: Option<usize>,

    /// Suggestions shown per query, 0 for all (overrides config)
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Single query for quick testing
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read queries from stdin, one per line
    Repl,
    /// Answer a single query
    Query {
        /// Text typed so far
        text: String,
    },
    /// Print trie node positions for drawing
    Layout {
        /// Pixels per leaf column
        #[arg(long, default_value_t = 60.0)]
        scale_x: f64,
        /// Pixels per level
        #[arg(long, default_value_t = 60.0)]
        scale_y: f64,
        /// Canvas margin in pixels
        #[arg(long, default_value_t = 50.0)]
        margin: f64,
        /// Node circle radius in pixels
        #[arg(long, default_value_t = 15.0)]
        radius: f64,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    suggestions: Vec<String>,
    #[serde(flatten)]
    detail: &'a Suggestions,
}

#[derive(Serialize)]
struct LayoutRow {
    id: usize,
    label: Option<char>,
    is_end: bool,
    children: usize,
    x: f64,
    y: usize,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };
    if let Some(head) = cli.head {
        config.head_count = head;
    }
    if let Some(limit) = cli.limit {
        config.display_limit = limit;
    }
    Ok(config)
}

fn build_engine(cli: &Cli, config: Config) -> Result<SuggestionEngine> {
    let mut engine = SuggestionEngine::with_config(config);

    if cli.words.is_none() && cli.ngrams.is_none() {
        warn!("no --words or --ngrams given, using demo dictionary");
        load_demo(&mut engine);
        return Ok(engine);
    }

    if let Some(path) = &cli.words {
        load_words(&mut engine, path)?;
    }
    if let Some(path) = &cli.ngrams {
        load_ngrams(&mut engine, path)?;
    }

    info!(
        words = engine.index().len(),
        nodes = engine.index().node_count(),
        ngram_keys = engine.ngrams().len(),
        ngram_phrases = engine.ngrams().total_entries(),
        "suggestion index ready"
    );
    Ok(engine)
}

fn load_demo(engine: &mut SuggestionEngine) {
    for word in ["casa", "casaco", "casamento", "carro", "cão", "gato", "gatinho"] {
        engine.insert(word);
    }
    engine.insert_ngram(&["casa", "nova"], 75);
    engine.insert_ngram(&["casa", "de", "praia"], 40);
    engine.insert_ngram(&["gato", "preto"], 12);
}

fn print_query(engine: &SuggestionEngine, text: &str, json: bool) -> Result<()> {
    let detail = engine.suggest(text);
    let shown = detail.display(engine.config().display_limit());

    if json {
        let report = QueryReport {
            query: text,
            suggestions: shown,
            detail: &detail,
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("  (no suggestions)");
    } else {
        for (i, s) in shown.iter().enumerate() {
            println!("  {}. {}", i + 1, s);
        }
    }
    Ok(())
}

fn run_repl(engine: &SuggestionEngine, json: bool) -> Result<()> {
    if !json {
        println!("autocomplete - type text and press Enter, Ctrl-D to exit.");
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        print_query(engine, &line, json)?;
        io::stdout().flush()?;
    }
    Ok(())
}

fn print_layout(
    engine: &SuggestionEngine,
    json: bool,
    scale: (f64, f64),
    margin: f64,
    radius: f64,
) -> Result<()> {
    let index = engine.index();
    let layout = TrieLayout::compute(index);

    let rows: Vec<LayoutRow> = layout
        .iter()
        .map(|(id, pos)| {
            let summary = index.summary(id);
            LayoutRow {
                id: id.index(),
                label: summary.label,
                is_end: summary.is_end,
                children: summary.child_count,
                x: pos.x,
                y: pos.y,
            }
        })
        .collect();
    let (left, top, right, bottom) = layout.bounds().to_canvas(scale.0, scale.1, margin, radius);

    if json {
        let out = serde_json::json!({
            "nodes": rows,
            "scroll_region": [left, top, right, bottom],
        });
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    for row in &rows {
        let label = row.label.map(String::from).unwrap_or_else(|| "root".to_string());
        let end = if row.is_end { "*" } else { "" };
        println!(
            "{:>5} {:<5}{:<1} x={:<8.2} y={:<3} children={}",
            row.id, label, end, row.x, row.y, row.children
        );
    }
    println!(
        "scroll region: ({:.1}, {:.1}) - ({:.1}, {:.1})",
        left, top, right, bottom
    );
    Ok(())
}

/// Filter from a `RUST_LOG`-style directive string, `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(Commands::Config) = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let engine = build_engine(&cli, config)?;

    match &cli.command {
        Some(Commands::Repl) => run_repl(&engine, cli.json),
        Some(Commands::Query { text }) => print_query(&engine, text, cli.json),
        Some(Commands::Layout {
            scale_x,
            scale_y,
            margin,
            radius,
        }) => print_layout(&engine, cli.json, (*scale_x, *scale_y), *margin, *radius),
        Some(Commands::Config) => Ok(()),
        None => match &cli.input {
            Some(text) => print_query(&engine, text, cli.json),
            None => run_repl(&engine, cli.json),
        },
    }
}
