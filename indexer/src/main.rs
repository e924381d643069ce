use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use search_core::{build_and_persist, DirCorpus, IndexHandle, IndexStore, ScoredResult, SearchConfig, SearchEngine, TraceStep};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query an inverted index over a folder of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Folder holding the documents
    #[arg(long, default_value = "./data")]
    data: String,
    /// Extension of documents to index
    #[arg(long, default_value = "txt")]
    extension: String,
}

#[derive(Args)]
struct IndexArgs {
    /// Index file path
    #[arg(long, default_value = "./index.json")]
    index: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from every document in the data folder
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Output index file
        #[arg(long, default_value = "./index.json")]
        output: String,
    },
    /// Run one query and print ranked results
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        index: IndexArgs,
        /// Snippet length in characters
        #[arg(long, default_value_t = 160)]
        snippet_len: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Query, e.g. `computer science` (AND) or `computer OR science`
        query: Vec<String>,
    },
    /// Show which indexed terms equal the query exactly
    Trace {
        #[command(flatten)]
        index: IndexArgs,
        /// Only print matching terms
        #[arg(long, default_value_t = false)]
        matches_only: bool,
        query: String,
    },
    /// Interactive keyword search; builds the index first if it is missing
    Repl {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, output } => {
            let terms = build_and_persist(&DirCorpus::new(&corpus.data, corpus.extension), &IndexStore::new(&output))?;
            println!("Index built successfully. ({terms} unique words)");
            Ok(())
        }
        Commands::Search { corpus, index, snippet_len, json, query } => {
            let config = SearchConfig { snippet_len, extension: corpus.extension.clone(), ..SearchConfig::default() };
            let engine = engine(&corpus, &index, config);
            let results = engine.search(&query.join(" "))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
            Ok(())
        }
        Commands::Trace { index, matches_only, query } => {
            let steps = trace_steps(&index.index, &query)?;
            for step in steps.iter().filter(|s| !matches_only || s.matched) {
                println!("{}\t{}", if step.matched { "MATCH" } else { "-" }, step.term);
            }
            Ok(())
        }
        Commands::Repl { corpus, index } => {
            let config = SearchConfig { extension: corpus.extension.clone(), ..SearchConfig::default() };
            repl(&engine(&corpus, &index, config))
        }
    }
}

fn engine(corpus: &CorpusArgs, index: &IndexArgs, config: SearchConfig) -> SearchEngine<DirCorpus> {
    let handle = IndexHandle::new(IndexStore::new(&index.index));
    SearchEngine::new(handle, DirCorpus::new(&corpus.data, config.extension.clone()), config)
}

/// Trace against the index at `path`; an empty query yields no steps without touching the index.
fn trace_steps(path: &str, query: &str) -> Result<Vec<TraceStep>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let handle = IndexHandle::new(IndexStore::new(path));
    Ok(search_core::trace(query, &*handle.get()?))
}

fn print_results(results: &[ScoredResult]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }
    println!("Found in {} file(s):", results.len());
    for r in results {
        println!("  - {} (score={:.6}, hits={})", r.file, r.score, r.hits);
        println!("      {}", r.snippet);
    }
}

fn repl(engine: &SearchEngine<DirCorpus>) -> Result<()> {
    if let Some(terms) = engine.ensure_index()? {
        println!("Index built automatically. ({terms} unique words)");
    }
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nEnter keyword (or 'exit'): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let keyword = line?.trim().to_lowercase();
        if keyword == "exit" {
            break;
        }
        match engine.search(&keyword) {
            Ok(results) if results.is_empty() => println!("No results found."),
            Ok(results) => {
                println!("Found in {} file(s):", results.len());
                for r in &results {
                    println!("  - {}", r.file);
                }
            }
            Err(e) => tracing::error!(error = %e, "search failed"),
        }
    }
    println!("Exiting.");
    Ok(())
}
