use clap::Parser;
use rhyme_core::config::log_filter;
use rhyme_core::persistence::{load_corpus_json, load_snapshot};
use rhyme_core::{QueryOutcome, RhymeConfig, RhymeEngine, RhymeError};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Line protocol for driving the engine from another process.
///
/// Commands, one per line:
///   LOAD <corpus.json>    rebuild the index from a corpus feed
///   QUERY <word>          rhymes at the auto-detected depth
///   DEPTH <n> <word>      rhymes at depth n
///   EXIT
/// Every command except EXIT answers with exactly one JSON line.
#[derive(Parser, Debug)]
#[command(name = "rhyme_pipe")]
struct Args {
    /// Corpus to load before reading commands
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Index snapshot to load before reading commands
    #[arg(long, conflicts_with = "corpus")]
    snapshot: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
enum Reply {
    Loaded { words: usize },
    Outcome { outcome: QueryOutcome },
    Error { message: String },
}

fn main() -> Result<(), RhymeError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RhymeConfig::from_json_file(path)?,
        None => RhymeConfig::default(),
    };
    let engine = match &args.snapshot {
        Some(path) => load_snapshot(path, config)?,
        None => RhymeEngine::with_config(config)?,
    };
    if let Some(path) = &args.corpus {
        engine.build_index(&load_corpus_json(path)?);
    }

    info!("rhyme pipe ready");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        let (command, rest) = match input.trim().split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input.trim(), ""),
        };

        let reply = match command {
            "LOAD" => load(&engine, Path::new(rest)),
            "QUERY" => engine.query(rest).map(|outcome| Reply::Outcome { outcome }),
            "DEPTH" => match rest.split_once(' ') {
                Some((n, word)) => match n.parse::<usize>() {
                    Ok(depth) => engine
                        .query_at_depth(word.trim(), depth)
                        .map(|outcome| Reply::Outcome { outcome }),
                    Err(_) => Ok(Reply::Error { message: format!("bad depth '{}'", n) }),
                },
                None => Ok(Reply::Error { message: "usage: DEPTH <n> <word>".to_string() }),
            },
            "EXIT" => {
                info!("received EXIT");
                break;
            }
            "" => continue,
            other => {
                warn!(command = other, "unknown command");
                Ok(Reply::Error { message: format!("unknown command '{}'", other) })
            }
        };

        let reply = reply.unwrap_or_else(|e| Reply::Error { message: e.to_string() });
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    info!("shutting down");
    Ok(())
}

fn load(engine: &RhymeEngine, path: &Path) -> Result<Reply, RhymeError> {
    let documents = load_corpus_json(path)?;
    engine.build_index(&documents);
    let words = engine.corpus()?.index().len();
    Ok(Reply::Loaded { words })
}
