use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use rhyme_core::config::log_filter;
use rhyme_core::core::grouper::split_stem;
use rhyme_core::persistence::{load_corpus_json, load_snapshot, save_snapshot};
use rhyme_core::{QueryOutcome, RhymeConfig, RhymeEngine, RhymeError, RhymeResult};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

const TITLE_WIDTH: usize = 22;

#[derive(Parser, Debug)]
#[command(name = "rhyme_engine", about = "Interactive Devanagari rhyme dictionary")]
struct Args {
    /// Corpus feed: a JSON array of {text, title, url, author}
    #[arg(long, required_unless_present = "snapshot")]
    corpus: Option<PathBuf>,

    /// Index snapshot written by an earlier session
    #[arg(long, conflicts_with = "corpus")]
    snapshot: Option<PathBuf>,

    /// Where to save the index on exit
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// JSON file overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), RhymeError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine = open_engine(&args)?;
    let mut last_query = String::new();
    let mut outcome: Option<QueryOutcome> = None;

    loop {
        print_ui(outcome.as_ref())?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => {}
            s if s.starts_with(':') && s.len() > 1 => { // Depth override :1, :2 etc
                if let Ok(depth) = s[1..].parse::<usize>() {
                    if !last_query.is_empty() {
                        outcome = Some(engine.query_at_depth(&last_query, depth)?);
                    }
                }
            }
            s => {
                last_query = s.to_string();
                outcome = Some(engine.query(s)?);
            }
        }
    }

    if let Some(path) = &args.save_snapshot {
        println!("\nSaving index...");
        save_snapshot(&engine, path)?;
        println!("Index saved to '{}'", path.display());
    }
    Ok(())
}

fn open_engine(args: &Args) -> Result<RhymeEngine, RhymeError> {
    let config = match &args.config {
        Some(path) => RhymeConfig::from_json_file(path)?,
        None => RhymeConfig::default(),
    };
    if let Some(path) = &args.snapshot {
        return load_snapshot(path, config);
    }
    let engine = RhymeEngine::with_config(config)?;
    if let Some(path) = &args.corpus {
        engine.build_index(&load_corpus_json(path)?);
    }
    Ok(engine)
}

fn print_ui(outcome: Option<&QueryOutcome>) -> Result<(), RhymeError> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Devanagari Rhyme Dictionary".bold());
    println!("---------------------------------------------------------------");
    println!("Type a word and press [Enter]. ':N' switches depth, 'exit' quits.\n");

    match outcome {
        None => {}
        Some(QueryOutcome::InvalidQuery) => {
            println!("{}", "कोई देवनागरी शब्द लिखें / Type a Devanagari word.".dim());
        }
        Some(QueryOutcome::NoMatches { query }) => {
            println!("\"{}\" की तुक नहीं मिली / no rhymes found.", query);
        }
        Some(QueryOutcome::Matches(result)) => print_result(result),
    }

    print!("\n> ");
    out.flush()?;
    Ok(())
}

fn print_result(result: &RhymeResult) {
    let count = result.match_count();
    let suffix = result
        .available_depths
        .iter()
        .find(|d| d.depth == result.depth)
        .map_or("", |d| d.suffix_text.as_str());
    println!(
        "{} तुक मिली / {} rhyme{} found  ·  suffix {} (depth {})",
        count,
        count,
        if count == 1 { "" } else { "s" },
        suffix.bold().yellow(),
        result.depth
    );

    let pills: Vec<String> = result
        .available_depths
        .iter()
        .map(|d| {
            let pill = format!(":{} {} ({})", d.depth, d.suffix_text, d.match_count);
            if d.depth == result.depth {
                pill.reverse().to_string()
            } else {
                pill
            }
        })
        .collect();
    println!("Depths: {}\n", pills.join("  "));

    for group in &result.groups {
        println!("{}  {}", group.ending.as_str().bold().yellow(), group.candidates.len());
        for candidate in &group.candidates {
            let word = match split_stem(&candidate.word, &group.ending) {
                Some((stem, ending)) => format!("{}{}", stem, ending.yellow()),
                None => candidate.word.clone(),
            };
            let sources: Vec<String> = candidate
                .refs
                .iter()
                .map(|r| match &r.author {
                    Some(author) => format!("{} — {}", truncate(&r.title, TITLE_WIDTH), author),
                    None => truncate(&r.title, TITLE_WIDTH),
                })
                .collect();
            println!("  {}  {}", word, sources.join(" | ").dim());
        }
        println!();
    }
}

fn truncate(s: &str, n: usize) -> String {
    if s.chars().count() > n {
        let mut cut: String = s.chars().take(n).collect();
        cut.push('…');
        cut
    } else {
        s.to_string()
    }
}
