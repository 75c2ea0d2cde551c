mod triedex;
use std::{
    collections::BTreeMap,
    io::{self, BufRead, ErrorKind, Result, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, Level};

use crate::triedex::{
    catalog::Catalog,
    utils::symbol::Symbol,
    wordcount::{self, WordCountConfig},
};

/// Word counting and product lookup over a character trie
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a text file, count its words and list words under a prefix
    Count(CountArgs),
    /// Look up products in the sample catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct CountArgs {
    #[clap(long, default_value = wordcount::DEFAULT_PATH)]
    path: PathBuf,
    /// Bytes per chunk; words crossing a chunk boundary are counted as fragments
    #[clap(long, default_value_t = wordcount::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Minimum size of the generated file in bytes
    #[clap(long, default_value_t = wordcount::DEFAULT_FILE_SIZE)]
    file_size: u64,
    #[clap(long, default_value = wordcount::DEFAULT_QUERY)]
    query: String,
    /// Count an existing file instead of generating one
    #[clap(long)]
    no_generate: bool,
    /// Print only the N most frequent words
    #[clap(long)]
    top: Option<usize>,
}

impl From<&CountArgs> for WordCountConfig {
    fn from(args: &CountArgs) -> Self {
        WordCountConfig {
            path: args.path.clone(),
            chunk_size: args.chunk_size,
            file_size: args.file_size,
            query: args.query.clone(),
            generate: !args.no_generate,
        }
    }
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Product id to retrieve; read from stdin when absent
    #[clap(long)]
    id: Option<String>,
    #[clap(long, default_value = "Electronics")]
    category: String,
    #[clap(long, default_value = "Java Programming")]
    query: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Count(args) => run_count(&args),
        Command::Catalog(args) => run_catalog(&args),
    }
}

fn run_count(args: &CountArgs) -> Result<()> {
    let config = WordCountConfig::from(args);
    let report = wordcount::run(&config)?;
    info!(indexed = report.trie.len(), query = %report.query, "built prefix trie");

    let sorted = report.counts.sorted_by_frequency();
    let shown = args.top.unwrap_or(sorted.len());
    let mut out = io::stdout().lock();
    for &(word, count) in sorted.iter().take(shown) {
        writeln!(out, "{}: {}", word.bold(), count)?;
    }
    writeln!(
        out,
        "{} {:?}",
        "Prefix search results:".green().bold(),
        report.matches
    )?;
    Ok(())
}

fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = Catalog::sample();
    info!(products = catalog.len(), "catalog ready");

    let id = match &args.id {
        Some(id) => id.clone(),
        None => prompt_id()?,
    };

    let mut out = io::stdout().lock();
    match catalog.product(&id) {
        Some(product) => writeln!(out, "{} {}", "Retrieved Product:".green().bold(), product)?,
        None => writeln!(out, "{} None", "Retrieved Product:".yellow().bold())?,
    }

    let by_category = catalog.search_by_category(&args.category);
    writeln!(
        out,
        "{} {}",
        format!("{} Products:", args.category).green().bold(),
        render_index(&by_category)
    )?;

    let ids: Vec<_> = catalog.search_text(&args.query).iter().map(Symbol::as_str).collect();
    writeln!(
        out,
        "{} {:?}",
        format!("Search Results for {:?}:", args.query).green().bold(),
        ids
    )?;
    Ok(())
}

fn prompt_id() -> Result<String> {
    println!("enter the id number");
    read_token(&mut io::stdin().lock())
}

/// First whitespace-separated token, skipping blank lines.
fn read_token<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "no product id given"));
        }
        if let Some(token) = line.split_whitespace().next() {
            return Ok(token.to_owned());
        }
    }
}

fn render_index(index: &BTreeMap<Symbol, String>) -> String {
    let entries: Vec<_> = index
        .iter()
        .map(|(id, name)| format!("{}={}", id, name))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
