//! Coverage lookup CLI.
//!
//! Resolves an address to its region and prints the matching service
//! coverage, either once (`search`) or in an interactive prompt loop.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use coverage::config::Config;
use coverage::geocoder::KakaoGeocoder;
use coverage::http::build_client;
use coverage::matcher::{CoverageMatcher, MatchPolicy};
use coverage::table::TableBackend;
use coverage::{CoverageLookup, LookupOutcome};

mod render;
use render::{error_message, render_report, EMPTY_QUERY, FOUND, NOT_FOUND, PROMPT};

type Lookup = CoverageLookup<KakaoGeocoder, TableBackend>;

#[derive(Parser, Debug)]
#[command(name = "coverage")]
#[command(about = "Look up service coverage for a Korean address")]
struct Args {
    /// Config file (defaults to ./coverage.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the coverage table from a CSV export instead of Google Sheets
    #[arg(long)]
    table_csv: Option<PathBuf>,

    /// Fail when more than one coverage row matches
    #[arg(long)]
    strict: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a single address
    Search {
        /// Address, e.g. "분당구 정자동"
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Prompt for addresses until EOF or "q"
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for results
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coverage={}", level)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = args.table_csv {
        config.table.csv_path = Some(path);
    }
    if args.strict {
        config.match_policy = MatchPolicy::Strict;
    }
    config.validate()?;

    let client = build_client(config.timeout())?;
    let geocoder = KakaoGeocoder::new(&config.kakao, client.clone())?;
    let table = TableBackend::from_config(&config, client)?;
    let matcher = CoverageMatcher::new(config.match_policy);
    info!("Coverage lookup ready (match policy: {:?})", matcher.policy());
    let lookup = CoverageLookup::new(geocoder, table, matcher);

    match args.command {
        Some(Command::Search { address, json }) => {
            let address = address.join(" ");
            if json {
                let outcome = lookup.search(&address).await?;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                search_once(&lookup, &address).await;
            }
        }
        Some(Command::Interactive) | None => interactive(&lookup).await?,
    }

    Ok(())
}

/// Run one search and print the outcome. Errors are reported, not returned.
async fn search_once(lookup: &Lookup, address: &str) {
    match lookup.search(address).await {
        Ok(LookupOutcome::Found(report)) => {
            println!("{}", FOUND);
            println!();
            println!("{}", render_report(&report));
        }
        Ok(LookupOutcome::EmptyQuery) => println!("{}", EMPTY_QUERY),
        Ok(LookupOutcome::AddressNotFound) | Ok(LookupOutcome::NoCoverage { .. }) => {
            println!("{}", NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Search failed for {:?}: {}", address, e);
            println!("{}", error_message(&e));
            println!("{}", NOT_FOUND);
        }
    }
}

async fn interactive(lookup: &Lookup) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}\n> ", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "q" | "quit" | "exit") {
            break;
        }

        if !line.is_empty() {
            println!("검색 중...");
        }
        search_once(lookup, line).await;
        println!();
    }

    Ok(())
}
