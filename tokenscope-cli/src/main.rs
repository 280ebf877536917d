//! tokenscope CLI
//!
//! Due diligence for a single Solana token from market data and verified
//! social mentions.

mod report;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tokenscope_core::{validate, Vocabulary};
use tokenscope_net::{HttpConfig, HttpFetcher};
use tokenscope_providers::{ExaConfig, ExaSearch, SearchError, SharedSearch};
use tokenscope_runtime::{Analyzer, AnalyzerConfig};

use crate::report::render_markdown;

#[derive(Parser)]
#[command(name = "tokenscope")]
#[command(author, version, about = "tokenscope: Solana token due diligence", long_about = None)]
struct Cli {
    /// Token mint address (base58)
    address: String,

    /// Exa API key for social search (or set EXA_API_KEY env var)
    #[arg(long, env = "EXA_API_KEY", hide_env_values = true)]
    exa_key: Option<String>,

    /// Vocabulary TOML replacing the built-in keyword lists
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Maximum search queries per run
    #[arg(long, default_value = "5")]
    max_queries: usize,

    /// Results requested per search query
    #[arg(long, default_value = "10")]
    results_per_query: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Pause between search queries in milliseconds
    #[arg(long, default_value = "500")]
    query_delay_ms: u64,

    /// Print the report as JSON instead of markdown
    #[arg(long)]
    json: bool,

    /// Also write the markdown report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let address = cli.address.trim().to_string();
    if !validate(&address) {
        anyhow::bail!(
            "Invalid Solana token address: {:?} (expected 32-44 base58 characters)",
            address
        );
    }

    let vocabulary = match &cli.vocabulary {
        Some(path) => Vocabulary::load(path)
            .with_context(|| format!("Failed to load vocabulary from {}", path.display()))?,
        None => Vocabulary::embedded(),
    };

    let http = HttpConfig::default().with_timeout(cli.timeout);
    let fetcher = HttpFetcher::new(&http)?.shared();

    let exa_config = ExaConfig::default()
        .with_api_key(cli.exa_key.clone())
        .with_http(http);
    let search: Option<SharedSearch> = match ExaSearch::new(exa_config) {
        Ok(exa) => Some(exa.shared()),
        Err(SearchError::MissingCredential) => {
            info!("EXA_API_KEY not set, social analysis disabled");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let config = AnalyzerConfig::default()
        .with_vocabulary(vocabulary)
        .with_max_queries(cli.max_queries)
        .with_results_per_query(cli.results_per_query)
        .with_query_delay(Duration::from_millis(cli.query_delay_ms));

    let analyzer = Analyzer::new(config, fetcher, search);
    if !analyzer.search_enabled() {
        eprintln!("⚠️  Exa API key not configured - social media analysis will be skipped");
    }

    eprintln!("🔍 Analyzing {}...", address);
    let report = analyzer.analyze(&address).await?;
    let markdown = render_markdown(&report)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", markdown);
    }

    if let Some(path) = cli.output {
        fs::write(&path, &markdown)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        eprintln!("📄 Report saved to: {}", path.display());
    }

    if report.fully_degraded() {
        eprintln!("⚠️  No provider returned data - results are based on fallbacks");
    }

    Ok(())
}
