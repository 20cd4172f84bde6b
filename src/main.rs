//! pubmed-fetcher - PubMed search with non-academic author detection
//!
//! ## Usage
//!
//! ```bash
//! pubmed-fetcher "cancer immunotherapy" --file results.csv
//! pubmed-fetcher "CRISPR off-target" -n 25 --email me@lab.org -d
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_fetcher::entrez::DEFAULT_CONTACT_EMAIL;
use pubmed_fetcher::{export, EntrezConfig, PaperFetcher, DEFAULT_MAX_RESULTS};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch research papers from PubMed and flag non-academic authors
#[derive(Parser, Debug)]
#[command(name = "pubmed-fetcher")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search query for PubMed
    query: String,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    /// Output CSV filename (prints to stdout when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of papers to fetch
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Contact email sent to NCBI with every request
    #[arg(long, env = "PUBMED_EMAIL", default_value = DEFAULT_CONTACT_EMAIL)]
    email: String,

    /// NCBI API key (raises the E-utilities rate limit)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(query = %cli.query, max_results = cli.max_results, "CLI arguments parsed");

    if cli.debug {
        println!("Fetching papers for query: {}", cli.query);
    }

    let config = EntrezConfig::new(cli.email).with_api_key(cli.api_key);
    let fetcher = PaperFetcher::new(config).context("Failed to set up PubMed client")?;

    let papers = fetcher
        .fetch_papers(&cli.query, cli.max_results)
        .await
        .context("Failed to fetch papers")?;

    match cli.file {
        Some(path) => {
            export::save_to_csv(&papers, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Results saved to {}", path.display());
        }
        None => {
            for paper in &papers {
                println!("{}", paper);
            }
        }
    }

    Ok(())
}
