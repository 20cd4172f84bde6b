//! # pubmed-fetcher
//!
//! Fetch PubMed papers for a query and flag authors with non-academic
//! (industry) affiliations.
//!
//! ## Modules
//!
//! - [`fetcher`] - search-then-fetch orchestration
//! - [`entrez`] - NCBI E-utilities client
//! - [`article`] - typed article records decoded from EFetch XML
//! - [`parser`] - article to output record mapping
//! - [`classifier`] - academic affiliation heuristic
//! - [`email`] - corresponding-author email extraction
//! - [`export`] - CSV export
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_fetcher::{EntrezConfig, PaperFetcher, DEFAULT_MAX_RESULTS};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = PaperFetcher::new(EntrezConfig::new("me@example.org"))?;
//!     let papers = fetcher.fetch_papers("cancer immunotherapy", DEFAULT_MAX_RESULTS).await?;
//!     pubmed_fetcher::export::save_to_csv(&papers, "papers.csv".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod article;
pub mod classifier;
pub mod email;
pub mod entrez;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod parser;
pub mod record;

pub use entrez::EntrezConfig;
pub use error::{FetcherError, Result};
pub use fetcher::{PaperFetcher, DEFAULT_MAX_RESULTS};
pub use record::OutputRecord;
