//! Search-then-fetch orchestration.
//!
//! One ESearch call yields the ordered ID list, then each ID is fetched and
//! parsed in turn. Requests never overlap.

use crate::article::parse_efetch_xml;
use crate::entrez::{EntrezClient, EntrezConfig};
use crate::error::{FetcherError, Result};
use crate::parser::parse_article;
use crate::record::OutputRecord;
use tracing::{debug, info, warn};

/// Result cap used when the caller does not pick one
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Fetches PubMed papers and turns them into [`OutputRecord`]s.
pub struct PaperFetcher {
    client: EntrezClient,
}

impl PaperFetcher {
    pub fn new(config: EntrezConfig) -> Result<Self> {
        Ok(Self {
            client: EntrezClient::new(config)?,
        })
    }

    /// Search for `query` and return one record per parsed article, in search
    /// order.
    ///
    /// IDs without an article payload and malformed articles are skipped.
    /// Network and API errors abort the whole run.
    pub async fn fetch_papers(&self, query: &str, max_results: usize) -> Result<Vec<OutputRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetcherError::Validation("Query must not be empty".to_string()));
        }

        info!(query = query, max_results = max_results, "Searching PubMed");
        let ids = self.client.esearch(query, max_results).await?;

        if ids.is_empty() {
            info!(query = query, "No results");
            return Ok(Vec::new());
        }
        info!(count = ids.len(), "Fetching article details");

        let mut papers = Vec::with_capacity(ids.len());
        for id in &ids {
            let xml = self.client.efetch(id).await?;
            let Some(article) = parse_efetch_xml(&xml)?.into_iter().next() else {
                debug!(pmid = %id, "No PubmedArticle in response, skipping");
                continue;
            };

            match parse_article(&article, id) {
                Ok(record) => papers.push(record),
                Err(e @ FetcherError::MalformedArticle { .. }) => {
                    warn!(pmid = %id, error = %e, "Skipping malformed article");
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            requested = ids.len(),
            parsed = papers.len(),
            "Fetch complete"
        );
        Ok(papers)
    }
}
