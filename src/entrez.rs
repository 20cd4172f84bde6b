//! NCBI E-utilities client for PubMed search and fetch.
//!
//! NCBI asks every client to identify itself with a `tool` name and a contact
//! `email`; both travel with each request and come from [`EntrezConfig`].

use crate::email::is_valid_email;
use crate::error::{FetcherError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// E-utilities base URL
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Tool name reported to NCBI
pub const DEFAULT_TOOL: &str = "pubmed-fetcher";

/// Contact email used when none is configured
pub const DEFAULT_CONTACT_EMAIL: &str = "pubmed-fetcher@example.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client identity and endpoint settings.
#[derive(Debug, Clone)]
pub struct EntrezConfig {
    pub base_url: String,
    pub tool: String,
    pub email: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl EntrezConfig {
    /// Default settings with the given contact email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EntrezConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EUTILS_URL.to_string(),
            tool: DEFAULT_TOOL.to_string(),
            email: DEFAULT_CONTACT_EMAIL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// PubMed E-utilities client. Requests are plain, one-shot calls: no retry.
pub struct EntrezClient {
    client: reqwest::Client,
    base_url: Url,
    config: EntrezConfig,
}

impl EntrezClient {
    /// Validate `config` and build the HTTP client.
    pub fn new(config: EntrezConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| FetcherError::Config(format!("Invalid base URL {:?}: {}", config.base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        if !is_valid_email(config.email.trim()) {
            return Err(FetcherError::Config(format!(
                "Invalid contact email: {:?}",
                config.email
            )));
        }
        if config.tool.trim().is_empty() {
            return Err(FetcherError::Config("Tool name must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(format!(
                "{}/{} (mailto:{})",
                config.tool,
                env!("CARGO_PKG_VERSION"),
                config.email.trim()
            ))
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetcherError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Configured settings
    pub fn config(&self) -> &EntrezConfig {
        &self.config
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| FetcherError::Config(format!("Invalid endpoint {}: {}", name, e)))
    }

    /// Identity parameters sent with every request
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("tool", self.config.tool.clone()),
            ("email", self.config.email.trim().to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    async fn get(&self, name: &str, params: Vec<(&'static str, String)>) -> Result<reqwest::Response> {
        let url = self.endpoint(name)?;
        debug!(url = %url, ?params, "E-utilities request");

        let response = self.client.get(url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetcherError::Api {
                code: status.as_u16() as i32,
                message: format!("{} returned {}: {}", name, status, body.trim()),
            });
        }

        Ok(response)
    }

    /// Search PubMed; returns at most `max_results` PubMed IDs in rank order.
    pub async fn esearch(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let mut params = self.base_params();
        params.push(("db", "pubmed".to_string()));
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        let body = self.get("esearch.fcgi", params).await?.text().await?;
        let data: ESearchResponse = serde_json::from_str(&body)?;

        if let Some(message) = data.esearchresult.error {
            return Err(FetcherError::Api { code: 0, message });
        }

        let mut ids = data.esearchresult.idlist;
        ids.truncate(max_results);
        debug!(
            count = ?data.esearchresult.count,
            returned = ids.len(),
            "ESearch complete"
        );
        Ok(ids)
    }

    /// Fetch the PubMed XML record for one ID.
    pub async fn efetch(&self, pubmed_id: &str) -> Result<String> {
        let mut params = self.base_params();
        params.push(("db", "pubmed".to_string()));
        params.push(("id", pubmed_id.to_string()));
        params.push(("retmode", "xml".to_string()));

        Ok(self.get("efetch.fcgi", params).await?.text().await?)
    }
}

// === ESearch JSON Response Types ===

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}
