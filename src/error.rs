//! Custom error types for pubmed-fetcher.
//!
//! All library functions return `Result<T, FetcherError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for pubmed-fetcher operations.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// E-utilities returned an error status or error body
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code (0 when the error came from the response body)
        code: i32,
        /// Error message from API
        message: String,
    },

    /// XML/response parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A fetched article is missing a required field
    #[error("Malformed article {pubmed_id}: missing {field}")]
    MalformedArticle {
        /// PubMed ID of the offending article
        pubmed_id: String,
        /// Name of the missing element
        field: &'static str,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using `FetcherError`
pub type Result<T> = std::result::Result<T, FetcherError>;

/// Extension trait for turning absent article fields into errors
pub trait OptionExt<T> {
    /// Convert `None` into `FetcherError::MalformedArticle` for `pubmed_id`
    fn required(self, pubmed_id: &str, field: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, pubmed_id: &str, field: &'static str) -> Result<T> {
        self.ok_or_else(|| FetcherError::MalformedArticle {
            pubmed_id: pubmed_id.to_string(),
            field,
        })
    }
}
