//! Flat output record produced for each fetched article.

use std::fmt;

/// Separator for multi-valued fields in display and CSV output.
pub const LIST_SEPARATOR: &str = ", ";

/// One row of output: an article with its non-academic authors.
///
/// `non_academic_authors[i]` is the author of `company_affiliations[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub pubmed_id: String,
    pub title: String,
    /// Publication date as supplied by PubMed
    pub publication_date: String,
    pub non_academic_authors: Vec<String>,
    pub company_affiliations: Vec<String>,
    /// First email found in the abstract, or `N/A`
    pub corresponding_email: String,
}

impl OutputRecord {
    pub fn non_academic_authors_joined(&self) -> String {
        self.non_academic_authors.join(LIST_SEPARATOR)
    }

    pub fn company_affiliations_joined(&self) -> String {
        self.company_affiliations.join(LIST_SEPARATOR)
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PubmedID: {} | Title: {} | Publication Date: {} | Non-academic Author(s): {} | Company Affiliation(s): {} | Corresponding Author Email: {}",
            self.pubmed_id,
            self.title,
            self.publication_date,
            self.non_academic_authors_joined(),
            self.company_affiliations_joined(),
            self.corresponding_email,
        )
    }
}
