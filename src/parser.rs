//! Maps a [`RawArticle`] to an [`OutputRecord`].

use crate::article::{Author, RawArticle};
use crate::classifier::is_academic;
use crate::email::extract_email;
use crate::error::{OptionExt, Result};
use crate::record::OutputRecord;

/// Build the output record for one article.
///
/// Title and publication date are required; a missing one yields
/// `FetcherError::MalformedArticle`. Everything else defaults to empty.
pub fn parse_article(article: &RawArticle, pubmed_id: &str) -> Result<OutputRecord> {
    let title = article.title.clone().required(pubmed_id, "ArticleTitle")?;
    let publication_date = article
        .pub_date
        .as_ref()
        .required(pubmed_id, "PubDate")?
        .to_string();

    let (non_academic_authors, company_affiliations) = non_academic_authors(&article.authors);
    let corresponding_email = extract_email(&article.abstract_text());

    Ok(OutputRecord {
        pubmed_id: pubmed_id.to_string(),
        title,
        publication_date,
        non_academic_authors,
        company_affiliations,
        corresponding_email,
    })
}

/// Collect `(surname, affiliation)` pairs for every non-academic affiliation.
///
/// An author with several non-academic affiliations appears once per
/// affiliation.
pub fn non_academic_authors(authors: &[Author]) -> (Vec<String>, Vec<String>) {
    authors
        .iter()
        .flat_map(|author| {
            author
                .affiliations
                .iter()
                .filter(|aff| !is_academic(aff))
                .map(move |aff| (author.surname().to_string(), aff.clone()))
        })
        .unzip()
}
