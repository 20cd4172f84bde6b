//! Typed PubMed article records decoded from EFetch XML.
//!
//! Only the paths the pipeline reads are kept. Every field is optional or a
//! possibly-empty collection so that missing data shows up as a typed default
//! instead of a failed lookup.

use crate::error::{FetcherError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use tracing::debug;

/// One `<PubmedArticle>` as far as this crate cares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArticle {
    /// `MedlineCitation/PMID`
    pub pmid: Option<String>,
    /// `Article/ArticleTitle`, inline markup flattened
    pub title: Option<String>,
    /// `Article/Journal/JournalIssue/PubDate`
    pub pub_date: Option<PubDate>,
    /// `Article/AuthorList/Author`
    pub authors: Vec<Author>,
    /// `Article/Abstract/AbstractText`, one entry per section
    pub abstract_sections: Vec<String>,
}

impl RawArticle {
    /// The abstract as a single string (sections joined by a space).
    pub fn abstract_text(&self) -> String {
        self.abstract_sections.join(" ")
    }
}

/// Journal issue publication date, kept as supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PubDate {
    pub year: Option<String>,
    pub season: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    /// Free-form date such as `1998 Dec-1999 Jan`
    pub medline_date: Option<String>,
}

impl fmt::Display for PubDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(medline) = &self.medline_date {
            return f.write_str(medline);
        }
        let parts: Vec<&str> = [&self.year, &self.season, &self.month, &self.day]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// An entry of the article's author list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    /// Group authorship (`<CollectiveName>`)
    pub collective_name: Option<String>,
    /// `AffiliationInfo/Affiliation`, in document order
    pub affiliations: Vec<String>,
}

impl Author {
    /// Surname used for reporting; falls back to the collective name.
    pub fn surname(&self) -> &str {
        self.last_name
            .as_deref()
            .or(self.collective_name.as_deref())
            .unwrap_or("")
    }
}

/// Decode every `<PubmedArticle>` in an EFetch `<PubmedArticleSet>`.
///
/// `<PubmedBookArticle>` entries are ignored. An empty set yields an empty
/// vector.
pub fn parse_efetch_xml(xml: &str) -> Result<Vec<RawArticle>> {
    let mut reader = Reader::from_str(xml);
    let mut decoder = ArticleDecoder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                decoder.open(&name);
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                decoder.open(&name);
                decoder.close();
            }
            Ok(Event::End(_)) => decoder.close(),
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| {
                    FetcherError::Parse(format!(
                        "Invalid text at position {}: {}",
                        reader.buffer_position(),
                        e
                    ))
                })?;
                decoder.text(&text);
            }
            Ok(Event::CData(c)) => decoder.text(&String::from_utf8_lossy(&c)),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FetcherError::Parse(format!(
                    "Failed to parse PubMed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    debug!(articles = decoder.articles.len(), "Decoded EFetch XML");
    Ok(decoder.articles)
}

/// Element-path state machine behind [`parse_efetch_xml`].
#[derive(Default)]
struct ArticleDecoder {
    path: Vec<String>,
    articles: Vec<RawArticle>,
    article: Option<RawArticle>,
    author: Option<Author>,
    section: Option<String>,
    affiliation: Option<String>,
}

fn ends_with(path: &[String], seq: &[&str]) -> bool {
    path.len() >= seq.len()
        && path[path.len() - seq.len()..]
            .iter()
            .zip(seq)
            .all(|(a, b)| a == b)
}

impl ArticleDecoder {
    fn open(&mut self, name: &str) {
        self.path.push(name.to_string());

        if name == "PubmedArticle" {
            self.article = Some(RawArticle::default());
            return;
        }
        let Some(article) = self.article.as_mut() else {
            return;
        };

        if ends_with(&self.path, &["MedlineCitation", "Article", "ArticleTitle"]) {
            article.title.get_or_insert_with(String::new);
        } else if ends_with(&self.path, &["Article", "Journal", "JournalIssue", "PubDate"]) {
            article.pub_date.get_or_insert_with(PubDate::default);
        } else if ends_with(&self.path, &["Article", "Abstract", "AbstractText"]) {
            self.section = Some(String::new());
        } else if ends_with(&self.path, &["Article", "AuthorList", "Author"]) {
            self.author = Some(Author::default());
        } else if self.author.is_some() && ends_with(&self.path, &["AffiliationInfo", "Affiliation"]) {
            self.affiliation = Some(String::new());
        }
    }

    fn close(&mut self) {
        let Some(name) = self.path.last().cloned() else {
            return;
        };

        match name.as_str() {
            "PubmedArticle" => {
                if let Some(article) = self.article.take() {
                    self.articles.push(article);
                }
            }
            "AbstractText" => {
                if let (Some(section), Some(article)) = (self.section.take(), self.article.as_mut()) {
                    let section = section.trim();
                    if !section.is_empty() {
                        article.abstract_sections.push(section.to_string());
                    }
                }
            }
            "Affiliation" => {
                if let (Some(aff), Some(author)) = (self.affiliation.take(), self.author.as_mut()) {
                    author.affiliations.push(aff.trim().to_string());
                }
            }
            "Author" if ends_with(&self.path, &["Article", "AuthorList", "Author"]) => {
                if let (Some(author), Some(article)) = (self.author.take(), self.article.as_mut()) {
                    article.authors.push(author);
                }
            }
            "ArticleTitle" => {
                if let Some(title) = self.article.as_mut().and_then(|a| a.title.as_mut()) {
                    *title = title.trim().to_string();
                }
            }
            _ => {}
        }

        self.path.pop();
    }

    fn text(&mut self, text: &str) {
        let Some(article) = self.article.as_mut() else {
            return;
        };

        if let Some(section) = self.section.as_mut() {
            section.push_str(text);
            return;
        }
        if let Some(aff) = self.affiliation.as_mut() {
            aff.push_str(text);
            return;
        }

        if self.path.iter().any(|p| p == "ArticleTitle") {
            if let Some(title) = article.title.as_mut() {
                title.push_str(text);
            }
            return;
        }

        let value = text.trim();
        if value.is_empty() {
            return;
        }
        let Some(leaf) = self.path.last().map(String::as_str) else {
            return;
        };

        if let Some(author) = self.author.as_mut() {
            match leaf {
                "LastName" => author.last_name = Some(value.to_string()),
                "ForeName" => author.fore_name = Some(value.to_string()),
                "CollectiveName" => author.collective_name = Some(value.to_string()),
                _ => {}
            }
            return;
        }

        if self.path.len() >= 2 && self.path[self.path.len() - 2] == "PubDate" {
            if let Some(date) = article.pub_date.as_mut() {
                let slot = match leaf {
                    "Year" => &mut date.year,
                    "Season" => &mut date.season,
                    "Month" => &mut date.month,
                    "Day" => &mut date.day,
                    "MedlineDate" => &mut date.medline_date,
                    _ => return,
                };
                *slot = Some(value.to_string());
            }
            return;
        }

        if ends_with(&self.path, &["MedlineCitation", "PMID"]) && article.pmid.is_none() {
            article.pmid = Some(value.to_string());
        }
    }
}
