//! End-to-end tests for the fetch pipeline against a mock E-utilities server.

use pubmed_fetcher::export::{save_to_csv, CSV_HEADER};
use pubmed_fetcher::{EntrezConfig, FetcherError, PaperFetcher, Result};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTACT: &str = "tester@lab.org";

fn fetcher_for(server: &MockServer) -> Result<PaperFetcher> {
    PaperFetcher::new(EntrezConfig::new(CONTACT).with_base_url(server.uri()))
}

fn esearch_body(ids: &[&str]) -> String {
    let list = ids
        .iter()
        .map(|id| format!("\"{}\"", id))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"header":{{"type":"esearch","version":"0.3"}},"esearchresult":{{"count":"{}","retmax":"{}","retstart":"0","idlist":[{}]}}}}"#,
        ids.len(),
        ids.len(),
        list
    )
}

fn efetch_body(pmid: &str, title: &str, authors: &[(&str, &str)]) -> String {
    let authors: String = authors
        .iter()
        .map(|(last, aff)| {
            format!(
                "<Author ValidYN=\"Y\"><LastName>{}</LastName><ForeName>X</ForeName>\
                 <AffiliationInfo><Affiliation>{}</Affiliation></AffiliationInfo></Author>",
                last, aff
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
  <MedlineCitation Status="MEDLINE" Owner="NLM">
    <PMID Version="1">{pmid}</PMID>
    <Article PubModel="Print-Electronic">
      <Journal>
        <JournalIssue CitedMedium="Internet">
          <PubDate><Year>2024</Year><Month>Feb</Month></PubDate>
        </JournalIssue>
        <Title>Test Journal</Title>
      </Journal>
      <ArticleTitle>{title}</ArticleTitle>
      <Abstract><AbstractText>Correspondence to lead@genentech.com.</AbstractText></Abstract>
      <AuthorList CompleteYN="Y">{authors}</AuthorList>
    </Article>
  </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#
    )
}

async fn mount_esearch(server: &MockServer, term: &str, retmax: &str, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", term))
        .and(query_param("retmax", retmax))
        .and(query_param("tool", "pubmed-fetcher"))
        .and(query_param("email", CONTACT))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_body(ids)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_efetch(server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", id))
        .and(query_param("retmode", "xml"))
        .and(query_param("email", CONTACT))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_flags_industry_author() -> Result<()> {
    let server = MockServer::start().await;
    mount_esearch(&server, "cancer immunotherapy", "1", &["38000001"]).await;
    mount_efetch(
        &server,
        "38000001",
        efetch_body(
            "38000001",
            "Checkpoint blockade outcomes",
            &[("Smith", "Stanford University"), ("Jones", "Genentech Inc.")],
        ),
    )
    .await;

    let papers = fetcher_for(&server)?
        .fetch_papers("cancer immunotherapy", 1)
        .await?;

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.pubmed_id, "38000001");
    assert_eq!(paper.title, "Checkpoint blockade outcomes");
    assert_eq!(paper.publication_date, "2024 Feb");
    assert_eq!(paper.non_academic_authors, vec!["Jones".to_string()]);
    assert_eq!(paper.company_affiliations, vec!["Genentech Inc.".to_string()]);
    assert_eq!(paper.corresponding_email, "lead@genentech.com");
    Ok(())
}

#[tokio::test]
async fn test_preserves_search_order() -> Result<()> {
    let server = MockServer::start().await;
    mount_esearch(&server, "kras", "10", &["222", "111"]).await;
    mount_efetch(&server, "222", efetch_body("222", "Second id first", &[])).await;
    mount_efetch(&server, "111", efetch_body("111", "First id second", &[])).await;

    let papers = fetcher_for(&server)?.fetch_papers("kras", 10).await?;

    let ids: Vec<&str> = papers.iter().map(|p| p.pubmed_id.as_str()).collect();
    assert_eq!(ids, vec!["222", "111"]);
    Ok(())
}

#[tokio::test]
async fn test_no_results_exports_header_only() -> Result<()> {
    let server = MockServer::start().await;
    mount_esearch(&server, "zzzz no such topic", "10", &[]).await;

    let papers = fetcher_for(&server)?
        .fetch_papers("zzzz no such topic", 10)
        .await?;
    assert!(papers.is_empty());

    let temp = NamedTempFile::new()?;
    save_to_csv(&papers, temp.path())?;
    let content = std::fs::read_to_string(temp.path())?;
    assert_eq!(content, format!("{}\n", CSV_HEADER.join(",")));
    Ok(())
}

#[tokio::test]
async fn test_skips_missing_payload_and_malformed_articles() -> Result<()> {
    let server = MockServer::start().await;
    mount_esearch(&server, "mixed", "10", &["1", "2", "3"]).await;
    mount_efetch(&server, "1", "<PubmedArticleSet></PubmedArticleSet>".to_string()).await;
    mount_efetch(
        &server,
        "2",
        "<PubmedArticleSet><PubmedArticle><MedlineCitation><PMID>2</PMID>\
         <Article><ArticleTitle>No journal issue</ArticleTitle></Article>\
         </MedlineCitation></PubmedArticle></PubmedArticleSet>"
            .to_string(),
    )
    .await;
    mount_efetch(&server, "3", efetch_body("3", "Complete", &[("Lee", "Amgen")])).await;

    let papers = fetcher_for(&server)?.fetch_papers("mixed", 10).await?;

    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].pubmed_id, "3");
    assert_eq!(papers[0].non_academic_authors, vec!["Lee".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_server_error_aborts() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let result = fetcher_for(&server)?.fetch_papers("anything", 10).await;
    assert!(matches!(result, Err(FetcherError::Api { code: 500, .. })));
    Ok(())
}

#[tokio::test]
async fn test_esearch_error_body_aborts() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"esearchresult":{"ERROR":"Invalid query syntax"}}"#),
        )
        .mount(&server)
        .await;

    let result = fetcher_for(&server)?.fetch_papers("((", 10).await;
    match result {
        Err(FetcherError::Api { message, .. }) => assert_eq!(message, "Invalid query syntax"),
        other => panic!("expected API error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_query_rejected_without_request() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = fetcher_for(&server)?.fetch_papers("   ", 10).await;
    assert!(matches!(result, Err(FetcherError::Validation(_))));
    Ok(())
}
