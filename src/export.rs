//! CSV export of output records.

use crate::error::Result;
use crate::record::OutputRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column header, always written first.
pub const CSV_HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    pubmed_id: &'a str,
    title: &'a str,
    publication_date: &'a str,
    non_academic_authors: String,
    company_affiliations: String,
    corresponding_email: &'a str,
}

impl<'a> From<&'a OutputRecord> for CsvRow<'a> {
    fn from(record: &'a OutputRecord) -> Self {
        Self {
            pubmed_id: &record.pubmed_id,
            title: &record.title,
            publication_date: &record.publication_date,
            non_academic_authors: record.non_academic_authors_joined(),
            company_affiliations: record.company_affiliations_joined(),
            corresponding_email: &record.corresponding_email,
        }
    }
}

/// Write the header and one row per record to `writer`.
pub fn write_csv<W: Write>(records: &[OutputRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save records to `path`, replacing any existing file.
///
/// An empty slice still produces a header-only file.
pub fn save_to_csv(records: &[OutputRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    info!(path = %path.display(), rows = records.len(), "Saved CSV");
    Ok(())
}
