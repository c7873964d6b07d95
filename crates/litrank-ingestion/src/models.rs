//! Data models for the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// A Europe PMC record reduced to the fields the weekly report needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub pmid: Option<String>,
    pub doi: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<Author>,
    pub journal: String,
    /// `YYYY-MM-DD`, or `YYYY-MM` when the journal gives no day.
    pub pub_date: String,
    /// Author/API keywords in source order.
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub affiliation: Option<String>,
}

impl PaperMetadata {
    pub fn authors_joined(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn first_author_affiliation(&self) -> String {
        self.authors
            .first()
            .and_then(|a| a.affiliation.clone())
            .unwrap_or_default()
    }

    pub fn keywords_joined(&self) -> String {
        self.keywords.join("; ")
    }
}

/// Header of a downloaded Europe PMC search dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpHeader {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub records_fetched: Option<u64>,
}
