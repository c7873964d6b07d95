//! Europe PMC search dumps.
//!
//! A dump is the JSON written after paging through
//! `https://www.ebi.ac.uk/europepmc/webservices/rest/search` with
//! `resultType=core`: `{"start_date", "end_date", "records_fetched", "articles": [...]}`.

use litrank_common::Result;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

use super::LiteratureDump;
use crate::models::{Author, DumpHeader, PaperMetadata};

pub struct EuropePmcDump {
    header: DumpHeader,
    records: Vec<Value>,
}

impl EuropePmcDump {
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(content)?;
        let header = DumpHeader {
            start_date: doc["start_date"].as_str().map(String::from),
            end_date: doc["end_date"].as_str().map(String::from),
            records_fetched: doc["records_fetched"].as_u64(),
        };
        let records = doc["articles"].as_array().cloned().unwrap_or_default();
        debug!(count = records.len(), "Europe PMC dump loaded");
        Ok(Self { header, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LiteratureDump for EuropePmcDump {
    fn header(&self) -> &DumpHeader {
        &self.header
    }

    fn papers(&self) -> Vec<PaperMetadata> {
        self.records.iter().map(parse_record).collect()
    }
}

/// Map one `resultType=core` record onto [`PaperMetadata`].
pub fn parse_record(r: &Value) -> PaperMetadata {
    let authors: Vec<Author> = r["authorList"]["author"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|a| Author {
                    name: a["fullName"].as_str().unwrap_or("").to_string(),
                    affiliation: a["authorAffiliationDetailsList"]["authorAffiliation"][0]
                        ["affiliation"]
                        .as_str()
                        .map(String::from),
                })
                .collect()
        })
        .unwrap_or_default();

    let keywords: Vec<String> = r["keywordList"]["keyword"]
        .as_array()
        .map(|list| list.iter().filter_map(|k| k.as_str().map(String::from)).collect())
        .unwrap_or_default();

    PaperMetadata {
        pmid: non_empty(&r["pmid"]),
        doi: non_empty(&r["doi"]),
        title: r["title"].as_str().unwrap_or("").to_string(),
        abstract_text: r["abstractText"].as_str().unwrap_or("").to_string(),
        authors,
        journal: r["journalInfo"]["journal"]["title"].as_str().unwrap_or("").to_string(),
        pub_date: publication_date(r),
        keywords,
    }
}

/// Electronic publication date when present, otherwise the journal issue
/// date as `YYYY-MM[-DD]`. Empty when neither is usable.
fn publication_date(r: &Value) -> String {
    if let Some(date) = r["electronicPublicationDate"].as_str().filter(|d| !d.is_empty()) {
        return date.to_string();
    }

    let info = &r["journalInfo"];
    let year = as_number(&info["yearOfPublication"]);
    let month = as_number(&info["monthOfPublication"]);
    let day = as_number(&info["dayOfPublication"]);

    match (year, month) {
        (Some(y), Some(m)) if y > 0 && m > 0 => match day {
            Some(d) if d > 0 => format!("{y}-{m:02}-{d:02}"),
            _ => format!("{y}-{m:02}"),
        },
        _ => String::new(),
    }
}

/// Europe PMC sends issue fields as numbers or numeric strings.
fn as_number(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

fn non_empty(v: &Value) -> Option<String> {
    v.as_str().map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
