//! Article record shared by ingestion, ranking and presentation.

use serde::{Deserialize, Serialize};

/// One row of a weekly report.
///
/// Field names follow the report CSV header, so a report file deserializes
/// straight into this type. Columns the record does not know are ignored,
/// missing columns fall back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub pmid: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Full author names joined by "; "
    pub authors: String,
    pub first_author_affiliation: String,
    pub journal: String,
    /// Publication date as written by the source, usually `YYYY-MM-DD`
    pub pub_date: String,
    pub doi: Option<String>,
    /// Keywords supplied by the literature API, joined by "; "
    pub api_keywords: String,
    /// Encoded match list, e.g. `"KRAS(kw,title); pancreatic(abstract)"`
    pub matched_keywords: String,
    /// Score computed at ingestion time with the initial weights.
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_end_date: Option<String>,
}

impl Article {
    /// Resolver link for the article DOI, if one is present.
    pub fn doi_url(&self) -> Option<String> {
        self.doi
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| format!("https://doi.org/{d}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doi_url_present() {
        let a = Article { doi: Some("10.1000/xyz".into()), ..Default::default() };
        assert_eq!(a.doi_url().as_deref(), Some("https://doi.org/10.1000/xyz"));
    }

    #[test]
    fn test_doi_url_blank_is_none() {
        let a = Article { doi: Some("  ".into()), ..Default::default() };
        assert!(a.doi_url().is_none());
        assert!(Article::default().doi_url().is_none());
    }

    #[test]
    fn test_abstract_uses_report_column_name() {
        let a = Article { abstract_text: "text".into(), ..Default::default() };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["abstract"], "text");
        assert!(json.get("fetch_start_date").is_none());
    }
}
