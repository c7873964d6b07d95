//! Column sorting for the ranked table.

use litrank_common::{Article, LitrankError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::scorer::ScoredArticle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Score,
    Title,
    Abstract,
    Authors,
    Affiliation,
    Journal,
    Date,
    Doi,
    ApiKeywords,
    Keywords,
    Pmid,
}

impl SortField {
    pub const ALL: [SortField; 11] = [
        SortField::Score,
        SortField::Title,
        SortField::Abstract,
        SortField::Authors,
        SortField::Affiliation,
        SortField::Journal,
        SortField::Date,
        SortField::Doi,
        SortField::ApiKeywords,
        SortField::Keywords,
        SortField::Pmid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Score       => "score",
            SortField::Title       => "title",
            SortField::Abstract    => "abstract",
            SortField::Authors     => "authors",
            SortField::Affiliation => "affiliation",
            SortField::Journal     => "journal",
            SortField::Date        => "date",
            SortField::Doi         => "doi",
            SortField::ApiKeywords => "api_keywords",
            SortField::Keywords    => "keywords",
            SortField::Pmid        => "pmid",
        }
    }

    /// Text value used for string comparison. `None` for numeric fields.
    fn text<'a>(&self, article: &'a Article) -> Option<&'a str> {
        match self {
            SortField::Score       => None,
            SortField::Title       => Some(&article.title),
            SortField::Abstract    => Some(&article.abstract_text),
            SortField::Authors     => Some(&article.authors),
            SortField::Affiliation => Some(&article.first_author_affiliation),
            SortField::Journal     => Some(&article.journal),
            SortField::Date        => Some(&article.pub_date),
            SortField::Doi         => Some(article.doi.as_deref().unwrap_or("")),
            SortField::ApiKeywords => Some(&article.api_keywords),
            SortField::Keywords    => Some(&article.matched_keywords),
            SortField::Pmid        => Some(&article.pmid),
        }
    }

    fn compare(&self, a: &ScoredArticle<'_>, b: &ScoredArticle<'_>) -> Ordering {
        match (self.text(a.article), self.text(b.article)) {
            (Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            _ => a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = LitrankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score"                                  => Ok(SortField::Score),
            "title"                                  => Ok(SortField::Title),
            "abstract"                               => Ok(SortField::Abstract),
            "authors"                                => Ok(SortField::Authors),
            "affiliation" | "first_author_affiliation" => Ok(SortField::Affiliation),
            "journal"                                => Ok(SortField::Journal),
            "date" | "pub_date"                      => Ok(SortField::Date),
            "doi"                                    => Ok(SortField::Doi),
            "api_keywords"                           => Ok(SortField::ApiKeywords),
            "keywords" | "matched_keywords"          => Ok(SortField::Keywords),
            "pmid"                                   => Ok(SortField::Pmid),
            _ => Err(LitrankError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc  => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc  => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = LitrankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending"   => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(LitrankError::Config(format!("Unknown sort direction: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self { field: SortField::Score, direction: SortDirection::Desc }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header click: the active column flips direction,
    /// any other column becomes active in descending order.
    pub fn clicked(self, field: SortField) -> Self {
        if self.field == field {
            Self { field, direction: self.direction.toggled() }
        } else {
            Self { field, direction: SortDirection::Desc }
        }
    }

    /// Stable sort in place. Equal keys keep their input order in both directions.
    pub fn sort(&self, rows: &mut [ScoredArticle<'_>]) {
        let field = self.field;
        match self.direction {
            SortDirection::Asc  => rows.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| field.compare(b, a)),
        }
    }
}
