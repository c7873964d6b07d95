//! Shared fixtures for litrank tests.

use litrank_common::Article;
use serde_json::{json, Value};

/// Builder for [`Article`] test records.
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    article: Article,
}

impl ArticleBuilder {
    pub fn new(title: &str) -> Self {
        Self { article: Article { title: title.to_string(), ..Default::default() } }
    }

    pub fn pmid(mut self, pmid: &str) -> Self {
        self.article.pmid = pmid.to_string();
        self
    }

    pub fn abstract_text(mut self, text: &str) -> Self {
        self.article.abstract_text = text.to_string();
        self
    }

    pub fn authors(mut self, authors: &str) -> Self {
        self.article.authors = authors.to_string();
        self
    }

    pub fn journal(mut self, journal: &str) -> Self {
        self.article.journal = journal.to_string();
        self
    }

    pub fn pub_date(mut self, date: &str) -> Self {
        self.article.pub_date = date.to_string();
        self
    }

    pub fn doi(mut self, doi: &str) -> Self {
        self.article.doi = Some(doi.to_string());
        self
    }

    pub fn matches(mut self, matched: &str) -> Self {
        self.article.matched_keywords = matched.to_string();
        self
    }

    pub fn build(self) -> Article {
        self.article
    }
}

/// A small aggregate-style corpus spanning two months.
pub fn sample_articles() -> Vec<Article> {
    vec![
        ArticleBuilder::new("Dashboards for ICU triage")
            .pmid("1001")
            .journal("JAMIA")
            .pub_date("2023-01-15")
            .doi("10.1000/icu")
            .matches("visual analytics(kw,title); dashboard(title)")
            .build(),
        ArticleBuilder::new("Cohort exploration at scale")
            .pmid("1002")
            .journal("bmc medical informatics")
            .pub_date("2023-02-01")
            .matches("visual analytics(abstract)")
            .build(),
        ArticleBuilder::new("Interactive EHR timelines")
            .pmid("1003")
            .journal("Journal of Biomedical Informatics")
            .pub_date("2023-01-20")
            .matches("visualization(kw); dashboard(abstract)")
            .build(),
        ArticleBuilder::new("Preprint without a date")
            .pmid("1004")
            .journal("medRxiv")
            .matches("visual analytics(kw)")
            .build(),
    ]
}

/// A Europe PMC `resultType=core` record with the fields the parser reads.
pub fn europe_pmc_record(title: &str, abstract_text: &str, keywords: &[&str]) -> Value {
    json!({
        "pmid": "38000001",
        "doi": "10.1000/epmc",
        "title": title,
        "abstractText": abstract_text,
        "electronicPublicationDate": "2024-03-02",
        "authorList": {
            "author": [
                {
                    "fullName": "Doe J",
                    "authorAffiliationDetailsList": {
                        "authorAffiliation": [{ "affiliation": "University of Somewhere" }]
                    }
                },
                { "fullName": "Roe R" }
            ]
        },
        "journalInfo": {
            "journal": { "title": "Journal of Visual Health" },
            "yearOfPublication": 2024,
            "monthOfPublication": 3
        },
        "keywordList": { "keyword": keywords }
    })
}
