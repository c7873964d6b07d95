//! Keyword matching: turns a paper into a report row with its match list.
//!
//! Each weighted keyword is searched case-insensitively in the API keywords
//! (`kw`), the title (`title`) and the abstract (`abstract`).

use litrank_common::Article;
use litrank_ranker::matches::format_matches;
use litrank_ranker::{Location, MatchEntry, WeightMap};

use crate::models::PaperMetadata;

pub struct KeywordMatcher {
    weights: WeightMap,
    targets: Vec<String>,
}

impl KeywordMatcher {
    pub fn new(weights: WeightMap, targets: Vec<String>) -> Self {
        let targets = targets.into_iter().map(|t| t.to_lowercase()).collect();
        Self { weights, targets }
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// Matches for every weighted keyword found in the paper, in keyword order.
    pub fn match_paper(&self, paper: &PaperMetadata) -> Vec<MatchEntry> {
        let title = paper.title.to_lowercase();
        let abstract_text = paper.abstract_text.to_lowercase();
        let api_keywords: Vec<String> = paper.keywords.iter().map(|k| k.to_lowercase()).collect();

        self.weights
            .keywords()
            .filter_map(|keyword| {
                let needle = keyword.to_lowercase();
                let mut entry = MatchEntry::new(keyword, Vec::<Location>::new());
                if api_keywords.iter().any(|k| k.contains(&needle)) {
                    entry.push_location(Location::Keywords);
                }
                if title.contains(&needle) {
                    entry.push_location(Location::Title);
                }
                if abstract_text.contains(&needle) {
                    entry.push_location(Location::Abstract);
                }
                (!entry.locations.is_empty()).then_some(entry)
            })
            .collect()
    }

    /// Stored report score: every location hit adds the keyword weight
    /// times that location's multiplier, rounded to 2 decimals.
    pub fn ingestion_score(&self, entries: &[MatchEntry]) -> f64 {
        let total: f64 = entries
            .iter()
            .map(|e| {
                let hits: f64 = e.locations.iter().map(Location::multiplier).sum();
                self.weights.get(&e.keyword) * hits
            })
            .sum();
        (total * 100.0).round() / 100.0
    }

    /// Build the report row, scored with the initial weights.
    pub fn to_article(&self, paper: &PaperMetadata) -> Article {
        let entries = self.match_paper(paper);
        let score = self.ingestion_score(&entries);
        Article {
            pmid: paper.pmid.clone().unwrap_or_default(),
            title: paper.title.clone(),
            abstract_text: paper.abstract_text.clone(),
            authors: paper.authors_joined(),
            first_author_affiliation: paper.first_author_affiliation(),
            journal: paper.journal.clone(),
            pub_date: paper.pub_date.clone(),
            doi: paper.doi.clone(),
            api_keywords: paper.keywords_joined(),
            matched_keywords: format_matches(&entries),
            score: Some(score),
            fetch_start_date: None,
            fetch_end_date: None,
        }
    }

    /// True when a target keyword occurs in the article's match list.
    pub fn is_target(&self, article: &Article) -> bool {
        let matched = article.matched_keywords.to_lowercase();
        self.targets.iter().any(|t| matched.contains(t.as_str()))
    }

    /// Rows for all target papers, highest score first.
    pub fn rank_papers(&self, papers: &[PaperMetadata]) -> Vec<Article> {
        let mut articles: Vec<Article> = papers
            .iter()
            .map(|p| self.to_article(p))
            .filter(|a| self.is_target(a))
            .collect();
        articles.sort_by(|a, b| {
            b.score
                .unwrap_or(0.0)
                .partial_cmp(&a.score.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn paper(title: &str, abstract_text: &str, keywords: &[&str]) -> PaperMetadata {
        PaperMetadata {
            title: title.into(),
            abstract_text: abstract_text.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            authors: vec![Author { name: "Doe J".into(), affiliation: Some("Uni".into()) }],
            ..Default::default()
        }
    }

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(
            WeightMap::from_iter([("Visual Analytics", 5.0), ("dashboard", 2.0)]),
            vec!["visual analytics".into()],
        )
    }

    #[test]
    fn test_locations_case_insensitive() {
        let p = paper(
            "A DASHBOARD for visual analytics",
            "We built a dashboard.",
            &["Visual analytics in healthcare"],
        );
        let raw = format_matches(&matcher().match_paper(&p));
        assert_eq!(raw, "Visual Analytics(kw,title); dashboard(title,abstract)");
    }

    #[test]
    fn test_article_score_sums_location_hits() {
        let p = paper("visual analytics", "dashboard", &[]);
        let a = matcher().to_article(&p);
        // 5.0 * 0.8 + 2.0 * 0.5
        assert_eq!(a.score, Some(5.0));
        assert_eq!(a.authors, "Doe J");
        assert_eq!(a.first_author_affiliation, "Uni");

        // kw + title + abstract: 5.0 + 4.0 + 2.5
        let everywhere = paper("visual analytics", "more visual analytics", &["visual analytics"]);
        let a = matcher().to_article(&everywhere);
        assert_eq!(a.matched_keywords, "Visual Analytics(kw,title,abstract)");
        assert_eq!(a.score, Some(11.5));
    }

    #[test]
    fn test_non_target_papers_dropped_and_sorted() {
        let papers = vec![
            paper("dashboard only", "", &[]),
            paper("", "visual analytics", &[]),
            paper("visual analytics", "", &["visual analytics"]),
        ];
        let ranked = matcher().rank_papers(&papers);
        let scores: Vec<_> = ranked.iter().map(|a| a.score.unwrap()).collect();
        // title + kw: 5.0 * 0.8 + 5.0; abstract only: 5.0 * 0.5
        assert_eq!(scores, vec![9.0, 2.5]);
    }
}
