//! Per-article keyword score.
//!
//! S(a) = Σ w(k) × max(m(l) for l in locations(k))
//! over the entries of the article's matched-keywords string.

use litrank_common::Article;
use serde::Serialize;

use crate::matches::{parse_matches, MatchEntry};
use crate::weights::WeightMap;

/// An article paired with the score computed for the current weights.
/// The article itself is borrowed untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle<'a> {
    pub article: &'a Article,
    pub score: f64,
}

/// Sum of weighted multipliers for already-parsed entries.
pub fn score_entries(entries: &[MatchEntry], weights: &WeightMap) -> f64 {
    entries
        .iter()
        .map(|e| weights.get(&e.keyword) * e.multiplier())
        .sum()
}

pub fn score_article(article: &Article, weights: &WeightMap) -> f64 {
    score_entries(&parse_matches(&article.matched_keywords), weights)
}

pub fn score_articles<'a, I>(articles: I, weights: &WeightMap) -> Vec<ScoredArticle<'a>>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles
        .into_iter()
        .map(|article| ScoredArticle { article, score: score_article(article, weights) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(matches: &str) -> Article {
        Article { matched_keywords: matches.to_string(), ..Default::default() }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn test_keyword_location_full_weight() {
        let w = WeightMap::from_iter([("x", 2.0)]);
        assert_close(score_article(&article("x(kw)"), &w), 2.0);
    }

    #[test]
    fn test_title_location() {
        let w = WeightMap::from_iter([("x", 2.0)]);
        assert_close(score_article(&article("x(title)"), &w), 1.6);
    }

    #[test]
    fn test_best_location_wins() {
        let w = WeightMap::from_iter([("x", 2.0)]);
        assert_close(score_article(&article("x(abstract,kw)"), &w), 2.0);
        assert_close(score_article(&article("x(kw,abstract)"), &w), 2.0);
    }

    #[test]
    fn test_sum_over_keywords() {
        let w = WeightMap::from_iter([("a", 4.0), ("b", 2.0)]);
        // 4.0 * 0.8 + 2.0 * 0.5
        assert_close(score_article(&article("a(title); b(abstract)"), &w), 4.2);
    }

    #[test]
    fn test_unknown_keyword_and_malformed_contribute_zero() {
        let w = WeightMap::from_iter([("a", 4.0)]);
        assert_close(score_article(&article("zzz(kw); a; a(kw"), &w), 0.0);
    }

    #[test]
    fn test_scores_non_negative() {
        let w = WeightMap::from_iter([("a", 0.0), ("b", 10.0), ("c", 3.3)]);
        let samples = [
            "", "a(kw)", "b(other)", "c(abstract,title); b(kw)", "junk;;(", "a(kw); a(title)",
        ];
        for s in samples {
            assert!(score_article(&article(s), &w) >= 0.0, "negative score for {s:?}");
        }
    }

    #[test]
    fn test_score_articles_keeps_input_order() {
        let w = WeightMap::from_iter([("a", 1.0)]);
        let articles = vec![article("a(abstract)"), article("a(kw)")];
        let scored = score_articles(&articles, &w);
        assert_eq!(scored.len(), 2);
        assert_close(scored[0].score, 0.5);
        assert_close(scored[1].score, 1.0);
        assert!(std::ptr::eq(scored[0].article, &articles[0]));
    }
}
