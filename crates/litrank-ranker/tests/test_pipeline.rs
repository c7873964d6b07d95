//! End-to-end ranking over a small corpus: score → filter → sort.

use chrono::NaiveDate;
use litrank_ranker::{DateRange, RankerState, SortField, TimePreset, ViewMode, WeightMap};
use litrank_test_utils::sample_articles;
use pretty_assertions::assert_eq;

fn weights() -> WeightMap {
    WeightMap::from_iter([("visual analytics", 5.0), ("dashboard", 2.0), ("visualization", 3.0)])
}

fn titles(state: &RankerState) -> Vec<String> {
    state.view().rows.iter().map(|r| r.article.title.clone()).collect()
}

#[test]
fn test_default_ranking() {
    let state = RankerState::new(sample_articles(), weights(), ViewMode::Aggregate);
    let view = state.view();
    let scores: Vec<String> = view.rows.iter().map(|r| format!("{:.2}", r.score)).collect();
    // 5*1.0 + 2*0.8 | 5*1.0 | 3*1.0 + 2*0.5 | 5*0.5
    assert_eq!(scores, vec!["6.60", "5.00", "4.00", "2.50"]);
    assert_eq!(
        titles(&state),
        vec![
            "Dashboards for ICU triage",
            "Preprint without a date",
            "Interactive EHR timelines",
            "Cohort exploration at scale",
        ]
    );
}

#[test]
fn test_january_filter_then_journal_sort() {
    let jan = DateRange::parse("2023-01-01", "2023-01-31").unwrap();
    let state = RankerState::new(sample_articles(), weights(), ViewMode::Aggregate)
        .with_date_range(jan)
        .with_sort_click(SortField::Journal)
        .with_sort_click(SortField::Journal);

    assert_eq!(
        titles(&state),
        vec!["Dashboards for ICU triage", "Interactive EHR timelines"]
    );
    let view = state.view();
    assert_eq!(view.undated_excluded, 1);
    assert_eq!(
        view.status.to_string(),
        "Showing 2 articles from January 1, 2023 to January 31, 2023"
    );
}

#[test]
fn test_zero_weights_tie_everything_in_input_order() {
    let zero = WeightMap::from_iter([("visual analytics", 0.0), ("dashboard", 0.0), ("visualization", 0.0)]);
    let articles = sample_articles();
    let expected: Vec<String> = articles.iter().map(|a| a.title.clone()).collect();
    let state = RankerState::new(articles, zero, ViewMode::Period);
    assert_eq!(titles(&state), expected);
}

#[test]
fn test_all_preset_restores_full_list() {
    let today = NaiveDate::from_ymd_opt(2023, 2, 10).unwrap();
    let state = RankerState::new(sample_articles(), weights(), ViewMode::Aggregate)
        .with_preset(TimePreset::ThisMonth, today);
    assert_eq!(titles(&state), vec!["Cohort exploration at scale"]);

    let state = state.with_preset(TimePreset::All, today);
    assert_eq!(state.view().rows.len(), 4);
    assert_eq!(state.view().status.to_string(), "Showing all 4 articles");
}
