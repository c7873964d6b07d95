//! Weekly report files on disk: write, read back, combine and catalogue.

use std::path::Path;

use chrono::NaiveDate;
use litrank_ingestion::reports::{catalogue, combine_reports, read_report, write_report};
use litrank_test_utils::{sample_articles, ArticleBuilder};
use pretty_assertions::assert_eq;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write(dir: &Path, name: &str, n: usize) {
    let articles: Vec<_> = (0..n)
        .map(|i| ArticleBuilder::new(&format!("{name} #{i}")).matches("x(kw)").build())
        .collect();
    write_report(&dir.join(name), &articles).unwrap();
}

#[test]
fn test_report_survives_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/epmc_2023-01-01_to_2023-01-07.csv");
    let mut articles = sample_articles();
    articles[0].score = Some(6.6);
    articles[0].abstract_text = "Line one, with a comma\nand \"quotes\"".into();

    write_report(&path, &articles).unwrap();
    let back = read_report(&path).unwrap();

    assert_eq!(back, articles);
    assert_eq!(back[1].doi, None);
}

#[test]
fn test_combine_tags_fetch_window() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "epmc_2025-01-08_to_2025-01-14.csv", 1);
    write(dir.path(), "epmc_2025-01-01_to_2025-01-07.csv", 2);
    write(dir.path(), "epmc_undated.csv", 5);
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let combined = combine_reports(dir.path()).unwrap();
    assert_eq!(combined.articles.len(), 3);
    assert_eq!(combined.articles[0].fetch_start_date.as_deref(), Some("2025-01-01"));
    assert_eq!(combined.articles[2].fetch_end_date.as_deref(), Some("2025-01-14"));
    assert_eq!(combined.describe_range(), "2025-01-01 to 2025-01-14");
}

#[test]
fn test_catalogue_groups_by_end_month() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "epmc_2024-12-25_to_2024-12-31.csv", 1);
    write(dir.path(), "epmc_2024-12-29_to_2025-01-04.csv", 2);
    write(dir.path(), "epmc_2025-01-05_to_2025-01-11.csv", 3);

    let groups = catalogue(dir.path()).unwrap();
    let shape: Vec<(String, Vec<(NaiveDate, usize)>)> = groups
        .iter()
        .map(|g| (g.label.clone(), g.reports.iter().map(|r| (r.start, r.article_count)).collect()))
        .collect();

    assert_eq!(
        shape,
        vec![
            ("January 2025".to_string(), vec![(ymd(2025, 1, 5), 3), (ymd(2024, 12, 29), 2)]),
            ("December 2024".to_string(), vec![(ymd(2024, 12, 25), 1)]),
        ]
    );
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(combine_reports(&dir.path().join("nope")).is_err());
}
