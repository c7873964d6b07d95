//! Weekly report CSV files.
//!
//! Reports are named `epmc_<start>_to_<end>.csv` after the fetch window.
//! The aggregate view combines every such file in a directory.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use litrank_common::{Article, LitrankError, Result};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub const REPORT_HEADER: [&str; 11] = [
    "pmid",
    "title",
    "abstract",
    "authors",
    "first_author_affiliation",
    "journal",
    "pub_date",
    "doi",
    "score",
    "matched_keywords",
    "api_keywords",
];

lazy_static! {
    static ref RANGE_RE: Regex =
        Regex::new(r"epmc_(\d{4}-\d{2}-\d{2})_to_(\d{4}-\d{2}-\d{2})").expect("valid regex");
}

/// Fetch window encoded in a report or dump file name.
pub fn parse_report_range(file_name: &str) -> Option<(NaiveDate, NaiveDate)> {
    let caps = RANGE_RE.captures(file_name)?;
    let start = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").ok()?;
    Some((start, end))
}

// ── Read / write ─────────────────────────────────────────────────────────────

#[instrument(skip(articles), fields(count = articles.len()))]
pub fn write_report(path: &Path, articles: &[Article]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(REPORT_HEADER)?;
    for a in articles {
        let score = a.score.map(|s| s.to_string()).unwrap_or_default();
        writer.write_record([
            a.pmid.as_str(),
            a.title.as_str(),
            a.abstract_text.as_str(),
            a.authors.as_str(),
            a.first_author_affiliation.as_str(),
            a.journal.as_str(),
            a.pub_date.as_str(),
            a.doi.as_deref().unwrap_or(""),
            score.as_str(),
            a.matched_keywords.as_str(),
            a.api_keywords.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[instrument]
pub fn read_report(path: &Path) -> Result<Vec<Article>> {
    let mut reader = csv::Reader::from_path(path)?;
    let articles = reader
        .deserialize::<Article>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(count = articles.len(), "Report loaded");
    Ok(articles)
}

/// Files in `dir` whose name starts with `prefix` and has extension `ext`, sorted by name.
pub fn list_files(dir: &Path, prefix: &str, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LitrankError::Report(format!("Not a directory: {}", dir.display())));
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension().and_then(|e| e.to_str()) == Some(ext)
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    files.sort();
    Ok(files)
}

// ── Aggregate ────────────────────────────────────────────────────────────────

/// All weekly reports of a directory combined into one article list.
#[derive(Debug, Clone, Default)]
pub struct CombinedReports {
    pub articles: Vec<Article>,
    /// Distinct fetch windows, sorted.
    pub ranges: Vec<(NaiveDate, NaiveDate)>,
}

impl CombinedReports {
    /// Earliest start to latest end over all reports.
    pub fn overall_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.ranges.iter().map(|r| r.0).min()?;
        let end = self.ranges.iter().map(|r| r.1).max()?;
        Some((start, end))
    }

    pub fn describe_range(&self) -> String {
        match self.overall_range() {
            Some((s, e)) => format!("{} to {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
            None => "No date range available".to_string(),
        }
    }
}

/// Combine every `epmc_*.csv` in `dir`, tagging articles with their fetch window.
/// Files without a window in their name are skipped.
#[instrument]
pub fn combine_reports(dir: &Path) -> Result<CombinedReports> {
    let mut combined = CombinedReports::default();

    for path in list_files(dir, "epmc_", "csv")? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some((start, end)) = parse_report_range(name) else {
            warn!(file = name, "Skipping report without a date range in its name");
            continue;
        };
        let (start_s, end_s) = (start.format("%Y-%m-%d").to_string(), end.format("%Y-%m-%d").to_string());
        for mut article in read_report(&path)? {
            article.fetch_start_date = Some(start_s.clone());
            article.fetch_end_date = Some(end_s.clone());
            combined.articles.push(article);
        }
        if !combined.ranges.contains(&(start, end)) {
            combined.ranges.push((start, end));
        }
    }
    combined.ranges.sort();

    info!(
        articles = combined.articles.len(),
        reports = combined.ranges.len(),
        "Weekly reports combined"
    );
    Ok(combined)
}

// ── Catalogue ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub article_count: usize,
}

/// Reports whose fetch window ends in the same month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub month: String,
    /// e.g. "January 2025"
    pub label: String,
    pub reports: Vec<ReportEntry>,
}

/// Weekly reports grouped by end month, newest month first and newest
/// report first within a month.
#[instrument]
pub fn catalogue(dir: &Path) -> Result<Vec<MonthGroup>> {
    let mut entries = Vec::new();
    for path in list_files(dir, "epmc_", "csv")? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some((start, end)) = parse_report_range(name) else { continue };
        let article_count = match read_report(&path) {
            Ok(rows) => rows.len(),
            Err(e) => {
                warn!(file = name, error = %e, "Could not count report rows");
                0
            }
        };
        entries.push(ReportEntry { path, start, end, article_count });
    }

    entries.sort_by(|a, b| b.end.cmp(&a.end).then(b.start.cmp(&a.start)));

    let mut groups: Vec<MonthGroup> = Vec::new();
    for entry in entries {
        let month = entry.end.format("%Y-%m").to_string();
        match groups.last_mut() {
            Some(g) if g.month == month => g.reports.push(entry),
            _ => groups.push(MonthGroup {
                label: entry.end.format("%B %Y").to_string(),
                month,
                reports: vec![entry],
            }),
        }
    }
    for g in &mut groups {
        g.reports.sort_by(|a, b| b.start.cmp(&a.start));
    }
    Ok(groups)
}
