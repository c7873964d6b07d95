//! Publication-date filtering and the preset time ranges.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use litrank_common::{LitrankError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::scorer::ScoredArticle;

/// Inclusive date range. The end bound covers its whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a pair of `YYYY-MM-DD` bounds. Two blank bounds mean "no range".
    pub fn parse(start: &str, end: &str) -> Result<Option<Self>> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() && end.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::new(parse_day(start)?, parse_day(end)?)))
    }

    fn lower(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    fn upper(&self) -> NaiveDateTime {
        let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.end.and_time(last_instant)
    }

    pub fn contains(&self, when: NaiveDateTime) -> bool {
        when >= self.lower() && when <= self.upper()
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| LitrankError::InvalidDate(s.to_string()))
}

/// Parse a stored publication date.
///
/// Accepts full timestamps, `YYYY-MM-DD`, and the partial `YYYY-MM` / `YYYY`
/// forms some journals report (read as the first day of the period).
pub fn parse_pub_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    let day = match raw.len() {
        10 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        4 => NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok(),
        _ => None,
    };
    day.map(|d| d.and_time(NaiveTime::MIN))
}

/// Result of applying a date range.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub kept: Vec<ScoredArticle<'a>>,
    /// Articles dropped because their publication date could not be read.
    pub undated: usize,
}

/// Keep the articles published within `range`; `None` keeps everything.
/// Articles without a readable date are dropped while a range is active.
pub fn filter_by_date<'a>(
    articles: Vec<ScoredArticle<'a>>,
    range: Option<&DateRange>,
) -> FilterOutcome<'a> {
    let Some(range) = range else {
        return FilterOutcome { kept: articles, undated: 0 };
    };

    let total = articles.len();
    let mut undated = 0;
    let kept: Vec<_> = articles
        .into_iter()
        .filter(|s| match parse_pub_date(&s.article.pub_date) {
            Some(when) => range.contains(when),
            None => {
                undated += 1;
                false
            }
        })
        .collect();

    debug!(total, kept = kept.len(), undated, start = %range.start, end = %range.end, "Date filter applied");
    FilterOutcome { kept, undated }
}

/// Quick-pick ranges offered next to the custom date inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePreset {
    /// The seven days up to and including today
    Week,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    All,
}

impl TimePreset {
    pub const ALL: [TimePreset; 6] = [
        TimePreset::Week,
        TimePreset::ThisMonth,
        TimePreset::LastMonth,
        TimePreset::ThisYear,
        TimePreset::LastYear,
        TimePreset::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePreset::Week      => "week",
            TimePreset::ThisMonth => "thisMonth",
            TimePreset::LastMonth => "lastMonth",
            TimePreset::ThisYear  => "thisYear",
            TimePreset::LastYear  => "lastYear",
            TimePreset::All       => "all",
        }
    }

    /// Concrete range for this preset relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        let year = today.year();
        match self {
            TimePreset::Week => Some(DateRange::new(today - Duration::days(7), today)),
            TimePreset::ThisMonth => {
                let first = first_of_month(year, today.month())?;
                Some(DateRange::new(first, last_of_month(first)?))
            }
            TimePreset::LastMonth => {
                let (y, m) = if today.month() == 1 { (year - 1, 12) } else { (year, today.month() - 1) };
                let first = first_of_month(y, m)?;
                Some(DateRange::new(first, last_of_month(first)?))
            }
            TimePreset::ThisYear => Some(DateRange::new(
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            TimePreset::LastYear => Some(DateRange::new(
                NaiveDate::from_ymd_opt(year - 1, 1, 1)?,
                NaiveDate::from_ymd_opt(year - 1, 12, 31)?,
            )),
            TimePreset::All => None,
        }
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    next.pred_opt()
}

impl fmt::Display for TimePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePreset {
    type Err = LitrankError;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalised.as_str() {
            "week" | "last7days" => Ok(TimePreset::Week),
            "thismonth"          => Ok(TimePreset::ThisMonth),
            "lastmonth"          => Ok(TimePreset::LastMonth),
            "thisyear"           => Ok(TimePreset::ThisYear),
            "lastyear"           => Ok(TimePreset::LastYear),
            "all" | "alltime"    => Ok(TimePreset::All),
            _ => Err(LitrankError::UnknownPreset(s.to_string())),
        }
    }
}
