//! Application state for the ranked article table.
//!
//! Every user action is a pure `RankerState -> RankerState` transformation;
//! [`RankerState::view`] runs score → filter → sort over the current state.

use chrono::NaiveDate;
use litrank_common::{Article, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::filter::{filter_by_date, DateRange, TimePreset};
use crate::scorer::{score_articles, ScoredArticle};
use crate::sorter::{SortField, SortState};
use crate::weights::WeightMap;

/// Which article set the state is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// A single weekly report; date filtering does not apply.
    Period,
    /// All reports combined; date filtering is available.
    Aggregate,
}

#[derive(Debug, Clone)]
pub struct RankerState {
    articles: Vec<Article>,
    weights: WeightMap,
    sort: SortState,
    date_range: Option<DateRange>,
    preset: Option<TimePreset>,
    mode: ViewMode,
}

impl RankerState {
    pub fn new(articles: Vec<Article>, weights: WeightMap, mode: ViewMode) -> Self {
        let preset = (mode == ViewMode::Aggregate).then_some(TimePreset::All);
        Self {
            articles,
            weights,
            sort: SortState::default(),
            date_range: None,
            preset,
            mode,
        }
    }

    pub fn articles(&self) -> &[Article] { &self.articles }
    pub fn weights(&self) -> &WeightMap { &self.weights }
    pub fn sort(&self) -> SortState { self.sort }
    pub fn date_range(&self) -> Option<&DateRange> { self.date_range.as_ref() }
    pub fn preset(&self) -> Option<TimePreset> { self.preset }
    pub fn mode(&self) -> ViewMode { self.mode }

    pub fn with_weight(mut self, keyword: &str, value: f64) -> Result<Self> {
        let stored = self.weights.set(keyword, value)?;
        debug!(keyword, requested = value, stored, "Weight updated");
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_sort_click(mut self, field: SortField) -> Self {
        self.sort = self.sort.clicked(field);
        debug!(field = %self.sort.field, direction = self.sort.direction.as_str(), "Sort changed");
        self
    }

    /// Set a custom range. Ignored outside the aggregate view.
    pub fn with_date_range(mut self, range: Option<DateRange>) -> Self {
        if self.mode != ViewMode::Aggregate {
            debug!("Date range ignored for a single-period view");
            return self;
        }
        self.date_range = range;
        self.preset = if range.is_none() { Some(TimePreset::All) } else { None };
        self
    }

    /// Apply a preset relative to `today`. Ignored outside the aggregate view.
    pub fn with_preset(self, preset: TimePreset, today: NaiveDate) -> Self {
        if self.mode != ViewMode::Aggregate {
            return self;
        }
        let mut next = self.with_date_range(preset.resolve(today));
        next.preset = Some(preset);
        next
    }

    /// Full recomputation of the visible table.
    pub fn view(&self) -> View<'_> {
        let scored = score_articles(&self.articles, &self.weights);
        let range = match self.mode {
            ViewMode::Aggregate => self.date_range.as_ref(),
            ViewMode::Period => None,
        };
        let outcome = filter_by_date(scored, range);
        let mut rows = outcome.kept;
        self.sort.sort(&mut rows);

        let status = StatusLine { visible: rows.len(), range: range.copied() };
        View { rows, status, undated_excluded: outcome.undated, sort: self.sort }
    }
}

/// One render of the table.
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    pub rows: Vec<ScoredArticle<'a>>,
    pub status: StatusLine,
    pub undated_excluded: usize,
    pub sort: SortState,
}

/// Summary shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub visible: usize,
    pub range: Option<DateRange>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(r) => write!(
                f,
                "Showing {} articles from {} to {}",
                self.visible,
                r.start.format("%B %-d, %Y"),
                r.end.format("%B %-d, %Y"),
            ),
            None => write!(f, "Showing all {} articles", self.visible),
        }
    }
}
